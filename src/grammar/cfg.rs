//! # Context-Free Grammar Notation
//!
//! A small reader for the textual CFG notation used by the synthesizer:
//!
//! ```text
//! S -> NP VP
//! NP -> 'the' 'cat' | 'a' 'dog'
//! %start S
//! ```
//!
//! Terminals are single- or double-quoted, non-terminals are bare symbols.
//! Parsing is strict: any line that is not blank, a `#` comment, a `%start`
//! directive or a well-formed production is rejected with its line number.
//! Non-terminals that are referenced but never defined are allowed; they are
//! reported by [`Grammar::undefined_nonterminals`] rather than treated as errors.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    Parse { line: usize, message: String },
    NoProductions,
    /// The rule list would exceed the allowed number of lines.
    TooLarge { rules: usize, limit: usize },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::Parse { line, message } => {
                write!(f, "unable to parse grammar line {}: {}", line, message)
            }
            GrammarError::NoProductions => write!(f, "no productions found"),
            GrammarError::TooLarge { rules, limit } => {
                write!(f, "grammar would have {} rules, more than the limit of {}", rules, limit)
            }
        }
    }
}

impl std::error::Error for GrammarError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(t) if t.contains('\'') => write!(f, "\"{}\"", t),
            Symbol::Terminal(t) => write!(f, "'{}'", t),
            Symbol::Nonterminal(n) => f.write_str(n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub lhs: String,
    pub rhs: Vec<Symbol>,
}

impl Production {
    /// A production whose right-hand side is a single terminal.
    pub fn is_lexical_unit(&self) -> bool {
        self.rhs.len() == 1 && self.rhs[0].is_terminal()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for sym in &self.rhs {
            write!(f, " {}", sym)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    start: String,
    productions: Vec<Production>,
}

impl Grammar {
    pub fn parse(text: &str) -> Result<Self, GrammarError> {
        let mut start: Option<String> = None;
        let mut productions = Vec::new();

        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('%') {
                start = Some(parse_directive(line, line_no)?);
                continue;
            }
            productions.extend(parse_production(line, line_no)?);
        }

        if productions.is_empty() {
            return Err(GrammarError::NoProductions);
        }
        let start = match start {
            Some(s) => s,
            None => productions[0].lhs.clone(),
        };
        Ok(Self { start, productions })
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Every non-terminal mentioned anywhere in the grammar.
    pub fn nonterminals(&self) -> BTreeSet<&str> {
        let mut set = BTreeSet::new();
        for p in &self.productions {
            set.insert(p.lhs.as_str());
            for sym in &p.rhs {
                if let Symbol::Nonterminal(n) = sym {
                    set.insert(n.as_str());
                }
            }
        }
        set
    }

    /// Non-terminals used on a right-hand side (or as the start symbol) that
    /// have no production of their own.
    pub fn undefined_nonterminals(&self) -> BTreeSet<&str> {
        let defined: BTreeSet<&str> = self.productions.iter().map(|p| p.lhs.as_str()).collect();
        let mut undefined: BTreeSet<&str> = self
            .nonterminals()
            .into_iter()
            .filter(|n| !defined.contains(n))
            .collect();
        if !defined.contains(self.start.as_str()) {
            undefined.insert(self.start.as_str());
        }
        undefined
    }
}

impl FromStr for Grammar {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grammar::parse(s)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Grammar with {} productions (start state = {})",
            self.productions.len(),
            self.start
        )?;
        for p in &self.productions {
            write!(f, "\n    {}", p)?;
        }
        Ok(())
    }
}

fn is_nonterminal_start(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '/'
}

fn is_nonterminal_char(c: char) -> bool {
    is_nonterminal_start(c) || matches!(c, '^' | '<' | '>' | '-')
}

/// Reads a non-terminal starting at `pos`, returning it and the index just past it.
fn read_nonterminal(chars: &[char], pos: usize) -> Option<(String, usize)> {
    if pos >= chars.len() || !is_nonterminal_start(chars[pos]) {
        return None;
    }
    let mut end = pos + 1;
    while end < chars.len() && is_nonterminal_char(chars[end]) {
        end += 1;
    }
    Some((chars[pos..end].iter().collect(), end))
}

fn skip_whitespace(chars: &[char], mut pos: usize) -> usize {
    while pos < chars.len() && chars[pos].is_whitespace() {
        pos += 1;
    }
    pos
}

fn parse_directive(line: &str, line_no: usize) -> Result<String, GrammarError> {
    let mut parts = line.split_whitespace();
    let directive = parts.next().unwrap_or_default();
    if directive != "%start" {
        return Err(GrammarError::Parse {
            line: line_no,
            message: format!("unknown directive '{}'", directive),
        });
    }
    let symbol = parts.next().ok_or_else(|| GrammarError::Parse {
        line: line_no,
        message: "%start requires a symbol".to_string(),
    })?;
    let chars: Vec<char> = symbol.chars().collect();
    match read_nonterminal(&chars, 0) {
        Some((name, end)) if end == chars.len() && parts.next().is_none() => Ok(name),
        _ => Err(GrammarError::Parse {
            line: line_no,
            message: format!("invalid start symbol '{}'", symbol),
        }),
    }
}

fn parse_production(line: &str, line_no: usize) -> Result<Vec<Production>, GrammarError> {
    let err = |message: String| GrammarError::Parse { line: line_no, message };
    let chars: Vec<char> = line.chars().collect();

    let (lhs, mut pos) = read_nonterminal(&chars, 0)
        .ok_or_else(|| err(format!("expected a non-terminal at the start of '{}'", line)))?;

    pos = skip_whitespace(&chars, pos);
    if chars.get(pos) != Some(&'-') || chars.get(pos + 1) != Some(&'>') {
        return Err(err(format!("expected '->' after '{}'", lhs)));
    }
    pos += 2;

    let mut alternatives: Vec<Vec<Symbol>> = Vec::new();
    let mut current: Vec<Symbol> = Vec::new();
    loop {
        pos = skip_whitespace(&chars, pos);
        let Some(&c) = chars.get(pos) else {
            alternatives.push(current);
            break;
        };
        match c {
            '|' => {
                alternatives.push(std::mem::take(&mut current));
                pos += 1;
            }
            '\'' | '"' => {
                let close = chars[pos + 1..]
                    .iter()
                    .position(|&ch| ch == c)
                    .ok_or_else(|| {
                        err(format!("unterminated terminal starting at column {}", pos + 1))
                    })?;
                let terminal: String = chars[pos + 1..pos + 1 + close].iter().collect();
                current.push(Symbol::Terminal(terminal));
                pos += close + 2;
            }
            _ => {
                let (name, end) = read_nonterminal(&chars, pos)
                    .ok_or_else(|| {
                        err(format!("unexpected character '{}' at column {}", c, pos + 1))
                    })?;
                current.push(Symbol::Nonterminal(name));
                pos = end;
            }
        }
    }

    Ok(alternatives
        .into_iter()
        .map(|rhs| Production { lhs: lhs.clone(), rhs })
        .collect())
}
