//! # Toy Grammar Synthesizer
//!
//! Builds a flat, CFG-notation rule list from the word categories found in a
//! text and validates it by parsing it back with [`Grammar::parse`].
//!
//! Rule order is fixed:
//! 1. `NP -> 'det' 'noun'` for every determiner × noun
//! 2. `VP -> 'verb' 'NP'` for every verb × noun
//! 3. `PP -> 'prep' 'NP'` for every preposition × noun
//! 4. `WORD -> 'word'` for every word made only of letters
//! 5. `S -> NP VP`
//!
//! The VP and PP lines grow with verbs × nouns and prepositions × nouns, so the
//! projected line count is checked against a limit before anything is built.
//!
//! `'NP'` in the VP/PP rules is emitted as a quoted terminal, not as a reference
//! to the NP non-terminal. Consumers of the grammar text depend on that exact
//! form, so it is kept as is.

use std::collections::{BTreeSet, HashSet};

use log::{debug, warn};
use unicode_categories::UnicodeCategories;

use super::cfg::{Grammar, GrammarError};
use crate::category::CategorySets;

pub const START_RULE: &str = "S -> NP VP";

/// Default cap on the number of rule lines in one synthesized grammar.
pub const DEFAULT_MAX_RULES: usize = 100_000;

#[derive(Debug, Clone)]
pub struct SynthesizedGrammar {
    rules: Vec<String>,
    grammar: Grammar,
}

impl SynthesizedGrammar {
    /// Rule lines in emission order.
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// The parsed form of [`rules`](Self::rules).
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn rule_text(&self) -> String {
        self.rules.join("\n")
    }
}

fn strip_apostrophes(word: &str) -> String {
    word.replace('\'', "")
}

// Letter categories only (Lu, Ll, Lt, Lm, Lo). Combining marks and letter-like
// numerals such as U+217B are excluded.
fn is_alphabetic_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_letter())
}

/// Upper bound on the number of lines [`build_rules`] would emit; `None` on overflow.
pub fn projected_rule_count(
    determiners: &BTreeSet<String>,
    nouns: &BTreeSet<String>,
    verbs: &BTreeSet<String>,
    prepositions: &BTreeSet<String>,
) -> Option<usize> {
    let heads = determiners.len().checked_add(verbs.len())?.checked_add(prepositions.len())?;
    let phrases = heads.checked_mul(nouns.len())?;
    let units = heads.checked_add(nouns.len())?;
    phrases.checked_add(units)?.checked_add(1)
}

/// Produces the rule lines without validating them.
pub fn build_rules(
    determiners: &BTreeSet<String>,
    nouns: &BTreeSet<String>,
    verbs: &BTreeSet<String>,
    prepositions: &BTreeSet<String>,
) -> Vec<String> {
    let mut rules = Vec::new();

    for det in determiners {
        let det = strip_apostrophes(det);
        for noun in nouns {
            rules.push(format!("NP -> '{}' '{}'", det, strip_apostrophes(noun)));
        }
    }
    for verb in verbs {
        let verb = strip_apostrophes(verb);
        for _ in nouns {
            rules.push(format!("VP -> '{}' 'NP'", verb));
        }
    }
    for prep in prepositions {
        let prep = strip_apostrophes(prep);
        for _ in nouns {
            rules.push(format!("PP -> '{}' 'NP'", prep));
        }
    }

    // A word tagged into two categories still gets a single unit production.
    let mut seen: HashSet<&str> = HashSet::new();
    let all_words = determiners
        .iter()
        .chain(nouns)
        .chain(verbs)
        .chain(prepositions);
    for word in all_words {
        if is_alphabetic_word(word) && seen.insert(word.as_str()) {
            rules.push(format!("{} -> '{}'", word.to_uppercase(), word));
        }
    }

    rules.push(START_RULE.to_string());
    rules
}

/// Builds the rule lines and parses them.
///
/// Fails with [`GrammarError::TooLarge`] when the projected line count exceeds
/// `max_rules`, before any line is built, and with a parse error when a line is
/// not valid CFG notation.
pub fn synthesize(
    determiners: &BTreeSet<String>,
    nouns: &BTreeSet<String>,
    verbs: &BTreeSet<String>,
    prepositions: &BTreeSet<String>,
    max_rules: usize,
) -> Result<SynthesizedGrammar, GrammarError> {
    let projected =
        projected_rule_count(determiners, nouns, verbs, prepositions).unwrap_or(usize::MAX);
    if projected > max_rules {
        warn!("Refusing to synthesize {} grammar rules (limit {})", projected, max_rules);
        return Err(GrammarError::TooLarge { rules: projected, limit: max_rules });
    }

    let rules = build_rules(determiners, nouns, verbs, prepositions);
    let grammar = Grammar::parse(&rules.join("\n"))?;
    debug!(
        "Synthesized grammar: {} rules, {} lexical units, {} undefined non-terminals",
        rules.len(),
        grammar.productions().iter().filter(|p| p.is_lexical_unit()).count(),
        grammar.undefined_nonterminals().len()
    );
    Ok(SynthesizedGrammar { rules, grammar })
}

/// Synthesizes from the four grammar-relevant categories. Pronouns are ignored.
pub fn synthesize_from_sets(
    sets: &CategorySets,
    max_rules: usize,
) -> Result<SynthesizedGrammar, GrammarError> {
    synthesize(&sets.determiners, &sets.nouns, &sets.verbs, &sets.prepositions, max_rules)
}
