//! # Text Analysis Pipeline
//!
//! Runs one piece of text through every stage and collects the results:
//!
//! text → tokens → filtered tokens → tags → category sets → grammar,
//! plus the UTF-8 round trip and the frequency distribution.
//!
//! A failure at any stage fails the whole analysis; nothing partial is returned.

use log::debug;
use serde::Serialize;

use crate::category::CategorySets;
use crate::config::ServiceConfig;
use crate::error::ProcessError;
use crate::freq::{FreqDist, MostCommon, DEFAULT_TOP_N};
use crate::grammar::{synthesize_from_sets, DEFAULT_MAX_RULES};
use crate::roundtrip::encode_decode;
use crate::tagger::{NlpruleTagger, PosTagger, TaggedToken};
use crate::tokenizer::{filter_tokens, WordTokenizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerOptions {
    pub remove_stopwords: bool,
    pub top_n: usize,
    pub max_grammar_rules: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            remove_stopwords: true,
            top_n: DEFAULT_TOP_N,
            max_grammar_rules: DEFAULT_MAX_RULES,
        }
    }
}

impl From<&ServiceConfig> for AnalyzerOptions {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            remove_stopwords: config.remove_stopwords,
            top_n: config.top_n,
            max_grammar_rules: config.max_grammar_rules,
        }
    }
}

/// Everything computed for one input text. Serializes to the `response`
/// object of the HTTP API.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub text: String,
    pub tokens: Vec<String>,
    pub pos_tags: CategorySets,
    pub grammar: String,
    pub encoded_text: String,
    pub decoded_text: String,
    pub is_same_text: bool,
    pub word_freq_dist: MostCommon,
    #[serde(skip)]
    pub tagged: Vec<TaggedToken>,
}

pub struct TextAnalyzer {
    tokenizer: WordTokenizer,
    tagger: Box<dyn PosTagger>,
    options: AnalyzerOptions,
}

impl TextAnalyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self::with_tagger(options, Box::new(NlpruleTagger::new()))
    }

    pub fn with_tagger(options: AnalyzerOptions, tagger: Box<dyn PosTagger>) -> Self {
        Self { tokenizer: WordTokenizer::new(), tagger, options }
    }

    pub fn analyze(&self, text: &str) -> Result<Analysis, ProcessError> {
        let raw_tokens = self.tokenizer.tokenize(text).map_err(ProcessError::Tokenization)?;
        let tokens = filter_tokens(raw_tokens, self.options.remove_stopwords);

        let tagged = self.tagger.tag(&tokens).map_err(ProcessError::Tagging)?;
        if tagged.len() != tokens.len() {
            return Err(ProcessError::Tagging(format!(
                "tagger returned {} tags for {} tokens",
                tagged.len(),
                tokens.len()
            )));
        }
        let pos_tags = CategorySets::from_tagged(&tagged);

        let grammar = synthesize_from_sets(&pos_tags, self.options.max_grammar_rules)?;
        let round_trip = encode_decode(text)?;
        let freq = FreqDist::from_tokens(&tokens);
        let word_freq_dist = freq.most_common(self.options.top_n);

        debug!(
            "Analyzed {} bytes: {} tokens ({} distinct), {} grammar rules, {} frequency entries",
            text.len(),
            tokens.len(),
            freq.len(),
            grammar.rules().len(),
            word_freq_dist.entries().len()
        );

        Ok(Analysis {
            text: text.to_string(),
            tokens,
            pos_tags,
            grammar: grammar.rule_text(),
            encoded_text: round_trip.encoded_text()?.to_string(),
            decoded_text: round_trip.decoded,
            is_same_text: round_trip.is_same,
            word_freq_dist,
            tagged,
        })
    }
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerOptions::default())
    }
}
