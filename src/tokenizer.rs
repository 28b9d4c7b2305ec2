use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

use crate::stopwords::is_stopword;

/// ASCII punctuation characters. A token is punctuation when it is a substring of this.
pub const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Word-level tokenizer: splits on whitespace and punctuation, each
/// punctuation character becoming its own token.
#[derive(Debug)]
pub struct WordTokenizer {
    pre_tokenizer: BertPreTokenizer,
}

impl WordTokenizer {
    pub fn new() -> Self {
        Self { pre_tokenizer: BertPreTokenizer }
    }

    pub fn tokenize(&self, text: &str) -> Result<Vec<String>, String> {
        let mut pretokenized = PreTokenizedString::from(text);
        self.pre_tokenizer
            .pre_tokenize(&mut pretokenized)
            .map_err(|e| format!("Pre-tokenization failed for text '{}': {}", text, e))?;
        let tokens = pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Byte)
            .into_iter()
            .map(|(token, _, _)| token.to_string())
            .collect();
        Ok(tokens)
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_punctuation(token: &str) -> bool {
    !token.is_empty() && PUNCTUATION.contains(token)
}

/// Removes punctuation tokens and, when `remove_stopwords` is set, tokens whose
/// lowercase form is an English stopword. Order is preserved.
pub fn filter_tokens(tokens: Vec<String>, remove_stopwords: bool) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|token| !is_punctuation(token))
        .filter(|token| !remove_stopwords || !is_stopword(&token.to_lowercase()))
        .collect()
}
