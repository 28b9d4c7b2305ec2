//! # Part-of-Speech Tagging
//!
//! Tags are Penn Treebank style strings (`DT`, `NN`, `VBD`, `PRP$`, ...)
//! taken from the LanguageTool English tagger shipped with `nlprule`. The
//! tagger sees the filtered tokens joined by spaces, so neighbouring words
//! take part in disambiguation, and its own tokens are mapped back onto ours.

use std::sync::OnceLock;

use log::{error, info};
use nlprule::{tokenizer_filename, Tokenizer};
use serde::Serialize;

/// Tag given to a token the tagger has no reading for.
pub const UNKNOWN_TAG: &str = "NN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedToken {
    pub text: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self { text: text.into(), tag: tag.into() }
    }
}

/// Assigns one tag per token, in order.
pub trait PosTagger: Send + Sync {
    fn tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>, String>;
}

static ENGLISH_TOKENIZER: OnceLock<Result<Tokenizer, String>> = OnceLock::new();

/// The English `nlprule` tokenizer, deserialized once per process from the
/// binary embedded at build time.
pub fn english_tokenizer() -> Result<&'static Tokenizer, String> {
    ENGLISH_TOKENIZER
        .get_or_init(|| {
            let mut bytes: &'static [u8] =
                include_bytes!(concat!(env!("OUT_DIR"), "/", tokenizer_filename!("en")));
            match Tokenizer::from_reader(&mut bytes) {
                Ok(tokenizer) => {
                    info!("Loaded English POS tagger");
                    Ok(tokenizer)
                }
                Err(e) => {
                    error!("Failed to load English POS tagger: {}", e);
                    Err(format!("failed to load POS tagger: {}", e))
                }
            }
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// Tagger backed by the embedded `nlprule` English model.
#[derive(Debug, Default, Clone, Copy)]
pub struct NlpruleTagger;

impl NlpruleTagger {
    pub fn new() -> Self {
        NlpruleTagger
    }
}

// Sentence boundary markers carry no word class.
fn is_word_tag(pos: &str) -> bool {
    !pos.is_empty() && !pos.starts_with("SENT_")
}

impl PosTagger for NlpruleTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>, String> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        let tokenizer = english_tokenizer()?;
        let text = tokens.join(" ");

        let mut pieces: Vec<(String, String)> = Vec::new();
        for sentence in tokenizer.pipe(&text) {
            for token in sentence.tokens() {
                let word = token.word();
                let piece = word.text().as_str();
                if piece.trim().is_empty() {
                    continue;
                }
                let tag = word
                    .tags()
                    .iter()
                    .map(|data| data.pos().as_str())
                    .find(|pos| is_word_tag(pos))
                    .unwrap_or(UNKNOWN_TAG);
                pieces.push((piece.to_string(), tag.to_string()));
            }
        }
        align(tokens, &pieces)
    }
}

/// Maps tagger tokens back onto `tokens`. A token the tagger split into
/// several pieces takes the tag of its last piece.
pub fn align(tokens: &[String], pieces: &[(String, String)]) -> Result<Vec<TaggedToken>, String> {
    let mut pieces = pieces.iter();
    let mut tagged = Vec::with_capacity(tokens.len());

    for token in tokens {
        let mut joined = String::new();
        let mut tag: &str = UNKNOWN_TAG;
        while joined.len() < token.len() {
            let (text, pos) = pieces
                .next()
                .ok_or_else(|| format!("tagger output ended before token '{}'", token))?;
            joined.push_str(text);
            tag = pos.as_str();
        }
        if joined != *token {
            return Err(format!("tagger token '{}' does not line up with '{}'", joined, token));
        }
        tagged.push(TaggedToken::new(token.as_str(), tag));
    }
    Ok(tagged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn pieces(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(t, p)| (t.to_string(), p.to_string())).collect()
    }

    fn tag_of(tagged: &[TaggedToken], word: &str) -> String {
        tagged.iter().find(|t| t.text == word).map(|t| t.tag.clone()).unwrap()
    }

    #[test]
    fn test_align_one_to_one() {
        let tagged = align(&strings(&["cat", "sat"]), &pieces(&[("cat", "NN"), ("sat", "VBD")]))
            .unwrap();
        assert_eq!(tagged, vec![TaggedToken::new("cat", "NN"), TaggedToken::new("sat", "VBD")]);
    }

    #[test]
    fn test_align_split_token_takes_last_piece_tag() {
        let tagged = align(
            &strings(&["cannot", "go"]),
            &pieces(&[("can", "MD"), ("not", "RB"), ("go", "VB")]),
        )
        .unwrap();
        assert_eq!(tagged[0], TaggedToken::new("cannot", "RB"));
        assert_eq!(tagged[1], TaggedToken::new("go", "VB"));
    }

    #[test]
    fn test_align_reports_mismatch_and_short_output() {
        let err = align(&strings(&["cat"]), &pieces(&[("dog", "NN")])).unwrap_err();
        assert!(err.contains("does not line up"));

        let err = align(&strings(&["cat", "mat"]), &pieces(&[("cat", "NN")])).unwrap_err();
        assert!(err.contains("'mat'"));
    }

    #[test]
    fn test_sentence_markers_are_not_word_tags() {
        assert!(is_word_tag("NN"));
        assert!(is_word_tag("PRP$"));
        assert!(!is_word_tag("SENT_START"));
        assert!(!is_word_tag("SENT_END"));
        assert!(!is_word_tag(""));
    }

    #[test]
    fn test_empty_input_skips_the_model() {
        assert!(NlpruleTagger::new().tag(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_tags_one_per_token_in_order() {
        let tokens = strings(&["The", "cat", "sat", "on", "the", "mat"]);
        let tagged = NlpruleTagger::new().tag(&tokens).unwrap();
        let texts: Vec<&str> = tagged.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["The", "cat", "sat", "on", "the", "mat"]);

        assert_eq!(Category::from_tag(&tagged[0].tag), Some(Category::Determiner));
        assert_eq!(Category::from_tag(&tagged[1].tag), Some(Category::Noun));
        assert_eq!(Category::from_tag(&tagged[2].tag), Some(Category::Verb));
        assert_eq!(Category::from_tag(&tagged[5].tag), Some(Category::Noun));
    }

    #[test]
    fn test_comparatives_are_adjectives_not_nouns() {
        let tagged = NlpruleTagger::new().tag(&strings(&["a", "bigger", "house"])).unwrap();
        assert!(tag_of(&tagged, "bigger").starts_with("JJ"));
        assert_eq!(Category::from_tag(&tag_of(&tagged, "bigger")), None);
    }

    #[test]
    fn test_tokenizer_is_loaded_once() {
        let first = english_tokenizer().unwrap() as *const Tokenizer;
        let second = english_tokenizer().unwrap() as *const Tokenizer;
        assert_eq!(first, second);
    }
}
