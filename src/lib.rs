// Text processing service: tokenization, POS groupings, a synthesized toy
// grammar, a UTF-8 round trip and word frequencies, served over HTTP.

pub mod api;
pub mod category;
pub mod config;
pub mod error;
pub mod freq;
pub mod grammar;
pub mod pipeline;
pub mod roundtrip;
pub mod stopwords;
pub mod tagger;
pub mod tokenizer;

pub use error::ProcessError;
pub use pipeline::{Analysis, AnalyzerOptions, TextAnalyzer};
