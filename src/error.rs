use std::fmt;

use crate::grammar::GrammarError;

/// Everything that can go wrong while processing a single piece of text.
///
/// The HTTP layer does not distinguish between the variants: any of them fails
/// the whole request and is reported with its message interpolated.
#[derive(Debug)]
pub enum ProcessError {
    Tokenization(String),
    Tagging(String),
    Synthesis(GrammarError),
    Encoding(String),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Tokenization(msg) => write!(f, "tokenization failed: {}", msg),
            ProcessError::Tagging(msg) => write!(f, "tagging failed: {}", msg),
            ProcessError::Synthesis(err) => write!(f, "grammar synthesis failed: {}", err),
            ProcessError::Encoding(msg) => write!(f, "encoding round trip failed: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Synthesis(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GrammarError> for ProcessError {
    fn from(err: GrammarError) -> ProcessError {
        ProcessError::Synthesis(err)
    }
}

impl From<std::string::FromUtf8Error> for ProcessError {
    fn from(err: std::string::FromUtf8Error) -> ProcessError {
        ProcessError::Encoding(err.to_string())
    }
}
