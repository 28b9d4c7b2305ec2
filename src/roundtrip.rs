use crate::error::ProcessError;

/// Result of encoding text to UTF-8 bytes and decoding it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTrip {
    pub encoded: Vec<u8>,
    pub decoded: String,
    pub is_same: bool,
}

impl RoundTrip {
    /// The encoded bytes rendered back as text for display.
    pub fn encoded_text(&self) -> Result<&str, ProcessError> {
        std::str::from_utf8(&self.encoded).map_err(|e| ProcessError::Encoding(e.to_string()))
    }
}

pub fn encode_decode(text: &str) -> Result<RoundTrip, ProcessError> {
    let encoded = text.as_bytes().to_vec();
    let decoded = String::from_utf8(encoded.clone())?;
    let is_same = decoded == text;
    Ok(RoundTrip { encoded, decoded, is_same })
}
