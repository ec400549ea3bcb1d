//! JSON text/bytes → [`WireValue`].

use serde_json::Value;

use super::error::JsonError;
use crate::WireValue;

/// Parses a whole JSON document from text.
pub fn from_str(text: &str) -> Result<WireValue, JsonError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(WireValue::from(value))
}

/// Parses a whole JSON document from bytes. The input must be UTF-8.
pub fn from_slice(bytes: &[u8]) -> Result<WireValue, JsonError> {
    let text = std::str::from_utf8(bytes).map_err(|_| JsonError::InvalidUtf8)?;
    from_str(text)
}
