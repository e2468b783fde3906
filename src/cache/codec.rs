//! Value Codec Module
//!
//! Converts cached values to and from the text stored by the backend.
//!
//! Values whose JSON form is a plain string are stored as the raw string;
//! everything else is stored as JSON. Decoding tries JSON first and falls
//! back to treating the stored text as a string value.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Encodes a value for storage.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    match serde_json::to_value(value)? {
        Value::String(raw) => Ok(raw),
        other => Ok(serde_json::to_string(&other)?),
    }
}

/// Decodes stored text back into `T`.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok(value),
        Err(json_err) => serde_json::from_value(Value::String(raw.to_string()))
            .map_err(|_| json_err.into()),
    }
}
