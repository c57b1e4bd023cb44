//! Custom serde helpers for node wire formats.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a `u32` that some nodes send as a bare number and others as
/// an array of per-asset numbers (`18` vs `[18, 6]`). The first entry wins.
pub fn u32_scalar_or_first<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid decimals: {}", n))),
        Value::Array(items) => match items.first() {
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| serde::de::Error::custom(format!("invalid decimals: {}", n))),
            _ => Err(serde::de::Error::custom("expected a number array")),
        },
        other => Err(serde::de::Error::custom(format!(
            "expected number or array, got {}",
            other
        ))),
    }
}

/// Same scalar-or-array leniency for optional strings (`"DOT"` vs `["DOT"]`).
pub fn string_scalar_or_first<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Array(items) => match items.into_iter().next() {
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(serde::de::Error::custom("expected a string array")),
            None => Ok(None),
        },
        Value::Null => Ok(None),
        other => Err(serde::de::Error::custom(format!(
            "expected string or array, got {}",
            other
        ))),
    }
}
