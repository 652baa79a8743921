//! Lenient field codecs for server payloads
//!
//! The server emits identifiers as numbers or strings depending on the
//! resource, and decimal columns as strings. Requests must omit optional
//! text fields that are blank instead of sending `""`.

use serde::de::{self, Deserializer};
use serde::Deserialize;

/// `skip_serializing_if` predicate: true for `None` and whitespace-only text.
#[must_use]
pub fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Accept `"42"`, `42` or `"6f1c…"` as an identifier.
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(s) => Ok(s),
        StringOrNumber::Integer(n) => Ok(n.to_string()),
        StringOrNumber::Float(f) => Ok(f.to_string()),
    }
}

/// Optional variant of [`id`].
pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "id")] String);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
}

/// Accept `12.5` or `"12.50"` as a monetary amount.
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(s) => s.trim().parse::<f64>().map_err(de::Error::custom),
        #[allow(clippy::cast_precision_loss)]
        StringOrNumber::Integer(n) => Ok(n as f64),
        StringOrNumber::Float(f) => Ok(f),
    }
}

/// Optional variant of [`amount`].
pub fn opt_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "amount")] f64);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
}

/// [`opt_amount`] that reads a missing or `null` value as zero.
pub fn amount_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_amount(deserializer)?.unwrap_or(0.0))
}
