//! Boundary coercion for user-entered numbers.
//!
//! Every amount in the dashboard is a whole, non-negative number of silver
//! or hearts. Raw input is normalized here before it reaches the state:
//! non-finite, negative or unparsable values become 0 and fractions are
//! truncated toward zero.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::errors::CoreError;

/// Coerce a raw numeric value to a non-negative whole amount.
pub fn sanitize_amount(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    if value >= u64::MAX as f64 {
        return u64::MAX;
    }
    value.trunc() as u64
}

/// Parse text from an input box, falling back to 0 on anything invalid.
pub fn parse_amount(text: &str) -> u64 {
    parse_amount_strict(text).unwrap_or(0)
}

/// Parse text from an input box, rejecting anything that is not a
/// finite, non-negative number. Empty input is rejected too.
pub fn parse_amount_strict(text: &str) -> Result<u64, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput("amount is empty".into()));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| CoreError::InvalidInput(format!("'{trimmed}' is not a number")))?;
    if !value.is_finite() {
        return Err(CoreError::InvalidInput(format!("'{trimmed}' is not finite")));
    }
    if value < 0.0 {
        return Err(CoreError::InvalidInput(format!("'{trimmed}' is negative")));
    }
    Ok(sanitize_amount(value))
}

/// Any JSON value that may sit where a stored amount is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAmount {
    Whole(u64),
    Negative(i64),
    Fractional(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Serde adapter for amounts read back from storage.
///
/// Applies the same coercion as the input path, so a stored `-5`, `1500.5`
/// or `"12"` loads as `0`, `1500` and `12` instead of failing the whole
/// snapshot. Values of any other JSON type load as 0.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StoredAmount::deserialize(deserializer)? {
        StoredAmount::Whole(value) => value,
        StoredAmount::Negative(_) => 0,
        StoredAmount::Fractional(value) => sanitize_amount(value),
        StoredAmount::Text(text) => parse_amount(&text),
        StoredAmount::Other(_) => 0,
    })
}
