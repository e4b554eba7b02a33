//! Field deserializers for backend exports, where a value of the wrong type
//! degrades to a default instead of rejecting the whole snapshot.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Percentage in 0..=100. Fractions are rounded, out-of-range values clamped,
/// anything non-numeric becomes 0.
pub fn percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value)
        .map(|n| n.clamp(0.0, 100.0).round() as u8)
        .unwrap_or(0))
}

/// Non-negative counter. Negative or non-numeric values become 0.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value)
        .map(|n| n.clamp(0.0, f64::from(u32::MAX)) as u32)
        .unwrap_or(0))
}

/// Byte size. Negative or non-numeric values become 0.
pub fn size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value).map(|n| n.max(0.0) as u64).unwrap_or(0))
}

/// Text field. Numbers and booleans are stringified, null becomes empty.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}
