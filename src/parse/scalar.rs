//! Best-effort string-to-scalar inference.
//!
//! Text-only formats (INI, XML) carry every value as a string; this module
//! gives them one shared typing policy. Formats with native types (JSON,
//! YAML) never pass through here.

use crate::tree::Value;

/// Infer a typed scalar from raw text: integer, then float, then boolean
/// word, else the original string.
pub fn infer(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::Float(f);
    }
    match raw.to_ascii_lowercase().as_str() {
        "yes" | "true" | "on" => Value::Bool(true),
        "no" | "false" | "off" => Value::Bool(false),
        _ => Value::Str(raw.to_string()),
    }
}

/// Apply [`infer`] to string values; sequences are inferred element-wise and
/// already-typed values pass through unchanged.
pub fn infer_value(value: Value) -> Value {
    match value {
        Value::Str(s) => infer(&s),
        Value::Seq(items) => Value::Seq(items.into_iter().map(infer_value).collect()),
        other => other,
    }
}
