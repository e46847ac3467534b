//! Scalar display rendering and the omit-if-identical text rule.

use serde_json::Value;

/// Render a raw scalar the way the host displays it when no separate
/// display text exists.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Keep the resolved display text only when it adds information over the
/// raw value. This is the single compaction rule shared by body fields
/// and sublist cells.
pub fn compact_text(value: &Value, text: &str) -> Option<String> {
    if display_text(value) == text {
        None
    } else {
        Some(text.to_string())
    }
}
