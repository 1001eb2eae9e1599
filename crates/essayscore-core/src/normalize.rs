//! Essay text normalization.
//!
//! The normalized form is what every downstream stage, including the
//! dataset lookup, treats as "the essay".

use serde_json::Value;

/// Whitespace for trimming purposes: Unicode whitespace plus the ASCII
/// separator controls `\x1c`..=`\x1f`.
pub fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Lowercase `text`, then strip leading and trailing whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().trim_matches(is_strippable).to_string()
}

/// Normalize an untyped input value. Anything other than a string becomes
/// the empty essay.
pub fn normalize_value(value: &Value) -> String {
    match value {
        Value::String(text) => normalize(text),
        _ => String::new(),
    }
}
