//! Response normalization: pull the text out of a `generateContent` reply
//! and clean it up for display.

use serde_json::Value;

/// `candidates[0].content.parts[0].text`, if present and a string.
pub fn extract_text(body: &Value) -> Option<&str> {
    body.get("candidates")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(|p| p.get("text"))
        .and_then(Value::as_str)
}

/// Trim, strip one wrapping pair of double quotes, then trim again.
///
/// Quotes are removed only when both ends carry one; an unbalanced quote is
/// left alone. Returns `None` when nothing printable remains.
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let unquoted = strip_wrapping_quotes(trimmed);
    let text = unquoted.trim();
    if text.is_empty() { None } else { Some(text.to_owned()) }
}

fn strip_wrapping_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') { &s[1..s.len() - 1] } else { s }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
