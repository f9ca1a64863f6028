//! Tolerant JSON extraction from free-text model output.
//!
//! Models asked for "ONLY valid JSON" still like to wrap it in prose or
//! Markdown fences. This module recovers the embedded object with a
//! deliberately cheap heuristic: strict parse first, then one retry on the
//! substring between the first `{` and the last `}`. No bracket balancing —
//! anything the retry cannot parse is treated as absent.

use serde_json::Value;

/// Parse `text` as JSON, tolerating surrounding prose.
///
/// Returns `None` when neither the full text nor the first-`{`-to-last-`}`
/// substring is valid JSON.
///
/// # Example
///
/// ```
/// use studyforge_llm::lenient::parse_json_lenient;
///
/// let raw = r#"Sure! {"mcqs": []} Hope that helps!"#;
/// let value = parse_json_lenient(raw).unwrap();
/// assert!(value.get("mcqs").is_some());
/// ```
pub fn parse_json_lenient(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}
