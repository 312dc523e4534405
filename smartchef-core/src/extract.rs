//! Best-effort JSON extraction from free-form model output.
//!
//! Models wrap their JSON in prose or code fences. Everything from the first
//! `[` to the last `]` is taken as the candidate array; this is the only place
//! that knows about that convention.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::ExtractError;

/// First `[` through last `]`, across newlines.
static JSON_ARRAY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("Invalid JSON array regex"));

/// Locate the bracket-delimited array substring in `text`.
pub fn extract_json_array(text: &str) -> Option<&str> {
    JSON_ARRAY_REGEX.find(text).map(|m| m.as_str())
}

/// Extract and deserialize the array embedded in `text`.
pub fn parse_json_array<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, ExtractError> {
    let json = extract_json_array(text).ok_or(ExtractError::NoArray)?;
    serde_json::from_str(json).map_err(|e| ExtractError::InvalidJson(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_extract_ignores_prose() {
        let text = r#"prefix text [{"name":"X"}] suffix text"#;
        assert_eq!(extract_json_array(text), Some(r#"[{"name":"X"}]"#));
    }

    #[test]
    fn test_extract_from_code_fence() {
        let text = concat!(
            "Here you go!\n```json\n[\n",
            "  {\"name\": \"Soup\"},\n  {\"name\": \"Salad\"}\n",
            "]\n```\nEnjoy."
        );
        let values: Vec<Value> = parse_json_array(text).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1]["name"], "Salad");
    }

    #[test]
    fn test_extract_spans_nested_arrays() {
        let text = r#"[{"steps": ["a", "b"]}]"#;
        let values: Vec<Value> = parse_json_array(text).unwrap();
        assert_eq!(values[0]["steps"][1], "b");
    }

    #[test]
    fn test_no_array() {
        assert_eq!(extract_json_array("I couldn't think of anything {}"), None);
        assert_eq!(
            parse_json_array::<Value>("nothing here").unwrap_err(),
            ExtractError::NoArray
        );
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_json_array::<Value>("[{name: unquoted}]").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidJson(_)));
    }

    #[test]
    fn test_trailing_bracket_in_prose_breaks_parse() {
        // Greedy: runs to the last bracket in the text.
        let err = parse_json_array::<Value>(r#"[{"name":"X"}] see [1]"#).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidJson(_)));
    }
}
