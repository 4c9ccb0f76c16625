//! Line-oriented wire encoding for the progress stream.
//!
//! The HTTP consumer tells status updates and the final result apart by a
//! single rule: a line whose first character is `{` is the result JSON,
//! everything else is free-text status. That asymmetry lives here and only
//! here; upstream code deals in [`StreamEvent`] values and never reasons
//! about string prefixes.

use crate::features::debate::StreamEvent;
use serde_json::json;

/// Encode one event as a single wire line (no trailing newline).
///
/// Status lines are flattened to one line and are guaranteed not to begin
/// with `{`; the result line is a JSON object with exactly one key,
/// `content`.
pub fn encode_event(event: &StreamEvent) -> String {
    match event {
        StreamEvent::Status(text) => {
            let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if flat.starts_with('{') {
                format!("status: {flat}")
            } else {
                flat
            }
        }
        StreamEvent::Result(content) => json!({ "content": content }).to_string(),
    }
}

/// Encode a run failure as a terminal line. Never JSON, so it can never be
/// mistaken for a successful result.
pub fn encode_error(error: &anyhow::Error) -> String {
    let flat = format!("{error:#}")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    format!("error: {flat}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_status_is_a_single_plain_line() {
        let line = encode_event(&StreamEvent::Status(
            "Round 1: WRITER | Writes\nfirst draft".to_string(),
        ));
        assert_eq!(line, "Round 1: WRITER | Writes first draft");
        assert!(!line.starts_with('{'));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_status_never_starts_with_brace() {
        let line = encode_event(&StreamEvent::Status("{weird} status".to_string()));
        assert!(!line.starts_with('{'));
        assert!(line.contains("{weird} status"));
    }

    #[test]
    fn test_result_is_json_with_single_content_key() {
        let line = encode_event(&StreamEvent::Result("The final post.".to_string()));
        assert!(line.starts_with('{'));

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["content"], "The final post.");
    }

    #[test]
    fn test_result_escapes_embedded_newlines_and_quotes() {
        let content = "Line one.\nShe said \"hi\".";
        let line = encode_event(&StreamEvent::Result(content.to_string()));
        // Still one wire line
        assert!(!line.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["content"], content);
    }

    #[test]
    fn test_error_line_is_not_json() {
        let line = encode_error(&anyhow!("OpenAI API error: 429"));
        assert!(line.starts_with("error: "));
        assert!(!line.starts_with('{'));
        assert!(serde_json::from_str::<serde_json::Value>(&line).is_err());
    }
}
