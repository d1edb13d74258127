//! Best-effort repair of raw model output before JSON parsing.
//!
//! Models are asked for a bare JSON list but routinely wrap it in prose
//! ("Here are your cards: ...") or stop one character early and drop the
//! closing brace of the last object. This module fixes exactly those two
//! problems and nothing else; whatever is still broken is left to the
//! lenient decoder in [`crate::decode`].

use std::sync::LazyLock;

use regex::Regex;

/// A closing quote, optional whitespace, then the final `]`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MISSING_BRACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""\s*\]$"#).expect("valid regex"));

/// Extract the JSON list from raw model output and close a dropped final brace.
///
/// Returns the input unchanged when there is no `[ ... ]` span to work on.
/// Never fails; the result may still be invalid JSON.
///
/// # Examples
/// ```
/// use flashcards_generator::sanitize::sanitize_response;
///
/// assert_eq!(
///     sanitize_response(r#"Sure! [{"question":"Q1","answer":"A1"}] Enjoy."#),
///     r#"[{"question":"Q1","answer":"A1"}]"#
/// );
/// assert_eq!(
///     sanitize_response(r#"[{"question":"Q1","answer":"A1"]"#),
///     r#"[{"question":"Q1","answer":"A1"}]"#
/// );
/// ```
pub fn sanitize_response(raw: &str) -> String {
    let Some(start) = raw.find('[') else {
        return raw.to_string();
    };
    let Some(end) = raw.rfind(']') else {
        return raw.to_string();
    };
    if end < start {
        return raw.to_string();
    }

    // Both delimiters are ASCII, so these offsets are char boundaries.
    let json_part = &raw[start..=end];

    let trimmed = json_part.trim();
    if MISSING_BRACE_PATTERN.is_match(trimmed) {
        if let Some(without_bracket) = trimmed.strip_suffix(']') {
            tracing::debug!("closing dropped brace on last flashcard object");
            return format!("{without_bracket}}}]");
        }
    }

    json_part.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_opening_bracket_returns_input() {
        let raw = "I could not generate any flashcards for this text.";
        assert_eq!(sanitize_response(raw), raw);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_response(""), "");
    }

    #[test]
    fn test_well_formed_list_unchanged() {
        let raw = r#"[{"question":"Q1","answer":"A1"}]"#;
        assert_eq!(sanitize_response(raw), raw);
    }

    #[test]
    fn test_truncated_without_closing_bracket_unchanged() {
        let raw = r#"[{"question":"Q1","answer":"A1""#;
        assert_eq!(sanitize_response(raw), raw);
    }

    #[test]
    fn test_missing_brace_is_closed() {
        assert_eq!(
            sanitize_response(r#"[{"question":"Q1","answer":"A1"]"#),
            r#"[{"question":"Q1","answer":"A1"}]"#
        );
    }

    #[test]
    fn test_missing_brace_with_whitespace_before_bracket() {
        assert_eq!(
            sanitize_response("[{\"question\":\"Q1\",\"answer\":\"A1\"\n  ]"),
            "[{\"question\":\"Q1\",\"answer\":\"A1\"\n  }]"
        );
    }

    #[test]
    fn test_surrounding_prose_is_stripped() {
        assert_eq!(
            sanitize_response(
                r#"Here are your cards: [{"question":"Q1","answer":"A1"}] Hope that helps!"#
            ),
            r#"[{"question":"Q1","answer":"A1"}]"#
        );
    }

    #[test]
    fn test_prose_and_missing_brace_together() {
        let raw = "Flashcards:\n[\n  {\"question\": \"Q1\", \"answer\": \"A1\"},\n  {\"question\": \"Q2\", \"answer\": \"A2\"\n]\nDone.";
        assert_eq!(
            sanitize_response(raw),
            "[\n  {\"question\": \"Q1\", \"answer\": \"A1\"},\n  {\"question\": \"Q2\", \"answer\": \"A2\"\n}]"
        );
    }

    #[test]
    fn test_closing_bracket_before_opening_returns_input() {
        let raw = "] nothing useful [";
        assert_eq!(sanitize_response(raw), raw);
    }

    #[test]
    fn test_brackets_inside_strings_use_outermost_span() {
        let raw = r#"Note [1]: [{"question":"What is [x]?","answer":"A"}]"#;
        // The first '[' belongs to the prose; the heuristic does not try to be clever.
        assert_eq!(
            sanitize_response(raw),
            r#"[1]: [{"question":"What is [x]?","answer":"A"}]"#
        );
    }

    #[test]
    fn test_non_ascii_text_around_list() {
        let raw = "Voilà: [{\"question\":\"Größe?\",\"answer\":\"groß\"}] ✓";
        assert_eq!(
            sanitize_response(raw),
            "[{\"question\":\"Größe?\",\"answer\":\"groß\"}]"
        );
    }
}
