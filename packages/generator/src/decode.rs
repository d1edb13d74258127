//! Lenient decoding of sanitized model output into flashcards.
//!
//! Decoding runs in two passes. Strict `serde_json` handles well-behaved
//! output. When that fails, the text is parsed as YAML, whose flow syntax
//! is a superset of JSON and accepts the usual model slips: single quotes,
//! unquoted keys and trailing commas.

use serde_json::Value;

use crate::error::{GeneratorError, Result};
use crate::sanitize::sanitize_response;
use crate::types::Flashcard;

/// Parse sanitized text into the list of raw card values.
///
/// `raw` is the unsanitized model output, carried into errors for diagnosis.
pub fn parse_card_list(text: &str, raw: &str) -> Result<Vec<Value>> {
    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(strict_err) => match serde_yaml_ng::from_str::<Value>(text) {
            // Prose parses as a YAML scalar or mapping, which tells us nothing.
            Ok(value) if value.is_array() => {
                tracing::debug!(error = %strict_err, "strict JSON parse failed, lenient parse succeeded");
                value
            }
            _ => {
                return Err(GeneratorError::Decode {
                    message: strict_err.to_string(),
                    raw: raw.to_string(),
                });
            }
        },
    };

    match value {
        Value::Array(items) => Ok(items),
        other => Err(GeneratorError::NotAList {
            found: describe(&other).to_string(),
            raw: raw.to_string(),
        }),
    }
}

/// Convert raw card values into flashcards.
///
/// Returns `(cards, warnings)`; items that are not a mapping with both a
/// `question` and an `answer` are skipped with a warning.
pub fn into_flashcards(values: Vec<Value>) -> (Vec<Flashcard>, Vec<String>) {
    let mut cards = Vec::with_capacity(values.len());
    let mut warnings = Vec::new();

    for (index, value) in values.into_iter().enumerate() {
        let number = index + 1;
        let Value::Object(map) = value else {
            warnings.push(format!(
                "Card {number}: expected an object with 'question' and 'answer', found {}",
                describe(&value)
            ));
            continue;
        };

        let question = map.get("question").and_then(field_text);
        let answer = map.get("answer").and_then(field_text);

        match (question, answer) {
            (Some(question), Some(answer)) => cards.push(Flashcard { question, answer }),
            (None, _) => warnings.push(format!("Card {number}: missing 'question'")),
            (_, None) => warnings.push(format!("Card {number}: missing 'answer'")),
        }
    }

    (cards, warnings)
}

/// Sanitize, parse and convert raw model output in one go.
pub fn decode_flashcards(raw: &str) -> Result<(Vec<Flashcard>, Vec<String>)> {
    let sanitized = sanitize_response(raw);
    let values = parse_card_list(&sanitized, raw)?;
    Ok(into_flashcards(values))
}

/// Text of a card field. Numbers and booleans keep their JSON spelling.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
