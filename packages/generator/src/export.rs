//! Export formats for generated decks.

use std::str::FromStr;

use strum::{Display, EnumString};

use crate::error::Result;
use crate::types::Flashcard;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    #[default]
    Csv,
    Quizlet,
    Json,
}

impl ExportFormat {
    /// Suggested download file name.
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Csv => "flashcards.csv",
            Self::Quizlet => "quizlet_import.txt",
            Self::Json => "flashcards.json",
        }
    }

    /// MIME type for downloads.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Quizlet => "text/plain",
            Self::Json => "application/json",
        }
    }

    /// Parse a format name as used on the command line and in URLs.
    pub fn parse(name: &str) -> Option<Self> {
        Self::from_str(name).ok()
    }
}

/// Render cards in the requested format.
pub fn export(cards: &[Flashcard], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => to_csv(cards),
        ExportFormat::Quizlet => Ok(to_quizlet(cards)),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(cards)?),
    }
}

/// CSV with a `question,answer` header row.
pub fn to_csv(cards: &[Flashcard]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if cards.is_empty() {
        // serde only emits the header together with the first record
        writer.write_record(["question", "answer"])?;
    }
    for card in cards {
        writer.serialize(card)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Quizlet import text: `question<TAB>answer` per line, cards separated by a
/// blank line. Newlines inside a field become spaces so every card stays on
/// one line.
pub fn to_quizlet(cards: &[Flashcard]) -> String {
    cards
        .iter()
        .map(|card| {
            format!(
                "{}\t{}",
                single_line(&card.question),
                single_line(&card.answer)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn single_line(field: &str) -> String {
    field.replace('\n', " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_cards() -> Vec<Flashcard> {
        vec![
            Flashcard::new("Q1\nLine2", "A1"),
            Flashcard::new("Q2", "A2"),
        ]
    }

    #[test]
    fn test_quizlet_format() {
        assert_eq!(to_quizlet(&sample_cards()), "Q1 Line2\tA1\n\nQ2\tA2");
    }

    #[test]
    fn test_quizlet_trims_fields() {
        let cards = vec![Flashcard::new("  What is DNA?\n", "\nDeoxyribonucleic acid ")];
        assert_eq!(to_quizlet(&cards), "What is DNA?\tDeoxyribonucleic acid");
    }

    #[test]
    fn test_quizlet_empty_deck() {
        assert_eq!(to_quizlet(&[]), "");
    }

    #[test]
    fn test_csv_has_header_and_quotes_fields() {
        let cards = vec![
            Flashcard::new("What is 2+2?", "4"),
            Flashcard::new("Name two \"noble\" gases, please", "Neon, argon"),
        ];
        let csv = to_csv(&cards).expect("csv");
        assert_eq!(
            csv,
            "question,answer\n\
             What is 2+2?,4\n\
             \"Name two \"\"noble\"\" gases, please\",\"Neon, argon\"\n"
        );
    }

    #[test]
    fn test_csv_empty_deck_still_has_header() {
        assert_eq!(to_csv(&[]).expect("csv"), "question,answer\n");
    }

    #[test]
    fn test_json_export_reads_back() {
        let json = export(&sample_cards(), ExportFormat::Json).expect("json");
        let parsed: Vec<Flashcard> = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed, sample_cards());
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::parse("CSV"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::parse("quizlet"), Some(ExportFormat::Quizlet));
        assert_eq!(ExportFormat::parse("anki"), None);
        assert_eq!(ExportFormat::Quizlet.to_string(), "quizlet");
        assert_eq!(ExportFormat::Quizlet.file_name(), "quizlet_import.txt");
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
    }
}
