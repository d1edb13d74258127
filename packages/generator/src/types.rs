//! Core data types for the generator.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::DEFAULT_CARD_COUNT;
use crate::error::{GeneratorError, Result};

/// A single question/answer pair.
///
/// Field order defines the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Subject hint passed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Subject {
    #[default]
    General,
    Biology,
    History,
    #[strum(
        to_string = "Computer Science",
        serialize = "computer-science",
        serialize = "computer_science"
    )]
    ComputerScience,
    Physics,
}

impl Subject {
    /// Parse a subject name, mapping failures to `GeneratorError::InvalidSubject`.
    ///
    /// # Examples
    /// ```
    /// use flashcards_generator::types::Subject;
    ///
    /// assert_eq!(Subject::parse("biology").unwrap(), Subject::Biology);
    /// assert_eq!(Subject::parse("Computer Science").unwrap(), Subject::ComputerScience);
    /// assert!(Subject::parse("alchemy").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_str(name.trim()).map_err(|_| GeneratorError::InvalidSubject(name.to_string()))
    }
}

/// Everything needed for one generation action.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub text: String,
    pub card_count: u32,
    pub subject: Subject,
}

impl GenerationRequest {
    /// Request with the default card count and subject.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            card_count: DEFAULT_CARD_COUNT,
            subject: Subject::default(),
        }
    }

    pub fn with_card_count(mut self, card_count: u32) -> Self {
        self.card_count = card_count;
        self
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = subject;
        self
    }
}

/// Result of one successful generation.
#[derive(Debug, Clone)]
pub struct Generation {
    pub cards: Vec<Flashcard>,
    /// Items the model returned that were not usable cards.
    pub warnings: Vec<String>,
    /// Model output before sanitizing.
    pub raw_text: String,
}
