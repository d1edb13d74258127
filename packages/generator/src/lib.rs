//! Flashcards generator - Turn study notes into question/answer flashcards.
//!
//! This crate sends source text to a text-generation inference endpoint,
//! repairs the (often malformed) JSON list the model returns and exports
//! the resulting cards as CSV or Quizlet import text.
//!
//! # Example
//!
//! ```
//! use flashcards_generator::{decode_flashcards, to_quizlet};
//!
//! let raw = r#"Here are your cards: [{"question":"Q1","answer":"A1"] Enjoy!"#;
//! let (cards, warnings) = decode_flashcards(raw).unwrap();
//! assert!(warnings.is_empty());
//! assert_eq!(to_quizlet(&cards), "Q1\tA1");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants, validation and endpoint settings
//! - [`types`]: Core data types (Flashcard, Subject, GenerationRequest)
//! - [`error`]: Error types and Result alias
//! - [`sanitize`]: Heuristic repair of raw model output
//! - [`decode`]: Lenient JSON decoding into flashcards
//! - [`prompt`]: Prompt composition
//! - [`client`]: Inference endpoint client
//! - [`extract`]: Text extraction from .txt/.pdf uploads
//! - [`export`]: CSV, Quizlet and JSON export
//! - [`generate`]: Main generation service
//! - [`session`]: Explicit per-user generation state
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod export;
pub mod extract;
pub mod generate;
pub mod prompt;
pub mod sanitize;
pub mod session;
pub mod types;

// Re-export main functions
pub use generate::generate_flashcards;
pub use session::{generate_into_session, FailureKind, Session, SessionUpdate, Status};

// Re-export commonly used items
pub use client::{HuggingFaceClient, InferenceClient, InferenceRequest};
pub use config::GeneratorConfig;
pub use decode::decode_flashcards;
pub use error::{GeneratorError, Result};
pub use export::{export, to_csv, to_quizlet, ExportFormat};
pub use extract::{choose_input, extract_text};
pub use sanitize::sanitize_response;
pub use types::{Flashcard, Generation, GenerationRequest, Subject};
