//! Error types for the flashcards generator.
//!
//! Every failure of a generation action ends up as one `GeneratorError`
//! whose display text is shown to the user as-is.

use thiserror::Error;

/// Main error type for the generator library.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Requested number of cards outside the supported range.
    #[error("Invalid card count: {0}. Expected a number between 5 and 25")]
    InvalidCardCount(u32),

    /// Unknown subject name.
    #[error("Invalid subject: '{0}'. Expected one of General, Biology, History, Computer Science, Physics")]
    InvalidSubject(String),

    /// No text to generate flashcards from.
    #[error("Please provide some text to generate flashcards from")]
    EmptyInput,

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure calling the inference endpoint.
    #[error("Inference API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Endpoint answered 503 while the model warms up.
    #[error("Model is currently loading on the inference endpoint. Please try again in a minute")]
    ModelLoading,

    /// Endpoint answered with a non-success status.
    #[error("Inference API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not have the expected shape.
    #[error("Received an unexpected response format from the API: {0}")]
    UnexpectedResponse(String),

    /// Sanitized model output still failed to parse.
    #[error("Failed to decode a valid list of flashcards from the model's response. Error: {message}. Raw text was: {raw}")]
    Decode { message: String, raw: String },

    /// Model output parsed, but not into a list.
    #[error("Failed to decode a valid list of flashcards from the model's response. Error: parsed JSON is {found}, not a list. Raw text was: {raw}")]
    NotAList { found: String, raw: String },

    /// Model output decoded into zero usable cards.
    #[error("The model returned no flashcards. Please try a different text")]
    EmptyResult,

    /// Upload with an extension we cannot read.
    #[error("Unsupported file type: '{0}'. Expected a .txt or .pdf file")]
    UnsupportedFile(String),

    /// Text file that is not valid UTF-8.
    #[error("Error reading file {file_name}: not valid UTF-8")]
    InvalidUtf8 { file_name: String },

    /// PDF text extraction failed.
    #[error("Error reading file {file_name}: {message}")]
    PdfExtract { file_name: String, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeneratorError {
    /// Whether the error was caused by the user's input rather than by the
    /// endpoint or the model.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCardCount(_)
                | Self::InvalidSubject(_)
                | Self::EmptyInput
                | Self::UnsupportedFile(_)
                | Self::InvalidUtf8 { .. }
                | Self::PdfExtract { .. }
        )
    }
}

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;
