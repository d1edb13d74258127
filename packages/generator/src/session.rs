//! Per-user generation state.
//!
//! The last generated deck is passed into and returned from each
//! generation instead of living in a global store. A failed generation
//! always leaves the session empty, so stale or partial cards are never
//! shown next to an error.

use serde::{Deserialize, Serialize};

use crate::client::InferenceClient;
use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::generate::generate_flashcards;
use crate::types::{Flashcard, Generation, GenerationRequest};

/// Cards from the most recent successful generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub flashcards: Vec<Flashcard>,
}

/// Broad cause of a failed generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The user's input was rejected; fix it and retry.
    Input,
    /// The model is warming up; retry in a minute.
    ModelLoading,
    /// The endpoint or the model's output failed.
    Upstream,
}

impl From<&GeneratorError> for FailureKind {
    fn from(error: &GeneratorError) -> Self {
        match error {
            GeneratorError::ModelLoading => Self::ModelLoading,
            e if e.is_input_error() => Self::Input,
            _ => Self::Upstream,
        }
    }
}

/// Outcome of a generation as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
    Generated { count: usize, warnings: Vec<String> },
    Failed { kind: FailureKind, message: String },
}

/// New session state together with what happened.
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    pub session: Session,
    pub status: Status,
}

impl Session {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flashcards.is_empty()
    }

    /// Fold a generation result into the session.
    pub fn apply(self, result: Result<Generation>) -> SessionUpdate {
        match result {
            Ok(generation) => SessionUpdate {
                status: Status::Generated {
                    count: generation.cards.len(),
                    warnings: generation.warnings,
                },
                session: Session {
                    flashcards: generation.cards,
                },
            },
            Err(e) => {
                tracing::warn!(error = %e, "generation failed, clearing session");
                SessionUpdate {
                    session: Session::default(),
                    status: Status::Failed {
                        kind: FailureKind::from(&e),
                        message: e.to_string(),
                    },
                }
            }
        }
    }
}

/// Run one generation against the given session and return the new state.
pub async fn generate_into_session<C>(
    session: Session,
    client: &C,
    config: &GeneratorConfig,
    request: &GenerationRequest,
) -> SessionUpdate
where
    C: InferenceClient + ?Sized,
{
    let result = generate_flashcards(client, config, request).await;
    session.apply(result)
}
