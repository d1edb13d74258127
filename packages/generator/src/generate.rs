//! Main generation service that ties all components together.

use tracing::{debug, info, warn};

use crate::client::{InferenceClient, InferenceRequest};
use crate::config::{validate_card_count, GeneratorConfig};
use crate::decode::decode_flashcards;
use crate::error::{GeneratorError, Result};
use crate::prompt::build_prompt;
use crate::types::{GenerationRequest, Generation};

/// Generate flashcards for one request.
///
/// Validates the request, prompts the model, then repairs and decodes its
/// output. Items that are not usable cards are reported as warnings; a
/// response with no usable cards at all is an error.
pub async fn generate_flashcards<C>(
    client: &C,
    config: &GeneratorConfig,
    request: &GenerationRequest,
) -> Result<Generation>
where
    C: InferenceClient + ?Sized,
{
    if request.text.trim().is_empty() {
        return Err(GeneratorError::EmptyInput);
    }
    validate_card_count(request.card_count)?;

    info!(
        card_count = request.card_count,
        subject = %request.subject,
        text_len = request.text.len(),
        "generating flashcards"
    );

    let inference = InferenceRequest {
        prompt: build_prompt(&request.text, request.card_count, request.subject),
        max_new_tokens: config.max_new_tokens,
        temperature: config.temperature,
    };

    let raw_text = client.generate(&inference).await?;
    debug!(raw_len = raw_text.len(), "received model output");

    let (cards, warnings) = decode_flashcards(&raw_text)?;

    for warning in &warnings {
        warn!(warning = %warning, "skipped malformed flashcard");
    }

    if cards.is_empty() {
        return Err(GeneratorError::EmptyResult);
    }

    info!(
        generated = cards.len(),
        requested = request.card_count,
        skipped = warnings.len(),
        "flashcards generated"
    );

    Ok(Generation {
        cards,
        warnings,
        raw_text,
    })
}
