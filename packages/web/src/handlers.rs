use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use flashcards_generator::config::DEFAULT_CARD_COUNT;
use flashcards_generator::{
    choose_input, export, extract_text, generate_into_session, ExportFormat, Flashcard,
    GenerationRequest, GeneratorError, Session, Status, Subject,
};
use serde::Serialize;

use crate::error::{failure_status, WebError};
use crate::state::AppState;

const SESSION_KEY_DECK: &str = "deck";

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Serialize)]
pub struct GenerateResponse {
    pub count: usize,
    pub warnings: Vec<String>,
    pub flashcards: Vec<Flashcard>,
}

#[derive(Serialize)]
pub struct FlashcardsResponse {
    pub flashcards: Vec<Flashcard>,
}

/// Fields of the generate form, before any file is read.
#[derive(Debug, Default)]
struct GenerateForm {
    text: String,
    file: Option<(String, Vec<u8>)>,
    count: Option<u32>,
    subject: Option<String>,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn generate(
    State(state): State<AppState>,
    session: tower_sessions::Session,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let form = match read_generate_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!(error = %e, "malformed generate form, clearing session");
            store_deck(&session, &Session::default()).await?;
            return Err(e);
        }
    };
    let deck = load_deck(&session).await?;

    let update = match build_request(form).await {
        Ok(request) => {
            generate_into_session(deck, state.client.as_ref(), &state.generator, &request).await
        }
        Err(e) => deck.apply(Err(e)),
    };

    store_deck(&session, &update.session).await?;

    let response = match update.status {
        Status::Generated { count, warnings } => Json(GenerateResponse {
            count,
            warnings,
            flashcards: update.session.flashcards,
        })
        .into_response(),
        Status::Failed { kind, message } => (
            failure_status(kind),
            Json(serde_json::json!({ "error": message })),
        )
            .into_response(),
    };
    Ok(response)
}

pub async fn list_flashcards(
    session: tower_sessions::Session,
) -> Result<Json<FlashcardsResponse>, WebError> {
    let deck = load_deck(&session).await?;
    Ok(Json(FlashcardsResponse {
        flashcards: deck.flashcards,
    }))
}

pub async fn export_flashcards(
    session: tower_sessions::Session,
    Path(format): Path<String>,
) -> Result<Response, WebError> {
    let format = ExportFormat::parse(&format).ok_or(WebError::UnknownFormat(format))?;
    let deck = load_deck(&session).await?;
    if deck.is_empty() {
        return Err(WebError::NothingToExport);
    }

    let body = export(&deck.flashcards, format)?;
    let disposition = format!("attachment; filename=\"{}\"", format.file_name());
    tracing::debug!(%format, cards = deck.flashcards.len(), "exporting flashcards");

    Ok((
        [
            (header::CONTENT_TYPE, format.mime_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

async fn read_generate_form(mut multipart: Multipart) -> Result<GenerateForm, WebError> {
    let mut form = GenerateForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::Form(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "text" => {
                form.text = field.text().await.map_err(|e| WebError::Form(e.to_string()))?;
            }
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| WebError::Form(e.to_string()))?;
                // Browsers send an empty part when no file was picked.
                if !file_name.is_empty() && !bytes.is_empty() {
                    form.file = Some((file_name, bytes.to_vec()));
                }
            }
            "count" => {
                let value = field.text().await.map_err(|e| WebError::Form(e.to_string()))?;
                let value = value.trim();
                if !value.is_empty() {
                    let count = value
                        .parse()
                        .map_err(|_| WebError::Form(format!("invalid count '{value}'")))?;
                    form.count = Some(count);
                }
            }
            "subject" => {
                let value = field.text().await.map_err(|e| WebError::Form(e.to_string()))?;
                if !value.trim().is_empty() {
                    form.subject = Some(value.trim().to_string());
                }
            }
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
    }

    Ok(form)
}

async fn build_request(form: GenerateForm) -> flashcards_generator::Result<GenerationRequest> {
    let subject = match form.subject.as_deref() {
        Some(name) => Subject::parse(name)?,
        None => Subject::default(),
    };

    // Pasted text wins, so only extract the upload when it is needed
    let file_text = match form.file {
        Some((file_name, bytes)) if form.text.trim().is_empty() => {
            Some(extract_upload(file_name, bytes).await?)
        }
        _ => None,
    };

    let text =
        choose_input(&form.text, file_text.as_deref()).ok_or(GeneratorError::EmptyInput)?;

    Ok(GenerationRequest::new(text)
        .with_card_count(form.count.unwrap_or(DEFAULT_CARD_COUNT))
        .with_subject(subject))
}

async fn extract_upload(file_name: String, bytes: Vec<u8>) -> flashcards_generator::Result<String> {
    let name = file_name.clone();
    tokio::task::spawn_blocking(move || extract_text(&name, &bytes))
        .await
        .map_err(|e| GeneratorError::PdfExtract {
            file_name,
            message: e.to_string(),
        })?
}

async fn load_deck(session: &tower_sessions::Session) -> Result<Session, WebError> {
    Ok(session
        .get::<Session>(SESSION_KEY_DECK)
        .await?
        .unwrap_or_default())
}

async fn store_deck(session: &tower_sessions::Session, deck: &Session) -> Result<(), WebError> {
    session.insert(SESSION_KEY_DECK, deck).await?;
    Ok(())
}
