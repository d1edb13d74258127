use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use flashcards_generator::{FailureKind, GeneratorError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error("invalid form data: {0}")]
    Form(String),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("no flashcards to export")]
    NothingToExport,

    #[error("unknown export format: {0}")]
    UnknownFormat(String),
}

impl WebError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Generator(e) => failure_status(FailureKind::from(e)),
            Self::Form(_) => StatusCode::BAD_REQUEST,
            Self::NothingToExport | Self::UnknownFormat(_) => StatusCode::NOT_FOUND,
            Self::Config(_) | Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// HTTP status for a failed generation.
pub fn failure_status(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::Input => StatusCode::BAD_REQUEST,
        FailureKind::ModelLoading => StatusCode::SERVICE_UNAVAILABLE,
        FailureKind::Upstream => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            WebError::Generator(GeneratorError::ModelLoading).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            WebError::Generator(GeneratorError::EmptyInput).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::Generator(GeneratorError::EmptyResult).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(WebError::NothingToExport.status(), StatusCode::NOT_FOUND);
    }
}
