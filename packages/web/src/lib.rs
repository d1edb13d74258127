//! Flashcards web UI.
//!
//! A small axum app around `flashcards-generator`: paste or upload notes,
//! generate cards and download them as CSV or Quizlet import text. Each
//! browser session keeps its last deck in a `tower-sessions` store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_memory_store::MemoryStore;

pub use config::WebConfig;
pub use error::WebError;
pub use state::AppState;

/// Largest accepted request body (uploads included).
pub const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(8)))
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_secure(false);

    let api_routes = Router::new()
        .route("/api/generate", post(handlers::generate))
        .route("/api/flashcards", get(handlers::list_flashcards))
        .route("/api/export/{format}", get(handlers::export_flashcards));

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .merge(api_routes)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}
