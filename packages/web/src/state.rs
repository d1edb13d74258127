use std::sync::Arc;

use flashcards_generator::{GeneratorConfig, InferenceClient};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn InferenceClient>,
    pub generator: Arc<GeneratorConfig>,
}
