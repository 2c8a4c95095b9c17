use std::sync::Arc;

use crate::optimization::keywords::KeywordVocabulary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Known keywords, loaded once at startup and never mutated.
    pub vocabulary: Arc<KeywordVocabulary>,
}
