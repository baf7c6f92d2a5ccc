use std::sync::Arc;

use crate::config::Config;
use crate::intake::session::SessionStore;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Pluggable text generator. `GeminiClient` in production, a stub in tests.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}
