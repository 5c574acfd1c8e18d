use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main`; nothing downstream reads process globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}
