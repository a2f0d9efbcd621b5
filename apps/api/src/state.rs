use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::llm_client::CompletionModel;
use crate::session::{Notifier, Session};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The model every analysis goes through. `LlmClient` in production.
    pub model: Arc<dyn CompletionModel>,
    pub config: Config,
    /// The one interactive session this process serves.
    pub session: Arc<Mutex<Session>>,
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(config: Config, model: Arc<dyn CompletionModel>) -> Self {
        Self {
            model,
            config,
            session: Arc::new(Mutex::new(Session::new())),
            notifier: Notifier::new(),
        }
    }
}
