//! Server application state shared across handlers

use std::sync::Arc;

use crate::chat::ProviderClient;
use crate::config::AppConfig;
use crate::session::SessionStore;
use crate::shutdown::ShutdownState;

/// Shared state for the server: configuration, the session store, and the
/// provider client. Everything a handler needs arrives through this struct;
/// no handler reads ambient/global state.
#[derive(Clone)]
pub struct ServerAppState {
    /// Application configuration (cost schedule, risk thresholds, provider)
    pub config: Arc<AppConfig>,

    /// In-memory walkthrough/chat sessions
    pub sessions: Arc<SessionStore>,

    /// Client for the hosted text-generation provider
    pub provider: Arc<ProviderClient>,

    /// Shutdown state
    pub shutdown_state: ShutdownState,
}

impl ServerAppState {
    pub fn new(config: AppConfig, shutdown_state: ShutdownState) -> Self {
        let provider = ProviderClient::new(config.provider.clone());
        Self {
            config: Arc::new(config),
            sessions: Arc::new(SessionStore::new()),
            provider: Arc::new(provider),
            shutdown_state,
        }
    }
}
