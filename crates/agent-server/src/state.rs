//! Application State

use std::sync::Arc;

use crypto_analysis::CryptoAnalysisCrew;

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Immutable roster plus the executor factory; each request gets its own run
    pub crew: Arc<CryptoAnalysisCrew>,

    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(crew: CryptoAnalysisCrew, config: ServerConfig) -> Self {
        Self {
            crew: Arc::new(crew),
            config: Arc::new(config),
        }
    }
}
