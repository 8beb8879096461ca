//! Application context - shared state for request handlers
//!
//! AppContext owns the manager and the few settings handlers echo back.
//! Both the axum server and the serverless handler build one at startup.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::{Clock, SystemClock};
use crate::error::Result;
use crate::llm::{ReleaseNotesGenerator, client_from_env};
use crate::manager::RegressivoManager;
use crate::qr::SvgQrEncoder;
use crate::storage::StorageBackend;

/// Type alias for the concrete manager used by the adapters
pub type AppManager = RegressivoManager<StorageBackend>;

/// Shared context for all request handlers
pub struct AppContext {
    /// Cycle, SLA, and ledger operations
    pub manager: AppManager,
    /// Name reported by the health endpoint
    pub service_name: String,
}

impl AppContext {
    pub fn new(manager: AppManager, service_name: impl Into<String>) -> Self {
        Self {
            manager,
            service_name: service_name.into(),
        }
    }

    /// Create a context with all components built from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let storage = Arc::new(StorageBackend::open(&config.storage)?);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let qr = Arc::new(SvgQrEncoder::new(config.qr.min_dimension));
        let notes = ReleaseNotesGenerator::new(client_from_env(&config.llm));

        let manager = RegressivoManager::new(storage, clock, qr, notes);
        Ok(Self::new(manager, config.server.service_name.clone()))
    }
}
