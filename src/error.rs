//! Error types for regressivos
//!
//! Centralized error handling using thiserror. The HTTP boundary maps each
//! variant to a status code via [`RegressivoError::status_code`].

use thiserror::Error;

/// All error types that can occur in regressivos
#[derive(Debug, Error)]
pub enum RegressivoError {
    /// Unknown cycle, ledger entry, or configuration
    #[error("{0} não encontrado")]
    NotFound(String),

    /// Ledger edit attempted after the owning cycle's SLA expired
    #[error("SLA vencido. Não é possível editar este registro.")]
    SlaExpired,

    /// SLA start requested on a cycle whose window is already set
    #[error("SLA já iniciado para o regressivo {0}")]
    AlreadyStarted(String),

    /// SLA extension requested before the window was started
    #[error("SLA ainda não iniciado para o regressivo {0}")]
    NotStarted(String),

    /// Malformed or missing input
    #[error("Dados inválidos: {0}")]
    Validation(String),

    /// Storage/persistence error
    #[error("Storage error: {0}")]
    Storage(String),

    /// QR code generation error
    #[error("QR code error: {0}")]
    QrCode(String),

    /// Release notes generator error
    #[error("LLM error: {0}")]
    Llm(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl RegressivoError {
    /// HTTP status code the boundary layers report for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RegressivoError::NotFound(_) => 404,
            RegressivoError::SlaExpired => 403,
            RegressivoError::AlreadyStarted(_) | RegressivoError::NotStarted(_) => 409,
            RegressivoError::Validation(_) => 400,
            _ => 500,
        }
    }
}

/// Result type alias for regressivos operations
pub type Result<T> = std::result::Result<T, RegressivoError>;
