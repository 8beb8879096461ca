//! Regressivos - release regression cycles with an SLA countdown
//!
//! Tracks timed regression-test cycles per release: release metadata, a
//! per squad/module task ledger, and a 24h SLA window that gates ledger
//! edits once it expires. Served by an axum HTTP server and an equivalent
//! serverless event handler over one shared dispatcher.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod id;
pub mod lambda;
pub mod llm;
pub mod manager;
pub mod qr;
pub mod server;
pub mod storage;

pub use error::{RegressivoError, Result};
