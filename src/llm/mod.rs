//! LLM Client Layer - Anthropic API integration for release notes
//!
//! This module provides:
//! - LlmClient trait for API abstraction
//! - AnthropicClient implementation
//! - Mock and unconfigured clients
//! - Release-notes prompt assembly

pub mod anthropic;
pub mod client;
pub mod notes;

use std::sync::Arc;

pub use anthropic::{API_KEY_ENV, AnthropicClient, AnthropicConfig};
pub use client::{
    CompletionRequest, CompletionResponse, LlmClient, LlmError, MockLlmClient, TokenUsage, UnconfiguredClient,
};
pub use notes::{ReleaseNotesGenerator, build_prompt};

use crate::config::LlmConfig;

/// Anthropic client when an API key is present, otherwise an unconfigured stand-in.
pub fn client_from_env(config: &LlmConfig) -> Arc<dyn LlmClient> {
    match AnthropicClient::new(AnthropicConfig::from(config)) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            log::warn!("Release notes disabled: {}", e);
            Arc::new(UnconfiguredClient::new(API_KEY_ENV))
        }
    }
}
