//! Core LLM client types and trait definitions

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::RegressivoError;

/// Stateless text-generation client - each call is independent
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Model identifier used for requests
    fn model(&self) -> &str;

    /// Whether the client can issue requests at all
    fn is_ready(&self) -> bool;
}

/// A completion request - one prompt, optional system instructions
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: String::new(),
            prompt: prompt.into(),
            max_tokens: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }
}

/// Response from a completion request
#[derive(Debug, Clone, Default)]
pub struct CompletionResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Errors that can occur during LLM operations
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing API key: environment variable {env_var} not set")]
    MissingApiKey { env_var: String },
}

impl From<LlmError> for RegressivoError {
    fn from(err: LlmError) -> Self {
        RegressivoError::Llm(err.to_string())
    }
}

/// Stand-in used when no API key is configured; every call fails clearly
#[derive(Debug, Clone)]
pub struct UnconfiguredClient {
    env_var: String,
}

impl UnconfiguredClient {
    pub fn new(env_var: impl Into<String>) -> Self {
        Self { env_var: env_var.into() }
    }
}

#[async_trait]
impl LlmClient for UnconfiguredClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        Err(LlmError::MissingApiKey {
            env_var: self.env_var.clone(),
        })
    }

    fn model(&self) -> &str {
        "unconfigured"
    }

    fn is_ready(&self) -> bool {
        false
    }
}

/// Canned-response client for tests; records every prompt it receives
#[derive(Debug, Default)]
pub struct MockLlmClient {
    responses: Mutex<Vec<String>>,
    prompts: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmClient {
    /// Responses are handed out in order; once exhausted, calls fail
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<CompletionRequest> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(request);
        }
        let mut responses = self
            .responses
            .lock()
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
        if responses.is_empty() {
            return Err(LlmError::InvalidResponse("no mock responses left".to_string()));
        }
        Ok(CompletionResponse {
            content: responses.remove(0),
            usage: TokenUsage::default(),
        })
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    fn is_ready(&self) -> bool {
        true
    }
}
