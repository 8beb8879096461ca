//! Response types shared by the HTTP adapters.
//!
//! Every JSON response except `/health` is wrapped in the same envelope:
//! `{success, data?, error?, message?}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RegressivoError;

/// Headers attached to every response, preflight included.
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
];

/// Response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn data(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Status code plus JSON body. A `None` body is sent as an empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Option<Value>,
}

impl Reply {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// Empty 200, used for CORS preflight.
    pub fn empty() -> Self {
        Self { status: 200, body: None }
    }

    pub fn ok(response: ApiResponse) -> Self {
        Self::envelope(200, response)
    }

    pub fn created(response: ApiResponse) -> Self {
        Self::envelope(201, response)
    }

    pub fn not_found_route() -> Self {
        Self::envelope(404, ApiResponse::error("Endpoint não encontrado"))
    }

    fn envelope(status: u16, response: ApiResponse) -> Self {
        match serde_json::to_value(&response) {
            Ok(body) => Self::new(status, body),
            Err(e) => Self::from(RegressivoError::from(e)),
        }
    }

    /// Serialized body text.
    pub fn body_text(&self) -> String {
        self.body.as_ref().map(Value::to_string).unwrap_or_default()
    }
}

impl From<RegressivoError> for Reply {
    fn from(err: RegressivoError) -> Self {
        let status = err.status_code();
        if status >= 500 {
            log::error!("Request failed: {}", err);
        } else {
            log::debug!("Request rejected ({}): {}", status, err);
        }
        let body = serde_json::json!({ "success": false, "error": err.to_string() });
        Self::new(status, body)
    }
}
