//! Serverless adapter
//!
//! Accepts an API Gateway proxy event and returns a proxy response. Routing
//! and handling go through the same table and dispatcher as the HTTP server,
//! so both surfaces answer identically.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::api::{AppContext, CORS_HEADERS, Reply, Route, dispatch};
use crate::error::{RegressivoError, Result};

/// Incoming proxy event (the fields the handler reads).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl ProxyEvent {
    pub fn new(method: impl Into<String>, path: impl Into<String>, body: Option<String>) -> Self {
        Self {
            http_method: method.into(),
            path: path.into(),
            body,
            is_base64_encoded: false,
        }
    }

    /// Request body as text, decoding base64 when flagged.
    fn body_text(&self) -> Result<String> {
        let Some(body) = self.body.as_deref() else {
            return Ok(String::new());
        };
        if !self.is_base64_encoded {
            return Ok(body.to_string());
        }
        let bytes = STANDARD
            .decode(body)
            .map_err(|e| RegressivoError::Validation(format!("corpo base64 inválido: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| RegressivoError::Validation(format!("corpo não é UTF-8: {}", e)))
    }
}

/// Outgoing proxy response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl From<Reply> for ProxyResponse {
    fn from(reply: Reply) -> Self {
        let headers = CORS_HEADERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            status_code: reply.status,
            headers,
            body: reply.body_text(),
        }
    }
}

/// Handle one proxy event.
pub async fn handle(ctx: &AppContext, event: &ProxyEvent) -> ProxyResponse {
    let route = Route::parse(&event.http_method, &event.path);
    let reply = match event.body_text() {
        Ok(body) => dispatch(ctx, route, &body).await,
        Err(e) => Reply::from(e),
    };
    log::info!("{} {} -> {}", event.http_method, event.path, reply.status);
    ProxyResponse::from(reply)
}

/// Handle a raw JSON event and return the serialized response.
pub async fn handle_json(ctx: &AppContext, event: &str) -> Result<String> {
    let event: ProxyEvent = serde_json::from_str(event)
        .map_err(|e| RegressivoError::Validation(format!("evento inválido: {}", e)))?;
    let response = handle(ctx, &event).await;
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_deserializes_gateway_shape() {
        let event: ProxyEvent = serde_json::from_str(
            r#"{"httpMethod":"POST","path":"/api/admin/regressivos","body":"{}","headers":{"x":"y"}}"#,
        )
        .unwrap();
        assert_eq!(event.http_method, "POST");
        assert_eq!(event.body.as_deref(), Some("{}"));
        assert!(!event.is_base64_encoded);
    }

    #[test]
    fn test_base64_body_decoded() {
        let event = ProxyEvent {
            body: Some(STANDARD.encode(r#"{"horas":2}"#)),
            is_base64_encoded: true,
            ..ProxyEvent::new("POST", "/x", None)
        };
        assert_eq!(event.body_text().unwrap(), r#"{"horas":2}"#);
    }

    #[test]
    fn test_bad_base64_is_validation_error() {
        let event = ProxyEvent {
            body: Some("%%%".to_string()),
            is_base64_encoded: true,
            ..ProxyEvent::new("POST", "/x", None)
        };
        assert!(matches!(event.body_text(), Err(RegressivoError::Validation(_))));
    }

    #[test]
    fn test_response_carries_cors_headers() {
        let response = ProxyResponse::from(Reply::empty());
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "");
        assert_eq!(response.headers.get("Access-Control-Allow-Origin").map(String::as_str), Some("*"));
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("statusCode").is_some());
    }
}
