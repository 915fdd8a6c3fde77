//! Error types for the Clayful client core.
//!
//! # Design
//! Two fault classes. `ApiError` is the distinguished API fault: the server
//! answered, but with an error. The dispatcher records it on the descriptor
//! and fires the `response` event before returning it. Every other
//! `ClientError` variant is unexpected (no transport, a broken connection, a
//! failing listener) and is returned straight away without the `response`
//! event.

use serde_json::Value;
use thiserror::Error;

use crate::http::HttpResponse;
use crate::request::RequestDescriptor;

/// An error reported by the Clayful API for a specific call.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{model}.{method} failed with HTTP {status}: {message}")]
pub struct ApiError {
    /// Model name of the failing call, e.g. `Product`.
    pub model: String,
    /// Method name of the failing call, e.g. `get`.
    pub method: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    /// Machine-readable `errorCode` from the body, when present.
    pub code: Option<String>,
    pub message: String,
    /// Field-level validation details, when the API sent them.
    pub validation: Option<Value>,
}

impl ApiError {
    /// Build an API fault from an unsuccessful response to `request`.
    ///
    /// Reads `errorCode`, `message` and `validation` from a JSON error body.
    /// A body without a message falls back to the raw text, then to the
    /// status code.
    pub fn from_response(request: &RequestDescriptor, response: &HttpResponse) -> Self {
        let body = &response.data;
        let code = body.get("errorCode").and_then(Value::as_str).map(str::to_string);
        let message = match body.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => match body {
                Value::String(text) if !text.is_empty() => text.clone(),
                _ => format!("HTTP status {}", response.status),
            },
        };
        let validation = body.get("validation").filter(|v| !v.is_null()).cloned();

        Self {
            model: request.model_name.clone(),
            method: request.method_name.clone(),
            status: response.status,
            headers: response.headers.clone(),
            code,
            message,
            validation,
        }
    }
}

/// Errors returned by `Client::call_api` and its collaborators.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with an error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// `call_api` ran with no plugin installed under `"request"`.
    #[error("no transport plugin installed under \"request\"")]
    MissingTransport,

    /// The transport failed before a response was received.
    #[error("transport failed: {0}")]
    Transport(String),

    /// An event listener aborted the call.
    #[error("listener failed: {0}")]
    Listener(String),

    /// A response body did not match the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Returns `true` for API faults, the only kind that fires `response`.
    pub fn is_api(&self) -> bool {
        matches!(self, ClientError::Api(_))
    }

    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }
}
