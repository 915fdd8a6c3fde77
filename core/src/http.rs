//! HTTP types shared by the dispatcher and transport plugins.
//!
//! # Design
//! The core never touches the network. It describes each call as a
//! `RequestDescriptor` and hands it to whichever transport plugin the host
//! installed; the plugin answers with an `HttpResponse`. Keeping these types
//! as plain owned data lets any HTTP stack sit behind the `Transport` trait.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// HTTP method of an API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Upper-case wire name, e.g. `"POST"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether calls with this method may carry a request body.
    pub fn takes_payload(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A response returned by a transport plugin.
///
/// `data` is the decoded JSON body. Transports that only have the raw text
/// can use [`HttpResponse::from_raw`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub data: serde_json::Value,
}

impl HttpResponse {
    /// Build a response from a raw body.
    ///
    /// An empty body decodes to `null`; a body that is not JSON is kept as a
    /// JSON string so nothing the server sent is lost.
    pub fn from_raw(status: u16, headers: Vec<(String, String)>, body: &str) -> Self {
        let data = if body.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(body).unwrap_or_else(|_| serde_json::Value::String(body.to_string()))
        };
        Self { status, headers, data }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Deserialize the body into a typed value.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}
