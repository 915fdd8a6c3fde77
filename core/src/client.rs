//! Dispatcher for Clayful API calls.
//!
//! # Design
//! `Client` owns its configuration: the base URL, the default headers, the
//! installed plugins and the event listeners.
//! Changing any of them takes `&mut Client`; making calls takes `&Client`.
//! Configuration therefore cannot race with in-flight calls, and a configured
//! client can be shared behind an `Arc` across threads.
//!
//! A call runs: extract → merge default headers → `request` event →
//! transport → `response` event → return. API faults still fire `response`
//! (with `error` set) before being returned; any other error is returned
//! as soon as it happens.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ClientError;
use crate::events::{Event, EventBus, Listener};
use crate::http::HttpResponse;
use crate::options::{options_to_headers, Headers, Options};
use crate::request::{extract_request_arguments, CallArgs, MethodDescriptor, RequestDescriptor};
use crate::transport::Transport;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.clayful.io";

/// Plugin name the dispatcher uses as its transport.
pub const REQUEST_PLUGIN: &str = "request";

const SDK_NAME: &str = "clayful-rust";

/// Configured entry point for every API call.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    default_headers: Headers,
    plugins: HashMap<String, Arc<dyn Transport>>,
    events: EventBus,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        let default_headers = Headers::from([
            ("Accept-Encoding".to_string(), "gzip".to_string()),
            ("User-Agent".to_string(), SDK_NAME.to_string()),
            ("Clayful-SDK".to_string(), SDK_NAME.to_string()),
        ]);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers,
            plugins: HashMap::new(),
            events: EventBus::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers sent with every call, before per-call options are applied.
    pub fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Absolute URL for an API path.
    pub fn get_end_point(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Merge option-derived headers into the default headers.
    ///
    /// Later calls win per header name, e.g. `config(&Options::new().client(token))`
    /// authenticates every subsequent call.
    pub fn config(&mut self, options: &Options) {
        self.default_headers.extend(options_to_headers(options));
    }

    /// Install (or replace) a named plugin. Only `"request"` is used by
    /// [`Client::call_api`].
    pub fn install(&mut self, name: &str, transport: impl Transport + 'static) {
        self.plugins.insert(name.to_string(), Arc::new(transport));
    }

    /// Subscribe to `"request"` or `"response"`. Other names are ignored.
    pub fn on(&mut self, event: &str, listener: Listener) {
        match Event::from_name(event) {
            Some(event) => self.events.on(event, listener),
            None => tracing::debug!(event, "ignoring listener for unknown event"),
        }
    }

    /// Remove a listener previously passed to [`Client::on`].
    pub fn off(&mut self, event: &str, listener: &Listener) {
        if let Some(event) = Event::from_name(event) {
            self.events.off(event, listener);
        }
    }

    /// Execute one API call.
    pub fn call_api(&self, method: &MethodDescriptor, args: CallArgs) -> Result<HttpResponse, ClientError> {
        let extracted = extract_request_arguments(method, args);

        let mut headers = self.default_headers.clone();
        headers.extend(extracted.headers);

        let mut request = RequestDescriptor {
            request_url: self.get_end_point(&extracted.request_url),
            http_method: extracted.http_method,
            payload: extracted.payload,
            query: extracted.query,
            headers,
            meta: extracted.meta,
            model_name: method.model_name.to_string(),
            method_name: method.method_name.to_string(),
            uses_form_data: method.uses_form_data,
            error: None,
            response: None,
        };

        tracing::debug!(
            model = method.model_name,
            method = method.method_name,
            http_method = %request.http_method,
            url = %request.request_url,
            "dispatching API call"
        );

        self.events.trigger(Event::Request, &mut request)?;

        let Some(transport) = self.plugins.get(REQUEST_PLUGIN) else {
            tracing::debug!("no transport plugin installed");
            return Err(ClientError::MissingTransport);
        };

        match transport.request(&request) {
            Ok(response) => {
                tracing::debug!(status = response.status, "API call succeeded");
                request.response = Some(response.clone());
                self.events.trigger(Event::Response, &mut request)?;
                Ok(response)
            }
            Err(ClientError::Api(err)) => {
                tracing::warn!(
                    model = %err.model,
                    method = %err.method,
                    status = err.status,
                    code = err.code.as_deref().unwrap_or(""),
                    "API call failed"
                );
                request.error = Some(err.clone());
                self.events.trigger(Event::Response, &mut request)?;
                Err(ClientError::Api(err))
            }
            Err(other) => Err(other),
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .field("events", &self.events)
            .finish()
    }
}
