//! Method descriptors, call arguments and request extraction.
//!
//! # Design
//! Every API method is a `MethodDescriptor` constant: the HTTP method, a path
//! template with `{name}` placeholders and the ordered names of its path
//! parameters. A call supplies `CallArgs` (path values, an optional payload
//! and optional options) and `extract_request_arguments` turns the pair into
//! the relative request the dispatcher completes.
//!
//! Arity is trusted. Path values are matched to placeholders by position; a
//! missing trailing value substitutes the empty string and extra values are
//! ignored. Nothing is padded and nothing fails.

use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpResponse};
use crate::options::{options_to_headers, Headers, Options};
use crate::query::{normalize_query_values, Query};

/// Static description of one API method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub http_method: HttpMethod,
    /// Path template, e.g. `/v1/products/{productId}`.
    pub path: &'static str,
    /// Placeholder names in the order their values are passed.
    pub params: &'static [&'static str],
    /// POST/PUT methods that never send a body.
    pub without_payload: bool,
    pub model_name: &'static str,
    pub method_name: &'static str,
    pub uses_form_data: bool,
}

impl MethodDescriptor {
    pub const fn new(
        model_name: &'static str,
        method_name: &'static str,
        http_method: HttpMethod,
        path: &'static str,
    ) -> Self {
        Self {
            http_method,
            path,
            params: &[],
            without_payload: false,
            model_name,
            method_name,
            uses_form_data: false,
        }
    }

    pub const fn params(mut self, params: &'static [&'static str]) -> Self {
        self.params = params;
        self
    }

    pub const fn without_payload(mut self) -> Self {
        self.without_payload = true;
        self
    }

    pub const fn uses_form_data(mut self) -> Self {
        self.uses_form_data = true;
        self
    }

    /// Whether a call to this method sends `CallArgs::payload`.
    pub fn takes_payload(&self) -> bool {
        self.http_method.takes_payload() && !self.without_payload
    }
}

/// Arguments of one call: path values, then an optional payload and options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub params: Vec<String>,
    pub payload: Option<Value>,
    pub options: Option<Options>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next path parameter value.
    pub fn param(mut self, value: impl Into<String>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }
}

/// The request as extracted from a descriptor and its arguments, with a
/// URL relative to the API base.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRequest {
    pub request_url: String,
    pub http_method: HttpMethod,
    pub payload: Option<Value>,
    pub query: Query,
    pub headers: Headers,
    pub meta: Map<String, Value>,
}

/// One in-flight API call.
///
/// Built fresh by the dispatcher for every call. Listeners receive it
/// mutably, so a `request` listener can still adjust headers, query or
/// payload before the transport runs. `error` and `response` are filled in
/// once the transport returns.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// Absolute URL, without the query string.
    pub request_url: String,
    pub http_method: HttpMethod,
    pub payload: Option<Value>,
    pub query: Query,
    pub headers: Headers,
    pub meta: Map<String, Value>,
    pub model_name: String,
    pub method_name: String,
    pub uses_form_data: bool,
    pub error: Option<ApiError>,
    pub response: Option<HttpResponse>,
}

impl RequestDescriptor {
    /// The request URL with the encoded query string appended.
    pub fn url_with_query(&self) -> String {
        let query = crate::query::build_query_string(&self.query);
        if query.is_empty() {
            self.request_url.clone()
        } else {
            format!("{}?{query}", self.request_url)
        }
    }
}

/// Split a call into URL, payload, query, headers and metadata.
pub fn extract_request_arguments(descriptor: &MethodDescriptor, args: CallArgs) -> ExtractedRequest {
    let CallArgs { params, payload, options } = args;

    let request_url = substitute_path(descriptor.path, descriptor.params, &params);

    let payload = if descriptor.takes_payload() {
        payload
    } else {
        if payload.is_some() {
            tracing::debug!(
                model = descriptor.model_name,
                method = descriptor.method_name,
                "ignoring payload for a method that sends none"
            );
        }
        None
    };

    let options = options.unwrap_or_default();
    let query = options
        .query
        .as_ref()
        .map(normalize_query_values)
        .unwrap_or_default();
    let headers = options_to_headers(&options);
    let meta = options.meta.unwrap_or_default();

    ExtractedRequest {
        request_url,
        http_method: descriptor.http_method,
        payload,
        query,
        headers,
        meta,
    }
}

/// Replace `{name}` placeholders positionally.
fn substitute_path(template: &str, names: &[&str], values: &[String]) -> String {
    let mut path = template.to_string();
    for (index, name) in names.iter().enumerate() {
        let value = values.get(index).map(String::as_str).unwrap_or("");
        path = path.replace(&format!("{{{name}}}"), value);
    }
    path
}
