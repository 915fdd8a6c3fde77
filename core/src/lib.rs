//! Client core for the Clayful REST API.
//!
//! # Overview
//! Turns declarative method descriptions into HTTP requests and formats the
//! numbers, prices and image URLs the API returns. The core performs no I/O:
//! the host installs a transport plugin and the `Client` drives each call
//! through it, firing `request`/`response` events around the round-trip.
//!
//! # Design
//! - `MethodDescriptor` constants describe API methods; `CallArgs` carries
//!   the path values, payload and `Options` of one call.
//! - `extract_request_arguments` builds the relative request; `Client`
//!   completes it with the base URL and default headers, then dispatches.
//! - `Client` owns its configuration, so independently configured clients
//!   can coexist and tests stay isolated.
//! - `ClientError::Api` is the only failure that still fires `response`.
//!
//! ```
//! use clayful_core::{CallArgs, Client, HttpMethod, HttpResponse, MethodDescriptor, Options, RequestDescriptor};
//!
//! const GET_PRODUCT: MethodDescriptor =
//!     MethodDescriptor::new("Product", "get", HttpMethod::Get, "/v1/products/{productId}").params(&["productId"]);
//!
//! let mut client = Client::default();
//! client.config(&Options::new().language("en"));
//! client.install("request", |_req: &RequestDescriptor| {
//!     Ok::<_, clayful_core::ClientError>(HttpResponse::from_raw(200, Vec::new(), r#"{"_id":"p1"}"#))
//! });
//!
//! let response = client.call_api(&GET_PRODUCT, CallArgs::new().param("p1")).unwrap();
//! assert_eq!(response.data["_id"], "p1");
//! ```

pub mod client;
pub mod error;
pub mod events;
pub mod format;
pub mod http;
pub mod options;
pub mod query;
pub mod request;
pub mod transport;

pub use client::{Client, DEFAULT_BASE_URL, REQUEST_PLUGIN};
pub use error::{ApiError, ClientError};
pub use events::{listener, Event, EventBus, Listener};
pub use format::{format_image_url, format_number, format_price, CurrencyOptions, Delimiter};
pub use http::{HttpMethod, HttpResponse};
pub use options::{options_to_headers, Headers, Options};
pub use query::{build_query_string, normalize_query_values, Query};
pub use request::{extract_request_arguments, CallArgs, ExtractedRequest, MethodDescriptor, RequestDescriptor};
pub use transport::Transport;
