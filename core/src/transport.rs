//! The transport plugin seam.
//!
//! The core never performs I/O itself. A host installs a `Transport` under the
//! `"request"` plugin name and the dispatcher hands it each finished
//! `RequestDescriptor`. Implementations are expected to honor `request_url`,
//! `http_method`, `payload`, `query`, `headers` and `uses_form_data`, and to
//! report error responses as `ClientError::Api` (see `ApiError::from_response`)
//! so the `response` event fires for them.

use crate::error::ClientError;
use crate::http::HttpResponse;
use crate::request::RequestDescriptor;

pub trait Transport: Send + Sync {
    fn request(&self, request: &RequestDescriptor) -> Result<HttpResponse, ClientError>;
}

impl<F> Transport for F
where
    F: Fn(&RequestDescriptor) -> Result<HttpResponse, ClientError> + Send + Sync,
{
    fn request(&self, request: &RequestDescriptor) -> Result<HttpResponse, ClientError> {
        self(request)
    }
}
