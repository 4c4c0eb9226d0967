pub mod http;

pub use http::HttpTransport;

use std::io;
use std::sync::Arc;

/// An outgoing POST with an already encoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Resource path, e.g. `/workouts/`. Resolved against the transport's base url.
    pub path: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures where no HTTP response came back at all.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid request url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("i/o error while reading response: {0}")]
    Io(#[from] io::Error),
}

/// The seam between the submission handler and the network.
pub trait Transport: Send + Sync {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).post(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).post(request)
    }
}

#[cfg(test)]
mod tests {
    use super::HttpResponse;

    #[test]
    fn only_2xx_counts_as_success() {
        assert!(HttpResponse::new(200, "{}").is_success());
        assert!(HttpResponse::new(201, "{}").is_success());
        assert!(HttpResponse::new(299, "").is_success());
        for status in [199, 300, 304, 400, 404, 500] {
            assert!(!HttpResponse::new(status, "").is_success(), "status {status}");
        }
    }
}
