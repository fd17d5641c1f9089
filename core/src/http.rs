//! HTTP transport types shared by the builders, the decoders and the
//! transport.
//!
//! # Design
//! Requests and responses are plain data. `DeepDetectClient` builds
//! `HttpRequest` values and decodes `HttpResponse` values without touching the
//! network; a `Transport` (or the caller) performs the actual round-trip.
//! Keeping the boundary explicit lets every builder and decoder be tested
//! against canned bytes.

use std::time::Duration;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `path` holds the full URL (base host plus endpoint path). `timeout`
/// overrides the transport's default for this call only.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// An HTTP response described as plain data.
///
/// The body is kept as raw bytes; decoding happens in `DeepDetectClient::parse_*`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Lossy UTF-8 view of the body, for diagnostics.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
