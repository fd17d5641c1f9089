//! Executes one `HttpRequest` over the network.
//!
//! # Design
//! `Transport` is the seam between the pure builders/decoders and real I/O.
//! `UreqTransport` creates a fresh agent per call so no connection outlives
//! its response, bounds every call by a global timeout, and returns non-2xx
//! replies as data. There is no retry. Response bodies are read without a
//! size cap.

use std::io;
use std::net::ToSocketAddrs;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Performs exactly one network round trip for a request.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by `ureq`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    timeout: Duration,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn agent(timeout: Duration) -> ureq::Agent {
        ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let timeout = request.timeout.unwrap_or(self.timeout);
        let agent = Self::agent(timeout);
        let started = Instant::now();

        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => agent.get(&request.path).call(),
            (HttpMethod::Delete, _) => agent.delete(&request.path).call(),
            (HttpMethod::Post, Some(body)) => agent
                .post(&request.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => agent.post(&request.path).send_empty(),
            (HttpMethod::Put, Some(body)) => agent
                .put(&request.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => agent.put(&request.path).send_empty(),
        };

        let mut response = result.map_err(|e| classify_send(e, timeout, &request.path))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| classify(e, timeout))?;

        debug!(
            method = request.method.as_str(),
            url = %request.path,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "round trip complete"
        );

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Map a `ureq` failure onto the transport error taxonomy.
fn classify(err: ureq::Error, timeout: Duration) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout(timeout),
        ureq::Error::HostNotFound => TransportError::DnsFailure("host not found".to_string()),
        ureq::Error::ConnectionFailed => TransportError::ConnectionRefused("connection failed".to_string()),
        ureq::Error::Tls(msg) => TransportError::TlsFailure(msg.to_string()),
        ureq::Error::Io(e) => classify_io(e, timeout),
        other => TransportError::Io(other.to_string()),
    }
}

/// Like `classify`, but an otherwise unexplained I/O failure is reported as
/// `DnsFailure` when the URL's host does not resolve. The resolver's own
/// error reaches us as a plain `ureq::Error::Io`.
fn classify_send(err: ureq::Error, timeout: Duration, url: &str) -> TransportError {
    match classify(err, timeout) {
        TransportError::Io(msg) => match lookup_failure(url) {
            Some(reason) => TransportError::DnsFailure(reason),
            None => TransportError::Io(msg),
        },
        other => other,
    }
}

/// Resolve the host of `url`, returning why it failed, if it did.
fn lookup_failure(url: &str) -> Option<String> {
    let uri: ureq::http::Uri = url.parse().ok()?;
    let host = uri.host()?.trim_start_matches('[').trim_end_matches(']');
    let default_port = if uri.scheme_str() == Some("https") { 443 } else { 80 };
    let port = uri.port_u16().unwrap_or(default_port);
    match (host, port).to_socket_addrs() {
        Ok(addrs) if addrs.len() > 0 => None,
        Ok(_) => Some(format!("{host}: no addresses")),
        Err(e) => Some(format!("{host}: {e}")),
    }
}

fn classify_io(err: io::Error, timeout: Duration) -> TransportError {
    match err.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TransportError::Timeout(timeout),
        io::ErrorKind::ConnectionRefused => TransportError::ConnectionRefused(err.to_string()),
        _ => TransportError::Io(err.to_string()),
    }
}
