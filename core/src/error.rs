//! Error types for the inference server client.
//!
//! # Design
//! Each stage of a call has its own error: encoding a request, moving bytes
//! over the network, decoding the reply. `ApiError` wraps all three for the
//! convenience client. A server-reported failure (`status.code != 200`) is not
//! an error here; it is returned as data in the decoded `Status`.

use std::time::Duration;

use thiserror::Error;

/// A request could not be turned into a wire payload.
#[derive(Debug, Error, PartialEq)]
pub enum EncodeError {
    /// Service names end up as a URL path segment and must be non-empty and
    /// limited to ASCII alphanumerics, `-`, `_` and `.`.
    #[error("invalid service name: {0:?}")]
    InvalidServiceName(String),

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// The network transaction itself failed. No retry is attempted.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    #[error("host not found: {0}")]
    DnsFailure(String),

    #[error("TLS failure: {0}")]
    TlsFailure(String),

    #[error("transport failed: {0}")]
    Io(String),
}

/// The response body was not valid JSON or a present field had the wrong
/// type. The raw body is kept for diagnostics.
#[derive(Debug, Error)]
#[error("deserialization failed: {message}")]
pub struct DecodeError {
    pub message: String,
    pub body: Vec<u8>,
}

/// Any failure of a full build, send and decode round trip.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_keeps_body() {
        let err = DecodeError {
            message: "expected value".to_string(),
            body: b"<html>".to_vec(),
        };
        assert_eq!(err.to_string(), "deserialization failed: expected value");
        assert_eq!(err.body, b"<html>");
    }

    #[test]
    fn api_error_is_transparent() {
        let err: ApiError = TransportError::Timeout(Duration::from_secs(1)).into();
        assert_eq!(err.to_string(), "request timed out after 1s");
        assert!(matches!(err, ApiError::Transport(TransportError::Timeout(_))));
    }
}
