//! Client library for the DeepDetect inference server REST API.
//!
//! # Overview
//! Turns typed configuration into the server's JSON requests and its JSON
//! replies back into typed results, for `/info`, `/services/{name}` and
//! `/predict`. Every call is a single request/response round trip.
//!
//! # Design
//! - `DeepDetectClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. Neither touches the network.
//! - `codec` owns the field mapping: zero-valued optional fields are left out
//!   of requests, missing response fields decode to zero values.
//! - `Transport` executes one request; `UreqTransport` is the default.
//! - `DeepDetect` chains the three for callers who just want results.
//! - The server's `status` envelope is returned as data, never turned into an
//!   error.

pub mod api;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod http;
pub mod response;
pub mod transport;
pub mod types;

pub use api::DeepDetect;
pub use client::DeepDetectClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, DecodeError, EncodeError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::{
    BoundingBox, InfoHead, InstanceInfo, Job, Mask, PredictBody, PredictHead, PredictResult,
    PredictedClass, Prediction, ServiceInfo, ServiceInfoBody, ServiceStatus, ServiceSummary, Status,
};
pub use transport::{Transport, UreqTransport, DEFAULT_TIMEOUT};
pub use types::{
    InputParameters, MlType, MllibParameters, ModelConfig, OutputParameters, PredictParameters,
    PredictRequest, ServiceConfig, ServiceParameters,
};
