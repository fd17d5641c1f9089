//! Request builders and response decoders for the inference server API.
//!
//! # Design
//! `DeepDetectClient` holds only a `base_url` and carries no state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Parsers decode whatever body arrives regardless of the HTTP status: the
//! server reports application failures inside the `status` envelope, which is
//! handed back to the caller uninterpreted.

use crate::codec;
use crate::error::{DecodeError, EncodeError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::response::{InstanceInfo, PredictResult, ServiceInfo, ServiceStatus};
use crate::types::{validate_service_name, PredictRequest, ServiceConfig};

/// Stateless request builder and response decoder.
#[derive(Debug, Clone)]
pub struct DeepDetectClient {
    base_url: String,
}

impl DeepDetectClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_info(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/info".to_string(), None)
    }

    pub fn build_create_service(&self, service: &ServiceConfig) -> Result<HttpRequest, EncodeError> {
        validate_service_name(&service.name)?;
        let body = codec::encode(service)?;
        Ok(self.request(HttpMethod::Put, format!("/services/{}", service.name), Some(body)))
    }

    pub fn build_service_info(&self, name: &str) -> Result<HttpRequest, EncodeError> {
        validate_service_name(name)?;
        Ok(self.request(HttpMethod::Get, format!("/services/{name}"), None))
    }

    pub fn build_delete_service(&self, name: &str) -> Result<HttpRequest, EncodeError> {
        validate_service_name(name)?;
        Ok(self.request(HttpMethod::Delete, format!("/services/{name}"), None))
    }

    pub fn build_predict(&self, predict: &PredictRequest) -> Result<HttpRequest, EncodeError> {
        predict.validate()?;
        let body = codec::encode(predict)?;
        Ok(self.request(HttpMethod::Post, "/predict".to_string(), Some(body)))
    }

    pub fn parse_info(&self, response: HttpResponse) -> Result<InstanceInfo, DecodeError> {
        codec::decode(&response.body)
    }

    pub fn parse_create_service(&self, response: HttpResponse) -> Result<ServiceStatus, DecodeError> {
        codec::decode(&response.body)
    }

    pub fn parse_service_info(&self, response: HttpResponse) -> Result<ServiceInfo, DecodeError> {
        codec::decode(&response.body)
    }

    pub fn parse_delete_service(&self, response: HttpResponse) -> Result<ServiceStatus, DecodeError> {
        codec::decode(&response.body)
    }

    pub fn parse_predict(&self, response: HttpResponse) -> Result<PredictResult, DecodeError> {
        codec::decode(&response.body)
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let headers = if body.is_some() {
            vec![("content-type".to_string(), "application/json".to_string())]
        } else {
            Vec::new()
        };
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers,
            body,
            timeout: None,
        }
    }
}
