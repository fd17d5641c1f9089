//! Convenience client chaining build, send and decode.
//!
//! Each method is one request/response round trip. Failures of any stage are
//! returned as `ApiError`; the decoded `Status` is never inspected here.

use std::time::Duration;

use crate::client::DeepDetectClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::response::{InstanceInfo, PredictResult, ServiceInfo, ServiceStatus};
use crate::transport::{Transport, UreqTransport};
use crate::types::{PredictRequest, ServiceConfig};

/// Blocking client for the inference server: builds, sends and decodes.
#[derive(Debug, Clone)]
pub struct DeepDetect<T = UreqTransport> {
    client: DeepDetectClient,
    transport: T,
    timeout: Option<Duration>,
}

impl DeepDetect<UreqTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(&config.host, UreqTransport::new(config.timeout))
    }
}

impl<T: Transport> DeepDetect<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: DeepDetectClient::new(base_url),
            transport,
            timeout: None,
        }
    }

    /// Overrides the transport timeout for every call made through the
    /// returned client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn client(&self) -> &DeepDetectClient {
        &self.client
    }

    pub fn info(&self) -> Result<InstanceInfo, ApiError> {
        let response = self.send(self.client.build_info())?;
        Ok(self.client.parse_info(response)?)
    }

    pub fn create_service(&self, service: &ServiceConfig) -> Result<ServiceStatus, ApiError> {
        let response = self.send(self.client.build_create_service(service)?)?;
        Ok(self.client.parse_create_service(response)?)
    }

    pub fn service_info(&self, name: &str) -> Result<ServiceInfo, ApiError> {
        let response = self.send(self.client.build_service_info(name)?)?;
        Ok(self.client.parse_service_info(response)?)
    }

    pub fn delete_service(&self, name: &str) -> Result<ServiceStatus, ApiError> {
        let response = self.send(self.client.build_delete_service(name)?)?;
        Ok(self.client.parse_delete_service(response)?)
    }

    pub fn predict(&self, predict: &PredictRequest) -> Result<PredictResult, ApiError> {
        let response = self.send(self.client.build_predict(predict)?)?;
        Ok(self.client.parse_predict(response)?)
    }

    fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Some(timeout) = self.timeout {
            request = request.with_timeout(timeout);
        }
        Ok(self.transport.send(&request)?)
    }
}
