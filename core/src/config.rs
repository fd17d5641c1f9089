//! Caller-owned client configuration.
//!
//! Hosts can build a `ClientConfig` in code, read it from the environment
//! (`DD_HOST`, `DD_TIMEOUT_SECS`) or embed it in their own config files through
//! serde (`host`, `timeout_secs`).

use std::time::Duration;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::transport::DEFAULT_TIMEOUT;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DD_HOST is not set")]
    MissingHost,

    #[error("DD_TIMEOUT_SECS is not a whole number of seconds: {0:?}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub host: String,
    #[serde(
        rename = "timeout_secs",
        default = "default_timeout",
        deserialize_with = "timeout_from_secs"
    )]
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("DD_HOST")
            .filter(|h| !h.is_empty())
            .ok_or(ConfigError::MissingHost)?;
        let mut config = Self::new(&host);
        if let Some(raw) = lookup("DD_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn timeout_from_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn new_uses_default_timeout() {
        let config = ClientConfig::new("http://127.0.0.1:8080");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn env_requires_host() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingHost);
    }

    #[test]
    fn env_reads_timeout() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("DD_HOST", "http://dd:8080"),
            ("DD_TIMEOUT_SECS", "10"),
        ]))
        .unwrap();
        assert_eq!(config.host, "http://dd:8080");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn env_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("DD_HOST", "http://dd:8080"),
            ("DD_TIMEOUT_SECS", "ten"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidTimeout("ten".to_string()));
    }

    #[test]
    fn deserializes_from_json() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"host":"http://dd:8080","timeout_secs":5}"#).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));

        let config: ClientConfig = serde_json::from_str(r#"{"host":"http://dd:8080"}"#).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(60));
    }
}
