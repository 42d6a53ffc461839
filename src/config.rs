use crate::error::{AppError, Result};
use std::time::Duration;

pub const SIATA_ENDPOINT: &str =
    "https://siata.gov.co/siata_nuevo/index.php/capa_service/consultar_capa_carga";
pub const PM25_LAYER_ID: &str = "C_00000000000000000000602";

/// Runtime settings for one invocation of the job.
///
/// The production entry point always runs with `Config::default()`; the
/// fields exist so tests can point the job at local fakes.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub source: SourceConfig,
    pub storage: StorageConfig,
    pub metrics: MetricsConfig,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub endpoint: String,
    pub layer_id: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub tcp_keepalive: Duration,
    pub tls_handshake_timeout: Duration,
    /// IANA zone used for the `generated_at` stamp.
    pub time_zone: chrono_tz::Tz,
}

// The SIATA service is very slow, hence the long timeouts
impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: SIATA_ENDPOINT.to_string(),
            layer_id: PM25_LAYER_ID.to_string(),
            timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(30),
            tcp_keepalive: Duration::from_secs(30),
            tls_handshake_timeout: Duration::from_secs(30),
            time_zone: chrono_tz::America::Bogota,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub json_key: String,
    pub script_key: String,
    pub acl: String,
    pub content_type: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: "siata.picoyplaca.org".to_string(),
            region: "us-east-1".to_string(),
            json_key: "pm25.json".to_string(),
            script_key: "data.js".to_string(),
            acl: "public-read".to_string(),
            // Also used for data.js; dashboards already depend on it
            content_type: "application/json".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub namespace: String,
    pub metric_name: String,
    pub unit: String,
    pub dimension_name: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            // Typo kept: existing dashboards query this namespace
            namespace: "Station/2.5Meassurements".to_string(),
            metric_name: "PM25".to_string(),
            unit: "Count".to_string(),
            dimension_name: "StationName".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

impl Config {
    /// Validate configuration values
    ///
    /// Checks for:
    /// - A parseable http(s) endpoint
    /// - Non-empty identifiers and keys
    /// - Non-zero timeouts
    /// - A sane attempt count
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.source.endpoint).map_err(|e| {
            AppError::Config(format!(
                "Invalid source endpoint '{}': {}",
                self.source.endpoint, e
            ))
        })?;

        if parsed.scheme() != "https" && parsed.scheme() != "http" {
            return Err(AppError::Config(format!(
                "Source endpoint must use HTTP(S), got: {}",
                parsed.scheme()
            )));
        }

        let required = [
            ("source.layer_id", &self.source.layer_id),
            ("storage.bucket", &self.storage.bucket),
            ("storage.region", &self.storage.region),
            ("storage.json_key", &self.storage.json_key),
            ("storage.script_key", &self.storage.script_key),
            ("metrics.namespace", &self.metrics.namespace),
            ("metrics.metric_name", &self.metrics.metric_name),
            ("metrics.dimension_name", &self.metrics.dimension_name),
        ];

        for (field_name, value) in &required {
            if value.trim().is_empty() {
                return Err(AppError::Config(format!("{} cannot be empty", field_name)));
            }
        }

        if self.storage.json_key == self.storage.script_key {
            return Err(AppError::Config(format!(
                "storage.json_key and storage.script_key must differ, both are '{}'",
                self.storage.json_key
            )));
        }

        let timeouts = [
            ("source.timeout", self.source.timeout),
            ("source.connect_timeout", self.source.connect_timeout),
            ("source.tls_handshake_timeout", self.source.tls_handshake_timeout),
        ];

        for (field_name, value) in &timeouts {
            if value.is_zero() {
                return Err(AppError::Config(format!(
                    "{} must be greater than 0",
                    field_name
                )));
            }
        }

        if self.retry.max_attempts == 0 || self.retry.max_attempts > 10 {
            return Err(AppError::Config(format!(
                "retry.max_attempts must be between 1 and 10, got {}",
                self.retry.max_attempts
            )));
        }

        Ok(())
    }
}
