use crate::config::SourceConfig;
use crate::error::Result;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Client for the SIATA map-layer service.
///
/// One POST per call and no retries; the pipeline owns the retry policy.
pub struct Fetcher {
    client: Client,
    endpoint: String,
    layer_id: String,
}

impl Fetcher {
    pub fn new(source: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("siata-pm25/0.1.0")
            .timeout(source.timeout)
            // reqwest bounds TCP connect and TLS handshake with one timer
            .connect_timeout(source.connect_timeout + source.tls_handshake_timeout)
            .tcp_keepalive(source.tcp_keepalive)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            client,
            endpoint: source.endpoint.clone(),
            layer_id: source.layer_id.clone(),
        })
    }

    /// Request the layer and return the raw response body.
    pub async fn fetch(&self) -> Result<Vec<u8>> {
        info!("Requesting map data");
        debug!("POST {} id_capa={}", self.endpoint, self.layer_id);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("id_capa", self.layer_id.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        debug!("Received {} bytes of map data", body.len());
        Ok(body.to_vec())
    }
}
