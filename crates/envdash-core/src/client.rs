//! HTTP client for the sensor's REST API.
//!
//! # Example
//!
//! ```no_run
//! use envdash_core::DeviceClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DeviceClient::new("http://192.168.1.20")?;
//!
//! let env = client.env().await?;
//! println!("{:.1} °C, {:.0} mbar", env.temp, env.pressure);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use envdash_types::{ConfigResponse, ConfigUpdate, EnvResponse, HistoryResponse, StatusResponse};

use crate::error::{Error, Result};
use crate::tabs::split_fragment;
use crate::traits::DeviceApi;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for one sensor device.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    client: Client,
    base_url: String,
}

impl DeviceClient {
    /// Create a client with the default timeout.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The device's base URL (e.g., "http://192.168.1.20").
    ///   A trailing `/` and any `#fragment` are stripped.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Request)?;

        Self::with_client(base_url, client)
    }

    /// Create a client with a custom reqwest Client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/status`
    pub async fn status(&self) -> Result<StatusResponse> {
        self.get(&self.url("status")).await
    }

    /// `GET /api/env`
    pub async fn env(&self) -> Result<EnvResponse> {
        self.get(&self.url("env")).await
    }

    /// `GET /api/history`
    pub async fn history(&self) -> Result<HistoryResponse> {
        self.get(&self.url("history")).await
    }

    /// `GET /api/config`
    pub async fn config(&self) -> Result<ConfigResponse> {
        self.get(&self.url("config")).await
    }

    /// `PUT /api/config`
    pub async fn put_config(&self, update: &ConfigUpdate) -> Result<ConfigResponse> {
        self.put_json(&self.url("config"), update).await
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/api/{}", self.base_url, resource)
    }

    // ======================================================================
    // Internal HTTP helpers
    // ======================================================================

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.to_string(),
                source: e,
            })?;

        handle_response(response).await
    }

    async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        debug!("PUT {url}");
        let response = self
            .client
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.to_string(),
                source: e,
            })?;

        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        response.json().await.map_err(Error::Request)
    } else {
        Err(Error::status(status.as_u16()))
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let (base, _) = split_fragment(raw.trim());
    let base = base.trim_end_matches('/').to_string();

    if !base.starts_with("http://") && !base.starts_with("https://") {
        return Err(Error::invalid_url(format!(
            "URL must start with http:// or https://, got: {base}"
        )));
    }

    Ok(base)
}

#[async_trait]
impl DeviceApi for DeviceClient {
    async fn fetch_status(&self) -> Result<StatusResponse> {
        self.status().await
    }

    async fn fetch_env(&self) -> Result<EnvResponse> {
        self.env().await
    }

    async fn fetch_history(&self) -> Result<HistoryResponse> {
        self.history().await
    }

    async fn fetch_config(&self) -> Result<ConfigResponse> {
        self.config().await
    }

    async fn put_config(&self, update: &ConfigUpdate) -> Result<ConfigResponse> {
        DeviceClient::put_config(self, update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = DeviceClient::new("http://192.168.1.20");
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "http://192.168.1.20");
    }

    #[test]
    fn test_client_normalizes_url() {
        let client = DeviceClient::new("http://192.168.1.20/").unwrap();
        assert_eq!(client.base_url(), "http://192.168.1.20");
    }

    #[test]
    fn test_client_strips_fragment() {
        let client = DeviceClient::new("http://10.0.0.5/#history").unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.5");
        assert_eq!(client.url("env"), "http://10.0.0.5/api/env");
    }

    #[test]
    fn test_client_invalid_url() {
        let result = DeviceClient::new("192.168.1.20");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
