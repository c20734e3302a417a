//! Mock device implementation for testing.
//!
//! [`MockDevice`] implements [`DeviceApi`] in memory so the dashboard can be
//! exercised without a sensor on the network.
//!
//! # Features
//!
//! - **Failure injection**: make any resource answer with an HTTP error status
//! - **Latency simulation**: delay every response
//! - **Request counters**: verify exactly how many requests were issued
//! - **Interval clamping**: confirm a different interval than the one saved

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use envdash_types::{
    ConfigResponse, ConfigUpdate, EnvResponse, HistoryResponse, PropertyKind, PropertyValue,
    RawHistoryEntry, RawProperty, StatusResponse,
};

use crate::error::{Error, Result};
use crate::indicator::Resource;
use crate::traits::DeviceApi;

/// A mock sensor device for testing.
///
/// # Example
///
/// ```
/// use envdash_core::{DeviceApi, MockDevice};
///
/// #[tokio::main]
/// async fn main() {
///     let device = MockDevice::builder().temp(21.0).build();
///     let env = device.fetch_env().await.unwrap();
///     assert_eq!(env.temp, 21.0);
/// }
/// ```
pub struct MockDevice {
    status: RwLock<StatusResponse>,
    env: RwLock<EnvResponse>,
    history: RwLock<Vec<RawHistoryEntry>>,
    config: RwLock<ConfigResponse>,
    /// HTTP status returned instead of a body, per resource.
    failures: RwLock<HashMap<Resource, u16>>,
    /// Largest interval the device accepts on save (0 = no limit).
    max_interval: AtomicU32,
    /// Simulated response latency in milliseconds (0 = no delay).
    latency_ms: AtomicU64,
    request_counts: [AtomicU32; 4],
    put_count: AtomicU32,
}

impl std::fmt::Debug for MockDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDevice")
            .field("latency_ms", &self.latency_ms.load(Ordering::Relaxed))
            .field("put_count", &self.put_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for MockDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDevice {
    /// Create a mock device with default values.
    pub fn new() -> Self {
        MockDeviceBuilder::new().build()
    }

    /// Create a builder.
    pub fn builder() -> MockDeviceBuilder {
        MockDeviceBuilder::new()
    }

    fn default_status() -> StatusResponse {
        StatusResponse {
            status: vec![
                RawProperty {
                    name: "Uptime".to_string(),
                    value: PropertyValue::Number(3725.0),
                    kind: Some(PropertyKind::Seconds),
                },
                RawProperty {
                    name: "Firmware".to_string(),
                    value: PropertyValue::Text("1.0.0".to_string()),
                    kind: None,
                },
                RawProperty {
                    name: "Free heap".to_string(),
                    value: PropertyValue::Number(24_576.0),
                    kind: Some(PropertyKind::Plain),
                },
            ],
            hostname: Some("bme680-mock".to_string()),
            ipaddr: Some("127.0.0.1".to_string()),
        }
    }

    fn default_env() -> EnvResponse {
        EnvResponse {
            temp: 21.5,
            pressure: 1013.25,
            humidity: 45.0,
            gas: 150.0,
            time: 1_700_000_000.0,
        }
    }

    fn default_config() -> ConfigResponse {
        ConfigResponse {
            history_interval: Some(10),
            sleep_on_reset: Some(Value::Bool(false)),
        }
    }

    /// Replace the status response.
    pub async fn set_status(&self, status: StatusResponse) {
        *self.status.write().await = status;
    }

    /// Replace the environment reading.
    pub async fn set_env(&self, env: EnvResponse) {
        *self.env.write().await = env;
    }

    /// Set only the temperature of the environment reading.
    pub async fn set_temp(&self, temp: f64) {
        self.env.write().await.temp = temp;
    }

    /// Replace the history window.
    pub async fn set_history(&self, history: Vec<RawHistoryEntry>) {
        *self.history.write().await = history;
    }

    /// Replace the config response body.
    pub async fn set_config(&self, config: ConfigResponse) {
        *self.config.write().await = config;
    }

    /// Make `resource` answer with `status` (or succeed again with `None`).
    pub async fn set_failure(&self, resource: Resource, status: Option<u16>) {
        let mut failures = self.failures.write().await;
        match status {
            Some(code) => failures.insert(resource, code),
            None => failures.remove(&resource),
        };
    }

    /// Set simulated response latency.
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::Relaxed);
    }

    /// Requests issued for `resource` so far (saves count towards config).
    pub fn request_count(&self, resource: Resource) -> u32 {
        self.request_counts[index(resource)].load(Ordering::Relaxed)
    }

    /// `PUT` requests issued so far.
    pub fn put_count(&self) -> u32 {
        self.put_count.load(Ordering::Relaxed)
    }

    /// Total requests issued for all resources.
    pub fn total_requests(&self) -> u32 {
        self.request_counts
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }

    /// Reset all request counters.
    pub fn reset_counts(&self) {
        for count in &self.request_counts {
            count.store(0, Ordering::Relaxed);
        }
        self.put_count.store(0, Ordering::Relaxed);
    }

    async fn begin_request(&self, resource: Resource) -> Result<()> {
        self.request_counts[index(resource)].fetch_add(1, Ordering::Relaxed);

        let latency = self.latency_ms.load(Ordering::Relaxed);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        match self.failures.read().await.get(&resource) {
            Some(code) => Err(Error::status(*code)),
            None => Ok(()),
        }
    }
}

fn index(resource: Resource) -> usize {
    match resource {
        Resource::Status => 0,
        Resource::Env => 1,
        Resource::History => 2,
        Resource::Config => 3,
    }
}

#[async_trait]
impl DeviceApi for MockDevice {
    async fn fetch_status(&self) -> Result<StatusResponse> {
        self.begin_request(Resource::Status).await?;
        Ok(self.status.read().await.clone())
    }

    async fn fetch_env(&self) -> Result<EnvResponse> {
        self.begin_request(Resource::Env).await?;
        Ok(*self.env.read().await)
    }

    async fn fetch_history(&self) -> Result<HistoryResponse> {
        self.begin_request(Resource::History).await?;
        Ok(HistoryResponse {
            history: self.history.read().await.clone(),
        })
    }

    async fn fetch_config(&self) -> Result<ConfigResponse> {
        self.begin_request(Resource::Config).await?;
        Ok(self.config.read().await.clone())
    }

    async fn put_config(&self, update: &ConfigUpdate) -> Result<ConfigResponse> {
        self.put_count.fetch_add(1, Ordering::Relaxed);
        self.begin_request(Resource::Config).await?;

        let max = self.max_interval.load(Ordering::Relaxed);
        let interval = if max > 0 {
            update.history_interval.min(max)
        } else {
            update.history_interval
        };

        let mut config = self.config.write().await;
        *config = ConfigResponse {
            history_interval: Some(interval),
            sleep_on_reset: Some(Value::Bool(update.sleep_on_reset)),
        };
        Ok(config.clone())
    }
}

/// Builder for creating mock devices with custom settings.
#[derive(Debug)]
pub struct MockDeviceBuilder {
    status: StatusResponse,
    env: EnvResponse,
    history: Vec<RawHistoryEntry>,
    config: ConfigResponse,
    failures: HashMap<Resource, u16>,
    max_interval: u32,
    latency: Duration,
}

impl Default for MockDeviceBuilder {
    fn default() -> Self {
        Self {
            status: MockDevice::default_status(),
            env: MockDevice::default_env(),
            history: Vec::new(),
            config: MockDevice::default_config(),
            failures: HashMap::new(),
            max_interval: 0,
            latency: Duration::ZERO,
        }
    }
}

impl MockDeviceBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the status response.
    pub fn status(mut self, status: StatusResponse) -> Self {
        self.status = status;
        self
    }

    /// Set the host name reported by status.
    pub fn hostname(mut self, hostname: &str) -> Self {
        self.status.hostname = Some(hostname.to_string());
        self
    }

    /// Set the environment reading.
    pub fn env(mut self, env: EnvResponse) -> Self {
        self.env = env;
        self
    }

    /// Set the temperature of the environment reading.
    pub fn temp(mut self, temp: f64) -> Self {
        self.env.temp = temp;
        self
    }

    /// Set the history window.
    pub fn history(mut self, history: Vec<RawHistoryEntry>) -> Self {
        self.history = history;
        self
    }

    /// Set the config response body.
    pub fn config(mut self, config: ConfigResponse) -> Self {
        self.config = config;
        self
    }

    /// Set the stored history interval.
    pub fn history_interval(mut self, seconds: u32) -> Self {
        self.config.history_interval = Some(seconds);
        self
    }

    /// Set the stored sleep-on-reset flag.
    pub fn sleep_on_reset(mut self, enabled: bool) -> Self {
        self.config.sleep_on_reset = Some(Value::Bool(enabled));
        self
    }

    /// Make `resource` answer with HTTP `status`.
    pub fn fail(mut self, resource: Resource, status: u16) -> Self {
        self.failures.insert(resource, status);
        self
    }

    /// Clamp intervals saved through `PUT` to at most `seconds`.
    pub fn max_interval(mut self, seconds: u32) -> Self {
        self.max_interval = seconds;
        self
    }

    /// Delay every response.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Build the mock device.
    pub fn build(self) -> MockDevice {
        MockDevice {
            status: RwLock::new(self.status),
            env: RwLock::new(self.env),
            history: RwLock::new(self.history),
            config: RwLock::new(self.config),
            failures: RwLock::new(self.failures),
            max_interval: AtomicU32::new(self.max_interval),
            latency_ms: AtomicU64::new(self.latency.as_millis() as u64),
            request_counts: Default::default(),
            put_count: AtomicU32::new(0),
        }
    }
}
