//! Trait abstraction over the device's REST API.
//!
//! [`DeviceApi`] is implemented by the HTTP [`DeviceClient`](crate::DeviceClient)
//! and by [`MockDevice`](crate::MockDevice) for tests.

use async_trait::async_trait;

use envdash_types::{ConfigResponse, ConfigUpdate, EnvResponse, HistoryResponse, StatusResponse};

use crate::error::Result;

/// The five device endpoints the dashboard consumes.
///
/// Each call issues exactly one request and never retries.
///
/// # Example
///
/// ```ignore
/// use envdash_core::{DeviceApi, Result};
///
/// async fn print_temp<A: DeviceApi>(api: &A) -> Result<()> {
///     let env = api.fetch_env().await?;
///     println!("{:.1} °C", env.temp);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait DeviceApi: Send + Sync {
    /// `GET /api/status`
    async fn fetch_status(&self) -> Result<StatusResponse>;

    /// `GET /api/env`
    async fn fetch_env(&self) -> Result<EnvResponse>;

    /// `GET /api/history`
    async fn fetch_history(&self) -> Result<HistoryResponse>;

    /// `GET /api/config`
    async fn fetch_config(&self) -> Result<ConfigResponse>;

    /// `PUT /api/config`; returns the configuration the device confirmed.
    async fn put_config(&self, update: &ConfigUpdate) -> Result<ConfigResponse>;
}

#[async_trait]
impl<T: DeviceApi + ?Sized> DeviceApi for std::sync::Arc<T> {
    async fn fetch_status(&self) -> Result<StatusResponse> {
        (**self).fetch_status().await
    }

    async fn fetch_env(&self) -> Result<EnvResponse> {
        (**self).fetch_env().await
    }

    async fn fetch_history(&self) -> Result<HistoryResponse> {
        (**self).fetch_history().await
    }

    async fn fetch_config(&self) -> Result<ConfigResponse> {
        (**self).fetch_config().await
    }

    async fn put_config(&self, update: &ConfigUpdate) -> Result<ConfigResponse> {
        (**self).put_config(update).await
    }
}
