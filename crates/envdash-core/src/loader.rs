//! Resource fetching.
//!
//! [`fetch`] performs one request and converts the body into the shape the
//! dashboard stores. It holds no state, so it can run on a background task
//! while the results are applied elsewhere (see
//! [`Dashboard::handle_event`](crate::dashboard::Dashboard::handle_event)).

use tracing::debug;

use envdash_types::{
    ConfigResponse, ConfigUpdate, EnvironmentReading, Properties, Property, PropertyKind,
    RawProperty, StatusResponse,
};

use crate::duration::humanize_seconds;
use crate::error::Result;
use crate::indicator::Resource;
use crate::series::{self, HistoryView};
use crate::traits::DeviceApi;

/// A single request against the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchRequest {
    Status,
    Env,
    History,
    Config,
    /// `PUT /api/config` with the given body.
    SaveConfig(ConfigUpdate),
}

impl FetchRequest {
    /// The plain read for `resource`.
    #[must_use]
    pub fn for_resource(resource: Resource) -> Self {
        match resource {
            Resource::Status => Self::Status,
            Resource::Env => Self::Env,
            Resource::History => Self::History,
            Resource::Config => Self::Config,
        }
    }

    /// The resource whose indicator this request drives.
    #[must_use]
    pub fn resource(&self) -> Resource {
        match self {
            Self::Status => Resource::Status,
            Self::Env => Resource::Env,
            Self::History => Resource::History,
            Self::Config | Self::SaveConfig(_) => Resource::Config,
        }
    }
}

/// A converted response, ready to replace its slice of the view state.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Status(Properties),
    Env(EnvironmentReading),
    History(HistoryView),
    /// Response to a config read.
    Config(ConfigResponse),
    /// Response to a config save; applied exactly like a read.
    ConfigSaved(ConfigResponse),
}

impl Payload {
    /// The resource this payload belongs to.
    #[must_use]
    pub fn resource(&self) -> Resource {
        match self {
            Self::Status(_) => Resource::Status,
            Self::Env(_) => Resource::Env,
            Self::History(_) => Resource::History,
            Self::Config(_) | Self::ConfigSaved(_) => Resource::Config,
        }
    }
}

/// Issue `request` once and convert the response.
///
/// # Errors
///
/// Any transport failure, non-2xx status, undecodable body or invalid
/// timestamp. Nothing is retried.
pub async fn fetch<A: DeviceApi + ?Sized>(api: &A, request: &FetchRequest) -> Result<Payload> {
    debug!("Fetching {}", request.resource());

    let payload = match request {
        FetchRequest::Status => Payload::Status(build_properties(api.fetch_status().await?)),
        FetchRequest::Env => {
            let raw = api.fetch_env().await?;
            Payload::Env(EnvironmentReading::try_from(raw)?)
        }
        FetchRequest::History => {
            let raw = api.fetch_history().await?;
            Payload::History(series::transform(&raw.history)?)
        }
        FetchRequest::Config => Payload::Config(api.fetch_config().await?),
        FetchRequest::SaveConfig(update) => {
            Payload::ConfigSaved(api.put_config(update).await?)
        }
    };

    Ok(payload)
}

/// Build the property list from a status response.
///
/// Seconds-typed properties get a human `display_value`; a seconds property
/// whose value is not a non-negative number is kept without one.
#[must_use]
pub fn build_properties(response: StatusResponse) -> Properties {
    let entries = response.status.into_iter().map(build_property).collect();

    Properties {
        entries,
        hostname: response.hostname,
        ipaddr: response.ipaddr,
    }
}

fn build_property(raw: RawProperty) -> Property {
    let kind = raw.kind.unwrap_or_default();
    let display_value = match kind {
        PropertyKind::Seconds => raw.value.as_seconds().and_then(humanize_seconds),
        PropertyKind::Plain => None,
    };

    Property {
        name: raw.name,
        value: raw.value,
        kind,
        display_value,
    }
}
