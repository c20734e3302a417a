//! Per-resource loading indicators.
//!
//! Every fetchable resource has one indicator. UI regions are tagged with a
//! resource's [`Resource::loader_key`] and render the indicator's
//! [`LoaderState::class_name`]; untagged regions ignore it.

use core::fmt;
use std::collections::HashMap;

use serde::Serialize;

/// A resource the dashboard fetches from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// `GET /api/status`
    Status,
    /// `GET /api/env`
    Env,
    /// `GET /api/history`
    History,
    /// `GET`/`PUT /api/config`
    Config,
}

impl Resource {
    /// All resources in tab order.
    pub const ALL: [Resource; 4] = [Self::Status, Self::Env, Self::History, Self::Config];

    /// Resource name as used in API paths.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Env => "env",
            Self::History => "history",
            Self::Config => "config",
        }
    }

    /// Tag carried by UI regions bound to this resource's indicator.
    #[must_use]
    pub fn loader_key(&self) -> &'static str {
        match self {
            Self::Status => "status-loader",
            Self::Env => "env-loader",
            Self::History => "history-loader",
            Self::Config => "config-loader",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loading state of a single resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderState {
    /// No fetch issued yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch failed.
    Error,
    /// The last fetch succeeded.
    Done,
}

impl LoaderState {
    /// Presentation class for regions tagged with the resource's loader key.
    #[must_use]
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Idle | Self::Done => "loader",
            Self::Loading => "loader loader-loading",
            Self::Error => "loader loader-error",
        }
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Indicator states for all resources.
///
/// Setting a state never fails. A resource with no region on screen still
/// records its state; nothing renders it.
#[derive(Debug, Clone, Default)]
pub struct Indicators {
    states: HashMap<Resource, LoaderState>,
}

impl Indicators {
    /// Create indicators with every resource idle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state of `resource`.
    pub fn set_state(&mut self, resource: Resource, state: LoaderState) {
        self.states.insert(resource, state);
    }

    /// Current state of `resource`.
    #[must_use]
    pub fn state(&self, resource: Resource) -> LoaderState {
        self.states.get(&resource).copied().unwrap_or_default()
    }

    /// Presentation class of the regions tagged with `key`.
    ///
    /// Returns `None` for keys that belong to no resource.
    #[must_use]
    pub fn class_for_key(&self, key: &str) -> Option<&'static str> {
        Resource::ALL
            .iter()
            .find(|r| r.loader_key() == key)
            .map(|r| self.state(*r).class_name())
    }

    /// Whether any resource is currently loading.
    #[must_use]
    pub fn any_loading(&self) -> bool {
        self.states.values().any(LoaderState::is_loading)
    }
}
