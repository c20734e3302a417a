//! Tab selection and URL-fragment sync.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::indicator::Resource;
use crate::loader::FetchRequest;

/// A dashboard tab. Each tab shows exactly one resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Status,
    #[default]
    Env,
    History,
    Config,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Tab; 4] = [Self::Status, Self::Env, Self::History, Self::Config];

    /// Tab identifier, as used in URL fragments.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.resource().as_str()
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::Env => "Environment",
            Self::History => "History",
            Self::Config => "Config",
        }
    }

    /// The resource this tab displays.
    #[must_use]
    pub fn resource(&self) -> Resource {
        match self {
            Self::Status => Resource::Status,
            Self::Env => Resource::Env,
            Self::History => Resource::History,
            Self::Config => Resource::Config,
        }
    }

    /// Position in [`Tab::ALL`].
    #[must_use]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    /// The tab after this one, wrapping around.
    #[must_use]
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The tab before this one, wrapping around.
    #[must_use]
    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown tab identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tab '{0}'. Valid: status, env, history, config")]
pub struct UnknownTab(pub String);

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "status" => Ok(Self::Status),
            "env" => Ok(Self::Env),
            "history" => Ok(Self::History),
            "config" => Ok(Self::Config),
            _ => Err(UnknownTab(s.to_string())),
        }
    }
}

/// Split `url` at its first `#` into the part before and the fragment.
///
/// ```
/// use envdash_core::tabs::split_fragment;
///
/// assert_eq!(split_fragment("http://a/#env"), ("http://a/", Some("env")));
/// assert_eq!(split_fragment("http://a/"), ("http://a/", None));
/// ```
#[must_use]
pub fn split_fragment(url: &str) -> (&str, Option<&str>) {
    match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    }
}

/// The non-empty fragment of `url`, if any.
#[must_use]
pub fn fragment_of(url: &str) -> Option<&str> {
    split_fragment(url).1.filter(|f| !f.is_empty())
}

/// Owns the active tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabController {
    active: Tab,
}

impl TabController {
    /// Start on `tab`.
    #[must_use]
    pub fn new(tab: Tab) -> Self {
        Self { active: tab }
    }

    /// Start on the tab named by a URL fragment, or [`Tab::Env`] if the
    /// fragment is missing or not a tab identifier.
    #[must_use]
    pub fn from_fragment(fragment: Option<&str>) -> Self {
        let active = fragment
            .map(|f| f.trim_start_matches('#'))
            .and_then(|f| f.parse().ok())
            .unwrap_or_default();
        Self { active }
    }

    /// The active tab.
    #[must_use]
    pub fn active(&self) -> Tab {
        self.active
    }

    /// Select the tab named `id`.
    ///
    /// An unknown id is ignored and returns `None`. A known id becomes
    /// active and returns the one fetch its resource needs; selecting the
    /// active tab again re-fetches.
    pub fn select(&mut self, id: &str) -> Option<FetchRequest> {
        let tab: Tab = id.parse().ok()?;
        Some(self.select_tab(tab))
    }

    /// Select `tab`, returning the fetch for its resource.
    pub fn select_tab(&mut self, tab: Tab) -> FetchRequest {
        self.active = tab;
        FetchRequest::for_resource(tab.resource())
    }

    /// The location for the active tab: `base` with its fragment replaced.
    #[must_use]
    pub fn location(&self, base: &str) -> String {
        let (base, _) = split_fragment(base);
        format!("{base}#{}", self.active)
    }
}
