//! Server-confirmed versus locally edited device configuration.
//!
//! The reconciler keeps two records side by side. The server record only
//! changes when a config response arrives; the local record changes on user
//! edits and is re-seeded from every response. Dirty flags are plain
//! comparisons, computed on each call.

use serde::Serialize;

use envdash_types::{
    ConfigRecord, ConfigResponse, ConfigUpdate, HISTORY_INTERVAL_OPTIONS, ServerConfig,
    is_standard_interval,
};

/// Holds the server and local configuration records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigReconciler {
    server: ServerConfig,
    local: ConfigRecord,
}

impl ConfigReconciler {
    /// Start from the built-in defaults (10 s interval, no sleep on reset).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last configuration confirmed by the device.
    #[must_use]
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// The user's in-progress edits.
    #[must_use]
    pub fn local(&self) -> &ConfigRecord {
        &self.local
    }

    /// Apply a config read or save response.
    ///
    /// Only fields present in the response are touched. Each one overwrites
    /// both the server and the local record, discarding unsaved local edits
    /// to that field.
    pub fn apply_response(&mut self, response: &ConfigResponse) {
        if let Some(interval) = response.history_interval {
            self.server.history_interval = interval;
            self.server.standard = is_standard_interval(interval);
            self.local.history_interval = interval;
        }

        if let Some(flag) = response.sleep_on_reset_flag() {
            self.server.sleep_on_reset = flag;
            self.local.sleep_on_reset = flag;
        }
    }

    /// Whether the local interval differs from the server's.
    #[must_use]
    pub fn history_interval_changed(&self) -> bool {
        self.local.history_interval != self.server.history_interval
    }

    /// Whether the local sleep-on-reset flag differs from the server's.
    #[must_use]
    pub fn sleep_on_reset_changed(&self) -> bool {
        self.local.sleep_on_reset != self.server.sleep_on_reset
    }

    /// Whether there is anything to save.
    #[must_use]
    pub fn config_changed(&self) -> bool {
        self.history_interval_changed() || self.sleep_on_reset_changed()
    }

    /// PUT body for a save, captured from the local record now.
    #[must_use]
    pub fn save_request(&self) -> ConfigUpdate {
        ConfigUpdate::from(self.local)
    }

    pub fn set_history_interval(&mut self, seconds: u32) {
        self.local.history_interval = seconds;
    }

    pub fn set_sleep_on_reset(&mut self, enabled: bool) {
        self.local.sleep_on_reset = enabled;
    }

    pub fn toggle_sleep_on_reset(&mut self) {
        self.local.sleep_on_reset = !self.local.sleep_on_reset;
    }

    /// Move the local interval to the next (or previous) standard option.
    ///
    /// A custom interval steps to the nearest standard option in that
    /// direction; stepping past either end wraps around.
    pub fn cycle_history_interval(&mut self, forward: bool) {
        let current = self.local.history_interval;
        let options: Vec<u32> = HISTORY_INTERVAL_OPTIONS.iter().map(|o| o.seconds).collect();
        let last = options.len() - 1;

        let next = match options.iter().position(|s| *s == current) {
            Some(i) if forward => options[if i == last { 0 } else { i + 1 }],
            Some(i) => options[if i == 0 { last } else { i - 1 }],
            None if forward => options
                .iter()
                .copied()
                .find(|s| *s > current)
                .unwrap_or(options[0]),
            None => options
                .iter()
                .rev()
                .copied()
                .find(|s| *s < current)
                .unwrap_or(options[last]),
        };
        self.local.history_interval = next;
    }

    /// Discard local edits.
    pub fn revert(&mut self) {
        self.local = self.server.record();
    }
}
