//! Core library for the envdash BME680 sensor dashboard.
//!
//! The sensor (ESP8266 firmware) serves a small JSON API: device status,
//! the current environment reading, a rolling history window and two
//! editable settings. This crate fetches those resources and keeps the
//! dashboard's view state, independent of any particular front end.
//!
//! # Features
//!
//! - **Resource loading**: one request per user action, with a loading
//!   indicator per resource and no partial updates on failure
//! - **Config reconciliation**: server-confirmed versus locally edited
//!   settings with dirty flags
//! - **Chart series**: history converted into four time-keyed series
//! - **Tabs**: active tab with URL-fragment sync
//!
//! # Quick Start
//!
//! ```no_run
//! use envdash_core::{Dashboard, DeviceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DeviceClient::new("http://192.168.1.20/#history")?;
//!     let mut dashboard = Dashboard::from_fragment(Some("history"));
//!
//!     dashboard.start(&client).await;
//!     println!("{} history samples", dashboard.history().len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dashboard;
pub mod duration;
pub mod error;
pub mod indicator;
pub mod loader;
pub mod messages;
pub mod mock;
pub mod reconcile;
pub mod series;
pub mod tabs;
pub mod traits;

pub use client::{DEFAULT_TIMEOUT, DeviceClient};
pub use dashboard::Dashboard;
pub use duration::{humanize_duration, humanize_seconds};
pub use error::{Error, Result};
pub use indicator::{Indicators, LoaderState, Resource};
pub use loader::{FetchRequest, Payload, fetch};
pub use messages::{Command, DashboardEvent};
pub use mock::{MockDevice, MockDeviceBuilder};
pub use reconcile::ConfigReconciler;
pub use series::{ChartSeries, HistoryView, Metric};
pub use tabs::{Tab, TabController, UnknownTab};
pub use traits::DeviceApi;

// Re-export from envdash-types
pub use envdash_types::{
    ConfigRecord, ConfigResponse, ConfigUpdate, EnvironmentReading, HISTORY_INTERVAL_OPTIONS,
    HistoryEntry, Properties, Property, PropertyKind, PropertyValue, SeriesPoint, ServerConfig,
    format_timestamp, interval_text,
};
