//! Shared data model for the envdash sensor dashboard.
//!
//! This crate holds the wire types of the device's REST API and the view-state
//! types the dashboard derives from them. It has no I/O of its own and is used
//! by both the core library (envdash-core) and the front ends (envdash-cli).
//!
//! # Example
//!
//! ```
//! use envdash_types::{EnvResponse, EnvironmentReading};
//!
//! let raw: EnvResponse = serde_json::from_str(
//!     r#"{"temp":21.5,"pressure":1013.2,"humidity":40.0,"gas":120.0,"time":1700000000}"#,
//! ).unwrap();
//! let reading = EnvironmentReading::try_from(raw).unwrap();
//! assert_eq!(reading.time.unix_timestamp(), 1_700_000_000);
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{
    ConfigRecord, ConfigResponse, ConfigUpdate, EnvResponse, EnvironmentReading,
    HISTORY_INTERVAL_OPTIONS, HistoryEntry, HistoryIntervalOption, HistoryResponse, Properties,
    Property, PropertyKind, PropertyValue, RawHistoryEntry, RawProperty, SeriesPoint,
    ServerConfig, StatusResponse, format_timestamp, interval_label, interval_text,
    is_standard_interval, timestamp_from_epoch, truthy,
};
