//! Core types for envdash sensor data.
//!
//! Two families of types live here:
//!
//! - **Wire types** (`*Response`, [`RawProperty`], [`RawHistoryEntry`],
//!   [`ConfigUpdate`]) mirror the JSON bodies of the device's REST API.
//! - **Model types** ([`Properties`], [`EnvironmentReading`], [`HistoryEntry`],
//!   [`SeriesPoint`], [`ConfigRecord`], [`ServerConfig`]) are what the
//!   dashboard keeps in its view state after a successful fetch.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::error::{ParseError, ParseResult};

/// A history interval offered by the device firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryIntervalOption {
    /// Short display label.
    pub label: &'static str,
    /// Interval in seconds.
    pub seconds: u32,
}

/// The fixed set of history intervals the firmware advertises.
///
/// A server interval matching one of these exactly is "standard"; any other
/// value was set by some other client and is shown as a custom interval.
pub const HISTORY_INTERVAL_OPTIONS: [HistoryIntervalOption; 4] = [
    HistoryIntervalOption {
        label: "10 s",
        seconds: 10,
    },
    HistoryIntervalOption {
        label: "1 min",
        seconds: 60,
    },
    HistoryIntervalOption {
        label: "10 min",
        seconds: 600,
    },
    HistoryIntervalOption {
        label: "1 h",
        seconds: 3600,
    },
];

/// Returns `true` if `seconds` exactly equals one of [`HISTORY_INTERVAL_OPTIONS`].
#[must_use]
pub fn is_standard_interval(seconds: u32) -> bool {
    HISTORY_INTERVAL_OPTIONS
        .iter()
        .any(|option| option.seconds == seconds)
}

/// Look up the display label of a standard interval.
#[must_use]
pub fn interval_label(seconds: u32) -> Option<&'static str> {
    HISTORY_INTERVAL_OPTIONS
        .iter()
        .find(|option| option.seconds == seconds)
        .map(|option| option.label)
}

/// Display text for an interval: its label, or the seconds marked as custom.
#[must_use]
pub fn interval_text(seconds: u32) -> String {
    match interval_label(seconds) {
        Some(label) => label.to_string(),
        None => format!("{} s (custom)", seconds),
    }
}

/// Convert device epoch-seconds into a timestamp.
///
/// The device may report fractional seconds. The value is truncated to whole
/// milliseconds, matching the resolution of the dashboard's timestamps.
///
/// # Errors
///
/// Returns [`ParseError::NonFiniteTimestamp`] for NaN or infinite input and
/// [`ParseError::TimestampOutOfRange`] when the instant is not representable.
///
/// # Examples
///
/// ```
/// use envdash_types::timestamp_from_epoch;
///
/// let ts = timestamp_from_epoch(1000.0).unwrap();
/// assert_eq!(ts.unix_timestamp(), 1000);
///
/// let ts = timestamp_from_epoch(1.2345).unwrap();
/// assert_eq!(ts.millisecond(), 234);
/// ```
pub fn timestamp_from_epoch(seconds: f64) -> ParseResult<OffsetDateTime> {
    if !seconds.is_finite() {
        return Err(ParseError::NonFiniteTimestamp(seconds));
    }

    let millis = (seconds * 1000.0).trunc() as i128;
    let nanos = millis
        .checked_mul(1_000_000)
        .ok_or(ParseError::TimestampOutOfRange(seconds))?;

    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .map_err(|_| ParseError::TimestampOutOfRange(seconds))
}

/// Timestamp as shown to people: `YYYY-MM-DD hh:mm:ss`, UTC.
#[must_use]
pub fn format_timestamp(time: OffsetDateTime) -> String {
    time.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .unwrap_or_else(|_| "Unknown".to_string())
}

// ==========================================================================
// Status
// ==========================================================================

/// How a status property's value should be rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// A number of seconds, shown as a human duration.
    Seconds,
    /// Shown as-is. Unknown type tags fall back to this.
    #[default]
    #[serde(other)]
    Plain,
}

/// A primitive status value as reported by the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number.
    Number(f64),
    /// JSON string.
    Text(String),
}

impl PropertyValue {
    /// The value as a non-negative, finite number of seconds, if it is one.
    #[must_use]
    pub fn as_seconds(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() && *n >= 0.0 => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            // Integral values print without a trailing ".0"
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{n:.0}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A status property as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProperty {
    /// Property name.
    pub name: String,
    /// Property value.
    pub value: PropertyValue,
    /// Rendering hint; missing or unknown values mean [`PropertyKind::Plain`].
    #[serde(rename = "type", default)]
    pub kind: Option<PropertyKind>,
}

/// Body of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Device properties in display order.
    pub status: Vec<RawProperty>,
    /// Device host name.
    #[serde(default)]
    pub hostname: Option<String>,
    /// Device IP address.
    #[serde(default)]
    pub ipaddr: Option<String>,
}

/// A device status property ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Property value.
    pub value: PropertyValue,
    /// Rendering hint.
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    /// Human rendering of the value, only for [`PropertyKind::Seconds`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
}

impl Property {
    /// The text to show for this property: the derived display value when
    /// present, the raw value otherwise.
    #[must_use]
    pub fn display(&self) -> String {
        self.display_value
            .clone()
            .unwrap_or_else(|| self.value.to_string())
    }
}

/// The device property list together with its host metadata.
///
/// Rebuilt wholesale on every status fetch; entries have no identity across
/// fetches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Properties {
    /// Property rows in device order.
    pub entries: Vec<Property>,
    /// Device host name from the last status fetch.
    pub hostname: Option<String>,
    /// Device IP address from the last status fetch.
    pub ipaddr: Option<String>,
}

impl Properties {
    /// The single "Loading..." row shown before the first status fetch.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            entries: vec![Property {
                name: "Loading...".to_string(),
                value: PropertyValue::Text("Loading...".to_string()),
                kind: PropertyKind::Plain,
                display_value: None,
            }],
            hostname: None,
            ipaddr: None,
        }
    }
}

impl Default for Properties {
    fn default() -> Self {
        Self::placeholder()
    }
}

// ==========================================================================
// Environment
// ==========================================================================

/// Body of `GET /api/env`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvResponse {
    /// Temperature in °C.
    pub temp: f64,
    /// Pressure in mbar.
    pub pressure: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Air quality (gas resistance index).
    pub gas: f64,
    /// Measurement time in device epoch-seconds.
    pub time: f64,
}

/// The current environment reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentReading {
    /// Temperature in °C.
    pub temp: f64,
    /// Pressure in mbar.
    pub pressure: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Air quality (gas resistance index).
    pub gas: f64,
    /// When the device took the measurement.
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

impl EnvironmentReading {
    /// All-zero reading stamped with the current time, shown before the first fetch.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            temp: 0.0,
            pressure: 0.0,
            humidity: 0.0,
            gas: 0.0,
            time: OffsetDateTime::now_utc(),
        }
    }
}

impl TryFrom<EnvResponse> for EnvironmentReading {
    type Error = ParseError;

    fn try_from(raw: EnvResponse) -> ParseResult<Self> {
        Ok(Self {
            temp: raw.temp,
            pressure: raw.pressure,
            humidity: raw.humidity,
            gas: raw.gas,
            time: timestamp_from_epoch(raw.time)?,
        })
    }
}

// ==========================================================================
// History
// ==========================================================================

/// A history sample as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawHistoryEntry {
    /// Sample time in device epoch-seconds.
    pub time: f64,
    /// Temperature in °C.
    pub temp: f64,
    /// Pressure in mbar.
    pub pressure: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Air quality (gas resistance index).
    pub gas: f64,
}

/// Body of `GET /api/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// The device's complete retained window, oldest first.
    pub history: Vec<RawHistoryEntry>,
}

/// A history sample with its timestamp converted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Sample time.
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    /// Temperature in °C.
    pub temp: f64,
    /// Pressure in mbar.
    pub pressure: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Air quality (gas resistance index).
    pub gas: f64,
}

impl TryFrom<RawHistoryEntry> for HistoryEntry {
    type Error = ParseError;

    fn try_from(raw: RawHistoryEntry) -> ParseResult<Self> {
        Ok(Self {
            time: timestamp_from_epoch(raw.time)?,
            temp: raw.temp,
            pressure: raw.pressure,
            humidity: raw.humidity,
            gas: raw.gas,
        })
    }
}

/// One chart point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Sample time.
    #[serde(with = "time::serde::rfc3339")]
    pub x: OffsetDateTime,
    /// Metric value.
    pub y: f64,
}

// ==========================================================================
// Configuration
// ==========================================================================

/// Body of `GET /api/config` and of the `PUT /api/config` response.
///
/// Every field is optional; absent fields leave the dashboard's configuration
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    /// History interval in seconds.
    ///
    /// Whole-number floats (`60.0`) are accepted. Anything that is not a
    /// whole number of seconds in `u32` range is treated as absent, so the
    /// rest of the response still applies.
    #[serde(
        default,
        deserialize_with = "deserialize_interval",
        skip_serializing_if = "Option::is_none"
    )]
    pub history_interval: Option<u32>,
    /// Raw sleep-on-reset value; coerced with [`truthy`].
    ///
    /// `Some(Value::Null)` means the field was present with a `null` value,
    /// which is distinct from the field being absent.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub sleep_on_reset: Option<Value>,
}

impl ConfigResponse {
    /// The sleep-on-reset flag coerced to a boolean, if the field was present.
    #[must_use]
    pub fn sleep_on_reset_flag(&self) -> Option<bool> {
        self.sleep_on_reset.as_ref().map(truthy)
    }
}

/// Deserialize a field that is present, keeping `null` as `Some(Value::Null)`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Deserialize a history interval leniently; see [`ConfigResponse::history_interval`].
fn deserialize_interval<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(interval_from_value(&value))
}

fn interval_from_value(value: &Value) -> Option<u32> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(int) = n.as_u64() {
        return u32::try_from(int).ok();
    }
    let f = n.as_f64()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) {
        Some(f as u32)
    } else {
        None
    }
}

/// JSON truthiness: `false`, `null`, `0`, `NaN` and `""` are false, everything else true.
#[must_use]
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Body of `PUT /api/config`: exactly the two mutable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdate {
    /// Requested history interval in seconds.
    pub history_interval: u32,
    /// Requested sleep-on-reset flag.
    pub sleep_on_reset: bool,
}

/// The two user-editable device settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRecord {
    /// History interval in seconds.
    pub history_interval: u32,
    /// Whether the device sleeps after a reset.
    pub sleep_on_reset: bool,
}

impl Default for ConfigRecord {
    fn default() -> Self {
        Self {
            history_interval: 10,
            sleep_on_reset: false,
        }
    }
}

impl From<ConfigRecord> for ConfigUpdate {
    fn from(record: ConfigRecord) -> Self {
        Self {
            history_interval: record.history_interval,
            sleep_on_reset: record.sleep_on_reset,
        }
    }
}

/// Configuration last confirmed by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// History interval in seconds.
    pub history_interval: u32,
    /// Whether `history_interval` is one of [`HISTORY_INTERVAL_OPTIONS`].
    pub standard: bool,
    /// Whether the device sleeps after a reset.
    pub sleep_on_reset: bool,
}

impl ServerConfig {
    /// The editable part of the server configuration.
    #[must_use]
    pub fn record(&self) -> ConfigRecord {
        ConfigRecord {
            history_interval: self.history_interval,
            sleep_on_reset: self.sleep_on_reset,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            history_interval: 10,
            standard: true,
            sleep_on_reset: false,
        }
    }
}
