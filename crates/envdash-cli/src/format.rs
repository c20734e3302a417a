//! Output formatting utilities for text, JSON, and CSV output.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::builder::Builder;
use time::OffsetDateTime;
use time::macros::format_description;

use envdash_core::{
    EnvironmentReading, HistoryEntry, Metric, Properties, ServerConfig, format_timestamp,
    interval_text,
};

use crate::style;

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Omit header row in CSV output.
    pub no_header: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool) -> Self {
        Self {
            no_color,
            ..Default::default()
        }
    }

    /// Create with no_header option for CSV output.
    pub fn with_no_header(mut self, no_header: bool) -> Self {
        self.no_header = no_header;
        self
    }

    /// Create with compact JSON option.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Serialize value to JSON string, respecting compact option.
    pub fn as_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }
}

/// Escape a string for CSV output.
/// Wraps the value in quotes if it contains commas, quotes, or newlines.
#[must_use]
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn format_timestamp_compact(time: OffsetDateTime) -> String {
    time.format(format_description!("[month]-[day] [hour]:[minute]"))
        .unwrap_or_else(|_| "Unknown".to_string())
}

fn format_rfc3339(time: OffsetDateTime) -> String {
    time.format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "Unknown".to_string())
}

/// CSV header row for readings: `time` followed by the metric fields.
fn readings_csv_header() -> String {
    let mut header = String::from("time");
    for metric in Metric::ALL {
        header.push(',');
        header.push_str(metric.short_name());
    }
    header.push('\n');
    header
}

// ============================================================================
// Status
// ============================================================================

#[must_use]
pub fn format_status_text(props: &Properties, opts: &FormatOptions) -> String {
    let host = props.hostname.as_deref().unwrap_or("unknown host");
    let mut output = match &props.ipaddr {
        Some(ip) => style::format_title(&format!("{} ({})", host, ip), opts.no_color),
        None => style::format_title(host, opts.no_color),
    };
    output.push_str("\n\n");

    if props.entries.is_empty() {
        output.push_str("No properties reported.\n");
        return output;
    }

    let mut builder = Builder::default();
    builder.push_record(["Property", "Value"]);
    for prop in &props.entries {
        builder.push_record([prop.name.clone(), prop.display()]);
    }
    let mut table = builder.build();
    style::apply_table_style(&mut table, opts.no_color);
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

#[must_use]
pub fn format_status_csv(props: &Properties, opts: &FormatOptions) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        "name,value,display_value\n".to_string()
    };
    for prop in &props.entries {
        output.push_str(&format!(
            "{},{},{}\n",
            csv_escape(&prop.name),
            csv_escape(&prop.value.to_string()),
            csv_escape(prop.display_value.as_deref().unwrap_or(""))
        ));
    }
    output
}

pub fn format_status_json(props: &Properties, opts: &FormatOptions) -> Result<String> {
    opts.as_json(props)
}

// ============================================================================
// Environment
// ============================================================================

#[must_use]
pub fn format_env_text(reading: &EnvironmentReading, opts: &FormatOptions) -> String {
    let mut output = style::format_title("Environment", opts.no_color);
    output.push('\n');
    for metric in Metric::ALL {
        let value = metric.format_value(metric.reading_value(reading));
        let value = if opts.no_color {
            value
        } else {
            value.bold().to_string()
        };
        output.push_str(&format!("  {:<18} {}\n", metric.label(), value));
    }
    output.push_str(&format!(
        "  {:<18} {}\n",
        "Measured",
        format_timestamp(reading.time)
    ));
    output
}

#[must_use]
pub fn format_env_csv(reading: &EnvironmentReading, opts: &FormatOptions) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        readings_csv_header()
    };
    output.push_str(&format!(
        "{},{},{},{},{}\n",
        format_rfc3339(reading.time),
        reading.temp,
        reading.pressure,
        reading.humidity,
        reading.gas
    ));
    output
}

pub fn format_env_json(reading: &EnvironmentReading, opts: &FormatOptions) -> Result<String> {
    opts.as_json(reading)
}

// ============================================================================
// History
// ============================================================================

#[must_use]
pub fn format_history_text(history: &[HistoryEntry], opts: &FormatOptions) -> String {
    if history.is_empty() {
        return "No history records found.\n".to_string();
    }

    let mut output = format!("History ({} records):\n\n", history.len());

    // Narrow terminals drop the year and seconds to avoid wrapping
    let compact_ts = style::terminal_width() < 80;

    let mut builder = Builder::default();
    builder.push_record(["Timestamp", "Temp", "Pressure", "Humidity", "Air quality"]);
    for entry in history {
        let ts = if compact_ts {
            format_timestamp_compact(entry.time)
        } else {
            format_timestamp(entry.time)
        };
        builder.push_record([
            ts,
            Metric::Temp.format_value(entry.temp),
            Metric::Pressure.format_value(entry.pressure),
            Metric::Humidity.format_value(entry.humidity),
            Metric::Gas.format_value(entry.gas),
        ]);
    }
    let mut table = builder.build();
    style::apply_table_style(&mut table, opts.no_color);
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

#[must_use]
pub fn format_history_csv(history: &[HistoryEntry], opts: &FormatOptions) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        readings_csv_header()
    };
    for entry in history {
        output.push_str(&format!(
            "{},{},{},{},{}\n",
            format_rfc3339(entry.time),
            entry.temp,
            entry.pressure,
            entry.humidity,
            entry.gas
        ));
    }
    output
}

pub fn format_history_json(history: &[HistoryEntry], opts: &FormatOptions) -> Result<String> {
    opts.as_json(&history)
}

// ============================================================================
// Device settings
// ============================================================================

#[must_use]
pub fn format_settings_text(config: &ServerConfig, opts: &FormatOptions) -> String {
    let mut output = style::format_title("Device settings", opts.no_color);
    output.push('\n');
    output.push_str(&format!(
        "  {:<18} {}\n",
        "History interval",
        interval_text(config.history_interval)
    ));
    output.push_str(&format!(
        "  {:<18} {}\n",
        "Sleep on reset",
        if config.sleep_on_reset { "yes" } else { "no" }
    ));
    output
}

#[must_use]
pub fn format_settings_csv(config: &ServerConfig, opts: &FormatOptions) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        "history_interval,standard,sleep_on_reset\n".to_string()
    };
    output.push_str(&format!(
        "{},{},{}\n",
        config.history_interval, config.standard, config.sleep_on_reset
    ));
    output
}

pub fn format_settings_json(config: &ServerConfig, opts: &FormatOptions) -> Result<String> {
    opts.as_json(config)
}
