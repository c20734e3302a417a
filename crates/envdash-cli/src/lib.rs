//! Command-line interface and terminal dashboard for BME680 sensor devices.
//!
//! The device is an ESP8266 serving a small JSON API (`/api/status`,
//! `/api/env`, `/api/history`, `/api/config`). This crate provides:
//!
//! - **`envdash` CLI**: one-shot commands printing text, JSON or CSV
//! - **Dashboard**: a four-tab terminal UI (status, environment, history,
//!   config) built on [`envdash_core::Dashboard`]
//! - **Configuration file**: default URL, output format, timeout and
//!   dashboard preferences
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `status` | Device properties, with durations humanized |
//! | `env` | Current temperature, pressure, humidity and gas resistance |
//! | `history` | The device's history window |
//! | `settings show` / `settings set` | Read or change device settings |
//! | `dashboard` | Interactive terminal dashboard |
//! | `config` | Manage CLI configuration |
//! | `completions` | Generate shell completions |
//!
//! # Configuration
//!
//! Stored in `~/.config/envdash/config.toml` (or platform equivalent):
//!
//! ```toml
//! url = "http://192.168.1.20"
//! format = "text"
//! timeout = 10
//!
//! [dashboard]
//! default_tab = "history"
//! theme = "dark"
//! ```
//!
//! # Environment Variables
//!
//! - `ENVDASH_URL`: Default device URL (overridden by `--url`)
//! - `NO_COLOR`: Disable colored output when set
//! - `RUST_LOG`: Log filter
//!
//! # Examples
//!
//! ```bash
//! envdash --url http://192.168.1.20 env
//! envdash history --count 20 --format csv
//! envdash settings set --interval 600
//! envdash dashboard --tab history
//! ```

pub use envdash_core;
pub use envdash_types;

pub mod config;

#[cfg(feature = "tui")]
pub mod tui;
