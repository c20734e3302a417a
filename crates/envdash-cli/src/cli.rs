//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use envdash_cli::config::Config;

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Reusable output format arguments
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format (defaults to the config file's format, then text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Omit header row in CSV output (useful for appending)
    #[arg(long)]
    pub no_header: bool,
}

impl OutputArgs {
    /// Effective format: `--json`, then `--format`, then the config file, then text.
    pub fn resolve(&self, json: bool, config: &Config) -> OutputFormat {
        if json {
            return OutputFormat::Json;
        }
        self.format
            .or_else(|| {
                config
                    .format
                    .as_deref()
                    .and_then(|f| OutputFormat::from_str(f, true).ok())
            })
            .unwrap_or_default()
    }
}

#[derive(Parser)]
#[command(name = "envdash")]
#[command(author, version, about = "CLI and dashboard for BME680 sensor devices", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Device base URL (e.g. http://192.168.1.20), or use ENVDASH_URL env var
    #[arg(short, long, global = true, env = "ENVDASH_URL")]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[arg(short = 'T', long, global = true)]
    pub timeout: Option<u64>,

    /// Output as JSON (shorthand for --format json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Output compact JSON (no pretty-printing)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show device status properties
    Status {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the current environment reading
    Env {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the device's history window
    History {
        #[command(flatten)]
        output: OutputArgs,

        /// Number of most recent records to show (0 for all)
        #[arg(short, long, default_value = "0")]
        count: usize,
    },

    /// Show or change device settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Launch interactive terminal dashboard
    #[cfg(feature = "tui")]
    Dashboard {
        /// Initial tab (status, env, history, config); overrides any #fragment in the URL
        #[arg(short, long)]
        tab: Option<String>,
    },
}

/// Device settings subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum SettingsAction {
    /// Show server-confirmed settings
    Show {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Change settings on the device
    Set {
        /// History interval in seconds (standard: 10, 60, 600, 3600)
        #[arg(short, long, value_parser = parse_interval)]
        interval: Option<u32>,

        /// Sleep after reset
        #[arg(short, long, value_parser = parse_bool_arg)]
        sleep_on_reset: Option<bool>,

        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Parse history interval value with validation
fn parse_interval(s: &str) -> Result<u32, String> {
    let seconds: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number of seconds", s))?;
    if seconds == 0 {
        return Err("History interval must be at least 1 second".to_string());
    }
    Ok(seconds)
}

/// Parse boolean argument with flexible input
pub(crate) fn parse_bool_arg(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "enable" | "enabled" => Ok(true),
        "false" | "no" | "off" | "0" | "disable" | "disabled" => Ok(false),
        _ => Err(format!(
            "Invalid boolean value '{}'. Use: true/false, yes/no, on/off, 1/0",
            s
        )),
    }
}

/// Configuration keys
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigKey {
    /// Default device URL
    Url,
    /// Default output format
    Format,
    /// Default request timeout in seconds
    Timeout,
    /// Disable colored output
    NoColor,
    /// Dashboard start tab
    DefaultTab,
    /// Dashboard theme (dark, light)
    Theme,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
        /// Configuration value
        value: String,
    },

    /// Unset (remove) a configuration value
    Unset {
        /// Configuration key to remove
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init,
}
