//! Config command implementation.

use anyhow::{Context, Result, bail};
use clap::ValueEnum;

use envdash_cli::config::Config;
use envdash_core::{DeviceClient, Tab};

use crate::cli::{ConfigAction, ConfigKey, OutputFormat, parse_bool_arg};
use crate::style;

const THEMES: [&str; 2] = ["dark", "light"];

/// Current value of `key`, if set.
fn get_value(config: &Config, key: ConfigKey) -> Option<String> {
    match key {
        ConfigKey::Url => config.url.clone(),
        ConfigKey::Format => config.format.clone(),
        ConfigKey::Timeout => config.timeout.map(|t| t.to_string()),
        ConfigKey::NoColor => Some(config.no_color.to_string()),
        ConfigKey::DefaultTab => config.dashboard.default_tab.map(|t| t.to_string()),
        ConfigKey::Theme => Some(config.dashboard.theme.clone()),
    }
}

/// Validate and store `value` under `key`.
fn set_value(config: &mut Config, key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::Url => {
            DeviceClient::new(value).with_context(|| format!("Invalid device URL '{}'", value))?;
            config.url = Some(value.to_string());
        }
        ConfigKey::Format => {
            let format = OutputFormat::from_str(value, true)
                .map_err(|_| anyhow::anyhow!("Invalid format '{}'. Valid: text, json, csv", value))?;
            let name = match format {
                OutputFormat::Text => "text",
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
            };
            config.format = Some(name.to_string());
        }
        ConfigKey::Timeout => {
            let seconds: u64 = value
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid timeout '{}'. Use whole seconds", value))?;
            if seconds == 0 {
                bail!("Timeout must be at least 1 second");
            }
            config.timeout = Some(seconds);
        }
        ConfigKey::NoColor => {
            config.no_color = parse_bool_arg(value).map_err(anyhow::Error::msg)?;
        }
        ConfigKey::DefaultTab => {
            let tab: Tab = value.parse()?;
            config.dashboard.default_tab = Some(tab);
        }
        ConfigKey::Theme => {
            let theme = value.to_lowercase();
            if !THEMES.contains(&theme.as_str()) {
                bail!("Invalid theme '{}'. Valid: dark, light", value);
            }
            config.dashboard.theme = theme;
        }
    }
    Ok(())
}

/// Reset `key` to its default.
fn unset_value(config: &mut Config, key: ConfigKey) {
    let defaults = Config::default();
    match key {
        ConfigKey::Url => config.url = None,
        ConfigKey::Format => config.format = None,
        ConfigKey::Timeout => config.timeout = None,
        ConfigKey::NoColor => config.no_color = false,
        ConfigKey::DefaultTab => config.dashboard.default_tab = None,
        ConfigKey::Theme => config.dashboard.theme = defaults.dashboard.theme,
    }
}

fn key_name(key: ConfigKey) -> String {
    key.to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_else(|| format!("{:?}", key))
}

pub fn cmd_config(action: ConfigAction, no_color: bool) -> Result<()> {
    let path = Config::path();

    match action {
        ConfigAction::Show => {
            let config = Config::load();
            let content =
                toml::to_string_pretty(&config).context("Failed to serialize config")?;
            println!("# {}", path.display());
            print!("{}", content);
        }
        ConfigAction::Get { key } => {
            let config = Config::load();
            match get_value(&config, key) {
                Some(value) => println!("{}", value),
                None => println!("(not set)"),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load();
            set_value(&mut config, key, &value)?;
            config.save()?;
            println!(
                "{}",
                style::format_success(&format!("{} = {}", key_name(key), value), no_color)
            );
        }
        ConfigAction::Unset { key } => {
            let mut config = Config::load();
            unset_value(&mut config, key);
            config.save()?;
            println!(
                "{}",
                style::format_success(&format!("{} unset", key_name(key)), no_color)
            );
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            if path.exists() {
                println!(
                    "{}",
                    style::format_warning(
                        &format!("Config already exists at {}", path.display()),
                        no_color
                    )
                );
            } else {
                Config::default().save()?;
                println!(
                    "{}",
                    style::format_success(
                        &format!("Created {}", path.display()),
                        no_color
                    )
                );
            }
        }
    }
    Ok(())
}
