//! Device settings commands.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use dialoguer::{Confirm, theme::ColorfulTheme};

use envdash_core::{ConfigReconciler, ConfigUpdate, DeviceClient, interval_text};

use crate::cli::OutputFormat;
use crate::format::{
    FormatOptions, format_settings_csv, format_settings_json, format_settings_text,
};
use crate::style;
use crate::util::{with_spinner, write_output};

/// Prompt user for confirmation before making changes.
/// Returns true if user confirms, false otherwise.
fn confirm_change(message: &str, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }

    if !io::stdin().is_terminal() {
        eprintln!("Error: Cannot prompt for confirmation in non-interactive mode.");
        eprintln!("Use --force to skip confirmation.");
        return Ok(false);
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Describe the pending edits for the confirmation prompt.
fn describe_change(config: &ConfigReconciler) -> String {
    let server = config.server();
    let local = config.local();
    let mut changes = Vec::new();
    if config.history_interval_changed() {
        changes.push(format!(
            "history interval {} -> {}",
            interval_text(server.history_interval),
            interval_text(local.history_interval)
        ));
    }
    if config.sleep_on_reset_changed() {
        changes.push(format!(
            "sleep on reset {} -> {}",
            yes_no(server.sleep_on_reset),
            yes_no(local.sleep_on_reset)
        ));
    }
    format!("Change {}?", changes.join(", "))
}

/// Fields the device confirmed differently from what was requested.
fn unconfirmed(config: &ConfigReconciler, requested: &ConfigUpdate) -> Vec<String> {
    let server = config.server();
    let mut notes = Vec::new();
    if server.history_interval != requested.history_interval {
        notes.push(format!(
            "history interval is {} (requested {})",
            interval_text(server.history_interval),
            interval_text(requested.history_interval)
        ));
    }
    if server.sleep_on_reset != requested.sleep_on_reset {
        notes.push(format!(
            "sleep on reset is {} (requested {})",
            yes_no(server.sleep_on_reset),
            yes_no(requested.sleep_on_reset)
        ));
    }
    notes
}

async fn read_settings(client: &DeviceClient, quiet: bool) -> Result<ConfigReconciler> {
    let response = with_spinner("Reading device settings...", !quiet, client.config())
        .await
        .context("Failed to read device settings")?;
    let mut config = ConfigReconciler::new();
    config.apply_response(&response);
    Ok(config)
}

pub async fn cmd_settings_show(
    client: &DeviceClient,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
    quiet: bool,
) -> Result<()> {
    let config = read_settings(client, quiet).await?;
    let server = config.server();

    let content = match format {
        OutputFormat::Json => format_settings_json(server, opts)?,
        OutputFormat::Csv => format_settings_csv(server, opts),
        OutputFormat::Text => format_settings_text(server, opts),
    };

    write_output(output, &content)?;
    Ok(())
}

pub async fn cmd_settings_set(
    client: &DeviceClient,
    interval: Option<u32>,
    sleep_on_reset: Option<bool>,
    force: bool,
    quiet: bool,
    opts: &FormatOptions,
) -> Result<()> {
    if interval.is_none() && sleep_on_reset.is_none() {
        bail!("Nothing to change. Use --interval and/or --sleep-on-reset.");
    }

    let mut config = read_settings(client, quiet).await?;
    if let Some(seconds) = interval {
        config.set_history_interval(seconds);
    }
    if let Some(enabled) = sleep_on_reset {
        config.set_sleep_on_reset(enabled);
    }

    if !config.config_changed() {
        if !quiet {
            println!(
                "{}",
                style::format_success("Device already has these settings", opts.no_color)
            );
        }
        return Ok(());
    }

    if !confirm_change(&describe_change(&config), force)? {
        eprintln!("Cancelled.");
        return Ok(());
    }

    let request = config.save_request();
    let confirmed = with_spinner("Saving settings...", !quiet, client.put_config(&request))
        .await
        .context("Failed to save device settings")?;
    config.apply_response(&confirmed);

    let notes = unconfirmed(&config, &request);
    if notes.is_empty() {
        if !quiet {
            println!("{}", style::format_success("Settings saved", opts.no_color));
        }
    } else {
        eprintln!(
            "{}",
            style::format_warning(
                &format!("Device confirmed different values: {}", notes.join("; ")),
                opts.no_color
            )
        );
    }

    if !quiet {
        print!("{}", format_settings_text(config.server(), opts));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use envdash_core::ConfigResponse;
    use serde_json::json;

    fn reconciler(interval: u32, sleep: bool) -> ConfigReconciler {
        let mut config = ConfigReconciler::new();
        config.apply_response(&ConfigResponse {
            history_interval: Some(interval),
            sleep_on_reset: Some(json!(sleep)),
        });
        config
    }

    #[test]
    fn test_confirm_change_force() {
        assert!(confirm_change("Change?", true).unwrap());
    }

    #[test]
    fn test_describe_change_lists_only_dirty_fields() {
        let mut config = reconciler(10, false);
        config.set_history_interval(3600);
        assert_eq!(describe_change(&config), "Change history interval 10 s -> 1 h?");

        config.toggle_sleep_on_reset();
        assert_eq!(
            describe_change(&config),
            "Change history interval 10 s -> 1 h, sleep on reset no -> yes?"
        );
    }

    #[test]
    fn test_unconfirmed_reports_clamped_interval() {
        let mut config = reconciler(10, false);
        config.set_history_interval(7200);
        let request = config.save_request();

        config.apply_response(&ConfigResponse {
            history_interval: Some(3600),
            sleep_on_reset: Some(json!(false)),
        });
        let notes = unconfirmed(&config, &request);
        assert_eq!(notes, vec!["history interval is 1 h (requested 7200 s (custom))"]);
    }

    #[test]
    fn test_unconfirmed_empty_when_device_agrees() {
        let mut config = reconciler(10, false);
        config.set_sleep_on_reset(true);
        let request = config.save_request();
        config.apply_response(&ConfigResponse {
            history_interval: Some(10),
            sleep_on_reset: Some(json!(1)),
        });
        assert!(unconfirmed(&config, &request).is_empty());
    }
}
