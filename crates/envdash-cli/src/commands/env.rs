//! Env command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};

use envdash_core::{DeviceClient, EnvironmentReading};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_env_csv, format_env_json, format_env_text};
use crate::util::{with_spinner, write_output};

pub async fn cmd_env(
    client: &DeviceClient,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
    quiet: bool,
) -> Result<()> {
    let raw = with_spinner("Reading sensor...", !quiet, client.env())
        .await
        .context("Failed to read current environment")?;
    let reading =
        EnvironmentReading::try_from(raw).context("Device sent an unusable reading")?;

    let content = match format {
        OutputFormat::Json => format_env_json(&reading, opts)?,
        OutputFormat::Csv => format_env_csv(&reading, opts),
        OutputFormat::Text => format_env_text(&reading, opts),
    };

    write_output(output, &content)?;
    Ok(())
}
