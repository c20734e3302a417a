//! Status command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};

use envdash_core::DeviceClient;
use envdash_core::loader::build_properties;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_status_csv, format_status_json, format_status_text};
use crate::util::{with_spinner, write_output};

pub async fn cmd_status(
    client: &DeviceClient,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
    quiet: bool,
) -> Result<()> {
    let response = with_spinner("Fetching device status...", !quiet, client.status())
        .await
        .context("Failed to read device status")?;
    let props = build_properties(response);

    let content = match format {
        OutputFormat::Json => format_status_json(&props, opts)?,
        OutputFormat::Csv => format_status_csv(&props, opts),
        OutputFormat::Text => format_status_text(&props, opts),
    };

    write_output(output, &content)?;
    Ok(())
}
