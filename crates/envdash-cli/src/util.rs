//! Utility functions for CLI operations.

use std::future::Future;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use envdash_core::DeviceClient;

use crate::style;

/// Get the device URL, with helpful error message.
pub fn require_url(url: Option<String>) -> Result<String> {
    url.ok_or_else(|| {
        anyhow::anyhow!(
            "No device URL specified. Use --url <URL> or set ENVDASH_URL environment variable.\n\
             Run 'envdash config set url <URL>' to store a default."
        )
    })
}

/// Build a client for the device at `url`.
pub fn make_client(url: &str, timeout: Duration) -> Result<DeviceClient> {
    DeviceClient::with_timeout(url, timeout)
        .with_context(|| format!("Cannot use device URL '{}'", url))
}

/// Run a request behind a spinner.
///
/// The spinner is only drawn when stderr is a terminal and `show` is set.
pub async fn with_spinner<T, F>(message: &str, show: bool, request: F) -> T
where
    F: Future<Output = T>,
{
    if !show || !io::stderr().is_terminal() {
        return request.await;
    }
    let spinner = style::request_spinner(message);
    let result = request.await;
    spinner.finish_and_clear();
    result
}

/// Write output to file or stdout.
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}
