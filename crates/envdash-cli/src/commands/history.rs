//! History command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};

use envdash_core::series::transform;
use envdash_core::{DeviceClient, HistoryEntry};

use crate::cli::OutputFormat;
use crate::format::{
    FormatOptions, format_history_csv, format_history_json, format_history_text,
};
use crate::util::{with_spinner, write_output};

/// The last `count` entries, or all of them when `count` is 0.
fn most_recent(entries: &[HistoryEntry], count: usize) -> &[HistoryEntry] {
    if count == 0 {
        entries
    } else {
        &entries[entries.len().saturating_sub(count)..]
    }
}

pub async fn cmd_history(
    client: &DeviceClient,
    count: usize,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
    quiet: bool,
) -> Result<()> {
    let raw = with_spinner("Downloading history...", !quiet, client.history())
        .await
        .context("Failed to download history")?;
    let view = transform(&raw.history).context("Device sent an unusable history record")?;

    let entries = most_recent(&view.entries, count);

    let content = match format {
        OutputFormat::Json => format_history_json(entries, opts)?,
        OutputFormat::Csv => format_history_csv(entries, opts),
        OutputFormat::Text => format_history_text(entries, opts),
    };

    write_output(output, &content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn entries(n: i64) -> Vec<HistoryEntry> {
        (0..n)
            .map(|i| HistoryEntry {
                time: OffsetDateTime::from_unix_timestamp(i * 60).unwrap(),
                temp: 20.0 + i as f64,
                pressure: 1000.0,
                humidity: 40.0,
                gas: 100.0,
            })
            .collect()
    }

    #[test]
    fn test_most_recent_all() {
        assert_eq!(most_recent(&entries(5), 0).len(), 5);
    }

    #[test]
    fn test_most_recent_takes_tail() {
        let all = entries(5);
        let tail = most_recent(&all, 2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].temp, 23.0);
        assert_eq!(tail[1].temp, 24.0);
    }

    #[test]
    fn test_most_recent_count_exceeds_len() {
        assert_eq!(most_recent(&entries(3), 10).len(), 3);
        assert!(most_recent(&[], 4).is_empty());
    }
}
