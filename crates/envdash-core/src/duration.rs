//! Human-readable durations.
//!
//! Used to render status properties whose value is a number of seconds
//! (uptime, time since last reset, ...).

/// Calendar units from largest to smallest, with their length in milliseconds.
///
/// A year is 365.25 days and a month is a twelfth of that.
const UNITS: [(&str, &str, u64); 7] = [
    ("year", "years", 31_557_600_000),
    ("month", "months", 2_629_800_000),
    ("week", "weeks", 604_800_000),
    ("day", "days", 86_400_000),
    ("hour", "hours", 3_600_000),
    ("minute", "minutes", 60_000),
    ("second", "seconds", 1_000),
];

/// Format a duration given in milliseconds.
///
/// Every non-zero unit is listed from largest to smallest and joined with
/// `", "`. A sub-second remainder is shown as a decimal fraction of the
/// seconds unit.
///
/// # Examples
///
/// ```
/// use envdash_core::duration::humanize_duration;
///
/// assert_eq!(humanize_duration(65_000), "1 minute, 5 seconds");
/// assert_eq!(humanize_duration(183_600_000), "2 days, 3 hours");
/// assert_eq!(humanize_duration(1_500), "1.5 seconds");
/// assert_eq!(humanize_duration(0), "0 seconds");
/// ```
#[must_use]
pub fn humanize_duration(ms: u64) -> String {
    let mut remaining = ms;
    let mut parts = Vec::new();

    for (singular, plural, unit_ms) in &UNITS[..UNITS.len() - 1] {
        let count = remaining / unit_ms;
        if count > 0 {
            remaining -= count * unit_ms;
            parts.push(format_part(&count.to_string(), count == 1, singular, plural));
        }
    }

    // The smallest unit keeps its fractional part
    let whole = remaining / 1_000;
    let frac = remaining % 1_000;
    if remaining > 0 || parts.is_empty() {
        let text = if frac == 0 {
            whole.to_string()
        } else {
            let digits = format!("{frac:03}");
            format!("{whole}.{}", digits.trim_end_matches('0'))
        };
        parts.push(format_part(&text, remaining == 1_000, "second", "seconds"));
    }

    parts.join(", ")
}

/// Format a duration given in (possibly fractional) seconds.
///
/// Returns `None` for negative or non-finite input.
#[must_use]
pub fn humanize_seconds(seconds: f64) -> Option<String> {
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    let ms = (seconds * 1000.0).round();
    if ms > u64::MAX as f64 {
        return None;
    }
    Some(humanize_duration(ms as u64))
}

fn format_part(count: &str, singular: bool, one: &str, many: &str) -> String {
    format!("{count} {}", if singular { one } else { many })
}
