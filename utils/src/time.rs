//! Time formatting helpers.

/// Format a duration in seconds to a human-readable string.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// Format an elapsed-seconds value as a relative time ("5m 12s ago").
///
/// Zero elapsed renders as "just now".
pub fn format_relative(elapsed_secs: u64) -> String {
    if elapsed_secs == 0 {
        "just now".to_string()
    } else {
        format!("{} ago", format_duration(elapsed_secs))
    }
}
