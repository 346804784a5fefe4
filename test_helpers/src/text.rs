//! Helpers for inspecting rendered help text.

/// Returns the per-flag lines of a `--help` message.
#[must_use]
pub fn flag_lines(usage: &str) -> Vec<&str> {
    usage
        .lines()
        .filter(|line| line.starts_with("   --"))
        .collect()
}

/// Returns the flag names listed in a `--help` message, in order.
#[must_use]
pub fn listed_flag_names(usage: &str) -> Vec<&str> {
    flag_lines(usage)
        .into_iter()
        .filter_map(|line| line.trim_start().strip_prefix("--"))
        .filter_map(|rest| rest.split_once(' ').map(|(name, _)| name))
        .collect()
}
