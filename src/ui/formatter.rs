//! Pure formatting functions for UI output.
//!
//! Report text is built as strings so it can be tested; the `display_*`
//! helpers write styled status lines to stderr, keeping stdout free for
//! machine-readable output.

use std::collections::BTreeMap;

use console::style;

use crate::analyzer::VersionTags;
use crate::version::VersionInfo;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// One `KEY=VALUE` line per variable, in key order
pub fn format_ci_variables(vars: &BTreeMap<String, String>) -> String {
    vars.iter()
        .map(|(key, value)| format!("{}={}\n", key, value))
        .collect()
}

/// Recognized tags newest first, one per line
pub fn format_tag_list(tags: &VersionTags) -> String {
    if tags.is_empty_history() {
        return String::new();
    }

    tags.iter().map(|tag| format!("{}\n", tag.name)).collect()
}

/// Short human summary of a version decision.
///
/// # Examples
/// * `1.2.3 -> 1.3.0 (minor: code changes found)`
/// * `1.0.0 (initial: no version tags found)`
pub fn format_version_summary(info: &VersionInfo) -> String {
    match &info.previous_version {
        Some(previous) => format!(
            "{} -> {} ({}: {})",
            previous, info.new_version, info.decision.bump, info.decision.reason
        ),
        None => format!(
            "{} ({}: {})",
            info.new_version, info.decision.bump, info.decision.reason
        ),
    }
}
