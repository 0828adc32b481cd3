//! User interface module - report output and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions and stderr status lines
//! - This module - Writing reports to stdout

use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::Result;

use crate::analyzer::VersionTags;
use crate::version::VersionInfo;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_status, display_success,
    format_ci_variables, format_tag_list, format_version_summary,
};

/// Print CI variables as `KEY=VALUE` lines
pub fn print_ci_variables(vars: &BTreeMap<String, String>) -> Result<()> {
    write_stdout(&format_ci_variables(vars))
}

/// Print the version info as pretty JSON
pub fn print_json(info: &VersionInfo) -> Result<()> {
    let json = serde_json::to_string_pretty(info)?;
    write_stdout(&format!("{}\n", json))
}

/// Print recognized version tags, newest first
pub fn print_tags(tags: &VersionTags) -> Result<()> {
    if tags.is_empty_history() {
        display_status("No version tags found");
        return Ok(());
    }
    write_stdout(&format_tag_list(tags))
}

/// Print changelog markdown as is
pub fn print_changelog(changelog: &str) -> Result<()> {
    write_stdout(changelog)
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
