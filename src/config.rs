use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "nextver.toml";

/// Represents the complete configuration for nextver.
///
/// Contains the initial version, commit exclusion patterns, path globs that
/// do not count as code changes, and changelog formatting options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_initial_version")]
    pub initial_version: String,

    #[serde(default)]
    pub exclusions: ExclusionConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,
}

fn default_initial_version() -> String {
    "1.0.0".to_string()
}

fn default_bot_patterns() -> Vec<String> {
    vec![
        r"\[bot\]".to_string(),
        r"^github-actions".to_string(),
        r"^dependabot".to_string(),
        r"^ProjectDirector".to_string(),
        r"^SyncFileContents".to_string(),
    ]
}

fn default_subject_patterns() -> Vec<String> {
    vec![
        r"^Merge pull request".to_string(),
        r"^Merge branch".to_string(),
        r"^Merge remote-tracking branch".to_string(),
        r"^Updated packages in".to_string(),
        r"^Update .* package version".to_string(),
    ]
}

/// Regex patterns for commits that never count as changes.
///
/// A commit is excluded when any pattern matches the corresponding field.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExclusionConfig {
    #[serde(default = "default_bot_patterns")]
    pub authors: Vec<String>,

    #[serde(default = "default_bot_patterns")]
    pub committers: Vec<String>,

    #[serde(default = "default_subject_patterns")]
    pub subjects: Vec<String>,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        ExclusionConfig {
            authors: default_bot_patterns(),
            committers: default_bot_patterns(),
            subjects: default_subject_patterns(),
        }
    }
}

fn default_non_substantive() -> Vec<String> {
    [
        "*.md",
        "**/*.md",
        "*.sln",
        "**/*.sln",
        "*.csproj",
        "**/*.csproj",
        "*.props",
        "**/*.props",
        "*.ps1",
        "**/*.ps1",
        ".github/**",
        ".gitignore",
        ".gitattributes",
        ".editorconfig",
        "LICENSE*",
        "VERSION*",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Glob patterns for paths whose changes are not code changes
/// (docs, solution/project files, CI workflows, build scripts).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    #[serde(default = "default_non_substantive")]
    pub non_substantive: Vec<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            non_substantive: default_non_substantive(),
        }
    }
}

fn default_author_url_base() -> String {
    "https://github.com".to_string()
}

fn default_skip_markers() -> Vec<String> {
    vec!["Update VERSION to".to_string(), "[skip ci]".to_string()]
}

/// Configuration for changelog rendering.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    /// Base URL author handles are linked under
    #[serde(default = "default_author_url_base")]
    pub author_url_base: String,

    /// Group entries under category headings
    #[serde(default)]
    pub categorized: bool,

    /// Lines containing any of these are dropped
    #[serde(default = "default_skip_markers")]
    pub skip_markers: Vec<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            author_url_base: default_author_url_base(),
            categorized: false,
            skip_markers: default_skip_markers(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initial_version: default_initial_version(),
            exclusions: ExclusionConfig::default(),
            paths: PathsConfig::default(),
            changelog: ChangelogConfig::default(),
        }
    }
}

/// Parses configuration from TOML text; missing keys take their defaults.
pub fn parse_config(text: &str) -> Result<Config> {
    Ok(toml::from_str(text)?)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `nextver.toml` in current directory
/// 3. `.nextver.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}
