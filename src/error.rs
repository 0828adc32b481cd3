use thiserror::Error;

/// Unified error type for nextver operations
#[derive(Error, Debug)]
pub enum NextverError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Invalid pattern: {0}")]
    Pattern(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in nextver
pub type Result<T> = std::result::Result<T, NextverError>;

impl NextverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        NextverError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        NextverError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        NextverError::Tag(msg.into())
    }

    /// Create a pattern error with context
    pub fn pattern(msg: impl Into<String>) -> Self {
        NextverError::Pattern(msg.into())
    }
}
