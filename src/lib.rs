//! Semantic version inference for git repositories.
//!
//! Reads version tags and the commits since the latest one, decides how
//! far the version should move, and renders CI variables and a changelog.
//! Nothing here writes to the repository.

pub mod analyzer;
pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod git;
pub mod ui;
pub mod version;

pub use error::{NextverError, Result};
