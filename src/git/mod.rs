//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the read-only git
//! queries the version engine needs, allowing for multiple implementations
//! including real Git repositories and in-memory fixtures for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A linear in-memory history for testing
//!
//! Nothing here writes to the repository.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{Commit, Tag};
use crate::error::Result;
use std::fmt;

/// A commit range in `from...to` form
///
/// `from` is excluded along with all of its ancestors; `to` and its
/// ancestors are included. Without `from` the whole history of `to` is
/// selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevRange {
    pub from: Option<String>,
    pub to: String,
}

impl RevRange {
    /// Range from `from` (exclusive) to `to` (inclusive)
    pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
        RevRange {
            from: Some(from.into()),
            to: to.into(),
        }
    }

    /// Full history reachable from `to`
    pub fn up_to(to: impl Into<String>) -> Self {
        RevRange {
            from: None,
            to: to.into(),
        }
    }

    /// Parse `a...b`, `a..b` or a bare `b`
    pub fn parse(expr: &str) -> Self {
        let expr = expr.trim();
        let split = expr
            .split_once("...")
            .or_else(|| expr.split_once(".."));

        match split {
            Some((from, to)) if !from.is_empty() => RevRange::between(from, to),
            Some((_, to)) => RevRange::up_to(to),
            None => RevRange::up_to(expr),
        }
    }
}

impl fmt::Display for RevRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.from {
            Some(from) => write!(f, "{}...{}", from, self.to),
            None => write!(f, "{}", self.to),
        }
    }
}

/// Read-only view of repository history
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to [crate::error::NextverError].
/// Callers in the engine turn these into conservative defaults.
pub trait Repository {
    /// Get every tag in the repository with the commit it points at
    ///
    /// Annotated tags are peeled to their target commit. No filtering or
    /// ordering is applied.
    fn list_tags(&self) -> Result<Vec<Tag>>;

    /// Get the commits selected by a range, most recent first
    ///
    /// # Arguments
    /// * `range` - Commits reachable from `range.to` but not from `range.from`
    ///
    /// # Returns
    /// * `Ok(Vec<Commit>)` - Unfiltered commits in log order
    /// * `Err` - If either end of the range cannot be resolved
    fn log(&self, range: &RevRange) -> Result<Vec<Commit>>;

    /// Get the paths a commit changed relative to its first parent
    ///
    /// A root commit reports every path it introduces.
    fn changed_paths(&self, commit_hash: &str) -> Result<Vec<String>>;

    /// Resolve a reference (branch, tag, `HEAD`, hash) to a full commit hash
    fn resolve_ref(&self, reference: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_display() {
        assert_eq!(RevRange::between("v1.0.0", "abc").to_string(), "v1.0.0...abc");
        assert_eq!(RevRange::up_to("abc").to_string(), "abc");
    }

    #[test]
    fn test_range_parse() {
        assert_eq!(
            RevRange::parse("v1.0.0...HEAD"),
            RevRange::between("v1.0.0", "HEAD")
        );
        assert_eq!(
            RevRange::parse("v1.0.0..HEAD"),
            RevRange::between("v1.0.0", "HEAD")
        );
        assert_eq!(RevRange::parse("HEAD"), RevRange::up_to("HEAD"));
        assert_eq!(RevRange::parse("...HEAD"), RevRange::up_to("HEAD"));
    }

    #[test]
    fn test_range_parse_dotted_version_tags() {
        assert_eq!(
            RevRange::parse("v1.2.0...v1.3.0"),
            RevRange::between("v1.2.0", "v1.3.0")
        );
    }
}
