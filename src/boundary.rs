use std::fmt;

use crate::domain::commit::short_hash;
use crate::domain::BumpType;

/// Non-fatal conditions where version inference falls back to a safe default.
/// These are logged as warnings and never stop the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The repository has no recognized version tags
    NoVersionTags,
    /// A tag does not look like a version and is left out of ordering
    UnrecognizedTag { tag: String },
    /// Tags could not be listed at all
    TagListingFailed { reason: String },
    /// A commit range could not be walked
    RangeQueryFailed { range: String, reason: String },
    /// The changed paths of a commit could not be read
    PathQueryFailed { commit: String, reason: String },
    /// A reference could not be resolved to a commit
    RefResolutionFailed { reference: String, reason: String },
    /// Bumping would overflow a version component
    VersionOverflow { version: String, bump: BumpType },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoVersionTags => {
                write!(f, "No version tags found; treating history as new")
            }
            BoundaryWarning::UnrecognizedTag { tag } => {
                write!(f, "Ignoring tag '{}': not a version tag", tag)
            }
            BoundaryWarning::TagListingFailed { reason } => {
                write!(f, "Cannot list tags ({}); treating history as new", reason)
            }
            BoundaryWarning::RangeQueryFailed { range, reason } => {
                write!(
                    f,
                    "Cannot read commits in '{}' ({}); assuming none",
                    range, reason
                )
            }
            BoundaryWarning::PathQueryFailed { commit, reason } => {
                write!(
                    f,
                    "Cannot read changed paths of {} ({}); treating it as non-code",
                    short_hash(commit),
                    reason
                )
            }
            BoundaryWarning::RefResolutionFailed { reference, reason } => {
                write!(f, "Cannot resolve '{}' ({})", reference, reason)
            }
            BoundaryWarning::VersionOverflow { version, bump } => {
                write!(
                    f,
                    "Cannot apply a {} bump to {}: component overflow; keeping {}",
                    bump, version, version
                )
            }
        }
    }
}

impl BoundaryWarning {
    /// Report the warning through the log facade
    pub fn log(&self) {
        log::warn!("{}", self);
    }
}
