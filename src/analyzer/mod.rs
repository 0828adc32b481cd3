//! Analysis engine: tag discovery, commit filtering, bump classification
//! and changelog range resolution

pub mod commit_filter;
pub mod increment;
pub mod range_resolver;
pub mod tag_repository;

pub use commit_filter::{
    CommitField, CommitFilter, CommitPredicate, ExclusionSet, PathFilter, RegexPredicate,
};
pub use increment::{apply_directives, Directive, IncrementClassifier};
pub use range_resolver::{RangeResolver, ResolvedRange, ZERO_TAG};
pub use tag_repository::{TagRepository, VersionTags};
