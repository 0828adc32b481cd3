//! Finds the tag a changelog section should be diffed against.
//!
//! The previous tag in sorted order is only a nominal starting point. Across
//! pre-release series and skipped versions the section should start at the
//! release one step below the target instead, when such a tag exists.

use crate::analyzer::commit_filter::CommitFilter;
use crate::analyzer::increment::IncrementClassifier;
use crate::analyzer::tag_repository::VersionTags;
use crate::domain::{BumpType, FourComponent, Tag};
use crate::git::{Repository, RevRange};
use log::debug;

/// Name of the synthetic tag paired with the oldest real tag
pub const ZERO_TAG: &str = "0.0.0";

/// Resolved boundaries of one changelog section
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRange {
    pub from: Tag,
    pub to: Tag,
    pub range: RevRange,
    pub bump: BumpType,
}

/// First guess at the bump between two versions and the version one step
/// below `to`. `None` as candidate means the step would go below zero.
fn approximate(to: FourComponent, from: FourComponent) -> (BumpType, Option<FourComponent>) {
    if to.prerelease != 0 {
        let candidate = to
            .prerelease
            .checked_sub(1)
            .map(|pre| FourComponent::new(to.major, to.minor, to.patch, pre));
        return (BumpType::Prerelease, candidate);
    }

    let below_patch = || {
        to.patch
            .checked_sub(1)
            .map(|patch| FourComponent::new(to.major, to.minor, patch, 0))
    };

    let same_release =
        to.major == from.major && to.minor == from.minor && to.patch == from.patch;
    if same_release && from.prerelease != 0 {
        return (BumpType::Patch, below_patch());
    }

    // Later checks override earlier ones.
    let mut approximation = (BumpType::Patch, Some(from));
    if to.patch > from.patch {
        approximation = (BumpType::Patch, below_patch());
    }
    if to.minor > from.minor {
        approximation = (
            BumpType::Minor,
            to.minor
                .checked_sub(1)
                .map(|minor| FourComponent::new(to.major, minor, 0, 0)),
        );
    }
    if to.major > from.major {
        approximation = (
            BumpType::Major,
            to.major
                .checked_sub(1)
                .map(|major| FourComponent::new(major, 0, 0, 0)),
        );
    }
    approximation
}

/// Maps `(nominal from, to)` tag pairs to the range a changelog section covers
pub struct RangeResolver<'a, 'r, R: Repository + ?Sized> {
    filter: &'a CommitFilter<'r, R>,
    tags: &'a VersionTags,
}

impl<'a, 'r, R: Repository + ?Sized> RangeResolver<'a, 'r, R> {
    pub fn new(filter: &'a CommitFilter<'r, R>, tags: &'a VersionTags) -> Self {
        RangeResolver { filter, tags }
    }

    /// Resolve the section for `to`, whose `target` must be a commit hash.
    ///
    /// The bump type comes from classifying the resolved range, except for
    /// pre-release targets which are always `Prerelease`.
    pub fn resolve(&self, nominal_from: &Tag, to: &Tag) -> ResolvedRange {
        let to_version = to.four_component().unwrap_or_default();
        let from_version = nominal_from.four_component().unwrap_or_default();

        let (approximate_bump, candidate) = approximate(to_version, from_version);

        let from = candidate
            .and_then(|wanted| {
                self.tags
                    .iter()
                    .find(|tag| tag.four_component() == Some(wanted))
            })
            .unwrap_or(nominal_from)
            .clone();

        let range = if from.is_sentinel() || from.four_component().unwrap_or_default().is_zero()
        {
            RevRange::up_to(to.target.clone())
        } else {
            RevRange::between(from.name.clone(), to.target.clone())
        };

        let bump = if approximate_bump == BumpType::Prerelease {
            BumpType::Prerelease
        } else {
            IncrementClassifier::new(self.filter).classify(&range).bump
        };

        debug!(
            "{}: nominal from {}, resolved from {} ({})",
            to.name, nominal_from.name, from.name, bump
        );

        ResolvedRange {
            from,
            to: to.clone(),
            range,
            bump,
        }
    }
}
