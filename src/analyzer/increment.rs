//! Bump type decision for a commit range.
//!
//! The content ladder (any commit → patch, any code commit → minor) runs
//! first; bracket directives in commit subjects are then folded over the
//! log in VCS order. `[major]` ends the scan immediately.

use crate::analyzer::commit_filter::CommitFilter;
use crate::domain::{BumpType, VersionDecision};
use crate::git::{Repository, RevRange};
use log::debug;
use std::ops::ControlFlow;

pub const REASON_NO_CHANGES: &str = "no significant changes detected";
pub const REASON_COMMITS: &str = "non-merge commits found";
pub const REASON_CODE: &str = "code changes found";

/// An explicit bump request embedded in a commit subject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Major,
    Minor,
    Patch,
    Pre,
}

impl Directive {
    pub fn marker(&self) -> &'static str {
        match self {
            Directive::Major => "[major]",
            Directive::Minor => "[minor]",
            Directive::Patch => "[patch]",
            Directive::Pre => "[pre]",
        }
    }

    pub fn bump(&self) -> BumpType {
        match self {
            Directive::Major => BumpType::Major,
            Directive::Minor => BumpType::Minor,
            Directive::Patch => BumpType::Patch,
            Directive::Pre => BumpType::Prerelease,
        }
    }

    /// Strongest directive present in a subject (case-sensitive)
    pub fn find(subject: &str) -> Option<Directive> {
        [
            Directive::Major,
            Directive::Minor,
            Directive::Patch,
            Directive::Pre,
        ]
        .into_iter()
        .find(|d| subject.contains(d.marker()))
    }
}

/// Fold directives over subjects in the given order.
///
/// A directive applies when the current decision is not above it, and its
/// subject becomes the reason. `[major]` always applies and stops the scan,
/// so later subjects are never inspected.
pub fn apply_directives<'a, I>(initial: VersionDecision, subjects: I) -> VersionDecision
where
    I: IntoIterator<Item = &'a str>,
{
    let outcome = subjects.into_iter().try_fold(initial, |current, subject| {
        match Directive::find(subject) {
            Some(Directive::Major) => {
                ControlFlow::Break(VersionDecision::new(BumpType::Major, subject))
            }
            Some(directive) if current.bump <= directive.bump() => {
                ControlFlow::Continue(VersionDecision::new(directive.bump(), subject))
            }
            _ => ControlFlow::Continue(current),
        }
    });

    match outcome {
        ControlFlow::Break(decision) | ControlFlow::Continue(decision) => decision,
    }
}

/// Decides the bump type for a commit range
pub struct IncrementClassifier<'f, 'r, R: Repository + ?Sized> {
    filter: &'f CommitFilter<'r, R>,
}

impl<'f, 'r, R: Repository + ?Sized> IncrementClassifier<'f, 'r, R> {
    pub fn new(filter: &'f CommitFilter<'r, R>) -> Self {
        IncrementClassifier { filter }
    }

    pub fn classify(&self, range: &RevRange) -> VersionDecision {
        let mut decision = VersionDecision::new(BumpType::Prerelease, REASON_NO_CHANGES);

        if !self.filter.commits(range).is_empty() {
            decision = VersionDecision::new(BumpType::Patch, REASON_COMMITS);
        }

        if !self.filter.code_commits(range).is_empty() {
            decision = VersionDecision::new(BumpType::Minor, REASON_CODE);
        }

        debug!("{}: content suggests {} ({})", range, decision.bump, decision.reason);

        let log = self.filter.unfiltered(range);
        let decision = apply_directives(decision, log.iter().map(|c| c.subject.as_str()));

        debug!("{}: decided {} ({})", range, decision.bump, decision.reason);
        decision
    }
}
