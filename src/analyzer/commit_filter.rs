//! Commit filtering: drops bot, merge and PR noise from a range and
//! optionally keeps only commits that touch code.

use crate::boundary::BoundaryWarning;
use crate::config::{ExclusionConfig, PathsConfig};
use crate::domain::Commit;
use crate::error::{NextverError, Result};
use crate::git::{Repository, RevRange};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::Regex;

/// A test applied to a commit; matching commits are excluded.
///
/// Closures `Fn(&Commit) -> bool` implement this directly, so tests can
/// inject fixtures without regex literals.
pub trait CommitPredicate: Send + Sync {
    fn matches(&self, commit: &Commit) -> bool;
}

impl<F> CommitPredicate for F
where
    F: Fn(&Commit) -> bool + Send + Sync,
{
    fn matches(&self, commit: &Commit) -> bool {
        self(commit)
    }
}

/// Which commit field a [RegexPredicate] looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitField {
    Author,
    Committer,
    Subject,
}

impl CommitField {
    fn value<'a>(&self, commit: &'a Commit) -> &'a str {
        match self {
            CommitField::Author => &commit.author_name,
            CommitField::Committer => &commit.committer_name,
            CommitField::Subject => &commit.subject,
        }
    }
}

/// Matches when a regex finds a match in one commit field
#[derive(Debug, Clone)]
pub struct RegexPredicate {
    field: CommitField,
    regex: Regex,
}

impl RegexPredicate {
    pub fn new(field: CommitField, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| NextverError::pattern(format!("'{}': {}", pattern, e)))?;
        Ok(RegexPredicate { field, regex })
    }
}

impl CommitPredicate for RegexPredicate {
    fn matches(&self, commit: &Commit) -> bool {
        self.regex.is_match(self.field.value(commit))
    }
}

/// Union of exclusion predicates
#[derive(Default)]
pub struct ExclusionSet {
    predicates: Vec<Box<dyn CommitPredicate>>,
}

impl ExclusionSet {
    /// A set that excludes nothing
    pub fn new() -> Self {
        ExclusionSet::default()
    }

    /// Compile the configured author, committer and subject patterns
    pub fn from_config(config: &ExclusionConfig) -> Result<Self> {
        let mut set = ExclusionSet::new();
        for (field, patterns) in [
            (CommitField::Author, &config.authors),
            (CommitField::Committer, &config.committers),
            (CommitField::Subject, &config.subjects),
        ] {
            for pattern in patterns {
                set.push(RegexPredicate::new(field, pattern)?);
            }
        }
        Ok(set)
    }

    pub fn push(&mut self, predicate: impl CommitPredicate + 'static) {
        self.predicates.push(Box::new(predicate));
    }

    pub fn with(mut self, predicate: impl CommitPredicate + 'static) -> Self {
        self.push(predicate);
        self
    }

    pub fn excludes(&self, commit: &Commit) -> bool {
        self.predicates.iter().any(|p| p.matches(commit))
    }
}

/// Paths whose changes do not count as code changes
#[derive(Debug, Clone)]
pub struct PathFilter {
    non_substantive: GlobSet,
}

impl PathFilter {
    pub fn new<S: AsRef<str>>(globs: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for glob in globs {
            let glob = glob.as_ref();
            // `*` stays within one path segment; only `**` crosses `/`
            builder.add(
                GlobBuilder::new(glob)
                    .literal_separator(true)
                    .build()
                    .map_err(|e| NextverError::pattern(format!("'{}': {}", glob, e)))?,
            );
        }
        let non_substantive = builder
            .build()
            .map_err(|e| NextverError::pattern(e.to_string()))?;

        Ok(PathFilter { non_substantive })
    }

    pub fn from_config(config: &PathsConfig) -> Result<Self> {
        PathFilter::new(&config.non_substantive)
    }

    /// True if at least one path falls outside the non-substantive set
    pub fn is_substantive<S: AsRef<str>>(&self, paths: &[S]) -> bool {
        paths
            .iter()
            .any(|p| !self.non_substantive.is_match(p.as_ref().replace('\\', "/")))
    }
}

/// Produces filtered commit lists for a range
pub struct CommitFilter<'r, R: Repository + ?Sized> {
    repo: &'r R,
    exclusions: ExclusionSet,
    paths: PathFilter,
}

impl<'r, R: Repository + ?Sized> CommitFilter<'r, R> {
    pub fn new(repo: &'r R, exclusions: ExclusionSet, paths: PathFilter) -> Self {
        CommitFilter {
            repo,
            exclusions,
            paths,
        }
    }

    /// Every commit in the range in log order, exclusions not applied.
    /// A range that cannot be read yields no commits.
    pub fn unfiltered(&self, range: &RevRange) -> Vec<Commit> {
        self.repo.log(range).unwrap_or_else(|e| {
            BoundaryWarning::RangeQueryFailed {
                range: range.to_string(),
                reason: e.to_string(),
            }
            .log();
            Vec::new()
        })
    }

    /// Commits in the range matching no exclusion, most recent first
    pub fn commits(&self, range: &RevRange) -> Vec<Commit> {
        self.unfiltered(range)
            .into_iter()
            .filter(|c| !self.exclusions.excludes(c))
            .collect()
    }

    /// Like [CommitFilter::commits], keeping only commits that touch at
    /// least one path outside the non-substantive globs
    pub fn code_commits(&self, range: &RevRange) -> Vec<Commit> {
        self.commits(range)
            .into_iter()
            .filter(|c| match self.repo.changed_paths(&c.hash) {
                Ok(paths) => self.paths.is_substantive(&paths),
                Err(e) => {
                    BoundaryWarning::PathQueryFailed {
                        commit: c.hash.clone(),
                        reason: e.to_string(),
                    }
                    .log();
                    false
                }
            })
            .collect()
    }
}
