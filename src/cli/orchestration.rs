//! Main workflow orchestration logic
//!
//! Wires the engine components together for one invocation. It is kept
//! apart from CLI argument parsing so the workflow can be driven
//! programmatically against any [Repository].

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use log::info;

use crate::analyzer::{
    CommitFilter, ExclusionSet, IncrementClassifier, PathFilter, TagRepository,
};
use crate::boundary::BoundaryWarning;
use crate::changelog::ChangelogComposer;
use crate::config::Config;
use crate::domain::{BumpType, Tag, VersionDecision};
use crate::git::{Repository, RevRange};
use crate::version::{VersionCalculator, VersionInfo};

/// Arguments for the version workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionWorkflowArgs {
    /// Reference whose version is computed
    pub target: String,

    /// Overrides the configured initial version
    pub initial_version: Option<String>,

    /// Also render the changelog
    pub changelog: bool,

    /// Overrides the configured changelog grouping
    pub categorized: Option<bool>,
}

impl Default for VersionWorkflowArgs {
    fn default() -> Self {
        VersionWorkflowArgs {
            target: "HEAD".to_string(),
            initial_version: None,
            changelog: false,
            categorized: None,
        }
    }
}

/// Result of a version workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub info: VersionInfo,

    /// CI variables derived from `info`, for the caller to export
    pub ci_variables: BTreeMap<String, String>,

    /// Rendered changelog when requested
    pub changelog: Option<String>,
}

/// Main version workflow
///
/// 1. Resolve the target to a commit
/// 2. Collect version tags, newest first
/// 3. Classify the commits between the latest tag and the target
/// 4. Compute the next version and CI variables
/// 5. Optionally render the full changelog
///
/// Repository query failures degrade to safe defaults. Only invalid
/// configuration is reported as an error.
pub fn run_version_workflow<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    args: &VersionWorkflowArgs,
) -> Result<WorkflowResult> {
    let exclusions = ExclusionSet::from_config(&config.exclusions)
        .context("Invalid commit exclusion pattern")?;
    let paths = PathFilter::from_config(&config.paths).context("Invalid path glob")?;
    let calculator = VersionCalculator::new(
        args.initial_version
            .as_deref()
            .unwrap_or(&config.initial_version),
    )
    .context("Invalid initial version")?;

    let target = repo.resolve_ref(&args.target).unwrap_or_else(|e| {
        BoundaryWarning::RefResolutionFailed {
            reference: args.target.clone(),
            reason: e.to_string(),
        }
        .log();
        args.target.clone()
    });

    let filter = CommitFilter::new(repo, exclusions, paths);
    let tags = TagRepository::new(repo).version_tags();

    let (previous, decision) = if tags.is_empty_history() {
        (None, VersionDecision::new(BumpType::Initial, ""))
    } else {
        let latest = tags.latest();
        info!("Latest version tag: {}", latest.name);
        let range = RevRange::between(latest.name.clone(), target.clone());
        let decision = IncrementClassifier::new(&filter).classify(&range);
        (Some(tags.latest_version().clone()), decision)
    };

    let (new_version, decision) = calculator.calculate(previous.as_ref(), &decision);
    info!(
        "Next version: {} ({}: {})",
        new_version, decision.bump, decision.reason
    );

    let first_commit = filter
        .unfiltered(&RevRange::up_to(target.clone()))
        .last()
        .map(|c| c.hash.clone())
        .unwrap_or_default();

    let changelog = args.changelog.then(|| {
        let categorized = args.categorized.unwrap_or(config.changelog.categorized);
        let pending = Tag::new(Tag::name_for(&new_version), target.clone());
        ChangelogComposer::new(&filter, &tags, &config.changelog)
            .categorized(categorized)
            .compose(&pending)
    });

    let info = VersionInfo {
        new_version,
        previous_version: previous,
        decision,
        first_commit,
        last_commit: target,
    };
    let ci_variables = info.ci_variables();

    Ok(WorkflowResult {
        info,
        ci_variables,
        changelog,
    })
}
