use crate::boundary::BoundaryWarning;
use crate::domain::prerelease::PreRelease;
use crate::domain::{BumpType, SemVer, VersionDecision, SENTINEL_TAG};
use crate::error::{NextverError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Reason recorded when there is no tag to bump from
pub const REASON_INITIAL: &str = "no version tags found";

/// Computes the next version from the last released one.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionCalculator {
    initial: SemVer,
}

impl Default for VersionCalculator {
    fn default() -> Self {
        VersionCalculator {
            initial: SemVer::new(1, 0, 0),
        }
    }
}

impl VersionCalculator {
    /// Create a calculator whose first version is `initial_version`.
    ///
    /// # Returns
    /// * `Err` - If the initial version is malformed or a pre-release
    pub fn new(initial_version: &str) -> Result<Self> {
        let initial = SemVer::parse(initial_version)?;
        if initial.is_prerelease() {
            return Err(NextverError::config(format!(
                "initial_version must be a stable version, got '{}'",
                initial_version
            )));
        }
        Ok(VersionCalculator { initial })
    }

    pub fn initial_version(&self) -> &SemVer {
        &self.initial
    }

    /// Next version and the decision it was made with.
    ///
    /// Without a previous version the result is always the initial version
    /// and the decision becomes `Initial`. A bump that would overflow a
    /// component keeps the previous version.
    pub fn calculate(
        &self,
        previous: Option<&SemVer>,
        decision: &VersionDecision,
    ) -> (SemVer, VersionDecision) {
        match previous {
            None => (
                self.initial.clone(),
                VersionDecision::new(BumpType::Initial, REASON_INITIAL),
            ),
            Some(_) if decision.bump == BumpType::Initial => {
                (self.initial.clone(), decision.clone())
            }
            Some(previous) => match bump_version(previous, decision.bump) {
                Some(next) => (next, decision.clone()),
                None => {
                    BoundaryWarning::VersionOverflow {
                        version: previous.to_string(),
                        bump: decision.bump,
                    }
                    .log();
                    (previous.clone(), decision.clone())
                }
            },
        }
    }
}

/// Bumps a version according to the specified bump type.
///
/// - **Major**: major += 1, minor = 0, patch = 0, pre-release cleared
/// - **Minor**: minor += 1, patch = 0, pre-release cleared
/// - **Patch**: a pre-release is promoted to its stable version,
///   otherwise patch += 1
/// - **Prerelease**: a pre-release counter goes up by one, otherwise
///   patch += 1 and a new `pre.1` series starts
///
/// `Initial` leaves the version unchanged. Returns `None` when the
/// incremented component would overflow.
pub fn bump_version(version: &SemVer, bump_type: BumpType) -> Option<SemVer> {
    let next = match bump_type {
        BumpType::Major => SemVer::new(version.major.checked_add(1)?, 0, 0),
        BumpType::Minor => SemVer::new(version.major, version.minor.checked_add(1)?, 0),
        BumpType::Patch if version.is_prerelease() => version.stable(),
        BumpType::Patch => {
            SemVer::new(version.major, version.minor, version.patch.checked_add(1)?)
        }
        BumpType::Prerelease => match &version.pre {
            Some(pre) => SemVer::with_pre(
                version.major,
                version.minor,
                version.patch,
                pre.increment()?,
            ),
            None => SemVer::with_pre(
                version.major,
                version.minor,
                version.patch.checked_add(1)?,
                PreRelease::first(),
            ),
        },
        BumpType::Initial => version.clone(),
    };
    Some(next)
}

/// Everything computed for one invocation; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionInfo {
    pub new_version: SemVer,
    pub previous_version: Option<SemVer>,
    pub decision: VersionDecision,
    pub first_commit: String,
    pub last_commit: String,
}

impl VersionInfo {
    /// Variables a CI pipeline exports for later steps.
    ///
    /// With no previous version the `LAST_VERSION*` values describe the
    /// sentinel tag.
    pub fn ci_variables(&self) -> BTreeMap<String, String> {
        let sentinel = SemVer::parse(SENTINEL_TAG).ok();
        let last = self.previous_version.as_ref().or(sentinel.as_ref());

        let mut vars = BTreeMap::new();
        let mut set = |key: &str, value: String| {
            vars.insert(key.to_string(), value);
        };

        set("VERSION", self.new_version.to_string());
        set(
            "LAST_VERSION",
            last.map(|v| v.to_string()).unwrap_or_default(),
        );
        set(
            "LAST_VERSION_MAJOR",
            last.map(|v| v.major.to_string()).unwrap_or_default(),
        );
        set(
            "LAST_VERSION_MINOR",
            last.map(|v| v.minor.to_string()).unwrap_or_default(),
        );
        set(
            "LAST_VERSION_PATCH",
            last.map(|v| v.patch.to_string()).unwrap_or_default(),
        );
        set(
            "LAST_VERSION_PRERELEASE",
            last.map(|v| v.prerelease_number().to_string())
                .unwrap_or_default(),
        );
        set(
            "IS_PRERELEASE",
            self.new_version.is_prerelease().to_string(),
        );
        set("VERSION_INCREMENT", self.decision.bump.to_string());
        set("FIRST_COMMIT", self.first_commit.clone());
        set("LAST_COMMIT", self.last_commit.clone());

        vars
    }
}
