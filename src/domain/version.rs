use crate::domain::prerelease::PreRelease;
use crate::error::{NextverError, Result};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Shape every recognized version string must have once the leading `v` is stripped
const VERSION_PATTERN: &str = r"^(\d+)\.(\d+)\.(\d+)(?:-([A-Za-z0-9.-]+))?$";

fn version_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).ok()).as_ref()
}

/// Strip a single optional leading `v` from a tag or version string
pub fn strip_prefix(s: &str) -> &str {
    s.strip_prefix('v').unwrap_or(s)
}

/// Semantic version representation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<PreRelease>,
}

impl SemVer {
    /// Create a new stable version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemVer {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Create a new pre-release version
    pub fn with_pre(major: u64, minor: u64, patch: u64, pre: PreRelease) -> Self {
        SemVer {
            major,
            minor,
            patch,
            pre: Some(pre),
        }
    }

    /// Parse a version from a tag or version string (e.g., "v1.2.3-pre.4")
    pub fn parse(s: &str) -> Result<Self> {
        let clean = strip_prefix(s.trim());
        let captures = version_regex()
            .and_then(|re| re.captures(clean))
            .ok_or_else(|| {
                NextverError::version(format!(
                    "Invalid version format: '{}' - expected X.Y.Z[-suffix]",
                    s
                ))
            })?;

        let component = |idx: usize, name: &str| -> Result<u64> {
            let text = captures.get(idx).map(|m| m.as_str()).unwrap_or_default();
            text.parse::<u64>()
                .map_err(|_| NextverError::version(format!("Invalid {} version: {}", name, text)))
        };

        let pre = captures
            .get(4)
            .map(|m| PreRelease::parse(m.as_str()))
            .transpose()?;

        Ok(SemVer {
            major: component(1, "major")?,
            minor: component(2, "minor")?,
            patch: component(3, "patch")?,
            pre,
        })
    }

    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }

    /// Pre-release label, empty for stable versions
    pub fn prerelease_label(&self) -> &str {
        self.pre.as_ref().map(|p| p.label.as_str()).unwrap_or("")
    }

    /// Pre-release counter, `0` for stable versions
    pub fn prerelease_number(&self) -> u64 {
        self.pre.as_ref().map(PreRelease::number_or_zero).unwrap_or(0)
    }

    /// The same `major.minor.patch` without any pre-release suffix
    pub fn stable(&self) -> Self {
        SemVer::new(self.major, self.minor, self.patch)
    }

    pub fn four_component(&self) -> FourComponent {
        FourComponent::new(self.major, self.minor, self.patch, self.prerelease_number())
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl FromStr for SemVer {
    type Err = NextverError;

    fn from_str(s: &str) -> Result<Self> {
        SemVer::parse(s)
    }
}

impl Serialize for SemVer {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl PartialOrd for SemVer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemVer {
    /// Release precedence: a pre-release sorts before the stable version
    /// with the same `major.minor.patch`.
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

/// Normalized `(major, minor, patch, prerelease)` tuple.
///
/// Only used to order or match arbitrary version strings; the pre-release
/// label is discarded, so `1.2.3-rc.2` and `1.2.3-pre.2` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FourComponent {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: u64,
}

impl FourComponent {
    pub const ZERO: FourComponent = FourComponent::new(0, 0, 0, 0);

    pub const fn new(major: u64, minor: u64, patch: u64, prerelease: u64) -> Self {
        FourComponent {
            major,
            minor,
            patch,
            prerelease,
        }
    }

    /// Normalize any recognized version string; `None` if it is not one
    pub fn parse(s: &str) -> Option<Self> {
        SemVer::parse(s).ok().map(|v| v.four_component())
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for FourComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.prerelease
        )
    }
}

/// Version bump type decision
///
/// Declaration order gives precedence: `Major > Minor > Patch > Prerelease`.
/// `Initial` sorts lowest and only appears when no tags exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Initial,
    Prerelease,
    Patch,
    Minor,
    Major,
}

impl BumpType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpType::Initial => "initial",
            BumpType::Prerelease => "prerelease",
            BumpType::Patch => "patch",
            BumpType::Minor => "minor",
            BumpType::Major => "major",
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bump type together with the reason it was chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionDecision {
    #[serde(rename = "type")]
    pub bump: BumpType,
    pub reason: String,
}

impl VersionDecision {
    pub fn new(bump: BumpType, reason: impl Into<String>) -> Self {
        VersionDecision {
            bump,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = SemVer::parse("v1.2.3").unwrap();
        assert_eq!(v, SemVer::new(1, 2, 3));
        assert!(!v.is_prerelease());
    }

    #[test]
    fn test_version_parse_prerelease() {
        let v = SemVer::parse("1.2.3-pre.4").unwrap();
        assert!(v.is_prerelease());
        assert_eq!(v.prerelease_label(), "pre");
        assert_eq!(v.prerelease_number(), 4);
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(SemVer::parse("1.2").is_err());
        assert!(SemVer::parse("v1.2.3.4").is_err());
        assert!(SemVer::parse("V1.2.3").is_err());
        assert!(SemVer::parse("release-1.2.3").is_err());
        assert!(SemVer::parse("1.2.3-").is_err());
        assert!(SemVer::parse("1.2.3+build").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for (input, normalized) in [
            ("v1.2.3", "1.2.3"),
            ("1.2.3", "1.2.3"),
            ("v1.0.0-pre.0", "1.0.0-pre.0"),
            ("2.0.0-rc", "2.0.0-rc"),
            ("0.9.12-beta.7", "0.9.12-beta.7"),
        ] {
            assert_eq!(SemVer::parse(input).unwrap().to_string(), normalized);
        }
    }

    #[test]
    fn test_precedence_prerelease_below_stable() {
        let pre = SemVer::parse("1.0.0-pre.3").unwrap();
        let stable = SemVer::parse("1.0.0").unwrap();
        assert!(pre < stable);
        assert!(SemVer::parse("0.9.9").unwrap() < pre);
    }

    #[test]
    fn test_precedence_all_suffix_tokens_weaker() {
        let stable = SemVer::parse("1.0.0").unwrap();
        for suffix in ["alpha", "beta", "rc", "pre", "pre.7"] {
            let pre = SemVer::parse(&format!("1.0.0-{}", suffix)).unwrap();
            assert!(pre < stable, "{} should sort below 1.0.0", suffix);
        }
    }

    #[test]
    fn test_four_component_projection() {
        assert_eq!(
            SemVer::parse("1.2.3-pre.4").unwrap().four_component(),
            FourComponent::new(1, 2, 3, 4)
        );
        assert_eq!(
            SemVer::parse("1.2.3").unwrap().four_component(),
            FourComponent::new(1, 2, 3, 0)
        );
        assert_eq!(FourComponent::new(1, 2, 3, 4).to_string(), "1.2.3.4");
    }

    #[test]
    fn test_four_component_ignores_label() {
        assert_eq!(
            FourComponent::parse("v1.2.3-rc.2"),
            FourComponent::parse("1.2.3-pre.2")
        );
    }

    #[test]
    fn test_four_component_ordering() {
        let fc = |s: &str| FourComponent::parse(s).unwrap();
        assert!(fc("v1.2.3") < fc("1.2.4"));
        assert!(fc("2.0.0") > fc("v1.9.9"));
        assert_eq!(fc("v1.2.0"), fc("1.2.0"));
        assert!(fc("1.2.3-pre.2") > fc("1.2.3-pre.1"));
        assert!(fc("1.10.0") > fc("1.9.0"));
        assert_eq!(FourComponent::parse("nightly"), None);
    }

    #[test]
    fn test_four_component_zero() {
        assert!(FourComponent::parse("0.0.0").unwrap().is_zero());
        assert!(!FourComponent::parse("0.0.1").unwrap().is_zero());
    }

    #[test]
    fn test_bump_type_precedence() {
        assert!(BumpType::Major > BumpType::Minor);
        assert!(BumpType::Minor > BumpType::Patch);
        assert!(BumpType::Patch > BumpType::Prerelease);
    }

    #[test]
    fn test_bump_type_display() {
        assert_eq!(BumpType::Initial.to_string(), "initial");
        assert_eq!(BumpType::Prerelease.to_string(), "prerelease");
        assert_eq!(BumpType::Major.to_string(), "major");
    }
}
