//! Pre-release suffix handling
//!
//! A suffix such as `pre.3` is split into a label (`pre`) and a trailing
//! numeric counter (`3`). Suffixes without a numeric tail (`rc`, `alpha-1`)
//! keep their full text as the label and carry no counter.

use crate::error::{NextverError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Label used for every pre-release this tool computes
pub const DEFAULT_LABEL: &str = "pre";

/// Pre-release suffix with an optional numeric counter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreRelease {
    /// Everything before the numeric counter (e.g. "pre", "rc", "beta.x")
    pub label: String,
    /// Trailing numeric identifier, if the suffix ends with one
    pub number: Option<u64>,
}

impl PreRelease {
    /// Create a new pre-release suffix
    pub fn new(label: impl Into<String>, number: Option<u64>) -> Self {
        PreRelease {
            label: label.into(),
            number,
        }
    }

    /// Start of a new `pre` series
    pub fn first() -> Self {
        PreRelease::new(DEFAULT_LABEL, Some(1))
    }

    /// Parse a pre-release suffix (without the leading `-`)
    ///
    /// # Examples
    /// ```ignore
    /// let pr = PreRelease::parse("pre.2")?;
    /// assert_eq!(pr.label, "pre");
    /// assert_eq!(pr.number, Some(2));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(NextverError::version("Empty pre-release identifier"));
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(NextverError::version(format!(
                "Invalid pre-release identifier: '{}'",
                s
            )));
        }

        if let Some((label, tail)) = s.rsplit_once('.') {
            if !label.is_empty() && !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) {
                let number = tail.parse::<u64>().map_err(|_| {
                    NextverError::version(format!("Pre-release counter out of range: '{}'", tail))
                })?;
                return Ok(PreRelease::new(label, Some(number)));
            }
        }

        Ok(PreRelease::new(s, None))
    }

    /// Counter value, `0` when the suffix has none
    pub fn number_or_zero(&self) -> u64 {
        self.number.unwrap_or(0)
    }

    /// Next counter, always in the `pre` series. `None` when the counter
    /// is already at its maximum.
    pub fn increment(&self) -> Option<Self> {
        let number = self.number_or_zero().checked_add(1)?;
        Some(PreRelease::new(DEFAULT_LABEL, Some(number)))
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)?;
        if let Some(number) = self.number {
            write!(f, ".{}", number)?;
        }
        Ok(())
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PreRelease {
    /// SemVer precedence between suffixes, so `pre.10` sorts after `pre.9`.
    /// Suffixes semver rejects fall back to label then counter.
    fn cmp(&self, other: &Self) -> Ordering {
        let ours = semver::Prerelease::new(&self.to_string());
        let theirs = semver::Prerelease::new(&other.to_string());
        match (ours, theirs) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            _ => self
                .label
                .cmp(&other.label)
                .then(self.number_or_zero().cmp(&other.number_or_zero())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_counter() {
        let pr = PreRelease::parse("pre.2").unwrap();
        assert_eq!(pr.label, "pre");
        assert_eq!(pr.number, Some(2));
    }

    #[test]
    fn test_parse_without_counter() {
        let pr = PreRelease::parse("rc").unwrap();
        assert_eq!(pr.label, "rc");
        assert_eq!(pr.number, None);
        assert_eq!(pr.number_or_zero(), 0);
    }

    #[test]
    fn test_parse_dashed_label_keeps_text() {
        let pr = PreRelease::parse("alpha-3").unwrap();
        assert_eq!(pr.label, "alpha-3");
        assert_eq!(pr.number, None);
    }

    #[test]
    fn test_parse_non_numeric_tail() {
        let pr = PreRelease::parse("beta.1.x").unwrap();
        assert_eq!(pr.label, "beta.1.x");
        assert_eq!(pr.number, None);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(PreRelease::parse("").is_err());
        assert!(PreRelease::parse("pre+build").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for s in ["pre.2", "rc", "alpha-3", "beta.1.x", "pre.0"] {
            assert_eq!(PreRelease::parse(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_increment() {
        assert_eq!(
            PreRelease::parse("pre.2").unwrap().increment(),
            Some(PreRelease::new("pre", Some(3)))
        );
        assert_eq!(
            PreRelease::parse("rc").unwrap().increment(),
            Some(PreRelease::new("pre", Some(1)))
        );
    }

    #[test]
    fn test_increment_at_max_counter() {
        let max = PreRelease::new("pre", Some(u64::MAX));
        assert_eq!(max.increment(), None);
    }

    #[test]
    fn test_ordering_is_numeric_on_counter() {
        let nine = PreRelease::parse("pre.9").unwrap();
        let ten = PreRelease::parse("pre.10").unwrap();
        assert!(ten > nine);
    }

    #[test]
    fn test_ordering_between_labels() {
        let alpha = PreRelease::parse("alpha.1").unwrap();
        let beta = PreRelease::parse("beta.1").unwrap();
        let rc = PreRelease::parse("rc.1").unwrap();
        assert!(alpha < beta);
        assert!(beta < rc);
    }
}
