use crate::domain::version::{FourComponent, SemVer};
use serde::Serialize;

/// Name of the synthetic tag standing in for "no version tags exist"
pub const SENTINEL_TAG: &str = "v1.0.0-pre.0";

/// Represents a git tag and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    pub target: String,
}

impl Tag {
    /// Create a new tag from a name and target commit hash
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            target: target.into(),
        }
    }

    /// The synthetic tag used when a repository has no version tags.
    /// It points at no commit.
    pub fn sentinel() -> Self {
        Tag::new(SENTINEL_TAG, "")
    }

    pub fn is_sentinel(&self) -> bool {
        self.name == SENTINEL_TAG && self.target.is_empty()
    }

    /// Parsed version, `None` when the name is not a recognized version tag
    pub fn version(&self) -> Option<SemVer> {
        SemVer::parse(&self.name).ok()
    }

    pub fn four_component(&self) -> Option<FourComponent> {
        FourComponent::parse(&self.name)
    }

    /// Conventional tag name for a version (e.g., 1.2.3 -> "v1.2.3")
    pub fn name_for(version: &SemVer) -> String {
        format!("v{}", version)
    }
}
