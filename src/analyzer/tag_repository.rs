use crate::boundary::BoundaryWarning;
use crate::domain::{SemVer, Tag};
use crate::git::Repository;
use log::debug;

/// Version tags of a repository ordered newest first
#[derive(Debug, Clone, PartialEq)]
pub struct VersionTags {
    tags: Vec<(Tag, SemVer)>,
}

impl VersionTags {
    /// Order recognized tags by release precedence, newest first.
    /// Falls back to the sentinel tag when none are recognized.
    pub fn from_tags(tags: Vec<Tag>) -> Self {
        let mut recognized: Vec<(Tag, SemVer)> = tags
            .into_iter()
            .filter_map(|tag| match tag.version() {
                Some(version) => Some((tag, version)),
                None => {
                    debug!("{}", BoundaryWarning::UnrecognizedTag { tag: tag.name });
                    None
                }
            })
            .collect();

        if recognized.is_empty() {
            BoundaryWarning::NoVersionTags.log();
            let sentinel = Tag::sentinel();
            let version = SemVer::parse(&sentinel.name).unwrap_or_else(|_| SemVer::new(1, 0, 0));
            recognized.push((sentinel, version));
        }

        recognized.sort_by(|(a_tag, a), (b_tag, b)| b.cmp(a).then_with(|| a_tag.name.cmp(&b_tag.name)));

        VersionTags { tags: recognized }
    }

    /// True when the only entry is the sentinel standing in for "no tags"
    pub fn is_empty_history(&self) -> bool {
        self.tags.len() == 1 && self.tags[0].0.is_sentinel()
    }

    /// Newest version tag
    pub fn latest(&self) -> &Tag {
        &self.tags[0].0
    }

    /// Version of the newest tag
    pub fn latest_version(&self) -> &SemVer {
        &self.tags[0].1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter().map(|(tag, _)| tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.iter().map(|t| t.name.clone()).collect()
    }
}

/// Lists version tags from a repository
pub struct TagRepository<'r, R: Repository + ?Sized> {
    repo: &'r R,
}

impl<'r, R: Repository + ?Sized> TagRepository<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        TagRepository { repo }
    }

    /// Recognized version tags, newest first. A listing failure is treated
    /// as having no tags.
    pub fn version_tags(&self) -> VersionTags {
        let tags = match self.repo.list_tags() {
            Ok(tags) => tags,
            Err(e) => {
                BoundaryWarning::TagListingFailed {
                    reason: e.to_string(),
                }
                .log();
                Vec::new()
            }
        };

        let sorted = VersionTags::from_tags(tags);
        debug!("Found {} version tag(s), latest {}", sorted.len(), sorted.latest().name);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SENTINEL_TAG;
    use crate::git::MockRepository;

    fn names(tags: &VersionTags) -> Vec<String> {
        tags.names()
    }

    #[test]
    fn test_sorted_newest_first() {
        let tags = VersionTags::from_tags(vec![
            Tag::new("v1.0.0", "a"),
            Tag::new("v1.10.0", "b"),
            Tag::new("v1.2.0", "c"),
            Tag::new("v2.0.0-pre.1", "d"),
        ]);
        assert_eq!(
            names(&tags),
            vec!["v2.0.0-pre.1", "v1.10.0", "v1.2.0", "v1.0.0"]
        );
        assert!(!tags.is_empty_history());
    }

    #[test]
    fn test_suffixes_sort_below_release() {
        let tags = VersionTags::from_tags(vec![
            Tag::new("v1.0.0-pre", "a"),
            Tag::new("v1.0.0", "b"),
            Tag::new("v1.0.0-rc.1", "c"),
            Tag::new("v1.0.0-alpha", "d"),
            Tag::new("v1.0.0-beta.2", "e"),
        ]);
        assert_eq!(tags.latest().name, "v1.0.0");
        assert_eq!(
            names(&tags),
            vec!["v1.0.0", "v1.0.0-rc.1", "v1.0.0-pre", "v1.0.0-beta.2", "v1.0.0-alpha"]
        );
    }

    #[test]
    fn test_prerelease_counters_numeric() {
        let tags = VersionTags::from_tags(vec![
            Tag::new("v1.0.1-pre.9", "a"),
            Tag::new("v1.0.1-pre.10", "b"),
        ]);
        assert_eq!(tags.latest().name, "v1.0.1-pre.10");
    }

    #[test]
    fn test_unrecognized_tags_are_ignored() {
        let tags = VersionTags::from_tags(vec![
            Tag::new("nightly", "a"),
            Tag::new("release-2.0.0", "b"),
            Tag::new("v1.1.0", "c"),
        ]);
        assert_eq!(names(&tags), vec!["v1.1.0"]);
    }

    #[test]
    fn test_no_tags_yields_sentinel() {
        let tags = VersionTags::from_tags(vec![Tag::new("nightly", "a")]);
        assert!(tags.is_empty_history());
        assert_eq!(tags.latest().name, SENTINEL_TAG);
        assert_eq!(tags.latest_version().to_string(), "1.0.0-pre.0");
    }

    #[test]
    fn test_listing_failure_yields_sentinel() {
        let mut repo = MockRepository::new();
        repo.commit("initial", "alice", &[]);
        repo.tag("v1.0.0");
        repo.fail_tags();

        let tags = TagRepository::new(&repo).version_tags();
        assert!(tags.is_empty_history());
    }

    #[test]
    fn test_reads_repository_tags() {
        let mut repo = MockRepository::new();
        repo.commit("initial", "alice", &[]);
        repo.tag("v1.0.0");
        repo.commit("second", "alice", &[]);
        repo.tag("v1.1.0");

        let tags = TagRepository::new(&repo).version_tags();
        assert_eq!(names(&tags), vec!["v1.1.0", "v1.0.0"]);
    }
}
