use crate::domain::{Commit, Tag};
use crate::error::{NextverError, Result};
use crate::git::{Repository, RevRange};
use std::collections::HashMap;

struct MockCommit {
    commit: Commit,
    paths: Vec<String>,
}

/// In-memory repository with a strictly linear history for tests
///
/// Commits are appended oldest first; `HEAD` is always the newest commit.
/// Ranges behave like git's on linear history: `from...to` yields the
/// commits after `from` up to and including `to`.
pub struct MockRepository {
    commits: Vec<MockCommit>,
    tags: Vec<Tag>,
    refs: HashMap<String, String>,
    fail_tags: bool,
    fail_log: bool,
    fail_paths: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: Vec::new(),
            refs: HashMap::new(),
            fail_tags: false,
            fail_log: false,
            fail_paths: false,
        }
    }

    /// Append a commit authored and committed by `author`, returning its hash
    pub fn commit(&mut self, subject: &str, author: &str, paths: &[&str]) -> String {
        self.commit_as(subject, author, author, paths)
    }

    /// Append a commit with distinct author and committer, returning its hash
    pub fn commit_as(
        &mut self,
        subject: &str,
        author: &str,
        committer: &str,
        paths: &[&str],
    ) -> String {
        let index = self.commits.len() + 1;
        let hash = format!("{:07x}{:033x}", index, index);
        self.commits.push(MockCommit {
            commit: Commit {
                hash: hash.clone(),
                subject: subject.to_string(),
                author_name: author.to_string(),
                committer_name: committer.to_string(),
                timestamp: 1_700_000_000 + index as i64 * 60,
            },
            paths: paths.iter().map(|p| p.to_string()).collect(),
        });
        hash
    }

    /// Tag the newest commit
    pub fn tag(&mut self, name: &str) {
        if let Some(head) = self.commits.last() {
            let target = head.commit.hash.clone();
            self.tag_at(name, &target);
        }
    }

    /// Add a tag pointing at a commit hash
    pub fn tag_at(&mut self, name: &str, hash: &str) {
        self.tags.push(Tag::new(name, hash));
    }

    /// Point a named reference (e.g., a branch) at a commit hash
    pub fn set_ref(&mut self, name: &str, hash: &str) {
        self.refs.insert(name.to_string(), hash.to_string());
    }

    /// Make `list_tags` fail
    pub fn fail_tags(&mut self) {
        self.fail_tags = true;
    }

    /// Make `log` fail
    pub fn fail_log(&mut self) {
        self.fail_log = true;
    }

    /// Make `changed_paths` fail
    pub fn fail_paths(&mut self) {
        self.fail_paths = true;
    }

    fn position(&self, reference: &str) -> Result<usize> {
        let hash = self.resolve_ref(reference)?;
        self.commits
            .iter()
            .position(|c| c.commit.hash == hash)
            .ok_or_else(|| NextverError::tag(format!("Unknown commit: {}", hash)))
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<Tag>> {
        if self.fail_tags {
            return Err(NextverError::tag("tag listing unavailable"));
        }
        Ok(self.tags.clone())
    }

    fn log(&self, range: &RevRange) -> Result<Vec<Commit>> {
        if self.fail_log {
            return Err(NextverError::tag(format!("log failed for {}", range)));
        }

        let end = self.position(&range.to)?;
        let start = match &range.from {
            Some(from) => self.position(from)? + 1,
            None => 0,
        };

        if start > end {
            return Ok(Vec::new());
        }

        Ok(self.commits[start..=end]
            .iter()
            .rev()
            .map(|c| c.commit.clone())
            .collect())
    }

    fn changed_paths(&self, commit_hash: &str) -> Result<Vec<String>> {
        if self.fail_paths {
            return Err(NextverError::tag("diff unavailable"));
        }

        self.commits
            .iter()
            .find(|c| c.commit.hash == commit_hash)
            .map(|c| c.paths.clone())
            .ok_or_else(|| NextverError::tag(format!("Unknown commit: {}", commit_hash)))
    }

    fn resolve_ref(&self, reference: &str) -> Result<String> {
        if reference == "HEAD" {
            return self
                .commits
                .last()
                .map(|c| c.commit.hash.clone())
                .ok_or_else(|| NextverError::tag("HEAD has no commits"));
        }

        if let Some(tag) = self.tags.iter().find(|t| t.name == reference) {
            return Ok(tag.target.clone());
        }

        if let Some(hash) = self.refs.get(reference) {
            return Ok(hash.clone());
        }

        self.commits
            .iter()
            .find(|c| !reference.is_empty() && c.commit.hash.starts_with(reference))
            .map(|c| c.commit.hash.clone())
            .ok_or_else(|| NextverError::tag(format!("Cannot resolve '{}'", reference)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.list_tags().unwrap().is_empty());
        assert!(repo.resolve_ref("HEAD").is_err());
    }

    #[test]
    fn test_mock_repository_log_order() {
        let mut repo = MockRepository::new();
        let first = repo.commit("first", "alice", &["a.rs"]);
        repo.tag("v1.0.0");
        let second = repo.commit("second", "bob", &["b.rs"]);
        let third = repo.commit("third", "bob", &["c.rs"]);

        let since_tag = repo.log(&RevRange::between("v1.0.0", "HEAD")).unwrap();
        let hashes: Vec<_> = since_tag.iter().map(|c| c.hash.clone()).collect();
        assert_eq!(hashes, vec![third.clone(), second]);

        let all = repo.log(&RevRange::up_to(&third)).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].hash, first);
    }

    #[test]
    fn test_mock_repository_empty_range() {
        let mut repo = MockRepository::new();
        repo.commit("only", "alice", &[]);
        repo.tag("v1.0.0");
        assert!(repo
            .log(&RevRange::between("v1.0.0", "HEAD"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_mock_repository_resolve_refs() {
        let mut repo = MockRepository::new();
        let first = repo.commit("first", "alice", &[]);
        repo.set_ref("main", &first);
        repo.tag("v1.0.0");

        assert_eq!(repo.resolve_ref("main").unwrap(), first);
        assert_eq!(repo.resolve_ref("v1.0.0").unwrap(), first);
        assert_eq!(repo.resolve_ref(&first[..10]).unwrap(), first);
        assert!(repo.resolve_ref("v9.9.9").is_err());
    }

    #[test]
    fn test_mock_repository_failures() {
        let mut repo = MockRepository::new();
        let hash = repo.commit("first", "alice", &["a.rs"]);
        repo.fail_tags();
        repo.fail_log();
        repo.fail_paths();
        assert!(repo.list_tags().is_err());
        assert!(repo.log(&RevRange::up_to("HEAD")).is_err());
        assert!(repo.changed_paths(&hash).is_err());
    }
}
