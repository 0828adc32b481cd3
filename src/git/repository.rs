use crate::domain::{Commit, Tag};
use crate::error::{NextverError, Result};
use crate::git::RevRange;
use git2::{Oid, Repository as Git2Repo, Sort};
use log::debug;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn resolve_oid(&self, reference: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(reference).map_err(|e| {
            NextverError::tag(format!("Cannot resolve '{}': {}", reference, e))
        })?;
        let commit = object.peel_to_commit().map_err(|e| {
            NextverError::tag(format!("'{}' does not point at a commit: {}", reference, e))
        })?;

        Ok(commit.id())
    }

    fn to_commit(commit: &git2::Commit<'_>) -> Commit {
        let subject = commit
            .message()
            .map(Commit::subject_of)
            .unwrap_or_default();

        Commit {
            hash: commit.id().to_string(),
            subject,
            author_name: commit.author().name().unwrap_or("unknown").to_string(),
            committer_name: commit.committer().name().unwrap_or("unknown").to_string(),
            timestamp: commit.time().seconds(),
        }
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<Tag>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = match self.repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(reference) => reference,
                Err(e) => {
                    debug!("Skipping tag '{}': {}", name, e);
                    continue;
                }
            };

            match reference.peel_to_commit() {
                Ok(commit) => tags.push(Tag::new(name, commit.id().to_string())),
                Err(e) => debug!("Skipping tag '{}' that does not point at a commit: {}", name, e),
            }
        }

        Ok(tags)
    }

    fn log(&self, range: &RevRange) -> Result<Vec<Commit>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        revwalk.push(self.resolve_oid(&range.to)?)?;
        if let Some(from) = &range.from {
            revwalk.hide(self.resolve_oid(from)?)?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let commit = self.repo.find_commit(oid_result?)?;
            commits.push(Self::to_commit(&commit));
        }

        Ok(commits)
    }

    fn changed_paths(&self, commit_hash: &str) -> Result<Vec<String>> {
        let commit = self.repo.find_commit(Oid::from_str(commit_hash)?)?;
        let tree = commit.tree()?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

        let paths = diff
            .deltas()
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
            })
            .collect();

        Ok(paths)
    }

    fn resolve_ref(&self, reference: &str) -> Result<String> {
        Ok(self.resolve_oid(reference)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use std::fs;
    use tempfile::TempDir;

    fn commit_file(repo: &Git2Repo, dir: &Path, file: &str, message: &str) -> Oid {
        fs::write(dir.join(file), message).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(file)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
        let parents: Vec<git2::Commit> = repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .into_iter()
            .collect();
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    #[test]
    fn test_log_and_changed_paths() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        let first = commit_file(&repo, dir.path(), "README.md", "docs: readme");
        repo.tag_lightweight("v1.0.0", &repo.find_object(first, None).unwrap(), false)
            .unwrap();
        let second = commit_file(&repo, dir.path(), "lib.rs", "feat: code\n\nbody");

        let git = Git2Repository::from_git2(repo);

        let tags = git.list_tags().unwrap();
        assert_eq!(tags, vec![Tag::new("v1.0.0", first.to_string())]);

        let commits = git.log(&RevRange::between("v1.0.0", "HEAD")).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].hash, second.to_string());
        assert_eq!(commits[0].subject, "feat: code");
        assert_eq!(commits[0].author_name, "Test User");

        let all = git.log(&RevRange::up_to("HEAD")).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].hash, first.to_string());

        assert_eq!(
            git.changed_paths(&second.to_string()).unwrap(),
            vec!["lib.rs".to_string()]
        );
        assert_eq!(
            git.changed_paths(&first.to_string()).unwrap(),
            vec!["README.md".to_string()]
        );
        assert_eq!(git.resolve_ref("HEAD").unwrap(), second.to_string());
    }

    #[test]
    fn test_resolve_unknown_ref_fails() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        commit_file(&repo, dir.path(), "a.txt", "initial");
        let git = Git2Repository::from_git2(repo);
        assert!(git.resolve_ref("does-not-exist").is_err());
        assert!(git.log(&RevRange::between("nope", "HEAD")).is_err());
    }
}
