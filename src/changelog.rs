//! Changelog generation.
//!
//! One markdown section per released tag, newest first, plus a section for
//! the version about to be tagged. Pre-release sections are never written.

use crate::analyzer::commit_filter::CommitFilter;
use crate::analyzer::range_resolver::{RangeResolver, ResolvedRange, ZERO_TAG};
use crate::analyzer::tag_repository::VersionTags;
use crate::config::ChangelogConfig;
use crate::conventional::CommitCategory;
use crate::domain::{BumpType, Commit, Tag};
use crate::git::Repository;
use log::debug;

/// A single bullet of a changelog section
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ChangelogLine {
    text: String,
    category: CommitCategory,
}

/// Format one commit as a changelog bullet
pub fn format_line(commit: &Commit, author_url_base: &str) -> String {
    format!(
        "- {} ([@{}]({}/{}))",
        commit.subject,
        commit.author_name,
        author_url_base.trim_end_matches('/'),
        commit.author_name
    )
}

/// Renders changelog sections for resolved tag ranges
pub struct ChangelogComposer<'a, 'r, R: Repository + ?Sized> {
    filter: &'a CommitFilter<'r, R>,
    tags: &'a VersionTags,
    config: &'a ChangelogConfig,
    categorized: bool,
}

impl<'a, 'r, R: Repository + ?Sized> ChangelogComposer<'a, 'r, R> {
    pub fn new(
        filter: &'a CommitFilter<'r, R>,
        tags: &'a VersionTags,
        config: &'a ChangelogConfig,
    ) -> Self {
        ChangelogComposer {
            filter,
            tags,
            config,
            categorized: config.categorized,
        }
    }

    /// Group bullets under category headings
    pub fn categorized(mut self, categorized: bool) -> Self {
        self.categorized = categorized;
        self
    }

    fn lines(&self, resolved: &ResolvedRange) -> Vec<ChangelogLine> {
        let mut lines: Vec<ChangelogLine> = self
            .filter
            .commits(&resolved.range)
            .iter()
            .map(|commit| ChangelogLine {
                text: format_line(commit, &self.config.author_url_base),
                category: CommitCategory::of(&commit.subject),
            })
            .filter(|line| {
                !self
                    .config
                    .skip_markers
                    .iter()
                    .any(|marker| line.text.contains(marker.as_str()))
            })
            .collect();

        lines.sort_by(|a, b| a.text.cmp(&b.text));
        lines.dedup_by(|a, b| a.text == b.text);
        lines
    }

    /// Markdown for one section, `None` for pre-releases
    pub fn section(&self, resolved: &ResolvedRange) -> Option<String> {
        if resolved.bump == BumpType::Prerelease {
            debug!("Skipping pre-release {} in changelog", resolved.to.name);
            return None;
        }

        let lines = self.lines(resolved);
        let mut output = String::new();

        output.push_str(&format!("## {} ({})\n\n", resolved.to.name, resolved.bump));
        output.push_str(&format!("Changes since {}:\n\n", resolved.from.name));

        if self.categorized {
            for category in CommitCategory::ALL {
                let mut grouped = lines.iter().filter(|l| l.category == category).peekable();
                if grouped.peek().is_none() {
                    continue;
                }
                output.push_str(&format!("### {}\n\n", category));
                for line in grouped {
                    output.push_str(&line.text);
                    output.push('\n');
                }
                output.push('\n');
            }
        } else {
            for line in &lines {
                output.push_str(&line.text);
                output.push('\n');
            }
            if !lines.is_empty() {
                output.push('\n');
            }
        }

        Some(output)
    }

    /// Sections for every recognized tag, newest first.
    ///
    /// Each tag is paired with the next older one as its nominal start; the
    /// oldest tag starts from the beginning of history.
    pub fn history(&self) -> Vec<String> {
        if self.tags.is_empty_history() {
            return Vec::new();
        }

        let resolver = RangeResolver::new(self.filter, self.tags);
        let zero = Tag::new(ZERO_TAG, "");
        let tags: Vec<&Tag> = self.tags.iter().collect();

        tags.iter()
            .enumerate()
            .filter_map(|(i, to)| {
                let from = tags.get(i + 1).copied().unwrap_or(&zero);
                self.section(&resolver.resolve(from, to))
            })
            .collect()
    }

    /// The full changelog with a leading section for `pending`, the tag
    /// about to be created. It is resolved against the latest tag like any
    /// other pair.
    pub fn compose(&self, pending: &Tag) -> String {
        let resolver = RangeResolver::new(self.filter, self.tags);
        let upcoming = resolver.resolve(self.tags.latest(), pending);

        self.section(&upcoming)
            .into_iter()
            .chain(self.history())
            .collect::<Vec<_>>()
            .join("")
    }
}
