use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

// Longer keywords first so "documentation" is not read as "doc" + "umentation".
const CATEGORY_PATTERN: &str =
    r"(?i)^\s*(feat|add|bug ?fix|fix|documentation|doc|refactor|test)s?(?:[:(!\s]|$)";

fn category_regex() -> Option<&'static Regex> {
    static REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(CATEGORY_PATTERN).ok()).as_ref()
}

/// Changelog section a commit is listed under in categorized mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommitCategory {
    Features,
    BugFixes,
    Documentation,
    Refactoring,
    Tests,
    Other,
}

impl CommitCategory {
    /// All categories in the order their sections are written
    pub const ALL: [CommitCategory; 6] = [
        CommitCategory::Features,
        CommitCategory::BugFixes,
        CommitCategory::Documentation,
        CommitCategory::Refactoring,
        CommitCategory::Tests,
        CommitCategory::Other,
    ];

    /// Categorize a commit subject by its leading keyword.
    ///
    /// The keyword is matched case-insensitively and may be followed by
    /// `:`, a scope in parentheses, `!`, whitespace or the end of the
    /// subject. Anything else is `Other`.
    pub fn of(subject: &str) -> CommitCategory {
        let keyword = category_regex()
            .and_then(|re| re.captures(subject))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_lowercase());

        match keyword.as_deref() {
            Some("feat") | Some("add") => CommitCategory::Features,
            Some("fix") | Some("bugfix") | Some("bug fix") => CommitCategory::BugFixes,
            Some("doc") | Some("documentation") => CommitCategory::Documentation,
            Some("refactor") => CommitCategory::Refactoring,
            Some("test") => CommitCategory::Tests,
            _ => CommitCategory::Other,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CommitCategory::Features => "Features",
            CommitCategory::BugFixes => "Bug Fixes",
            CommitCategory::Documentation => "Documentation",
            CommitCategory::Refactoring => "Refactoring",
            CommitCategory::Tests => "Tests",
            CommitCategory::Other => "Other",
        }
    }
}

impl fmt::Display for CommitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features() {
        assert_eq!(CommitCategory::of("feat: add login"), CommitCategory::Features);
        assert_eq!(CommitCategory::of("feat(api): paging"), CommitCategory::Features);
        assert_eq!(CommitCategory::of("feat!: new format"), CommitCategory::Features);
        assert_eq!(CommitCategory::of("Add widget support"), CommitCategory::Features);
        assert_eq!(CommitCategory::of("Adds retries"), CommitCategory::Features);
    }

    #[test]
    fn test_bug_fixes() {
        assert_eq!(CommitCategory::of("fix: crash on start"), CommitCategory::BugFixes);
        assert_eq!(CommitCategory::of("Fix typo in parser"), CommitCategory::BugFixes);
        assert_eq!(CommitCategory::of("bugfix: overflow"), CommitCategory::BugFixes);
        assert_eq!(CommitCategory::of("Bug fix for tags"), CommitCategory::BugFixes);
    }

    #[test]
    fn test_documentation_refactoring_tests() {
        assert_eq!(CommitCategory::of("docs: readme"), CommitCategory::Documentation);
        assert_eq!(
            CommitCategory::of("Documentation update"),
            CommitCategory::Documentation
        );
        assert_eq!(
            CommitCategory::of("refactor(core): split module"),
            CommitCategory::Refactoring
        );
        assert_eq!(CommitCategory::of("test: cover ranges"), CommitCategory::Tests);
        assert_eq!(CommitCategory::of("tests"), CommitCategory::Tests);
    }

    #[test]
    fn test_keyword_must_be_whole_word() {
        assert_eq!(CommitCategory::of("Fixture cleanup"), CommitCategory::Other);
        assert_eq!(CommitCategory::of("address review"), CommitCategory::Other);
        assert_eq!(CommitCategory::of("testing harness"), CommitCategory::Other);
        assert_eq!(CommitCategory::of("Docker image"), CommitCategory::Other);
    }

    #[test]
    fn test_other() {
        assert_eq!(CommitCategory::of("chore: bump deps"), CommitCategory::Other);
        assert_eq!(CommitCategory::of("[minor] widget"), CommitCategory::Other);
        assert_eq!(CommitCategory::of(""), CommitCategory::Other);
    }

    #[test]
    fn test_titles_in_section_order() {
        let titles: Vec<&str> = CommitCategory::ALL.iter().map(|c| c.title()).collect();
        assert_eq!(
            titles,
            vec!["Features", "Bug Fixes", "Documentation", "Refactoring", "Tests", "Other"]
        );
    }
}
