use serde::Serialize;

/// Read-only projection of a commit as the VCS reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub hash: String,
    pub subject: String,
    pub author_name: String,
    pub committer_name: String,
    /// Commit time in seconds since the Unix epoch
    pub timestamp: i64,
}

/// Abbreviated 7-character form of a commit hash
pub fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

impl Commit {
    /// First line of a full commit message
    pub fn subject_of(message: &str) -> String {
        message.lines().next().unwrap_or_default().trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hash() {
        assert_eq!(
            short_hash("0123456789abcdef0123456789abcdef01234567"),
            "0123456"
        );
    }

    #[test]
    fn test_short_hash_of_short_input() {
        assert_eq!(short_hash("abc"), "abc");
        assert_eq!(short_hash(""), "");
    }

    #[test]
    fn test_subject_of_multiline_message() {
        assert_eq!(
            Commit::subject_of("feat: add widget  \n\nLonger body"),
            "feat: add widget"
        );
        assert_eq!(Commit::subject_of(""), "");
    }
}
