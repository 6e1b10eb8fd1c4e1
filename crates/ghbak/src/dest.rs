//! Destination naming and the safe-name guard.
//!
//! Every clone lands under `<date>/<user>/<github|gist>/<name>`. The date
//! is captured once at process start and threaded explicitly so all items
//! in one run share the same directory even across a midnight rollover.

use std::fmt;
use std::path::PathBuf;

use chrono::Local;

/// The two kinds of item a run can mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupKind {
    Repos,
    Gists,
}

impl BackupKind {
    /// Subdirectory name under `<date>/<user>/`.
    #[must_use]
    pub fn subdir(self) -> &'static str {
        match self {
            BackupKind::Repos => "github",
            BackupKind::Gists => "gist",
        }
    }

    /// Singular noun for per-item banners.
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            BackupKind::Repos => "repo",
            BackupKind::Gists => "gist",
        }
    }

    /// Plural label for phase banners and summaries.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BackupKind::Repos => "repos",
            BackupKind::Gists => "gists",
        }
    }
}

impl fmt::Display for BackupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The run date, formatted `YYYYMMDD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDate(String);

impl RunDate {
    /// Capture today's local date. Call once per process.
    #[must_use]
    pub fn today() -> Self {
        Self(Local::now().format("%Y%m%d").to_string())
    }

    /// Build from a pre-formatted `YYYYMMDD` string.
    #[must_use]
    pub fn from_string(date: impl Into<String>) -> Self {
        Self(date.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True iff `name` is usable as a filesystem path segment.
///
/// The whole string must consist of ASCII letters, digits, or `-`, and be
/// non-empty. No normalization, no case folding, no length limit.
#[must_use]
pub fn is_safe_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Directory that receives one kind's clones: `<date>/<user>/<subdir>`.
#[must_use]
pub fn backup_dir(date: &RunDate, user: &str, kind: BackupKind) -> PathBuf {
    [date.as_str(), user, kind.subdir()].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_names_accepted() {
        let long = "x".repeat(300);
        for name in ["my-repo1", "a", "0", "-", "A-Z-0-9", long.as_str()] {
            assert!(is_safe_name(name), "{name:?} should be accepted");
        }
    }

    #[test]
    fn test_unsafe_names_rejected() {
        for name in ["", "../etc", "a b", "a.b", "a/b", "a_b", "naïve", "répo", "a\n"] {
            assert!(!is_safe_name(name), "{name:?} should be rejected");
        }
    }

    #[test]
    fn test_backup_dir_repos() {
        let date = RunDate::from_string("20240101");
        assert_eq!(
            backup_dir(&date, "alice", BackupKind::Repos),
            PathBuf::from("20240101/alice/github")
        );
    }

    #[test]
    fn test_backup_dir_gists() {
        let date = RunDate::from_string("20240101");
        assert_eq!(
            backup_dir(&date, "alice", BackupKind::Gists),
            PathBuf::from("20240101/alice/gist")
        );
    }

    #[test]
    fn test_run_date_today_is_eight_digits() {
        let date = RunDate::today();
        assert_eq!(date.as_str().len(), 8);
        assert!(date.as_str().bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(BackupKind::Repos.subdir(), "github");
        assert_eq!(BackupKind::Gists.subdir(), "gist");
        assert_eq!(BackupKind::Repos.noun(), "repo");
        assert_eq!(BackupKind::Gists.noun(), "gist");
        assert_eq!(BackupKind::Repos.to_string(), "repos");
        assert_eq!(BackupKind::Gists.to_string(), "gists");
    }
}
