//! ghbak — mirror a GitHub account's repositories and gists as local
//! bare clones under a date-stamped directory tree.
//!
//! A run enumerates the account's items through the paginated listing
//! endpoints, then invokes one `git clone --mirror -n` per item into
//! `<YYYYMMDD>/<user>/<github|gist>/<name>`. Everything is sequential
//! and unrecovered: any failure aborts the remainder of the run.
//!
//! # Example
//!
//! ```ignore
//! use ghbak::{BackupOptions, GitCloner, GitHubClient, RunDate, UrlScheme, backup_repos};
//!
//! let client = GitHubClient::new(None);
//! let options = BackupOptions {
//!     user: "alice".to_string(),
//!     date: RunDate::today(),
//!     scheme: UrlScheme::Https,
//!     root: ".".into(),
//! };
//! let count = backup_repos(&client, &GitCloner, &options, None).await?;
//! ```

pub mod backup;
pub mod dest;
pub mod github;
pub mod http;
pub mod mirror;
pub mod progress;

pub use backup::{BackupError, BackupOptions, backup_gists, backup_repos};
pub use dest::{BackupKind, RunDate, backup_dir, is_safe_name};
pub use github::{GitHubClient, GitHubError, UrlScheme, gist_clone_url, repo_clone_url};
pub use mirror::{GitCloner, MirrorCloner, MirrorError, mirror_into};
pub use progress::{BackupProgress, ProgressCallback, emit};
