//! GitHub REST API listing support.

pub mod client;
pub mod error;
pub mod pagination;
pub mod types;
pub mod urls;

pub use client::{API_ROOT, GitHubClient};
pub use error::GitHubError;
pub use types::{Gist, Repo};
pub use urls::{UrlScheme, gist_clone_url, repo_clone_url};
