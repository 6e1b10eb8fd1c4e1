//! Listing record types for the GitHub REST API.
//!
//! Only the fields ghbak consumes are deserialized; everything else in
//! the API payload is ignored.

use serde::Deserialize;

/// One repository as returned by `/users/{user}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct Repo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One gist as returned by `/users/{user}/gists`.
///
/// Gists are identified by an opaque id rather than a name.
#[derive(Debug, Clone, Deserialize)]
pub struct Gist {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
}
