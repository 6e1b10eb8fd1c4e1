//! Clone URL construction.

/// Whether clone URLs use the HTTPS or SSH form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlScheme {
    #[default]
    Https,
    Ssh,
}

/// Clone URL for a repository.
#[must_use]
pub fn repo_clone_url(scheme: UrlScheme, user: &str, name: &str) -> String {
    match scheme {
        UrlScheme::Https => format!("https://github.com/{}/{}.git", user, name),
        UrlScheme::Ssh => format!("git@github.com:{}/{}.git", user, name),
    }
}

/// Clone URL for a gist. Gists clone by id alone, without the owner.
#[must_use]
pub fn gist_clone_url(scheme: UrlScheme, id: &str) -> String {
    match scheme {
        UrlScheme::Https => format!("https://gist.github.com/{}.git", id),
        UrlScheme::Ssh => format!("git@gist.github.com:{}.git", id),
    }
}
