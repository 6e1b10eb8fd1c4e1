//! Repo and gist backup orchestrators.
//!
//! Both operations share the same shape: materialize the full paginated
//! listing, then mirror the items one at a time, sequentially. There is
//! no per-item failure isolation — the first error aborts the rest of
//! the run, so the returned count is only observed on full success.

use std::path::PathBuf;

use thiserror::Error;

use crate::dest::{BackupKind, RunDate, backup_dir};
use crate::github::{GitHubClient, GitHubError, UrlScheme, gist_clone_url, repo_clone_url};
use crate::mirror::{MirrorCloner, MirrorError, mirror_into};
use crate::progress::{BackupProgress, ProgressCallback, emit};

/// Anything that can end a backup run.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error(transparent)]
    Api(#[from] GitHubError),

    #[error(transparent)]
    Mirror(#[from] MirrorError),
}

/// Parameters shared by every item of one run.
#[derive(Debug, Clone)]
pub struct BackupOptions {
    /// Account whose items are mirrored.
    pub user: String,
    /// Date captured at process start; all destinations share it.
    pub date: RunDate,
    /// HTTPS or SSH clone URLs.
    pub scheme: UrlScheme,
    /// Parent of the date-stamped tree.
    pub root: PathBuf,
}

impl BackupOptions {
    /// Destination directory for one kind:
    /// `<root>/<date>/<user>/<github|gist>`.
    fn dir(&self, kind: BackupKind) -> PathBuf {
        self.root.join(backup_dir(&self.date, &self.user, kind))
    }
}

/// Mirror every repository of the account. Returns the number listed.
pub async fn backup_repos(
    client: &GitHubClient,
    cloner: &dyn MirrorCloner,
    options: &BackupOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<usize, BackupError> {
    emit(
        on_progress,
        BackupProgress::ListingItems {
            kind: BackupKind::Repos,
        },
    );

    let repos = client.list_repos(&options.user, on_progress).await?;
    let parent = options.dir(BackupKind::Repos);

    for repo in &repos {
        emit(
            on_progress,
            BackupProgress::CloningItem {
                kind: BackupKind::Repos,
                user: options.user.clone(),
                id: repo.name.clone(),
                description: repo.description.clone(),
            },
        );

        let url = repo_clone_url(options.scheme, &options.user, &repo.name);
        mirror_into(cloner, &parent, &repo.name, &url, on_progress).await?;
    }

    Ok(repos.len())
}

/// Mirror every gist of the account. Returns the number listed.
pub async fn backup_gists(
    client: &GitHubClient,
    cloner: &dyn MirrorCloner,
    options: &BackupOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<usize, BackupError> {
    emit(
        on_progress,
        BackupProgress::ListingItems {
            kind: BackupKind::Gists,
        },
    );

    let gists = client.list_gists(&options.user, on_progress).await?;
    let parent = options.dir(BackupKind::Gists);

    for gist in &gists {
        emit(
            on_progress,
            BackupProgress::CloningItem {
                kind: BackupKind::Gists,
                user: options.user.clone(),
                id: gist.id.clone(),
                description: gist.description.clone(),
            },
        );

        let url = gist_clone_url(options.scheme, &gist.id);
        mirror_into(cloner, &parent, &gist.id, &url, on_progress).await?;
    }

    Ok(gists.len())
}
