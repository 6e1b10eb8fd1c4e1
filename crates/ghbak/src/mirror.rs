//! The mirror invoker and the external clone capability.
//!
//! The actual clone is a single injectable capability so tests can
//! substitute a fake; the real implementation shells out to git. The
//! invoker owns the ordering guarantees: name validation happens before
//! any filesystem mutation, and an existing destination is never
//! clobbered or re-cloned.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

use crate::dest::is_safe_name;
use crate::progress::{BackupProgress, ProgressCallback, emit};

/// Errors that can occur while mirroring one item.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The item's name is not usable as a path segment.
    #[error("unsafe name: {0}")]
    UnsafeName(String),

    /// The destination already exists (a prior run, or a duplicate item).
    #[error("path already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    /// Creating the parent directory tree failed.
    #[error("failed to create {}: {source}", .dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The clone command could not be spawned.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The clone command ran and exited non-zero.
    #[error("`{command}` exited with {status}")]
    CloneFailed { command: String, status: ExitStatus },
}

/// The external mirror-clone capability.
///
/// A mirror clone replicates all refs of the remote as a bare repository
/// with no working tree.
#[async_trait]
pub trait MirrorCloner: Send + Sync {
    /// Mirror `url` into `parent/target`, with `parent` as the child
    /// process's working directory. `parent` exists when this is called.
    async fn mirror_clone(&self, url: &str, target: &str, parent: &Path)
    -> Result<(), MirrorError>;
}

/// Argument vector for a bare, no-checkout mirror clone.
fn clone_command(url: &str, target: &str) -> Vec<String> {
    ["git", "clone", "--mirror", "-n", url, target]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Render a command vector the way the invoker echoes it.
fn render_command(command: &[String]) -> String {
    command.join(" ")
}

/// Clones by running `git clone --mirror -n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCloner;

#[async_trait]
impl MirrorCloner for GitCloner {
    async fn mirror_clone(
        &self,
        url: &str,
        target: &str,
        parent: &Path,
    ) -> Result<(), MirrorError> {
        let command = clone_command(url, target);
        let rendered = render_command(&command);

        let status = Command::new(&command[0])
            .args(&command[1..])
            .current_dir(parent)
            .status()
            .await
            .map_err(|source| MirrorError::Spawn {
                command: rendered.clone(),
                source,
            })?;

        if !status.success() {
            return Err(MirrorError::CloneFailed {
                command: rendered,
                status,
            });
        }
        Ok(())
    }
}

/// Mirror one item into `parent/name`.
///
/// Validates the name, refuses an existing destination, creates the
/// parent tree (idempotent, with intermediate directories), then hands
/// off to the cloner.
pub async fn mirror_into(
    cloner: &dyn MirrorCloner,
    parent: &Path,
    name: &str,
    url: &str,
    on_progress: Option<&ProgressCallback>,
) -> Result<(), MirrorError> {
    if !is_safe_name(name) {
        return Err(MirrorError::UnsafeName(name.to_string()));
    }

    let dest = parent.join(name);
    if dest.exists() {
        return Err(MirrorError::DestinationExists(dest));
    }

    std::fs::create_dir_all(parent).map_err(|source| MirrorError::CreateDir {
        dir: parent.to_path_buf(),
        source,
    })?;

    emit(
        on_progress,
        BackupProgress::CloneCommand {
            dir: parent.to_path_buf(),
            command: render_command(&clone_command(url, name)),
        },
    );

    cloner.mirror_clone(url, name, parent).await
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use tempfile::TempDir;

    /// Records calls without touching the filesystem.
    #[derive(Clone, Default)]
    struct RecordingCloner {
        calls: Arc<Mutex<Vec<(String, String, PathBuf)>>>,
    }

    impl RecordingCloner {
        fn calls(&self) -> Vec<(String, String, PathBuf)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MirrorCloner for RecordingCloner {
        async fn mirror_clone(
            &self,
            url: &str,
            target: &str,
            parent: &Path,
        ) -> Result<(), MirrorError> {
            self.calls.lock().unwrap().push((
                url.to_string(),
                target.to_string(),
                parent.to_path_buf(),
            ));
            Ok(())
        }
    }

    #[test]
    fn test_clone_command_shape() {
        let command = clone_command("https://github.com/alice/tool.git", "tool");
        assert_eq!(
            command,
            vec!["git", "clone", "--mirror", "-n", "https://github.com/alice/tool.git", "tool"]
        );
        assert_eq!(
            render_command(&command),
            "git clone --mirror -n https://github.com/alice/tool.git tool"
        );
    }

    #[tokio::test]
    async fn test_unsafe_name_fails_before_any_filesystem_mutation() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("20240101").join("alice").join("github");
        let cloner = RecordingCloner::default();

        let err = mirror_into(&cloner, &parent, "../etc", "url", None)
            .await
            .expect_err("unsafe name must fail");

        assert!(matches!(err, MirrorError::UnsafeName(name) if name == "../etc"));
        assert!(!parent.exists(), "parent tree must not be created");
        assert!(cloner.calls().is_empty(), "cloner must not be invoked");
    }

    #[tokio::test]
    async fn test_existing_destination_fails_without_invoking_cloner() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().to_path_buf();
        std::fs::create_dir_all(parent.join("tool")).unwrap();
        let cloner = RecordingCloner::default();

        let err = mirror_into(&cloner, &parent, "tool", "url", None)
            .await
            .expect_err("existing destination must fail");

        assert!(matches!(err, MirrorError::DestinationExists(path) if path.ends_with("tool")));
        assert!(cloner.calls().is_empty(), "cloner must not be invoked");
    }

    #[tokio::test]
    async fn test_success_creates_parent_and_invokes_cloner_in_it() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("20240101").join("alice").join("github");
        let cloner = RecordingCloner::default();

        mirror_into(
            &cloner,
            &parent,
            "tool",
            "https://github.com/alice/tool.git",
            None,
        )
        .await
        .expect("mirror should succeed");

        assert!(parent.is_dir(), "parent tree is created with intermediates");
        assert_eq!(
            cloner.calls(),
            vec![(
                "https://github.com/alice/tool.git".to_string(),
                "tool".to_string(),
                parent.clone(),
            )]
        );
    }

    #[tokio::test]
    async fn test_clone_command_event_carries_dir_and_command_line() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().to_path_buf();
        let cloner = RecordingCloner::default();

        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = Arc::clone(&events);
        let callback: ProgressCallback = Box::new(move |event| {
            events_clone.lock().unwrap().push(event);
        });

        mirror_into(&cloner, &parent, "tool", "u.git", Some(&callback))
            .await
            .expect("mirror should succeed");

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        match &events[0] {
            BackupProgress::CloneCommand { dir, command } => {
                assert_eq!(dir, &parent);
                assert_eq!(command, "git clone --mirror -n u.git tool");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_git_cloner_surfaces_nonzero_exit() {
        // `git clone` against an invalid URL into a temp dir exits
        // non-zero quickly without network access; skip when git itself
        // is unavailable.
        let tmp = TempDir::new().unwrap();
        let probe = Command::new("git").arg("--version").status().await;
        if probe.is_err() {
            return;
        }

        let err = GitCloner
            .mirror_clone("file:///nonexistent/does-not-exist", "dest", tmp.path())
            .await
            .expect_err("clone of a missing source must fail");

        match err {
            MirrorError::CloneFailed { command, status } => {
                assert!(command.starts_with("git clone --mirror -n"));
                assert!(!status.success());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
