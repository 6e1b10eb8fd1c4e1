//! Progress reporting types for backup runs.
//!
//! The library emits typed events through an optional callback; the CLI
//! decides how to render them (styled lines on a TTY, structured logging
//! otherwise). The credential never appears in any event.

use std::path::PathBuf;

use crate::dest::BackupKind;

/// Progress events emitted during a backup run.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum BackupProgress {
    /// About to issue a GET request.
    Request {
        /// The request URL.
        url: String,
    },

    /// Starting to list and mirror one kind of item.
    ListingItems {
        /// Repositories or gists.
        kind: BackupKind,
    },

    /// About to mirror a single item.
    CloningItem {
        /// Repositories or gists.
        kind: BackupKind,
        /// The account being backed up.
        user: String,
        /// Repository name or gist id.
        id: String,
        /// The item's description, if it has one.
        description: Option<String>,
    },

    /// The exact command the mirror invoker is about to run.
    CloneCommand {
        /// Working directory of the child process.
        dir: PathBuf,
        /// Rendered command line.
        command: String,
    },
}

/// Callback for progress updates during a backup run.
pub type ProgressCallback = Box<dyn Fn(BackupProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: BackupProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
