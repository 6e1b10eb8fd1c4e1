//! Rendering of backup progress events.
//!
//! Two modes, chosen by TTY detection:
//! - Interactive mode (TTY): styled diagnostic lines via console
//! - Logging mode (non-TTY): structured logging via tracing
//!
//! Events are only wired up at all when `--verbose` is given; the quiet
//! path never constructs a reporter.

use console::{Term, style};
use ghbak::{BackupKind, BackupProgress, ProgressCallback};

/// Progress reporter that handles both interactive and logging modes.
#[derive(Clone, Copy)]
pub(crate) enum ProgressReporter {
    /// Styled lines for TTY.
    Interactive,
    /// Structured logging for non-TTY (CI, pipes).
    Logging,
}

impl ProgressReporter {
    /// Create a new progress reporter, auto-detecting TTY mode.
    pub(crate) fn new() -> Self {
        if Term::stdout().is_term() {
            Self::Interactive
        } else {
            Self::Logging
        }
    }

    /// Handle a progress event.
    fn handle(self, event: BackupProgress) {
        match self {
            Self::Interactive => render_styled(event),
            Self::Logging => render_logged(event),
        }
    }

    /// Convert to a ProgressCallback for the library.
    pub(crate) fn into_callback(self) -> ProgressCallback {
        Box::new(move |event| self.handle(event))
    }
}

fn render_styled(event: BackupProgress) {
    match event {
        BackupProgress::Request { url } => {
            println!("{}", style(format!("GET {url}")).blue());
        }
        BackupProgress::ListingItems { kind } => {
            println!("{}", style(format!("cloning {kind}...")).yellow());
        }
        BackupProgress::CloningItem {
            kind,
            user,
            id,
            description,
        } => {
            let description = description.unwrap_or_default();
            let line = match kind {
                BackupKind::Repos => format!("==> repo {user}/{id} | {description}"),
                BackupKind::Gists => format!("==> gist {user} | {id} | {description}"),
            };
            println!("{}", style(line).magenta());
        }
        BackupProgress::CloneCommand { dir, command } => {
            println!("{}", style(format!("$ cd {}", dir.display())).blue());
            println!("{}", style(format!("$ {command}")).blue());
        }
        _ => {}
    }
}

fn render_logged(event: BackupProgress) {
    match event {
        BackupProgress::Request { url } => {
            tracing::info!(%url, "request");
        }
        BackupProgress::ListingItems { kind } => {
            tracing::info!(kind = kind.label(), "listing items");
        }
        BackupProgress::CloningItem {
            kind, user, id, ..
        } => {
            tracing::info!(kind = kind.noun(), %user, %id, "cloning");
        }
        BackupProgress::CloneCommand { dir, command } => {
            tracing::info!(dir = %dir.display(), %command, "running clone");
        }
        _ => {}
    }
}
