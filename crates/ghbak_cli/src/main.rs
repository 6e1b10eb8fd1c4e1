//! ghbak CLI — mirror a GitHub account's repositories and gists.

mod config;
mod progress;

use clap::Parser;
use console::{Term, style};
use dialoguer::Password;
use tracing_subscriber::EnvFilter;

use ghbak::{
    BackupOptions, GitCloner, GitHubClient, RunDate, UrlScheme, backup_gists, backup_repos,
};

use crate::progress::ProgressReporter;

#[derive(Parser)]
#[command(name = "ghbak")]
#[command(version)]
#[command(about = "github backup")]
#[command(
    long_about = "ghbak mirrors all repositories and gists owned by an account as bare \
clones under a date-stamped directory tree: \
<YYYYMMDD>/<user>/{github,gist}/<name>. Each item is cloned with \
`git clone --mirror -n`; an existing destination is never overwritten."
)]
#[command(after_long_help = r#"EXAMPLES
    Back up repositories and gists over HTTPS:
        $ ghbak --repos --gists octocat

    Back up repositories over SSH, prompting for a token:
        $ ghbak --repos --ssh --auth octocat

CONFIGURATION
    ghbak reads configuration from:
      1. ~/.config/ghbak/config.toml (or $XDG_CONFIG_HOME/ghbak/config.toml)
      2. ./ghbak.toml
      3. Environment variables (GHBAK_* prefix, e.g., GHBAK_GITHUB_TOKEN)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    GHBAK_GITHUB_TOKEN    GitHub API token (alternative to --auth)
    GHBAK_BACKUP_ROOT     Parent directory for the date-stamped tree
"#)]
struct Cli {
    /// Mirror the account's repositories
    #[arg(long)]
    repos: bool,

    /// Mirror the account's gists
    #[arg(long)]
    gists: bool,

    /// Prompt for an API token (hidden input)
    #[arg(long)]
    auth: bool,

    /// Use SSH clone URLs instead of HTTPS
    #[arg(long)]
    ssh: bool,

    /// Print requests, per-item banners, clone commands, and a summary
    #[arg(short, long)]
    verbose: bool,

    /// Account whose repositories and gists are backed up
    user: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing for non-TTY mode (structured logging)
    let is_tty = Term::stdout().is_term();
    if !is_tty {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ghbak=info,ghbak_cli=info"));

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let config = config::Config::load();
    let cli = Cli::parse();

    if cli.verbose {
        if is_tty {
            println!("{}", style(format!("user: {}", cli.user)).red());
        } else {
            tracing::info!(user = %cli.user, "starting backup");
        }
    }

    // --auth overrides any configured token; the credential lives in
    // memory only and is handed straight to the client.
    let token = if cli.auth {
        let entered = Password::new().with_prompt("token").interact()?;
        Some(entered.trim().to_string())
    } else {
        config.github_token()
    };

    let options = BackupOptions {
        user: cli.user.clone(),
        date: RunDate::today(),
        scheme: if cli.ssh {
            UrlScheme::Ssh
        } else {
            UrlScheme::Https
        },
        root: config.backup_root(),
    };

    let client = GitHubClient::new(token);
    let cloner = GitCloner;

    let on_progress = cli
        .verbose
        .then(|| ProgressReporter::new().into_callback());

    let mut repo_count = None;
    let mut gist_count = None;

    if cli.repos {
        repo_count = Some(backup_repos(&client, &cloner, &options, on_progress.as_ref()).await?);
    }
    if cli.gists {
        gist_count = Some(backup_gists(&client, &cloner, &options, on_progress.as_ref()).await?);
    }

    if cli.verbose && (repo_count.is_some() || gist_count.is_some()) {
        print_summary(is_tty, repo_count, gist_count);
    }

    Ok(())
}

/// Print one summary line per selected kind, zero counts included.
fn print_summary(is_tty: bool, repo_count: Option<usize>, gist_count: Option<usize>) {
    if is_tty {
        println!("\n{}\n", style("=== summary ===").green());
        if let Some(count) = repo_count {
            println!("  {}", style(format!("#repos: {count}")).red());
        }
        if let Some(count) = gist_count {
            println!("  {}", style(format!("#gists: {count}")).red());
        }
    } else {
        if let Some(count) = repo_count {
            tracing::info!(repos = count, "summary");
        }
        if let Some(count) = gist_count {
            tracing::info!(gists = count, "summary");
        }
    }
}
