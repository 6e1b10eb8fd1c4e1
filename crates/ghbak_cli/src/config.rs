//! Configuration file support for ghbak.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags (`--auth` overrides any configured token)
//! 2. Environment variables (prefixed with `GHBAK_`, e.g., `GHBAK_GITHUB_TOKEN`)
//! 3. Config file (~/.config/ghbak/config.toml or ./ghbak.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [github]
//! token = "ghp_..."  # or use GHBAK_GITHUB_TOKEN env var
//!
//! [backup]
//! root = "/srv/backups"  # parent of the date-stamped tree
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration.
    pub github: GitHubConfig,
    /// Backup destination configuration.
    pub backup: BackupConfig,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token.
    /// Can also be set via GHBAK_GITHUB_TOKEN environment variable.
    pub token: Option<String>,
}

/// Backup destination configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Parent directory for the date-stamped tree.
    /// Defaults to the current directory.
    pub root: Option<PathBuf>,
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. XDG config file (~/.config/ghbak/config.toml)
    /// 2. Local config file (./ghbak.toml)
    /// 3. Environment variables with GHBAK_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        // Add XDG config file if it exists
        if let Some(proj_dirs) = ProjectDirs::from("", "", "ghbak") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        // Add local config file (higher priority than XDG)
        let local_config = PathBuf::from("ghbak.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./ghbak.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // Add GHBAK_ prefixed environment variables
        // e.g., GHBAK_GITHUB_TOKEN -> github.token
        builder = builder.add_source(
            Environment::with_prefix("GHBAK")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the GitHub token, if configured.
    pub fn github_token(&self) -> Option<String> {
        self.github.token.clone()
    }

    /// Get the backup root, falling back to the current directory.
    pub fn backup_root(&self) -> PathBuf {
        self.backup.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
