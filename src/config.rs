//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. TOML file (`<config_dir>/dupereview/config.toml`, or `--config`)
//! 3. Environment variables prefixed with `DUPEREVIEW_`
//!
//! Command-line flags are applied on top by the caller.
//!
//! ```toml
//! mode = "name-and-size"
//! permanent_delete = false
//! follow_symlinks = false
//! skip_hidden = true
//! ```

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::duplicates::EquivalenceMode;

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "DUPEREVIEW_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Equivalence rule used when no selector flag is given.
    pub mode: EquivalenceMode,

    /// Delete permanently instead of moving files to the trash.
    pub permanent_delete: bool,

    /// Follow symbolic links while scanning.
    pub follow_symlinks: bool,

    /// Skip hidden files and directories.
    pub skip_hidden: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: EquivalenceMode::ByName,
            permanent_delete: false,
            follow_symlinks: false,
            skip_hidden: false,
        }
    }
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    ///
    /// Falls back to defaults (plus environment) if the file cannot be read.
    pub fn load() -> Self {
        match Self::default_path() {
            Ok(path) => Self::load_from_path(path),
            Err(e) => {
                log::debug!("No config directory available: {}", e);
                Self::from_figment(Self::base_figment()).unwrap_or_default()
            }
        }
    }

    /// Load the configuration from a specific file.
    ///
    /// A missing file is not an error. A malformed file is logged and the
    /// defaults are used instead.
    pub fn load_from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Failed to load config from {}, using defaults: {:#}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Load the configuration from a specific file, reporting errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is not valid TOML or a value has the
    /// wrong type.
    pub fn try_load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            log::debug!("Loading config from {}", path.display());
        }
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX));
        Self::from_figment(figment)
    }

    /// Save the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// file cannot be written.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Get the default platform-specific configuration path.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform has no home directory.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "dupereview", "dupereview")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    fn base_figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))
    }
}
