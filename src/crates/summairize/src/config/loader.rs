//! Configuration loader with dual-location support
//!
//! Loads configuration from:
//! 1. Default values
//! 2. User-level config: ~/.summairize/summairize.toml
//! 3. Project-level config: ./.summairize/summairize.toml
//! 4. `SUMMAIRIZE_*` environment variables
//!
//! Later sources override earlier ones key by key, so a project file only
//! needs the values it changes.

use crate::config::schema::{EnvOverrides, SummairizeConfig};
use crate::error::{Result, SummairizeError};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

const CONFIG_DIR: &str = ".summairize";
const CONFIG_FILE: &str = "summairize.toml";

/// Configuration loader that handles both user and project configs
pub struct ConfigLoader {
    user_config_path: Option<PathBuf>,
    project_config_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the standard locations.
    ///
    /// Without a home directory only the project file is consulted.
    pub fn new() -> Result<Self> {
        Ok(Self {
            user_config_path: Self::user_config_path(),
            project_config_path: Self::project_config_path()?,
        })
    }

    /// Create a loader for explicit file locations.
    pub fn with_paths(user_config_path: Option<PathBuf>, project_config_path: PathBuf) -> Self {
        Self {
            user_config_path,
            project_config_path,
        }
    }

    /// Use `path` instead of the project-level file.
    pub fn with_project_path(mut self, path: PathBuf) -> Self {
        self.project_config_path = path;
        self
    }

    /// Get user-level config path (~/.summairize/summairize.toml)
    fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Get project-level config path (./.summairize/summairize.toml)
    fn project_config_path() -> Result<PathBuf> {
        Ok(std::env::current_dir()?.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load configuration from every source, environment last.
    pub async fn load(&self) -> Result<SummairizeConfig> {
        let mut config = self.load_files().await?;
        config.apply_overrides(EnvOverrides::from_env()?)?;

        info!(provider = %config.provider, model = %config.ollama.model, "Configuration loaded");
        Ok(config)
    }

    /// Load defaults merged with the user and project files.
    pub async fn load_files(&self) -> Result<SummairizeConfig> {
        let mut merged = toml::Table::new();

        let paths = self
            .user_config_path
            .iter()
            .chain(std::iter::once(&self.project_config_path));

        for path in paths {
            match Self::read_table(path).await? {
                Some(table) => {
                    debug!(path = %path.display(), "Loaded config file");
                    merge_tables(&mut merged, table);
                }
                None => debug!(path = %path.display(), "Config file not found, skipping"),
            }
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(|e| SummairizeError::Config(format!("Failed to parse config: {}", e)))
    }

    async fn read_table(path: &Path) -> Result<Option<toml::Table>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            SummairizeError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let table = content.parse::<toml::Table>().map_err(|e| {
            SummairizeError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        Ok(Some(table))
    }

    /// Get user config path
    pub fn get_user_config_path(&self) -> Option<&Path> {
        self.user_config_path.as_deref()
    }

    /// Get project config path
    pub fn get_project_config_path(&self) -> &Path {
        &self.project_config_path
    }
}

/// Recursively overlay `overlay` onto `base`; tables merge, everything else
/// replaces.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(incoming) => match base.get_mut(&key) {
                Some(toml::Value::Table(existing)) => merge_tables(existing, incoming),
                _ => {
                    base.insert(key, toml::Value::Table(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}
