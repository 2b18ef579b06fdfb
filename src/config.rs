use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{IntelError, Result};

/// Repository collected when neither the CLI nor the config names one.
pub const DEFAULT_REPO: &str = "pingcap/tidb";

#[derive(Deserialize, Default)]
pub struct Config {
    pub github_token: Option<String>,
    pub repo: Option<String>,
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| IntelError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| IntelError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "issuelens")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(IntelError::NoConfigDir)
    }

    /// Get GitHub token with env var taking precedence over config file.
    /// Unauthenticated collection works, just with lower rate limits.
    pub fn github_token(&self) -> Option<String> {
        std::env::var("GITHUB_TOKEN")
            .ok()
            .or_else(|| self.github_token.clone())
    }

    /// Get repository, preferring explicit argument over config.
    pub fn resolve_repo(&self, explicit: Option<&str>) -> String {
        explicit
            .map(String::from)
            .or_else(|| self.repo.clone())
            .unwrap_or_else(|| DEFAULT_REPO.to_string())
    }

    /// Directory holding the issue and analytics snapshot files.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        ProjectDirs::from("", "", "issuelens")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(IntelError::NoDataDir)
    }
}
