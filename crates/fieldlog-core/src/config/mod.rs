//! Application configuration.
//!
//! Values resolve in order: built-in defaults, the JSON file at
//! `<config_dir>/fieldlog/config.json`, then `FIELDLOG_*` environment
//! variables. Command-line flags are applied by the caller on top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::util::normalize_text_option;
use crate::{Error, Result};

const APP_DIR_NAME: &str = "fieldlog";
const CONFIG_FILE_NAME: &str = "config.json";
const DB_FILE_NAME: &str = "fieldlog.db";

pub const DB_PATH_ENV: &str = "FIELDLOG_DB_PATH";
pub const PAGE_SIZE_ENV: &str = "FIELDLOG_PAGE_SIZE";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default)]
    pub table_page_size: Option<usize>,
    #[serde(default)]
    pub map_page_size: Option<usize>,
}

pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or_else(|| Error::Config("Failed to resolve config directory".to_string()))
}

pub fn default_db_path() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(DB_FILE_NAME))
        .ok_or_else(|| Error::Config("Failed to resolve data directory".to_string()))
}

impl AppConfig {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_path(&default_config_path()?)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// A missing file is not an error; it yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            Error::Config(format!(
                "Failed to parse config at {}: {error}",
                path.display()
            ))
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(self)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// Override from environment variables read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(path) = normalize_text_option(lookup(DB_PATH_ENV)) {
            self.db_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = normalize_text_option(lookup(PAGE_SIZE_ENV)) {
            let size = parse_page_size(&raw)?;
            self.table_page_size = Some(size);
            self.map_page_size = Some(size);
        }
        Ok(())
    }

    pub fn resolved_db_path(&self) -> Result<PathBuf> {
        self.db_path.clone().map_or_else(default_db_path, Ok)
    }

    pub fn table_page_size(&self) -> usize {
        self.table_page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }

    pub fn map_page_size(&self) -> usize {
        self.map_page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }
}

fn parse_page_size(raw: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(Error::Config(format!(
            "{PAGE_SIZE_ENV} must be a positive integer, got '{raw}'"
        ))),
    }
}
