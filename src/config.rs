//! Configuration loaded from `oplog2sql.toml`.
//!
//! Lookup order: an explicit path, then `./oplog2sql.toml`, then
//! `<config dir>/oplog2sql/config.toml`. With none present the defaults
//! apply (empty cache, plain output).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{OplogError, OplogResult};

/// Name of the project-local config file.
pub const CONFIG_FILE: &str = "oplog2sql.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    pub output: OutputConfig,
}

/// Objects assumed to exist in the target before the first batch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub schemas: Vec<String>,
    /// `<schema>.<table>`
    pub tables: Vec<String>,
    /// `<schema>.<table>.<column>`
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One statement per line
    #[default]
    Plain,
    /// A JSON array of statements
    Json,
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> OplogResult<Self> {
        toml::from_str(content).map_err(|e| OplogError::Config(e.to_string()))
    }

    /// Load from `path` if given (it must exist), else from the first file
    /// found by [`Config::discover`], else defaults.
    pub fn load(path: Option<&Path>) -> OplogResult<Self> {
        let path = match path {
            Some(p) if !p.exists() => {
                return Err(OplogError::Config(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            Some(p) => Some(p.to_path_buf()),
            None => Self::discover(),
        };

        match path {
            Some(p) => {
                tracing::debug!("Loading config from {}", p.display());
                let content = fs::read_to_string(&p)?;
                Self::from_toml(&content)
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// First existing config file in the lookup order.
    pub fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("oplog2sql").join("config.toml"))
            .filter(|p| p.exists())
    }
}
