//! Site configuration module.
//!
//! Handles loading and validating `config.toml` from the content root. The
//! file is optional — stock defaults apply when it is absent — and sparse:
//! override just the values you want.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output = "public"   # Directory the compiled JSON is written under
//! page_size = 1       # Documents per index page (min 1)
//! ```
//!
//! The content directory itself is a CLI concern (`--source`), not a config
//! value: the config file lives inside it. Unknown keys are rejected to
//! catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory the compiled JSON is written under.
    pub output: PathBuf,
    /// Documents per index page.
    pub page_size: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("public"),
            page_size: 1,
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Validation("page_size must be at least 1".into()));
        }
        Ok(())
    }
}

/// Load `config.toml` from the content root, falling back to defaults when
/// the file does not exist.
pub fn load_config(content_root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = content_root.join("config.toml");
    let config = if path.exists() {
        toml::from_str(&fs::read_to_string(&path)?)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// A documented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> String {
    "\
# postpress configuration
# All options are optional - defaults shown below.

# Directory the compiled JSON is written under. The engine writes into
# <output>/content/ and clears that subdirectory on every fresh run.
output = \"public\"

# Documents per index page. Every index chain (the timeline, each tag,
# each yearly archive) is split into pages of this size.
page_size = 1
"
    .to_string()
}
