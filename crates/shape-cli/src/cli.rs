//! CLI configuration and settings management

use crate::{CliError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use shape_javascript::JsParseMode;
use std::path::{Path, PathBuf};

const LOCAL_CONFIG: &str = "shape.toml";

/// CLI configuration loaded from config files
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Settings for `shape check`
    pub check: CheckConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CheckConfig {
    /// How diagnostics are printed
    pub format: OutputFormat,

    /// Print recorded side effects after each file
    pub show_side_effects: bool,

    /// File extensions picked up when walking directories
    pub extensions: Vec<String>,

    /// Keep going after recoverable parse errors
    pub loose_parsing: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
            show_side_effects: false,
            extensions: vec!["js".to_string(), "mjs".to_string(), "cjs".to_string()],
            loose_parsing: false,
        }
    }
}

impl CheckConfig {
    pub fn parse_mode(&self) -> JsParseMode {
        if self.loose_parsing {
            JsParseMode::Loose
        } else {
            JsParseMode::Strict
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Annotated source snippets
    #[default]
    Pretty,
    /// One line per diagnostic
    Plain,
    /// A single JSON document on stdout
    Json,
}

impl CliConfig {
    /// Load configuration from file, falling back to defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local = Path::new(LOCAL_CONFIG);
        if local.is_file() {
            return Self::load_from_file(local);
        }

        if let Some(path) = Self::default_config_path() {
            if path.is_file() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("shape").join("config.toml"))
    }
}
