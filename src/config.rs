use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::issues::IssueOptions;
use crate::render::OutputFormat;

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "prd-to-issues.toml";

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub issues: IssuesConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct IssuesConfig {
    pub min_level: u8,
    pub max_level: u8,
    pub label_prefix: String,
}

impl Default for IssuesConfig {
    fn default() -> Self {
        let options = IssueOptions::default();
        Self {
            min_level: options.min_level,
            max_level: options.max_level,
            label_prefix: options.label_prefix,
        }
    }
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl Config {
    /// The config bundled with the binary. Checked by `build.rs`.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("bundled default_config.toml is valid")
    }

    /// Load config from a TOML file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Like [`Config::load`], but a missing file yields the compiled defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::compiled_default());
        }
        Self::load(path)
    }

    pub fn issue_options(&self) -> IssueOptions {
        IssueOptions {
            min_level: self.issues.min_level,
            max_level: self.issues.max_level,
            label_prefix: self.issues.label_prefix.clone(),
        }
    }
}
