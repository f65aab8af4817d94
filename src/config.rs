// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration handling for guard-fixer.
//!
//! Supports loading configuration from:
//! - An explicit file (`--config`)
//! - Project-local files (.guard-fixer.toml, .guard-fixer.yaml, .guard-fixer.json)
//! - Environment variables (GUARD_FIXER_*)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::banner::{self, CopyrightBanner};
use crate::{FixerError, Result};

pub const LOCAL_CONFIG_FILES: &[&str] = &[".guard-fixer.toml", ".guard-fixer.yaml", ".guard-fixer.json"];

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub banner: BannerConfig,
    pub walk: WalkConfig,
    pub output: OutputConfig,
}

/// Copyright banner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    pub organization: String,
    pub contact: String,
    /// Year stamped into new banners; the current year when unset
    pub year: Option<i32>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            organization: banner::DEFAULT_ORGANIZATION.to_string(),
            contact: banner::DEFAULT_CONTACT.to_string(),
            year: None,
        }
    }
}

impl BannerConfig {
    pub fn to_banner(&self) -> CopyrightBanner {
        CopyrightBanner::new(
            self.organization.clone(),
            self.contact.clone(),
            self.year.unwrap_or_else(banner::current_year),
        )
    }
}

/// Directory traversal settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Header extensions picked up when a directory is given
    pub extensions: Vec<String>,

    /// Descend into hidden directories
    pub include_hidden: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["h".to_string(), "hh".to_string(), "hpp".to_string(), "hxx".to_string()],
            include_hidden: false,
        }
    }
}

impl WalkConfig {
    /// Whether `path` has one of the configured header extensions
    pub fn is_header(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|want| want == ext))
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (plain, json)
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "plain".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `explicit`, or from the first project-local
    /// file found, then apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if explicit.is_none() {
            for filename in LOCAL_CONFIG_FILES {
                let local_config = PathBuf::from(filename);
                if local_config.exists() {
                    config = Config::from_file(&local_config)?;
                    debug!("Loaded config from: {}", local_config.display());
                    break;
                }
            }
        }

        config.apply_env_vars()
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| FixerError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "toml" => Ok(toml::from_str(&content)?),
            "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
            "json" => Ok(serde_json::from_str(&content)?),
            _ => {
                // Try TOML first, then YAML
                if let Ok(config) = toml::from_str(&content) {
                    return Ok(config);
                }
                Ok(serde_yaml::from_str(&content)?)
            }
        }
    }

    /// Apply environment variables
    pub fn apply_env_vars(self) -> Result<Self> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up through `var`
    pub fn apply_vars<F>(mut self, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // GUARD_FIXER_ORGANIZATION
        if let Some(organization) = var("GUARD_FIXER_ORGANIZATION") {
            self.banner.organization = organization;
        }

        // GUARD_FIXER_CONTACT
        if let Some(contact) = var("GUARD_FIXER_CONTACT") {
            self.banner.contact = contact;
        }

        // GUARD_FIXER_YEAR
        if let Some(year) = var("GUARD_FIXER_YEAR") {
            let year = year
                .trim()
                .parse()
                .map_err(|_| FixerError::Config(format!("GUARD_FIXER_YEAR is not a year: {}", year)))?;
            self.banner.year = Some(year);
        }

        // GUARD_FIXER_OUTPUT
        if let Some(format) = var("GUARD_FIXER_OUTPUT") {
            self.output.format = format;
        }

        Ok(self)
    }
}
