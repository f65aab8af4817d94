// SPDX-License-Identifier: AGPL-3.0-or-later
//! guard-fixer: include-guard and copyright banner fixer for C/C++ headers
//!
//! This crate provides:
//! - Path-derived include-guard names (`guard::expected_guard`)
//! - Detection and in-place patching of `#ifndef` / `#define` guards
//! - Default copyright banner insertion
//! - A per-file driver that reads, fixes and writes back headers

pub mod banner;
pub mod config;
pub mod fixer;
pub mod guard;
pub mod source;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use banner::CopyrightBanner;
pub use config::Config;
pub use fixer::{FileReport, FileStatus, GuardFixer, RunMode};
pub use guard::{expected_guard, find_guard_declarations, fix_guard, should_skip, GuardDeclarations};
pub use source::SourceFile;

#[derive(Error, Debug)]
pub enum FixerError {
    #[error("Error opening {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl FixerError {
    /// The file or directory the error refers to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            FixerError::Read { path, .. } | FixerError::Write { path, .. } | FixerError::Walk { path, .. } => {
                Some(path.as_path())
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FixerError>;
