// SPDX-License-Identifier: AGPL-3.0-or-later
//! A source file held in memory as an ordered sequence of lines

use crate::{FixerError, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl SourceFile {
    /// Read `path` fully. Non-UTF-8 content counts as a read failure.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| FixerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(path, &text))
    }

    /// Split `text` on `\n` and drop a trailing `\r` from every line but the
    /// last split element.
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let last = lines.len().saturating_sub(1);
        for line in &mut lines[..last] {
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Self {
            path: path.into(),
            lines,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn write(&self) -> Result<()> {
        fs::write(&self.path, self.text()).map_err(|source| FixerError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
