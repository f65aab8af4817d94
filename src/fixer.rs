// SPDX-License-Identifier: AGPL-3.0-or-later
//! Header fixer - applies guard and banner fixes to files on disk

use crate::banner::{ensure_copyright_banner, CopyrightBanner, COPYRIGHT_WINDOW_START};
use crate::config::{Config, WalkConfig};
use crate::guard::{expected_guard, find_guard_declarations, fix_guard, should_skip};
use crate::{FixerError, Result, SourceFile};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use walkdir::WalkDir;

/// What to do with a file that needs changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Write,
    /// Compute fixes without writing
    DryRun,
    /// Like `DryRun`; callers treat `WouldFix` as a failure
    Check,
}

impl RunMode {
    pub fn writes(self) -> bool {
        self == RunMode::Write
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Unchanged,
    Skipped,
    Fixed,
    WouldFix,
    Failed,
}

/// Result of processing one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub status: FileStatus,
    pub expected_guard: Option<String>,
    pub edits: Vec<String>,
    pub message: String,
}

impl FileReport {
    fn failed(path: &Path, err: &FixerError) -> Self {
        Self {
            path: path.display().to_string(),
            status: FileStatus::Failed,
            expected_guard: None,
            edits: Vec::new(),
            message: err.to_string(),
        }
    }
}

/// In-memory outcome of fixing a file's lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The file opted out of guard enforcement
    Skipped,
    Unchanged { expected_guard: String },
    Changed { expected_guard: String, edits: Vec<String> },
}

/// Applies the guard and banner rules to headers
pub struct GuardFixer {
    pub banner: CopyrightBanner,
    pub walk: WalkConfig,
}

impl GuardFixer {
    pub fn new(banner: CopyrightBanner) -> Self {
        Self {
            banner,
            walk: WalkConfig::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            banner: config.banner.to_banner(),
            walk: config.walk.clone(),
        }
    }

    /// Fix `lines` as the content of `path`, without any I/O
    pub fn fix_lines(&self, path: &Path, lines: &mut Vec<String>) -> Outcome {
        if should_skip(lines) {
            return Outcome::Skipped;
        }

        let expected = expected_guard(path);
        let decl = find_guard_declarations(lines);
        let guard_edits = fix_guard(lines, &expected, &decl);
        let prepended: usize = guard_edits.iter().map(|e| e.lines_prepended()).sum();
        let mut edits: Vec<String> = guard_edits.iter().map(ToString::to_string).collect();

        // Search the file's own first lines, not the guard just put above them
        let window_start = prepended.max(COPYRIGHT_WINDOW_START);
        if ensure_copyright_banner(lines, &self.banner, window_start) {
            edits.push("inserted copyright banner".to_string());
        }

        if edits.is_empty() {
            Outcome::Unchanged { expected_guard: expected }
        } else {
            Outcome::Changed { expected_guard: expected, edits }
        }
    }

    /// Read, fix and (in write mode) rewrite a single file
    pub fn fix_file(&self, path: &Path, mode: RunMode) -> Result<FileReport> {
        self.fix_source(SourceFile::read(path)?, mode)
    }

    /// Fix an already loaded file, writing it back to its path in write mode
    pub fn fix_source(&self, mut file: SourceFile, mode: RunMode) -> Result<FileReport> {
        let shown = file.path.display().to_string();

        let report = match self.fix_lines(&file.path, &mut file.lines) {
            Outcome::Skipped => {
                debug!("Skipping {}: guard check disabled in file", shown);
                FileReport {
                    path: shown,
                    status: FileStatus::Skipped,
                    expected_guard: None,
                    edits: Vec::new(),
                    message: "Guard check disabled in file".to_string(),
                }
            }
            Outcome::Unchanged { expected_guard } => {
                debug!("{} already guarded by {}", shown, expected_guard);
                FileReport {
                    path: shown,
                    status: FileStatus::Unchanged,
                    expected_guard: Some(expected_guard),
                    edits: Vec::new(),
                    message: "Already correct".to_string(),
                }
            }
            Outcome::Changed { expected_guard, edits } => {
                if mode.writes() {
                    file.write()?;
                    info!("Fixed {} ({})", shown, edits.join(", "));
                    FileReport {
                        path: shown,
                        status: FileStatus::Fixed,
                        expected_guard: Some(expected_guard),
                        edits,
                        message: "Fix applied".to_string(),
                    }
                } else {
                    debug!("{} needs fixing ({})", shown, edits.join(", "));
                    FileReport {
                        path: shown,
                        status: FileStatus::WouldFix,
                        expected_guard: Some(expected_guard),
                        edits,
                        message: "Would apply fix".to_string(),
                    }
                }
            }
        };

        Ok(report)
    }

    /// Process one file, turning any failure into a `Failed` report
    pub fn fix_header_guard(&self, path: &Path, mode: RunMode) -> FileReport {
        match self.fix_file(path, mode) {
            Ok(report) => report,
            Err(e) => {
                error!("{}", e);
                FileReport::failed(path, &e)
            }
        }
    }

    /// Process every path in order. Directories are walked for headers.
    pub fn fix_paths(&self, paths: &[PathBuf], mode: RunMode) -> Vec<FileReport> {
        let mut reports = Vec::new();

        for path in paths {
            if path.is_dir() {
                for target in self.collect_headers(path) {
                    match target {
                        Ok(header) => reports.push(self.fix_header_guard(&header, mode)),
                        Err(e) => {
                            error!("{}", e);
                            reports.push(FileReport::failed(e.path().unwrap_or(path.as_path()), &e));
                        }
                    }
                }
            } else {
                reports.push(self.fix_header_guard(path, mode));
            }
        }

        reports
    }

    /// Header files below `dir`, sorted by name within each directory
    pub fn collect_headers(&self, dir: &Path) -> Vec<Result<PathBuf>> {
        let include_hidden = self.walk.include_hidden;

        WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                include_hidden || e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.')
            })
            .filter_map(|entry| match entry {
                Ok(e) if e.file_type().is_file() && self.walk.is_header(e.path()) => {
                    Some(Ok(e.into_path()))
                }
                Ok(_) => None,
                Err(source) => Some(Err(FixerError::Walk {
                    path: source.path().unwrap_or(dir).to_path_buf(),
                    source,
                })),
            })
            .collect()
    }
}

impl Default for GuardFixer {
    fn default() -> Self {
        Self::new(CopyrightBanner::default())
    }
}
