// SPDX-License-Identifier: AGPL-3.0-or-later
//! Output formatting for the guard-fixer CLI.
//!
//! Supports multiple output formats:
//! - Plain text (default, human-readable)
//! - JSON (machine-readable)

use anyhow::Result;
use guard_fixer::{FileReport, FileStatus};
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text output (human-readable)
    #[default]
    Plain,
    /// JSON output (machine-readable)
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" | "human" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}. Valid formats: plain, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Per-status counts for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files: usize,
    pub fixed: usize,
    pub would_fix: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Summary {
            files: reports.len(),
            ..Default::default()
        };
        for report in reports {
            match report.status {
                FileStatus::Fixed => summary.fixed += 1,
                FileStatus::WouldFix => summary.would_fix += 1,
                FileStatus::Unchanged => summary.unchanged += 1,
                FileStatus::Skipped => summary.skipped += 1,
                FileStatus::Failed => summary.failed += 1,
            }
        }
        summary
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files: {} fixed, {} would fix, {} unchanged, {} skipped, {} failed",
            self.files, self.fixed, self.would_fix, self.unchanged, self.skipped, self.failed
        )
    }
}

#[derive(Serialize)]
struct RunReport<'a> {
    files: &'a [FileReport],
    summary: Summary,
}

/// Output handler for run reports
#[derive(Debug, Clone)]
pub struct Outputter {
    format: OutputFormat,
    quiet: bool,
}

impl Outputter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Print the per-file results and the summary
    pub fn reports(&self, reports: &[FileReport]) -> Result<()> {
        let summary = Summary::from_reports(reports);

        match self.format {
            OutputFormat::Json => {
                let output = serde_json::to_string_pretty(&RunReport { files: reports, summary })?;
                println!("{}", output);
            }
            OutputFormat::Plain => {
                if self.quiet {
                    return Ok(());
                }
                for report in reports {
                    println!("{}", plain_line(report));
                    for edit in &report.edits {
                        println!("    {}", edit);
                    }
                }
                println!("\n{}", summary);
            }
        }
        Ok(())
    }
}

fn plain_line(report: &FileReport) -> String {
    let status = match report.status {
        FileStatus::Fixed => "✓ Fixed",
        FileStatus::WouldFix => "○ Would fix",
        FileStatus::Unchanged => "· Unchanged",
        FileStatus::Skipped => "- Skipped",
        FileStatus::Failed => "✗ Failed",
    };
    match (&report.status, &report.expected_guard) {
        (FileStatus::Failed, _) => format!("{} {}: {}", status, report.path, report.message),
        (_, Some(guard)) => format!("{} {} [{}]", status, report.path, guard),
        (_, None) => format!("{} {}", status, report.path),
    }
}
