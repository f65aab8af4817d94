// SPDX-License-Identifier: AGPL-3.0-or-later
//! Exit codes for the guard-fixer CLI.
//!
//! | Range | Category          | Description                                   |
//! |-------|-------------------|-----------------------------------------------|
//! | 0     | Success           | Run completed (per-file failures are logged)  |
//! | 1-9   | General errors    | Configuration and argument errors             |
//! | 10-19 | Check results     | `--check` found headers needing a fix         |
//! | 50-59 | Batch results     | `--strict` runs where some files failed       |

use guard_fixer::{FileReport, FileStatus, RunMode};

/// Operation completed successfully
pub const SUCCESS: i32 = 0;

/// General/unspecified error
pub const GENERAL_ERROR: i32 = 1;

/// Invalid command line arguments (clap's own exit code)
pub const INVALID_ARGUMENTS: i32 = 2;

/// Configuration file or environment error
pub const CONFIG_ERROR: i32 = 3;

/// `--check` found at least one header that would be rewritten
pub const GUARD_FINDINGS: i32 = 10;

/// Some files could not be read or written
pub const PARTIAL_FAILURE: i32 = 50;

/// Every file failed
pub const TOTAL_FAILURE: i32 = 51;

/// Get a human-readable description of an exit code
pub fn describe(code: i32) -> &'static str {
    match code {
        SUCCESS => "Success",
        GENERAL_ERROR => "General error",
        INVALID_ARGUMENTS => "Invalid command line arguments",
        CONFIG_ERROR => "Configuration error",
        GUARD_FINDINGS => "Headers need guard or banner fixes",
        PARTIAL_FAILURE => "Some files could not be processed",
        TOTAL_FAILURE => "No file could be processed",
        _ => "Unknown error",
    }
}

/// Exit code for a finished run.
///
/// Without `strict`, unreadable or unwritable files never change the exit
/// code; they are only reported.
pub fn for_run(reports: &[FileReport], mode: RunMode, strict: bool) -> i32 {
    let failed = reports.iter().filter(|r| r.status == FileStatus::Failed).count();
    let pending = reports.iter().filter(|r| r.status == FileStatus::WouldFix).count();

    if strict && failed > 0 {
        if failed == reports.len() {
            TOTAL_FAILURE
        } else {
            PARTIAL_FAILURE
        }
    } else if mode == RunMode::Check && pending > 0 {
        GUARD_FINDINGS
    } else {
        SUCCESS
    }
}
