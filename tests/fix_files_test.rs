// SPDX-License-Identifier: AGPL-3.0-or-later
//! On-disk tests for the header fixer
//!
//! Exercises the read / fix / write cycle against real files:
//! - Guard insertion and renaming
//! - Opt-out markers leaving files byte-for-byte intact
//! - Idempotent reruns
//! - Failure isolation between files
//! - Directory walking and run modes

use anyhow::Result;
use guard_fixer::{CopyrightBanner, FileStatus, GuardFixer, RunMode};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Fixtures
// ============================================================================

fn fixer() -> GuardFixer {
    GuardFixer::new(CopyrightBanner::new("Acme Corp", "Acme <dev@acme.test>", 2024))
}

fn write(root: &Path, relative: &str, content: &str) -> Result<PathBuf> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    Ok(path)
}

fn set_mode(path: &Path, mode: u32) -> Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

const GUARDED_WITH_NOTICE: &str = "/*\n * Copyright 2020 Acme Corp\n */\n#ifndef FOO_BAR_H\n#define FOO_BAR_H\n\nint bar();\n\n#endif  // FOO_BAR_H\n";

// ============================================================================
// Single File Tests
// ============================================================================

#[test]
fn test_inserts_guard_and_banner() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write(dir.path(), "include/foo/bar.h", "int bar();\n")?;

    let report = fixer().fix_header_guard(&path, RunMode::Write);
    assert_eq!(report.status, FileStatus::Fixed);
    assert_eq!(report.expected_guard.as_deref(), Some("FOO_BAR_H"));

    let content = fs::read_to_string(&path)?;
    assert!(content.starts_with("/**\n * Copyright (C) 2024 Acme Corp\n"));
    assert!(content.ends_with("#ifndef FOO_BAR_H\n#define FOO_BAR_H\n\nint bar();\n\n#endif\n"));
    Ok(())
}

#[test]
fn test_renames_wrong_guard_in_place() -> Result<()> {
    let dir = TempDir::new()?;
    let original = GUARDED_WITH_NOTICE.replace("#ifndef FOO_BAR_H", "#ifndef OLD_GUARD");
    let path = write(dir.path(), "include/foo/bar.h", &original)?;

    let report = fixer().fix_header_guard(&path, RunMode::Write);
    assert_eq!(report.status, FileStatus::Fixed);
    assert_eq!(report.edits, vec!["renamed #ifndef OLD_GUARD on line 4"]);
    assert_eq!(fs::read_to_string(&path)?, GUARDED_WITH_NOTICE);
    Ok(())
}

#[test]
fn test_correct_file_is_not_rewritten() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write(dir.path(), "include/foo/bar.h", GUARDED_WITH_NOTICE)?;

    let report = fixer().fix_header_guard(&path, RunMode::Write);
    assert_eq!(report.status, FileStatus::Unchanged);
    assert_eq!(fs::read_to_string(&path)?, GUARDED_WITH_NOTICE);
    Ok(())
}

#[test]
fn test_second_run_is_noop() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write(dir.path(), "proj/src/widget.h", "#ifndef X\r\n#define X\r\nstruct W;\r\n#endif\r\n")?;

    assert_eq!(fixer().fix_header_guard(&path, RunMode::Write).status, FileStatus::Fixed);
    let once = fs::read_to_string(&path)?;
    assert!(once.contains("#ifndef PROJ_SRC_WIDGET_H\n#define PROJ_SRC_WIDGET_H\n"));
    assert!(!once.contains('\r'));

    assert_eq!(fixer().fix_header_guard(&path, RunMode::Write).status, FileStatus::Unchanged);
    assert_eq!(fs::read_to_string(&path)?, once);
    Ok(())
}

#[test]
fn test_pragma_once_untouched() -> Result<()> {
    let dir = TempDir::new()?;
    let content = "  #pragma once\r\nint x;";
    let path = write(dir.path(), "lib/x.h", content)?;

    assert_eq!(fixer().fix_header_guard(&path, RunMode::Write).status, FileStatus::Skipped);
    assert_eq!(fs::read(&path)?, content.as_bytes());
    Ok(())
}

#[test]
fn test_nolint_untouched() -> Result<()> {
    let dir = TempDir::new()?;
    let content = "// NOLINT(build/header_guard)\n#ifndef WRONG\n#define WRONG\n#endif\n";
    let path = write(dir.path(), "lib/x.h", content)?;

    assert_eq!(fixer().fix_header_guard(&path, RunMode::Write).status, FileStatus::Skipped);
    assert_eq!(fs::read_to_string(&path)?, content);
    Ok(())
}

#[test]
fn test_dry_run_does_not_write() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write(dir.path(), "lib/x.h", "int x;\n")?;

    let report = fixer().fix_header_guard(&path, RunMode::DryRun);
    assert_eq!(report.status, FileStatus::WouldFix);
    assert!(!report.edits.is_empty());
    assert_eq!(fs::read_to_string(&path)?, "int x;\n");
    Ok(())
}

#[test]
fn test_non_utf8_file_fails() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("bad.h");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x80])?;

    let report = fixer().fix_header_guard(&path, RunMode::Write);
    assert_eq!(report.status, FileStatus::Failed);
    assert!(report.message.starts_with("Error opening"));
    Ok(())
}

// ============================================================================
// Multiple Path Tests
// ============================================================================

#[test]
fn test_failure_does_not_stop_later_files() -> Result<()> {
    let dir = TempDir::new()?;
    let missing = dir.path().join("missing/gone.h");
    let good = write(dir.path(), "lib/good.h", "int good;\n")?;

    let reports = fixer().fix_paths(&[missing, good.clone()], RunMode::Write);
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].status, FileStatus::Failed);
    assert_eq!(reports[1].status, FileStatus::Fixed);
    assert!(fs::read_to_string(&good)?.contains("#ifndef LIB_GOOD_H"));
    Ok(())
}

#[test]
fn test_unwritable_file_fails_and_run_continues() -> Result<()> {
    let dir = TempDir::new()?;
    let locked = write(dir.path(), "lib/locked.h", "int locked;\n")?;
    let good = write(dir.path(), "lib/good.h", "int good;\n")?;
    set_mode(&locked, 0o444)?;

    // Permission bits do not bind a privileged user
    if fs::OpenOptions::new().write(true).open(&locked).is_ok() {
        return Ok(());
    }

    let reports = fixer().fix_paths(&[locked.clone(), good.clone()], RunMode::Write);
    assert_eq!(reports[0].status, FileStatus::Failed);
    assert!(reports[0].message.starts_with("Error writing"));
    assert_eq!(reports[1].status, FileStatus::Fixed);
    assert_eq!(fs::read_to_string(&locked)?, "int locked;\n");
    assert!(fs::read_to_string(&good)?.contains("#ifndef LIB_GOOD_H"));
    Ok(())
}

#[test]
fn test_unreadable_directory_reported_by_its_own_path() -> Result<()> {
    let dir = TempDir::new()?;
    write(dir.path(), "a/one.h", "int one;\n")?;
    write(dir.path(), "b/two.h", "int two;\n")?;
    let sealed = dir.path().join("a");
    set_mode(&sealed, 0o000)?;

    let readable = fs::read_dir(&sealed).is_ok();
    let reports = fixer().fix_paths(&[dir.path().to_path_buf()], RunMode::Check);
    set_mode(&sealed, 0o755)?;
    if readable {
        return Ok(());
    }

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].status, FileStatus::Failed);
    assert_eq!(reports[0].path, sealed.display().to_string());
    assert_eq!(reports[1].status, FileStatus::WouldFix);
    assert!(reports[1].path.ends_with("two.h"));
    Ok(())
}

#[test]
fn test_directory_walk_picks_headers_in_order() -> Result<()> {
    let dir = TempDir::new()?;
    write(dir.path(), "include/b.h", "int b;\n")?;
    write(dir.path(), "include/a.hpp", "int a;\n")?;
    write(dir.path(), "include/a.cc", "int c;\n")?;
    write(dir.path(), ".hidden/h.h", "int h;\n")?;

    let reports = fixer().fix_paths(&[dir.path().to_path_buf()], RunMode::Check);
    let names: Vec<&str> = reports
        .iter()
        .map(|r| r.path.rsplit('/').next().unwrap_or(""))
        .collect();
    assert_eq!(names, vec!["a.hpp", "b.h"]);
    assert!(reports.iter().all(|r| r.status == FileStatus::WouldFix));
    assert_eq!(reports[0].expected_guard.as_deref(), Some("A_HPP"));
    Ok(())
}

#[test]
fn test_explicit_file_ignores_extension_filter() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write(dir.path(), "lib/x.inc", "int x;\n")?;

    let reports = fixer().fix_paths(&[path], RunMode::Write);
    assert_eq!(reports[0].status, FileStatus::Fixed);
    assert_eq!(reports[0].expected_guard.as_deref(), Some("LIB_X_INC"));
    Ok(())
}
