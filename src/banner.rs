// SPDX-License-Identifier: AGPL-3.0-or-later
//! Copyright banner detection and insertion

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Number of lines searched for an existing copyright notice
pub const COPYRIGHT_WINDOW: usize = 10;

/// Default window start. Index 0 is skipped: it may be a guard line.
pub const COPYRIGHT_WINDOW_START: usize = 1;

pub const DEFAULT_ORGANIZATION: &str = "Swift Navigation Inc.";
pub const DEFAULT_CONTACT: &str = "Swift Navigation <dev@swiftnav.com>";

const LICENSE_TEXT: &[&str] = &[
    "This source is subject to the license found in the file 'LICENSE' which must",
    "be distributed together with this source. All other rights reserved.",
    "",
    "THIS CODE AND INFORMATION IS PROVIDED \"AS IS\" WITHOUT WARRANTY OF ANY KIND,",
    "EITHER EXPRESSED OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE IMPLIED",
    "WARRANTIES OF MERCHANTABILITY AND/OR FITNESS FOR A PARTICULAR PURPOSE.",
];

/// Boilerplate block comment prepended to headers lacking a notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyrightBanner {
    pub organization: String,
    pub contact: String,
    pub year: i32,
}

impl CopyrightBanner {
    pub fn new(organization: impl Into<String>, contact: impl Into<String>, year: i32) -> Self {
        Self {
            organization: organization.into(),
            contact: contact.into(),
            year,
        }
    }

    /// Banner lines, from the opening `/**` to the closing ` */`
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![
            "/**".to_string(),
            format!(" * Copyright (C) {} {}", self.year, self.organization),
            format!(" * Contact: {}", self.contact),
            " *".to_string(),
        ];
        out.extend(LICENSE_TEXT.iter().map(|text| {
            if text.is_empty() {
                " *".to_string()
            } else {
                format!(" * {}", text)
            }
        }));
        out.push(" */".to_string());
        out
    }
}

impl Default for CopyrightBanner {
    fn default() -> Self {
        Self::new(DEFAULT_ORGANIZATION, DEFAULT_CONTACT, current_year())
    }
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Whether the ten lines from `start` mention "copyright" in any case
pub fn has_copyright<S: AsRef<str>>(lines: &[S], start: usize) -> bool {
    lines
        .iter()
        .skip(start)
        .take(COPYRIGHT_WINDOW)
        .any(|line| line.as_ref().to_lowercase().contains("copyright"))
}

/// Prepend `banner` unless a notice is already present in the window starting
/// at `start`. Returns true if the banner was inserted.
///
/// Callers that just prepended a guard pass the number of lines they added,
/// so the window still covers the file's own first ten lines.
pub fn ensure_copyright_banner(lines: &mut Vec<String>, banner: &CopyrightBanner, start: usize) -> bool {
    if has_copyright(lines, start) {
        return false;
    }
    lines.splice(0..0, banner.lines());
    true
}
