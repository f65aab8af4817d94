// SPDX-License-Identifier: AGPL-3.0-or-later
//! Include-guard derivation, detection and patching
//!
//! Everything here is a pure function over a path or a slice of lines, so the
//! rules can be tested without touching the filesystem.

use regex::Regex;
use std::fmt;
use std::path::{Component, Path};
use std::sync::LazyLock;

// Only the exact NOLINT(build/header_guard) form opts out. A bare NOLINT or
// NOLINT(*) silences a warning for a line that does not exist.
static NOLINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"//\s*NOLINT\(build/header_guard\)").expect("NOLINT pattern is valid")
});

static PRAGMA_ONCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#\s*pragma\s+once").expect("pragma once pattern is valid")
});

const IFNDEF: &str = "#ifndef";
const DEFINE: &str = "#define";

/// Returns true when the file opted out of guard enforcement, either with a
/// `// NOLINT(build/header_guard)` marker or a `#pragma once` directive.
pub fn should_skip<S: AsRef<str>>(lines: &[S]) -> bool {
    lines.iter().any(|line| {
        let line = line.as_ref();
        NOLINT_RE.is_match(line) || PRAGMA_ONCE_RE.is_match(line)
    })
}

/// Derive the include-guard token expected for `path`.
///
/// Components after the last `include` directory win; otherwise a header
/// sitting directly in a `src` directory uses grandparent/parent/file, and any
/// other header uses parent/file. `++` becomes `cpp`, separators become `_`,
/// and the result is uppercased.
pub fn expected_guard(path: impl AsRef<Path>) -> String {
    let components: Vec<String> = path
        .as_ref()
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let n = components.len();
    let directories = &components[..n.saturating_sub(1)];

    let selected = match directories.iter().rposition(|c| c == "include") {
        Some(idx) => &components[idx + 1..],
        None => {
            let parent_is_src = n >= 2 && components[n - 2] == "src";
            let take = if parent_is_src { 3 } else { 2 };
            &components[n.saturating_sub(take)..]
        }
    };

    selected
        .join("_")
        .replace("++", "cpp")
        .chars()
        .map(|c| match c {
            '/' | '.' | '-' => '_',
            other => other,
        })
        .collect::<String>()
        .to_uppercase()
}

/// A preprocessor directive found while scanning for the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub token: String,
    pub line: usize,
}

/// First `#ifndef` and first `#define` of a file, found independently
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardDeclarations {
    pub ifndef: Option<Directive>,
    pub define: Option<Directive>,
}

impl GuardDeclarations {
    /// Both directives present and both naming `expected`
    pub fn matches(&self, expected: &str) -> bool {
        let named = |d: &Option<Directive>| d.as_ref().is_some_and(|d| d.token == expected);
        named(&self.ifndef) && named(&self.define)
    }
}

/// Scan `lines` for the first `#ifndef` and the first `#define`.
///
/// Only the first word after the directive is the token, so `#define FOO_H 1`
/// yields `FOO_H`. Scanning stops as soon as both have been seen.
pub fn find_guard_declarations<S: AsRef<str>>(lines: &[S]) -> GuardDeclarations {
    let mut decl = GuardDeclarations::default();

    for (line, text) in lines.iter().enumerate() {
        let mut words = text.as_ref().split_whitespace();
        let (Some(directive), Some(token)) = (words.next(), words.next()) else {
            continue;
        };

        if decl.ifndef.is_none() && directive == IFNDEF {
            decl.ifndef = Some(Directive { token: token.to_string(), line });
        }
        if decl.define.is_none() && directive == DEFINE {
            decl.define = Some(Directive { token: token.to_string(), line });
        }
        if decl.ifndef.is_some() && decl.define.is_some() {
            break;
        }
    }

    decl
}

/// A change made by [`fix_guard`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardEdit {
    /// No guard existed; a full `#ifndef`/`#define`/`#endif` triple was added
    Inserted,
    RenamedIfndef { line: usize, from: String },
    RenamedDefine { line: usize, from: String },
    /// An `#ifndef` existed without any `#define`
    InsertedDefine { line: usize },
}

impl GuardEdit {
    /// Lines this edit added above the original first line
    pub fn lines_prepended(&self) -> usize {
        match self {
            GuardEdit::Inserted => 3,
            _ => 0,
        }
    }
}

impl fmt::Display for GuardEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardEdit::Inserted => write!(f, "inserted include guard"),
            GuardEdit::RenamedIfndef { line, from } => {
                write!(f, "renamed #ifndef {} on line {}", from, line + 1)
            }
            GuardEdit::RenamedDefine { line, from } => {
                write!(f, "renamed #define {} on line {}", from, line + 1)
            }
            GuardEdit::InsertedDefine { line } => write!(f, "inserted #define on line {}", line + 1),
        }
    }
}

/// Bring the guard in `lines` in line with `expected`.
///
/// Returns the edits made; an empty list means the guard was already correct.
/// The closing `#endif` of an existing guard is never touched.
pub fn fix_guard(lines: &mut Vec<String>, expected: &str, decl: &GuardDeclarations) -> Vec<GuardEdit> {
    let Some(ifndef) = &decl.ifndef else {
        lines.splice(
            0..0,
            [format!("{IFNDEF} {expected}"), format!("{DEFINE} {expected}"), String::new()],
        );
        // Keep the conventional trailing newline after #endif
        let tail = if lines.last().is_some_and(|l| l.is_empty()) {
            lines.len() - 1
        } else {
            lines.len()
        };
        lines.splice(tail..tail, [String::new(), "#endif".to_string()]);
        return vec![GuardEdit::Inserted];
    };

    if decl.matches(expected) {
        return Vec::new();
    }

    let mut edits = Vec::new();

    if ifndef.token != expected {
        if let Some(text) = lines.get_mut(ifndef.line) {
            *text = retoken(text, IFNDEF, expected);
            edits.push(GuardEdit::RenamedIfndef { line: ifndef.line, from: ifndef.token.clone() });
        }
    }

    match &decl.define {
        Some(define) if define.token != expected => {
            if let Some(text) = lines.get_mut(define.line) {
                *text = retoken(text, DEFINE, expected);
                edits.push(GuardEdit::RenamedDefine { line: define.line, from: define.token.clone() });
            }
        }
        Some(_) => {}
        None => {
            let line = (ifndef.line + 1).min(lines.len());
            lines.insert(line, format!("{DEFINE} {expected}"));
            edits.push(GuardEdit::InsertedDefine { line });
        }
    }

    edits
}

/// Replace the token following `directive`, keeping indentation and anything
/// after the token.
fn retoken(text: &str, directive: &str, token: &str) -> String {
    let body = text.trim_start();
    let indent = &text[..text.len() - body.len()];
    let after_directive = body.strip_prefix(directive).unwrap_or(body).trim_start();
    let token_end = after_directive
        .find(char::is_whitespace)
        .unwrap_or(after_directive.len());
    let tail = &after_directive[token_end..];
    format!("{indent}{directive} {token}{tail}")
}
