//! Per-line escaping of the two reserved characters.
//!
//! `.` is reserved at the start of a stored line (the sentinel is a lone dot)
//! and ESC is reserved anywhere (a lone ESC is structural). Content
//! occurrences are doubled on the way out and collapsed on the way in.

use std::borrow::Cow;

pub const ESC: char = '\u{1b}';
pub const DOT: char = '.';
/// Boundary line between the original and revised sections.
pub const SENTINEL: &str = ".";

/// Double every ESC in `line`.
pub fn escape_esc(line: &str) -> Cow<'_, str> {
    if !line.contains(ESC) {
        return Cow::Borrowed(line);
    }
    let mut out = String::with_capacity(line.len() + 4);
    for c in line.chars() {
        out.push(c);
        if c == ESC {
            out.push(ESC);
        }
    }
    Cow::Owned(out)
}

/// Prefix one `.` when the stored fragment would otherwise start with `.`.
pub fn escape_dot(fragment: &str) -> Cow<'_, str> {
    if fragment.starts_with(DOT) {
        let mut out = String::with_capacity(fragment.len() + 1);
        out.push(DOT);
        out.push_str(fragment);
        Cow::Owned(out)
    } else {
        Cow::Borrowed(fragment)
    }
}

/// Remove exactly one leading `.` if present.
pub fn strip_dot(stored: &str) -> &str {
    stored.strip_prefix(DOT).unwrap_or(stored)
}

pub fn is_sentinel(line: &str) -> bool {
    line == SENTINEL
}

/// A stored fragment with ESC escaping undone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unescaped {
    pub text: String,
    /// The fragment ended in the wrap marker; the next stored line continues it.
    pub continued: bool,
}

/// Collapse `ESC ESC` into one ESC and drop lone ESCs.
///
/// A lone ESC in final position is the wrap marker and is reported through
/// `continued` instead of appearing in the text.
pub fn unescape_esc(stored: &str) -> Unescaped {
    let mut text = String::with_capacity(stored.len());
    let mut continued = false;
    let mut chars = stored.chars().peekable();
    while let Some(c) = chars.next() {
        if c != ESC {
            text.push(c);
            continue;
        }
        match chars.peek() {
            Some(&ESC) => {
                chars.next();
                text.push(ESC);
            }
            Some(_) => {}
            None => continued = true,
        }
    }
    Unescaped { text, continued }
}
