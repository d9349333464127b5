//! Rope-based text buffer abstraction.
//!
//! Positions are char offsets into the whole text. Lines are separated by
//! `\n` only (ropey is built without its Unicode/CR line-break features) so a
//! `\r` stays ordinary content and the line model matches the on-disk one.

use ropey::Rope;
use std::ops::Range;

pub mod motion;

/// A text buffer backed by a `ropey::Rope`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn from_text(content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
        }
    }

    /// Join `lines` with `\n`. An empty slice yields an empty buffer.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut text = String::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(line.as_ref());
        }
        Self::from_text(&text)
    }

    /// Split the content on `\n`. Always returns at least one line.
    pub fn to_lines(&self) -> Vec<String> {
        self.text().split('\n').map(str::to_string).collect()
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn char_at(&self, idx: usize) -> Option<char> {
        (idx < self.rope.len_chars()).then(|| self.rope.char(idx))
    }

    /// Text in `range`, clamped to the buffer.
    pub fn slice(&self, range: Range<usize>) -> String {
        let range = self.clamp_range(range);
        self.rope.slice(range).to_string()
    }

    /// Insert `text` at char offset `at` (clamped to the end).
    pub fn insert(&mut self, at: usize, text: &str) {
        let at = at.min(self.rope.len_chars());
        self.rope.insert(at, text);
    }

    /// Remove `range` (clamped) and return the removed text.
    pub fn remove(&mut self, range: Range<usize>) -> String {
        let range = self.clamp_range(range);
        if range.is_empty() {
            return String::new();
        }
        let removed = self.rope.slice(range.clone()).to_string();
        self.rope.remove(range);
        removed
    }

    /// Number of lines (newline count + 1).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line containing char offset `idx`.
    pub fn line_of(&self, idx: usize) -> usize {
        self.rope.char_to_line(idx.min(self.rope.len_chars()))
    }

    /// Char offset of the first char of `line` (clamped to the last line).
    pub fn line_start(&self, line: usize) -> usize {
        let line = line.min(self.line_count().saturating_sub(1));
        self.rope.line_to_char(line)
    }

    /// Char offset of the `\n` ending `line`, or the buffer end on the last line.
    pub fn line_end(&self, line: usize) -> usize {
        let line = line.min(self.line_count().saturating_sub(1));
        if line + 1 < self.line_count() {
            self.rope.line_to_char(line + 1) - 1
        } else {
            self.rope.len_chars()
        }
    }

    /// Chars between the start of its line and `idx`.
    pub fn column(&self, idx: usize) -> usize {
        let idx = idx.min(self.rope.len_chars());
        idx - self.line_start(self.line_of(idx))
    }

    /// First occurrence of `needle` starting at or after `from`.
    pub fn find_forward(&self, needle: &str, from: usize) -> Option<usize> {
        if needle.is_empty() || from > self.rope.len_chars() {
            return None;
        }
        let text = self.text();
        let from_byte = self.rope.char_to_byte(from);
        text[from_byte..]
            .find(needle)
            .map(|b| self.rope.byte_to_char(from_byte + b))
    }

    /// Last occurrence of `needle` starting strictly before `before`.
    pub fn find_backward(&self, needle: &str, before: usize) -> Option<usize> {
        if needle.is_empty() || before == 0 {
            return None;
        }
        let len = self.rope.len_chars();
        let needle_chars = needle.chars().count();
        let end = (before - 1 + needle_chars).min(len);
        let text = self.text();
        let end_byte = self.rope.char_to_byte(end);
        text[..end_byte]
            .rfind(needle)
            .map(|b| self.rope.byte_to_char(b))
    }

    fn clamp_range(&self, range: Range<usize>) -> Range<usize> {
        let len = self.rope.len_chars();
        let end = range.end.min(len);
        range.start.min(end)..end
    }
}

impl From<&str> for Buffer {
    fn from(s: &str) -> Self {
        Self::from_text(s)
    }
}
