//! Character formatting as a run-length list over the buffer.

use core_events::{Attributes, ColorLayer};
use std::ops::Range;

/// Number of indexed color slots besides `Color::Default`.
pub const COLOR_SLOTS: u8 = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Color {
    #[default]
    Default,
    Indexed(u8),
}

impl Color {
    /// Default → 0 → 1 → … → 7 → Default.
    pub fn next(self) -> Self {
        match self {
            Color::Default => Color::Indexed(0),
            Color::Indexed(n) if n + 1 < COLOR_SLOTS => Color::Indexed(n + 1),
            Color::Indexed(_) => Color::Default,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub attrs: Attributes,
    pub fg: Color,
    pub bg: Color,
}

impl Style {
    pub fn is_plain(&self) -> bool {
        *self == Style::default()
    }

    pub fn color(&self, layer: ColorLayer) -> Color {
        match layer {
            ColorLayer::Foreground => self.fg,
            ColorLayer::Background => self.bg,
        }
    }

    pub fn with_color(mut self, layer: ColorLayer, color: Color) -> Self {
        match layer {
            ColorLayer::Foreground => self.fg = color,
            ColorLayer::Background => self.bg = color,
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub len: usize,
    pub style: Style,
}

/// Partition of `[0, len)` into styled runs.
///
/// Invariants: run lengths are non-zero and sum to the text length; adjacent
/// runs have different styles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunList {
    runs: Vec<Run>,
}

impl RunList {
    /// A single plain run covering `len` chars.
    pub fn plain(len: usize) -> Self {
        let mut list = Self::default();
        if len > 0 {
            list.runs.push(Run {
                len,
                style: Style::default(),
            });
        }
        list
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.iter().map(|r| r.len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// True when no char carries any formatting.
    pub fn is_plain(&self) -> bool {
        self.runs.iter().all(|r| r.style.is_plain())
    }

    /// Style of the char at `idx`, if any.
    pub fn style_at(&self, idx: usize) -> Option<Style> {
        let mut start = 0;
        for run in &self.runs {
            if idx < start + run.len {
                return Some(run.style);
            }
            start += run.len;
        }
        None
    }

    /// Styles of every char in `range`.
    pub fn styles_in(&self, range: Range<usize>) -> impl Iterator<Item = Style> + '_ {
        range.filter_map(|i| self.style_at(i))
    }

    /// Account for `len` chars inserted at `at` with `style`.
    pub fn insert(&mut self, at: usize, len: usize, style: Style) {
        if len == 0 {
            return;
        }
        let idx = self.split_at(at);
        self.runs.insert(idx, Run { len, style });
        self.normalize();
    }

    /// Account for the chars in `range` being removed.
    pub fn remove(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        self.runs.drain(first..last);
        self.normalize();
    }

    /// Rewrite the style of every char in `range`.
    pub fn apply(&mut self, range: Range<usize>, f: impl Fn(Style) -> Style) {
        if range.is_empty() {
            return;
        }
        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        for run in &mut self.runs[first..last] {
            run.style = f(run.style);
        }
        self.normalize();
    }

    /// Make sure a run boundary exists at `offset` and return the index of the
    /// run starting there (or `runs.len()` at the end).
    fn split_at(&mut self, offset: usize) -> usize {
        let mut start = 0;
        for i in 0..self.runs.len() {
            let run = self.runs[i];
            if offset == start {
                return i;
            }
            if offset < start + run.len {
                let head = offset - start;
                self.runs[i].len = head;
                self.runs.insert(
                    i + 1,
                    Run {
                        len: run.len - head,
                        style: run.style,
                    },
                );
                return i + 1;
            }
            start += run.len;
        }
        self.runs.len()
    }

    fn normalize(&mut self) {
        self.runs.retain(|r| r.len > 0);
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.style == run.style => prev.len += run.len,
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}
