use std::collections::BTreeSet;
use std::ops::Range;

/// Ordered set of bookmarked char offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bookmarks {
    marks: BTreeSet<usize>,
}

impl Bookmarks {
    /// Add a bookmark at `at`, or remove it when one is already there.
    /// Returns true when the bookmark now exists.
    pub fn toggle(&mut self, at: usize) -> bool {
        if self.marks.remove(&at) {
            false
        } else {
            self.marks.insert(at);
            true
        }
    }

    pub fn contains(&self, at: usize) -> bool {
        self.marks.contains(&at)
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.marks.iter().copied()
    }

    /// First bookmark strictly after `at`.
    pub fn next_after(&self, at: usize) -> Option<usize> {
        self.marks.range(at + 1..).next().copied()
    }

    /// Last bookmark strictly before `at`.
    pub fn previous_before(&self, at: usize) -> Option<usize> {
        self.marks.range(..at).next_back().copied()
    }

    /// `len` chars were inserted at `at`; later bookmarks move with their text.
    pub fn shift_for_insert(&mut self, at: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.marks = self
            .marks
            .iter()
            .map(|&b| shift_insert(b, at, len))
            .collect();
    }

    /// `range` was removed; bookmarks inside it collapse to its start.
    pub fn shift_for_remove(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        self.marks = self
            .marks
            .iter()
            .map(|&b| shift_remove(b, &range))
            .collect();
    }
}

/// Position of an offset after an insertion; an offset equal to `at` stays put.
pub fn shift_insert(offset: usize, at: usize, len: usize) -> usize {
    if offset > at { offset + len } else { offset }
}

/// Position of an offset after removing `range`.
pub fn shift_remove(offset: usize, range: &Range<usize>) -> usize {
    if offset >= range.end {
        offset - range.len()
    } else if offset > range.start {
        range.start
    } else {
        offset
    }
}
