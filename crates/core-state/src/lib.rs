//! Editor state: buffer, point and mark, kill ring, undo log, bookmarks and
//! formatting runs.
//!
//! Edit recording:
//! - Every mutating command is bracketed by `begin_edit` / `commit_edit`. The
//!   primitive mutators (`insert`, `remove`, `restyle`, `reset_formatting`)
//!   append `TextChange`s to the open edit; `commit_edit` turns them into one
//!   `EditRecord` holding the changes plus point, mark and run list on either
//!   side.
//! - Mutators called without an open edit still change the buffer but leave
//!   no history; undo replay uses this path.
//! - A correction group (see `undo::UndoLog::begin_group`) folds every record
//!   committed while it is open into a single record.
//!
//! Offsets:
//! - Point, mark and bookmarks are char offsets. Insertion at an offset
//!   strictly before them shifts them right; removal collapses offsets inside
//!   the removed range onto its start.
//! - Formatting runs always cover exactly `buffer.len_chars()` chars.
//!
//! Telemetry:
//! - History lifecycle emits trace events under `state.undo` (`push_record`,
//!   `replay`, `group_opened`, trims and direction changes).

use core_text::Buffer;
use std::ops::Range;
use tracing::trace;

pub mod bookmarks;
pub mod format;
pub mod kill_ring;
pub mod undo;

pub use bookmarks::Bookmarks;
pub use format::{COLOR_SLOTS, Color, Run, RunList, Style};
pub use kill_ring::KillRing;
pub use undo::{EditRecord, Snapshot, TextChange, UNDO_HISTORY_MAX, UndoDirection, UndoLog};

use bookmarks::{shift_insert, shift_remove};

/// Sizes for the bounded histories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub kill_ring_capacity: usize,
    pub undo_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            kill_ring_capacity: 60,
            undo_limit: UNDO_HISTORY_MAX,
        }
    }
}

/// An edit being collected between `begin_edit` and `commit_edit`.
#[derive(Debug)]
struct PendingEdit {
    label: &'static str,
    before: Snapshot,
    changes: Vec<TextChange>,
}

pub struct EditorState {
    buffer: Buffer,
    runs: RunList,
    point: usize,
    mark: Option<usize>,
    pub kill_ring: KillRing,
    pub undo: UndoLog,
    pub bookmarks: Bookmarks,
    /// Style given to newly inserted text.
    pub insertion_style: Style,
    /// Typed chars replace the char at point instead of being inserted.
    pub override_mode: bool,
    /// Column kept across consecutive vertical motions.
    pub goal_column: Option<usize>,
    /// Span of the most recent yank, for kill-ring cycling.
    pub last_yank: Option<Range<usize>>,
    pending: Option<PendingEdit>,
    dirty: bool,
}

impl EditorState {
    pub fn new(buffer: Buffer, limits: Limits) -> Self {
        let runs = RunList::plain(buffer.len_chars());
        Self {
            buffer,
            runs,
            point: 0,
            mark: None,
            kill_ring: KillRing::new(limits.kill_ring_capacity),
            undo: UndoLog::new(limits.undo_limit),
            bookmarks: Bookmarks::default(),
            insertion_style: Style::default(),
            override_mode: false,
            goal_column: None,
            last_yank: None,
            pending: None,
            dirty: false,
        }
    }

    pub fn from_lines<S: AsRef<str>>(lines: &[S], limits: Limits) -> Self {
        Self::new(Buffer::from_lines(lines), limits)
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn runs(&self) -> &RunList {
        &self.runs
    }

    pub fn to_lines(&self) -> Vec<String> {
        self.buffer.to_lines()
    }

    pub fn point(&self) -> usize {
        self.point
    }

    /// Move point, clamped to the buffer.
    pub fn set_point(&mut self, point: usize) {
        self.point = point.min(self.buffer.len_chars());
    }

    pub fn mark(&self) -> Option<usize> {
        self.mark
    }

    pub fn set_mark(&mut self, mark: Option<usize>) {
        self.mark = mark.map(|m| m.min(self.buffer.len_chars()));
    }

    /// Half-open range between point and mark, when a mark is set.
    pub fn region(&self) -> Option<Range<usize>> {
        self.mark
            .map(|m| self.point.min(m)..self.point.max(m))
    }

    /// True when the buffer changed since load or the last `mark_saved`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            point: self.point,
            mark: self.mark,
            runs: self.runs.clone(),
            bookmarks: self.bookmarks.clone(),
        }
    }

    /// Start collecting changes for one undoable edit.
    pub fn begin_edit(&mut self, label: &'static str) {
        if let Some(stale) = self.pending.take() {
            trace!(target: "state.undo", label = stale.label, "pending_edit_replaced");
        }
        self.pending = Some(PendingEdit {
            label,
            before: self.snapshot(),
            changes: Vec::new(),
        });
    }

    /// Finish the open edit. Returns true when something was recorded.
    pub fn commit_edit(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        let after = self.snapshot();
        if pending.changes.is_empty() && pending.before.runs == after.runs {
            return false;
        }
        self.undo.push(EditRecord {
            label: pending.label,
            changes: pending.changes,
            before: pending.before,
            after,
        });
        self.dirty = true;
        true
    }

    /// Insert `text` at `at` with the insertion style.
    pub fn insert(&mut self, at: usize, text: &str) {
        let style = self.insertion_style;
        self.insert_styled(at, text, style);
    }

    fn insert_styled(&mut self, at: usize, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        let at = at.min(self.buffer.len_chars());
        let len = text.chars().count();
        self.buffer.insert(at, text);
        self.runs.insert(at, len, style);
        self.point = shift_insert(self.point, at, len);
        self.mark = self.mark.map(|m| shift_insert(m, at, len));
        self.bookmarks.shift_for_insert(at, len);
        if let Some(pending) = &mut self.pending {
            pending.changes.push(TextChange::Inserted {
                at,
                text: text.to_string(),
            });
        }
    }

    /// Insert at point and move point past the new text.
    pub fn insert_at_point(&mut self, text: &str) {
        let at = self.point;
        self.insert(at, text);
        self.point = at + text.chars().count();
    }

    /// Remove `range` and return the removed text.
    pub fn remove(&mut self, range: Range<usize>) -> String {
        let len = self.buffer.len_chars();
        let range = range.start.min(len)..range.end.min(len);
        if range.is_empty() {
            return String::new();
        }
        let removed = self.buffer.remove(range.clone());
        self.runs.remove(range.clone());
        self.point = shift_remove(self.point, &range);
        self.mark = self.mark.map(|m| shift_remove(m, &range));
        self.bookmarks.shift_for_remove(range.clone());
        if let Some(pending) = &mut self.pending {
            pending.changes.push(TextChange::Removed {
                at: range.start,
                text: removed.clone(),
            });
        }
        removed
    }

    /// Rewrite the style of `range`.
    pub fn restyle(&mut self, range: Range<usize>, f: impl Fn(Style) -> Style) {
        let len = self.buffer.len_chars();
        self.runs.apply(range.start.min(len)..range.end.min(len), f);
    }

    /// Drop every attribute and color from the whole buffer.
    pub fn reset_formatting(&mut self) {
        self.runs = RunList::plain(self.buffer.len_chars());
    }

    /// Replay one history step in the current undo direction.
    ///
    /// Returns the direction used, or `None` when there is nothing to replay.
    pub fn undo_step(&mut self) -> Option<UndoDirection> {
        let (record, direction) = self.undo.step()?;
        self.pending = None;
        match direction {
            UndoDirection::Backward => {
                for change in record.changes.iter().rev() {
                    self.revert(change);
                }
                self.restore(record.before);
            }
            UndoDirection::Forward => {
                for change in &record.changes {
                    self.reapply(change);
                }
                self.restore(record.after);
            }
        }
        self.last_yank = None;
        self.goal_column = None;
        self.dirty = true;
        Some(direction)
    }

    fn revert(&mut self, change: &TextChange) {
        match change {
            TextChange::Inserted { at, text } => {
                self.remove(*at..*at + text.chars().count());
            }
            TextChange::Removed { at, text } => self.insert_styled(*at, text, Style::default()),
        }
    }

    fn reapply(&mut self, change: &TextChange) {
        match change {
            TextChange::Inserted { at, text } => self.insert_styled(*at, text, Style::default()),
            TextChange::Removed { at, text } => {
                self.remove(*at..*at + text.chars().count());
            }
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        debug_assert_eq!(snapshot.runs.len(), self.buffer.len_chars());
        self.runs = snapshot.runs;
        self.set_point(snapshot.point);
        self.set_mark(snapshot.mark);
        self.bookmarks = snapshot.bookmarks;
    }
}
