use crate::bookmarks::Bookmarks;
use crate::format::RunList;
use std::collections::VecDeque;
use tracing::trace;

/// Default maximum number of records retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 1000;

/// One primitive text mutation, in the order it was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextChange {
    Inserted { at: usize, text: String },
    Removed { at: usize, text: String },
}

/// Editor position data captured around an edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub point: usize,
    pub mark: Option<usize>,
    pub runs: RunList,
    pub bookmarks: Bookmarks,
}

/// A reversible edit: the text changes plus the state on either side.
#[derive(Clone, Debug)]
pub struct EditRecord {
    pub label: &'static str,
    pub changes: Vec<TextChange>,
    pub before: Snapshot,
    pub after: Snapshot,
}

impl EditRecord {
    /// Fold `next` into this record (used by correction groups).
    fn absorb(&mut self, next: EditRecord) {
        self.changes.extend(next.changes);
        self.after = next.after;
    }
}

/// Which way `Undo` walks the history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UndoDirection {
    /// Revert the record before the replay cursor.
    #[default]
    Backward,
    /// Re-apply the record at the replay cursor.
    Forward,
}

impl UndoDirection {
    pub fn flipped(self) -> Self {
        match self {
            UndoDirection::Backward => UndoDirection::Forward,
            UndoDirection::Forward => UndoDirection::Backward,
        }
    }
}

/// Linear edit history with a replay cursor.
///
/// `records[..cursor]` are applied to the buffer, `records[cursor..]` have
/// been reverted and can be re-applied by walking forward. Recording a new
/// edit discards everything past the cursor.
pub struct UndoLog {
    records: VecDeque<EditRecord>,
    cursor: usize,
    direction: UndoDirection,
    limit: usize,
    group: Option<Option<EditRecord>>,
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new(UNDO_HISTORY_MAX)
    }
}

impl UndoLog {
    pub fn new(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            cursor: 0,
            direction: UndoDirection::Backward,
            limit: limit.max(1),
            group: None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn direction(&self) -> UndoDirection {
        self.direction
    }

    pub fn reverse_direction(&mut self) -> UndoDirection {
        self.direction = self.direction.flipped();
        trace!(target: "state.undo", direction = ?self.direction, "direction_reversed");
        self.direction
    }

    pub fn is_grouping(&self) -> bool {
        self.group.is_some()
    }

    /// Open a correction group. Returns false when one is already open.
    pub fn begin_group(&mut self) -> bool {
        if self.group.is_some() {
            return false;
        }
        self.group = Some(None);
        trace!(target: "state.undo", "group_opened");
        true
    }

    /// Close the open group, committing its edits as a single record.
    /// Returns false when no group was open.
    pub fn end_group(&mut self) -> bool {
        match self.group.take() {
            Some(collected) => {
                if let Some(record) = collected {
                    trace!(target: "state.undo", changes = record.changes.len(), "group_closed");
                    self.commit(record);
                } else {
                    trace!(target: "state.undo", "empty_group_closed");
                }
                true
            }
            None => false,
        }
    }

    /// Record a finished edit.
    pub fn push(&mut self, record: EditRecord) {
        match &mut self.group {
            Some(Some(open)) => open.absorb(record),
            Some(slot @ None) => *slot = Some(record),
            None => self.commit(record),
        }
    }

    fn commit(&mut self, record: EditRecord) {
        let discarded = self.records.len() - self.cursor;
        self.records.truncate(self.cursor);
        trace!(target: "state.undo", label = record.label, changes = record.changes.len(), discarded, "push_record");
        self.records.push_back(record);
        if self.records.len() > self.limit
            && let Some(oldest) = self.records.pop_front()
        {
            trace!(target: "state.undo", label = oldest.label, "undo_history_trimmed");
        }
        self.cursor = self.records.len();
        self.direction = UndoDirection::Backward;
    }

    /// Move the replay cursor one step in the current direction and return
    /// the record to replay, or `None` when history is exhausted that way.
    pub fn step(&mut self) -> Option<(EditRecord, UndoDirection)> {
        let record = match self.direction {
            UndoDirection::Backward => {
                if self.cursor == 0 {
                    return None;
                }
                self.cursor -= 1;
                self.records[self.cursor].clone()
            }
            UndoDirection::Forward => {
                let record = self.records.get(self.cursor)?.clone();
                self.cursor += 1;
                record
            }
        };
        trace!(target: "state.undo", cursor = self.cursor, depth = self.records.len(), direction = ?self.direction, label = record.label, "replay");
        Some((record, self.direction))
    }
}
