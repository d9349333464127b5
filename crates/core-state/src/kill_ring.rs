use std::collections::VecDeque;
use tracing::trace;

/// Bounded history of killed text, newest first.
///
/// `selected` indexes the entry the next yank inserts. Pushing resets it to
/// the newest entry; `rotate` steps towards older entries and wraps.
#[derive(Debug, Clone)]
pub struct KillRing {
    entries: VecDeque<String>,
    capacity: usize,
    selected: usize,
}

impl KillRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            selected: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        self.entries.push_front(text);
        if self.entries.len() > self.capacity {
            self.entries.pop_back();
            trace!(target: "state.kill_ring", capacity = self.capacity, "oldest_entry_dropped");
        }
        self.selected = 0;
    }

    /// Extend the newest entry (consecutive kills accumulate). `before` puts
    /// `text` in front of the existing entry.
    pub fn append(&mut self, text: &str, before: bool) {
        match self.entries.front_mut() {
            Some(front) if !text.is_empty() => {
                if before {
                    front.insert_str(0, text);
                } else {
                    front.push_str(text);
                }
                self.selected = 0;
            }
            Some(_) => {}
            None => self.push(text.to_string()),
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.selected).map(String::as_str)
    }

    /// Advance the selection to the next older entry, wrapping to the newest.
    pub fn rotate(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.selected = (self.selected + 1) % self.entries.len();
        self.current()
    }
}
