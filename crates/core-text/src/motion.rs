//! Cursor motion helpers.
//!
//! These operate purely on a `Buffer` + char offset pair and are free of
//! editor state. Every motion clamps to `[0, len]`.

use crate::Buffer;

/// Character classes used by word motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharKind {
    Ident,
    Punc,
    Space,
}

impl CharKind {
    pub fn of(c: char) -> Self {
        if c.is_whitespace() {
            CharKind::Space
        } else if c == '_' || c.is_alphanumeric() {
            CharKind::Ident
        } else {
            CharKind::Punc
        }
    }

    /// Class at `idx`; positions outside the buffer count as space.
    fn at(buf: &Buffer, idx: usize) -> Self {
        buf.char_at(idx).map(Self::of).unwrap_or(CharKind::Space)
    }
}

fn at_word_start(left: CharKind, right: CharKind) -> bool {
    matches!(
        (left, right),
        (CharKind::Space, CharKind::Ident)
            | (CharKind::Space, CharKind::Punc)
            | (CharKind::Punc, CharKind::Ident)
            | (CharKind::Ident, CharKind::Punc)
    )
}

/// Move left one char.
pub fn left(_buf: &Buffer, point: &mut usize) {
    *point = point.saturating_sub(1);
}

/// Move right one char.
pub fn right(buf: &Buffer, point: &mut usize) {
    if *point < buf.len_chars() {
        *point += 1;
    }
}

/// Move to start of line.
pub fn line_start(buf: &Buffer, point: &mut usize) {
    *point = buf.line_start(buf.line_of(*point));
}

/// Move to end of line (before its newline).
pub fn line_end(buf: &Buffer, point: &mut usize) {
    *point = buf.line_end(buf.line_of(*point));
}

pub fn buffer_start(_buf: &Buffer, point: &mut usize) {
    *point = 0;
}

pub fn buffer_end(buf: &Buffer, point: &mut usize) {
    *point = buf.len_chars();
}

/// Move up `count` lines preserving a target column (sticky). Returns the updated sticky column.
/// Caller should keep the returned column across successive vertical motions. If `sticky_col`
/// is `None`, it is computed from the current position.
pub fn up(buf: &Buffer, point: &mut usize, count: usize, sticky_col: Option<usize>) -> Option<usize> {
    let line = buf.line_of(*point);
    let goal = sticky_col.unwrap_or_else(|| buf.column(*point));
    if line == 0 {
        return Some(goal);
    }
    *point = offset_for_column(buf, line.saturating_sub(count), goal);
    Some(goal)
}

/// Move down `count` lines preserving sticky column.
pub fn down(
    buf: &Buffer,
    point: &mut usize,
    count: usize,
    sticky_col: Option<usize>,
) -> Option<usize> {
    let line = buf.line_of(*point);
    let goal = sticky_col.unwrap_or_else(|| buf.column(*point));
    let last = buf.line_count() - 1;
    if line == last {
        return Some(goal);
    }
    *point = offset_for_column(buf, (line + count).min(last), goal);
    Some(goal)
}

/// Offset of column `col` on `line`, clamped to the line end.
fn offset_for_column(buf: &Buffer, line: usize, col: usize) -> usize {
    let start = buf.line_start(line);
    (start + col).min(buf.line_end(line))
}

/// Move to the start of the next word (identifier or punctuation run).
pub fn word_forward(buf: &Buffer, point: &mut usize) {
    let len = buf.len_chars();
    let mut idx = *point;
    while idx < len {
        idx += 1;
        if idx == len || at_word_start(CharKind::at(buf, idx - 1), CharKind::at(buf, idx)) {
            break;
        }
    }
    *point = idx;
}

/// Move to the start of the current or previous word.
pub fn word_backward(buf: &Buffer, point: &mut usize) {
    let mut idx = *point;
    while idx > 0 {
        idx -= 1;
        if idx == 0 || at_word_start(CharKind::at(buf, idx - 1), CharKind::at(buf, idx)) {
            break;
        }
    }
    *point = idx;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_motions_clamp() {
        let buf = Buffer::from_text("ab");
        let mut p = 0;
        left(&buf, &mut p);
        assert_eq!(p, 0);
        right(&buf, &mut p);
        right(&buf, &mut p);
        right(&buf, &mut p);
        assert_eq!(p, 2);
    }

    #[test]
    fn line_start_and_end() {
        let buf = Buffer::from_text("first\nsecond line\nthird");
        let mut p = 9;
        line_start(&buf, &mut p);
        assert_eq!(p, 6);
        line_end(&buf, &mut p);
        assert_eq!(p, 17);
        line_end(&buf, &mut p);
        assert_eq!(p, 17);
    }

    #[test]
    fn vertical_motion_keeps_goal_column() {
        let buf = Buffer::from_text("long line here\nab\nanother long one");
        let mut p = 10;
        let sticky = down(&buf, &mut p, 1, None);
        assert_eq!(sticky, Some(10));
        assert_eq!(p, 17); // end of "ab"
        let sticky = down(&buf, &mut p, 1, sticky);
        assert_eq!(p, 18 + 10);
        let sticky = up(&buf, &mut p, 2, sticky);
        assert_eq!(p, 10);
        assert_eq!(sticky, Some(10));
    }

    #[test]
    fn vertical_motion_stops_at_edges() {
        let buf = Buffer::from_text("one\ntwo");
        let mut p = 1;
        up(&buf, &mut p, 1, None);
        assert_eq!(p, 1);
        down(&buf, &mut p, 5, None);
        assert_eq!(p, 5);
        down(&buf, &mut p, 1, None);
        assert_eq!(p, 5);
    }

    #[test]
    fn word_motion_uses_char_classes() {
        let buf = Buffer::from_text("foo_bar.baz  qux");
        let mut p = 0;
        word_forward(&buf, &mut p);
        assert_eq!(p, 7); // '.'
        word_forward(&buf, &mut p);
        assert_eq!(p, 8); // "baz"
        word_forward(&buf, &mut p);
        assert_eq!(p, 13); // "qux"
        word_forward(&buf, &mut p);
        assert_eq!(p, 16);
        word_backward(&buf, &mut p);
        assert_eq!(p, 13);
        word_backward(&buf, &mut p);
        assert_eq!(p, 8);
        word_backward(&buf, &mut p);
        assert_eq!(p, 7);
        word_backward(&buf, &mut p);
        assert_eq!(p, 0);
    }

    #[test]
    fn word_motion_crosses_newlines() {
        let buf = Buffer::from_text("end\n  start");
        let mut p = 1;
        word_forward(&buf, &mut p);
        assert_eq!(p, 6);
        word_backward(&buf, &mut p);
        assert_eq!(p, 0);
    }
}
