//! Text edit handling (insert/delete/newline/transpose).
//!
//! Responsible for mutating buffer contents via `EditorState` primitives; the
//! surrounding dispatcher records the undo entry.

use crate::{Alert, Outcome};
use core_state::EditorState;

pub(crate) fn insert_char(state: &mut EditorState, ch: char) -> Outcome {
    let point = state.point();
    if state.override_mode
        && let Some(existing) = state.buffer().char_at(point)
        && existing != '\n'
    {
        state.remove(point..point + 1);
    }
    let mut buf = [0u8; 4];
    state.insert_at_point(ch.encode_utf8(&mut buf));
    tracing::trace!(target: "actions.dispatch", op = "insert_char", at = point, overwrite = state.override_mode, "edit");
    Outcome::Applied
}

pub(crate) fn insert_newline(state: &mut EditorState) -> Outcome {
    let point = state.point();
    state.insert_at_point("\n");
    tracing::trace!(target: "actions.dispatch", op = "insert_newline", at = point, "edit");
    Outcome::Applied
}

pub(crate) fn delete_backward(state: &mut EditorState) -> Outcome {
    let point = state.point();
    if point == 0 {
        return Alert::BeginningOfBuffer.into();
    }
    state.remove(point - 1..point);
    tracing::trace!(target: "actions.dispatch", op = "delete_backward", at = point, "edit");
    Outcome::Applied
}

pub(crate) fn delete_forward(state: &mut EditorState) -> Outcome {
    let point = state.point();
    if point >= state.buffer().len_chars() {
        return Alert::EndOfBuffer.into();
    }
    state.remove(point..point + 1);
    tracing::trace!(target: "actions.dispatch", op = "delete_forward", at = point, "edit");
    Outcome::Applied
}

/// Swap the chars on either side of point and move past them. At the end
/// of the buffer the two chars before point are swapped instead.
pub(crate) fn transpose(state: &mut EditorState) -> Outcome {
    let len = state.buffer().len_chars();
    let point = state.point();
    let right = if point == len { point.saturating_sub(1) } else { point };
    if right == 0 || len < 2 {
        return Alert::BeginningOfBuffer.into();
    }
    let left = right - 1;
    let style_left = state.runs().style_at(left).unwrap_or_default();
    let style_right = state.runs().style_at(right).unwrap_or_default();
    let pair: Vec<char> = state.remove(left..right + 1).chars().collect();
    let swapped: String = [pair[1], pair[0]].iter().collect();
    state.insert(left, &swapped);
    state.restyle(left..left + 1, |_| style_right);
    state.restyle(right..right + 1, |_| style_left);
    state.set_point(right + 1);
    tracing::trace!(target: "actions.dispatch", op = "transpose", at = left, "edit");
    Outcome::Applied
}

pub(crate) fn toggle_override(state: &mut EditorState) -> Outcome {
    state.override_mode = !state.override_mode;
    tracing::debug!(target: "actions.dispatch", op = "toggle_override", enabled = state.override_mode, "mode");
    Outcome::Applied
}
