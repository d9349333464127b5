//! Mark, region and kill-ring commands.

use crate::{Alert, Outcome};
use core_state::EditorState;
use std::ops::Range;
use tracing::trace;

pub(crate) fn set_mark(state: &mut EditorState) -> Outcome {
    let point = state.point();
    state.set_mark(Some(point));
    trace!(target: "actions.dispatch", op = "set_mark", at = point, "mark");
    Outcome::Applied
}

pub(crate) fn cancel(state: &mut EditorState) -> Outcome {
    state.set_mark(None);
    Outcome::Applied
}

pub(crate) fn swap_point_mark(state: &mut EditorState) -> Outcome {
    let Some(mark) = state.mark() else {
        return Alert::NoMark.into();
    };
    let point = state.point();
    state.set_point(mark);
    state.set_mark(Some(point));
    Outcome::Applied
}

/// Kill the region when a mark is set, otherwise the rest of the line (or
/// the newline itself when point is already at the line end). Consecutive
/// line kills accumulate into one kill-ring entry.
pub(crate) fn kill(state: &mut EditorState, consecutive: bool) -> Outcome {
    if state.mark().is_some() {
        return cut_region(state);
    }
    let point = state.point();
    let buffer = state.buffer();
    if point >= buffer.len_chars() {
        return Alert::EndOfBuffer.into();
    }
    let line_end = buffer.line_end(buffer.line_of(point));
    let range = if point == line_end {
        point..point + 1
    } else {
        point..line_end
    };
    let text = state.remove(range.clone());
    if consecutive {
        state.kill_ring.append(&text, false);
    } else {
        state.kill_ring.push(text);
    }
    log_kill("kill_line", &range, consecutive);
    Outcome::Applied
}

pub(crate) fn cut_region(state: &mut EditorState) -> Outcome {
    let Some(range) = state.region() else {
        return Alert::NoMark.into();
    };
    state.set_mark(None);
    if range.is_empty() {
        return Alert::EmptyRegion.into();
    }
    let text = state.remove(range.clone());
    state.kill_ring.push(text);
    log_kill("cut_region", &range, false);
    Outcome::Applied
}

pub(crate) fn copy_region(state: &mut EditorState) -> Outcome {
    let Some(range) = state.region() else {
        return Alert::NoMark.into();
    };
    if range.is_empty() {
        return Alert::EmptyRegion.into();
    }
    let text = state.buffer().slice(range.clone());
    state.kill_ring.push(text);
    log_kill("copy_region", &range, false);
    Outcome::Applied
}

pub(crate) fn yank(state: &mut EditorState) -> Outcome {
    let Some(text) = state.kill_ring.current().map(str::to_string) else {
        return Alert::KillRingEmpty.into();
    };
    let start = state.point();
    state.insert_at_point(&text);
    state.last_yank = Some(start..state.point());
    trace!(target: "actions.dispatch", op = "yank", at = start, chars = state.point() - start, "kill_ring");
    Outcome::Applied
}

/// Replace the text inserted by the previous yank with the next older entry.
pub(crate) fn cycle_kill_ring(state: &mut EditorState) -> Outcome {
    let Some(span) = state.last_yank.clone() else {
        return Alert::NotAfterYank.into();
    };
    let Some(text) = state.kill_ring.rotate().map(str::to_string) else {
        return Alert::KillRingEmpty.into();
    };
    state.remove(span.clone());
    state.set_point(span.start);
    state.insert_at_point(&text);
    state.last_yank = Some(span.start..state.point());
    trace!(target: "actions.dispatch", op = "cycle_kill_ring", at = span.start, chars = text.chars().count(), "kill_ring");
    Outcome::Applied
}

fn log_kill(op: &'static str, range: &Range<usize>, appended: bool) {
    trace!(target: "actions.dispatch", op, start = range.start, chars = range.len(), appended, "kill_ring");
}
