//! Undo replay and correction grouping.
//!
//! Delegates to the record log inside `EditorState`. `Undo` walks one record
//! in the current direction; the direction toggle and the correction markers
//! themselves are never recorded.

use crate::{Alert, Outcome};
use core_state::{EditorState, UndoDirection};

pub(crate) fn handle_undo(state: &mut EditorState) -> Outcome {
    if state.undo.is_grouping() {
        return Alert::CorrectionOpen.into();
    }
    let before = state.buffer().len_chars();
    match state.undo_step() {
        Some(direction) => {
            let after = state.buffer().len_chars();
            tracing::trace!(target: "actions.dispatch", op = "undo", ?direction, chars_before = before, chars_after = after, "undo");
            Outcome::Applied
        }
        None => match state.undo.direction() {
            UndoDirection::Backward => Alert::NothingToUndo.into(),
            UndoDirection::Forward => Alert::NothingToRedo.into(),
        },
    }
}

pub(crate) fn reverse_direction(state: &mut EditorState) -> Outcome {
    state.undo.reverse_direction();
    Outcome::Applied
}

pub(crate) fn begin_correction(state: &mut EditorState) -> Outcome {
    if state.undo.begin_group() {
        Outcome::Applied
    } else {
        Alert::CorrectionAlreadyOpen.into()
    }
}

pub(crate) fn end_correction(state: &mut EditorState) -> Outcome {
    if state.undo.end_group() {
        Outcome::Applied
    } else {
        Alert::NoOpenCorrection.into()
    }
}
