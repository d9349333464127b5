//! Motion sub-dispatch (point movement).
//!
//! Pure point movement: no text changes, no history. Vertical motions keep
//! `goal_column` so moving through a short line does not lose the column.
//! Character motions alert when they hit either end of the buffer.

use crate::{Alert, Outcome};
use core_events::EditCommand;
use core_state::EditorState;
use core_text::{Buffer, motion};

pub(crate) fn handle_motion(command: EditCommand, state: &mut EditorState, page: usize) -> Outcome {
    let before = state.point();
    let outcome: Outcome = match command {
        EditCommand::PreviousChar if before == 0 => Alert::BeginningOfBuffer.into(),
        EditCommand::NextChar if before == state.buffer().len_chars() => {
            Alert::EndOfBuffer.into()
        }
        EditCommand::PreviousChar => horizontal(state, motion::left),
        EditCommand::NextChar => horizontal(state, motion::right),
        EditCommand::WordLeft => horizontal(state, motion::word_backward),
        EditCommand::WordRight => horizontal(state, motion::word_forward),
        EditCommand::LineStart => horizontal(state, motion::line_start),
        EditCommand::LineEnd => horizontal(state, motion::line_end),
        EditCommand::BufferStart => horizontal(state, motion::buffer_start),
        EditCommand::BufferEnd => horizontal(state, motion::buffer_end),
        EditCommand::PreviousLine => vertical(state, 1, motion::up),
        EditCommand::NextLine => vertical(state, 1, motion::down),
        EditCommand::PageUp => vertical(state, page, motion::up),
        EditCommand::PageDown => vertical(state, page, motion::down),
        EditCommand::Recenter => Outcome::Recenter,
        _ => Outcome::Applied,
    };
    tracing::trace!(target: "actions.dispatch", op = "motion", kind = %command, from = before, to = state.point(), "motion");
    outcome
}

fn horizontal(state: &mut EditorState, f: fn(&Buffer, &mut usize)) -> Outcome {
    let mut point = state.point();
    f(state.buffer(), &mut point);
    state.set_point(point);
    Outcome::Applied
}

fn vertical(
    state: &mut EditorState,
    count: usize,
    f: fn(&Buffer, &mut usize, usize, Option<usize>) -> Option<usize>,
) -> Outcome {
    let mut point = state.point();
    let goal = f(state.buffer(), &mut point, count, state.goal_column);
    state.set_point(point);
    state.goal_column = goal;
    Outcome::Applied
}
