//! Dispatcher applying `EditCommand` to the engine state.
//!
//! Decomposed into focused sub-modules:
//! * `motion`   - point movement (never changes text)
//! * `edit`     - insertion, deletion, transpose, override toggle
//! * `kill`     - mark, region, kill ring
//! * `undo`     - history replay and correction groups
//! * `bookmark` - bookmark toggling and navigation
//! * `format`   - attributes and colors
//! * `search`   - incremental search
//!
//! Mutating commands are bracketed by `begin_edit` / `commit_edit` here, so a
//! handler only performs buffer operations and never touches the undo log
//! directly. A handler that returns an alert before mutating leaves no record.

use crate::{EditEngine, EngineError, Outcome};
use core_events::EditCommand;
use tracing::{debug, trace};

mod bookmark;
mod edit;
mod format;
mod kill;
mod motion;
pub(crate) mod search;
mod undo;

pub(crate) fn dispatch(
    engine: &mut EditEngine,
    command: EditCommand,
) -> Result<Outcome, EngineError> {
    if engine.search.is_some()
        && let Some(outcome) = search::handle_active(engine, command)
    {
        return Ok(outcome);
    }

    if !matches!(
        command,
        EditCommand::PreviousLine
            | EditCommand::NextLine
            | EditCommand::PageUp
            | EditCommand::PageDown
    ) {
        engine.state.goal_column = None;
    }
    if !matches!(command, EditCommand::Yank | EditCommand::CycleKillRing) {
        engine.state.last_yank = None;
    }

    trace!(target: "actions.dispatch", op = %command, point = engine.state.point(), "dispatch");
    let outcome = if command.is_mutating() {
        engine.state.begin_edit(label(command));
        let outcome = apply(engine, command);
        engine.state.commit_edit();
        outcome
    } else {
        apply(engine, command)
    };
    if let Ok(Outcome::Alert(alert)) = &outcome {
        debug!(target: "actions.dispatch", op = %command, ?alert, "alert");
    }
    outcome
}

fn apply(engine: &mut EditEngine, command: EditCommand) -> Result<Outcome, EngineError> {
    let page = engine.settings.page_lines;
    let state = &mut engine.state;
    let outcome = match command {
        EditCommand::InsertChar(ch) => edit::insert_char(state, ch),
        EditCommand::InsertNewline => edit::insert_newline(state),
        EditCommand::DeleteBackward => edit::delete_backward(state),
        EditCommand::DeleteForward => edit::delete_forward(state),
        EditCommand::Transpose => edit::transpose(state),
        EditCommand::ToggleOverride => edit::toggle_override(state),

        EditCommand::PreviousChar
        | EditCommand::NextChar
        | EditCommand::PreviousLine
        | EditCommand::NextLine
        | EditCommand::WordLeft
        | EditCommand::WordRight
        | EditCommand::LineStart
        | EditCommand::LineEnd
        | EditCommand::PageUp
        | EditCommand::PageDown
        | EditCommand::BufferStart
        | EditCommand::BufferEnd
        | EditCommand::Recenter => motion::handle_motion(command, state, page),

        EditCommand::SetMark => kill::set_mark(state),
        EditCommand::SwapPointMark => kill::swap_point_mark(state),
        EditCommand::Cancel => kill::cancel(state),
        EditCommand::Kill => {
            let consecutive = engine.last_command == Some(EditCommand::Kill);
            kill::kill(state, consecutive)
        }
        EditCommand::CutRegion => kill::cut_region(state),
        EditCommand::CopyRegion => kill::copy_region(state),
        EditCommand::Yank => kill::yank(state),
        EditCommand::CycleKillRing => kill::cycle_kill_ring(state),

        EditCommand::Undo => undo::handle_undo(state),
        EditCommand::ReverseUndoDirection => undo::reverse_direction(state),
        EditCommand::BeginCorrection => undo::begin_correction(state),
        EditCommand::EndCorrection => undo::end_correction(state),

        EditCommand::ToggleBookmark => bookmark::toggle(state),
        EditCommand::NextBookmark => bookmark::next(state),
        EditCommand::PreviousBookmark => bookmark::previous(state),

        EditCommand::ToggleAttribute(attr) => format::toggle_attribute(state, attr),
        EditCommand::CycleColor(layer) => format::cycle_color(state, layer),
        EditCommand::UnformatAll => format::unformat_all(state),

        EditCommand::Search => search::start(engine, true),
        EditCommand::ReverseSearch => search::start(engine, false),

        EditCommand::Save => {
            engine.save()?;
            Outcome::Saved
        }
        EditCommand::Exit => Outcome::Exit,
    };
    Ok(outcome)
}

/// Undo record label for a mutating command.
fn label(command: EditCommand) -> &'static str {
    match command {
        EditCommand::InsertChar(_) => "insert_char",
        EditCommand::InsertNewline => "insert_newline",
        EditCommand::DeleteBackward => "delete_backward",
        EditCommand::DeleteForward => "delete_forward",
        EditCommand::Transpose => "transpose",
        EditCommand::Kill => "kill",
        EditCommand::CutRegion => "cut_region",
        EditCommand::Yank => "yank",
        EditCommand::CycleKillRing => "cycle_kill_ring",
        EditCommand::ToggleAttribute(_) => "toggle_attribute",
        EditCommand::CycleColor(_) => "cycle_color",
        EditCommand::UnformatAll => "unformat_all",
        _ => "edit",
    }
}
