//! Incremental search.
//!
//! While a search is active, typed chars extend the query and move point to
//! the nearest match from where the search started; Backspace shortens it;
//! repeating Search/ReverseSearch jumps to the next match in that direction
//! (an empty query reuses the last one); Cancel returns point to the origin.
//! Newline ends the search in place. Any other command ends the search and is
//! then dispatched normally. Matching does not wrap around the buffer.

use crate::{Alert, EditEngine, Outcome};
use core_events::EditCommand;
use core_text::Buffer;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    pub(crate) forward: bool,
    pub(crate) query: String,
    /// Point when the search started.
    pub(crate) origin: usize,
    /// Start of the match point currently rests on.
    pub(crate) current: Option<usize>,
}

pub(crate) fn start(engine: &mut EditEngine, forward: bool) -> Outcome {
    let origin = engine.state.point();
    engine.search = Some(SearchState {
        forward,
        query: String::new(),
        origin,
        current: None,
    });
    debug!(target: "actions.dispatch", op = "search_start", forward, origin, "search");
    Outcome::Applied
}

/// Handle `command` while a search is active. `None` means the search has
/// ended and the command still has to be applied.
pub(crate) fn handle_active(engine: &mut EditEngine, command: EditCommand) -> Option<Outcome> {
    let mut search = engine.search.take()?;
    let outcome = match command {
        EditCommand::InsertChar(ch) => {
            search.query.push(ch);
            let anchor = search.current.unwrap_or(search.origin);
            Some(seek(engine, &mut search, anchor, true))
        }
        EditCommand::DeleteBackward => {
            search.query.pop();
            if search.query.is_empty() {
                search.current = None;
                engine.state.set_point(search.origin);
                Some(Outcome::Applied)
            } else {
                let origin = search.origin;
                Some(seek(engine, &mut search, origin, true))
            }
        }
        EditCommand::Search | EditCommand::ReverseSearch => {
            search.forward = command == EditCommand::Search;
            if search.query.is_empty() {
                search.query = engine.last_query.clone();
            }
            if search.query.is_empty() {
                Some(Outcome::Applied)
            } else {
                let anchor = search.current.unwrap_or(engine.state.point());
                Some(seek(engine, &mut search, anchor, false))
            }
        }
        EditCommand::Cancel => {
            engine.state.set_point(search.origin);
            debug!(target: "actions.dispatch", op = "search_cancel", "search");
            return Some(Outcome::Applied);
        }
        EditCommand::InsertNewline => {
            finish(engine, search);
            return Some(Outcome::Applied);
        }
        _ => {
            finish(engine, search);
            return None;
        }
    };
    engine.search = Some(search);
    outcome
}

/// Look for the query from `anchor`. `inclusive` accepts a match starting at
/// `anchor` itself (query refinement); otherwise the search moves past it.
fn seek(engine: &mut EditEngine, search: &mut SearchState, anchor: usize, inclusive: bool) -> Outcome {
    let found = find(engine.state.buffer(), &search.query, anchor, search.forward, inclusive);
    trace!(target: "actions.dispatch", op = "search_step", query_chars = search.query.chars().count(), forward = search.forward, found = found.is_some(), "search");
    match found {
        Some(at) => {
            search.current = Some(at);
            engine.state.set_point(at);
            Outcome::Applied
        }
        None => Alert::SearchFailed.into(),
    }
}

fn find(buffer: &Buffer, query: &str, anchor: usize, forward: bool, inclusive: bool) -> Option<usize> {
    match (forward, inclusive) {
        (true, true) => buffer.find_forward(query, anchor),
        (true, false) => buffer.find_forward(query, anchor + 1),
        (false, true) => buffer.find_backward(query, anchor + 1),
        (false, false) => buffer.find_backward(query, anchor),
    }
}

fn finish(engine: &mut EditEngine, search: SearchState) {
    if !search.query.is_empty() {
        engine.last_query = search.query;
    }
    debug!(target: "actions.dispatch", op = "search_end", at = engine.state.point(), "search");
}
