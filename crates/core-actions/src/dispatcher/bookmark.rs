use crate::{Alert, Outcome};
use core_state::EditorState;

pub(crate) fn toggle(state: &mut EditorState) -> Outcome {
    let point = state.point();
    let added = state.bookmarks.toggle(point);
    tracing::trace!(target: "actions.dispatch", op = "toggle_bookmark", at = point, added, "bookmark");
    Outcome::Applied
}

pub(crate) fn next(state: &mut EditorState) -> Outcome {
    match state.bookmarks.next_after(state.point()) {
        Some(at) => {
            state.set_point(at);
            Outcome::Applied
        }
        None => Alert::NoBookmark.into(),
    }
}

pub(crate) fn previous(state: &mut EditorState) -> Outcome {
    match state.bookmarks.previous_before(state.point()) {
        Some(at) => {
            state.set_point(at);
            Outcome::Applied
        }
        None => Alert::NoBookmark.into(),
    }
}
