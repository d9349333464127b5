//! Attribute and color commands.
//!
//! With a non-empty region the run list is rewritten over the region (and
//! recorded for undo by the dispatcher). Without one the insertion style is
//! changed instead, except `UnformatAll` which then clears the whole buffer.

use crate::Outcome;
use core_events::{Attributes, ColorLayer};
use core_state::{EditorState, Style};
use std::ops::Range;

fn active_region(state: &EditorState) -> Option<Range<usize>> {
    state.region().filter(|r| !r.is_empty())
}

pub(crate) fn toggle_attribute(state: &mut EditorState, attr: Attributes) -> Outcome {
    match active_region(state) {
        Some(range) => {
            // Set everywhere unless every char already has it.
            let all_set = state
                .runs()
                .styles_in(range.clone())
                .all(|s| s.attrs.contains(attr));
            state.restyle(range.clone(), |s| Style {
                attrs: if all_set { s.attrs - attr } else { s.attrs | attr },
                ..s
            });
            tracing::trace!(target: "actions.dispatch", op = "toggle_attribute", attr = attr.bits(), start = range.start, chars = range.len(), set = !all_set, "format");
        }
        None => {
            state.insertion_style.attrs.toggle(attr);
            tracing::trace!(target: "actions.dispatch", op = "toggle_attribute", attr = attr.bits(), insertion = true, "format");
        }
    }
    Outcome::Applied
}

pub(crate) fn cycle_color(state: &mut EditorState, layer: ColorLayer) -> Outcome {
    match active_region(state) {
        Some(range) => {
            let current = state
                .runs()
                .style_at(range.start)
                .unwrap_or_default()
                .color(layer);
            let next = current.next();
            state.restyle(range, |s| s.with_color(layer, next));
            tracing::trace!(target: "actions.dispatch", op = "cycle_color", ?layer, color = ?next, "format");
        }
        None => {
            let next = state.insertion_style.color(layer).next();
            state.insertion_style = state.insertion_style.with_color(layer, next);
            tracing::trace!(target: "actions.dispatch", op = "cycle_color", ?layer, color = ?next, insertion = true, "format");
        }
    }
    Outcome::Applied
}

pub(crate) fn unformat_all(state: &mut EditorState) -> Outcome {
    match active_region(state) {
        Some(range) => state.restyle(range, |_| Style::default()),
        None => {
            state.reset_formatting();
            state.insertion_style = Style::default();
        }
    }
    Outcome::Applied
}
