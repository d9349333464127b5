mod common;
use common::*;

use core_actions::{Alert, EditEngine, EngineSettings, Outcome};
use core_events::{Attributes, ColorLayer, EditCommand};
use core_state::Limits;
use pretty_assertions::assert_eq;

const TEXT: &str = "hello world\nsecond line";

struct Case {
    name: &'static str,
    setup: fn(&mut EditEngine),
    command: EditCommand,
}

fn cases() -> Vec<Case> {
    vec![
        Case {
            name: "insert_char",
            setup: |e| goto(e, 3),
            command: EditCommand::InsertChar('x'),
        },
        Case {
            name: "insert_char_override",
            setup: |e| {
                apply(e, EditCommand::ToggleOverride);
            },
            command: EditCommand::InsertChar('J'),
        },
        Case {
            name: "insert_newline",
            setup: |e| goto(e, 5),
            command: EditCommand::InsertNewline,
        },
        Case {
            name: "delete_backward",
            setup: |e| goto(e, 5),
            command: EditCommand::DeleteBackward,
        },
        Case {
            name: "delete_forward",
            setup: |_| {},
            command: EditCommand::DeleteForward,
        },
        Case {
            name: "transpose",
            setup: |e| goto(e, 2),
            command: EditCommand::Transpose,
        },
        Case {
            name: "kill_line",
            setup: |e| goto(e, 6),
            command: EditCommand::Kill,
        },
        Case {
            name: "kill_newline",
            setup: |e| goto(e, 11),
            command: EditCommand::Kill,
        },
        Case {
            name: "kill_region",
            setup: |e| select(e, 0, 5),
            command: EditCommand::Kill,
        },
        Case {
            name: "cut_region",
            setup: |e| select(e, 6, 11),
            command: EditCommand::CutRegion,
        },
        Case {
            name: "yank",
            setup: |e| {
                select(e, 0, 5);
                apply(e, EditCommand::CopyRegion);
                goto(e, 12);
            },
            command: EditCommand::Yank,
        },
        Case {
            name: "cycle_kill_ring",
            setup: |e| {
                select(e, 0, 5);
                apply(e, EditCommand::CopyRegion);
                select(e, 6, 11);
                apply(e, EditCommand::CopyRegion);
                apply(e, EditCommand::Cancel);
                goto(e, 12);
                apply(e, EditCommand::Yank);
            },
            command: EditCommand::CycleKillRing,
        },
        Case {
            name: "toggle_attribute",
            setup: |e| select(e, 0, 5),
            command: EditCommand::ToggleAttribute(Attributes::BOLD),
        },
        Case {
            name: "cycle_color",
            setup: |e| select(e, 6, 11),
            command: EditCommand::CycleColor(ColorLayer::Foreground),
        },
        Case {
            name: "unformat_region",
            setup: |e| {
                select(e, 0, 11);
                apply(e, EditCommand::ToggleAttribute(Attributes::DIM));
            },
            command: EditCommand::UnformatAll,
        },
        Case {
            name: "unformat_everything",
            setup: |e| {
                select(e, 0, 5);
                apply(e, EditCommand::ToggleAttribute(Attributes::REVERSE));
                apply(e, EditCommand::Cancel);
            },
            command: EditCommand::UnformatAll,
        },
    ]
}

#[test]
fn undo_reverts_every_mutating_command_kind() {
    for case in cases() {
        let mut fx = engine_with(TEXT);
        let e = &mut fx.engine;
        (case.setup)(e);
        let text_before = text(e);
        let runs_before = e.state().runs().clone();
        let point_before = point(e);

        assert_eq!(apply(e, case.command), Outcome::Applied, "{}", case.name);
        assert!(
            text(e) != text_before || *e.state().runs() != runs_before,
            "{} changed nothing",
            case.name
        );

        assert_eq!(apply(e, EditCommand::Undo), Outcome::Applied, "{}", case.name);
        assert_eq!(text(e), text_before, "{}", case.name);
        assert_eq!(*e.state().runs(), runs_before, "{}", case.name);
        assert_eq!(point(e), point_before, "{}", case.name);
    }
}

fn bookmarks(engine: &EditEngine) -> Vec<usize> {
    engine.state().bookmarks.iter().collect()
}

#[test]
fn undo_puts_bookmarks_back_where_they_were() {
    let mut fx = engine_with("abcdef");
    let e = &mut fx.engine;
    goto(e, 3);
    apply(e, EditCommand::ToggleBookmark);
    select(e, 1, 5);
    assert_eq!(apply(e, EditCommand::Kill), Outcome::Applied);
    assert_eq!(text(e), "af");
    assert_eq!(bookmarks(e), vec![1]);
    assert_eq!(apply(e, EditCommand::Undo), Outcome::Applied);
    assert_eq!(text(e), "abcdef");
    assert_eq!(bookmarks(e), vec![3]);

    let mut fx = engine_with("abcd");
    let e = &mut fx.engine;
    goto(e, 2);
    apply(e, EditCommand::ToggleBookmark);
    apply(e, EditCommand::Transpose);
    assert_eq!(text(e), "acbd");
    apply(e, EditCommand::Undo);
    assert_eq!(text(e), "abcd");
    assert_eq!(bookmarks(e), vec![2]);
}

#[test]
fn reversed_direction_replays_forward() {
    let mut fx = engine_with("");
    let e = &mut fx.engine;
    type_text(e, "abc");
    apply(e, EditCommand::Undo);
    apply(e, EditCommand::Undo);
    assert_eq!(text(e), "a");

    assert_eq!(apply(e, EditCommand::ReverseUndoDirection), Outcome::Applied);
    assert_eq!(apply(e, EditCommand::Undo), Outcome::Applied);
    assert_eq!(text(e), "ab");
    assert_eq!(apply(e, EditCommand::Undo), Outcome::Applied);
    assert_eq!(text(e), "abc");
    assert_eq!(
        apply(e, EditCommand::Undo),
        Outcome::Alert(Alert::NothingToRedo)
    );

    apply(e, EditCommand::ReverseUndoDirection);
    for _ in 0..3 {
        apply(e, EditCommand::Undo);
    }
    assert_eq!(text(e), "");
    assert_eq!(
        apply(e, EditCommand::Undo),
        Outcome::Alert(Alert::NothingToUndo)
    );
}

#[test]
fn direction_toggle_is_not_recorded() {
    let mut fx = engine_with("x");
    let e = &mut fx.engine;
    type_text(e, "y");
    apply(e, EditCommand::ReverseUndoDirection);
    apply(e, EditCommand::ReverseUndoDirection);
    apply(e, EditCommand::Undo);
    assert_eq!(text(e), "x");
}

#[test]
fn new_edit_after_undo_drops_the_redo_tail() {
    let mut fx = engine_with("");
    let e = &mut fx.engine;
    type_text(e, "ab");
    apply(e, EditCommand::Undo);
    type_text(e, "z");
    assert_eq!(text(e), "az");
    apply(e, EditCommand::ReverseUndoDirection);
    assert_eq!(
        apply(e, EditCommand::Undo),
        Outcome::Alert(Alert::NothingToRedo)
    );
}

#[test]
fn correction_groups_undo_as_one_step() {
    let mut fx = engine_with("draft");
    let e = &mut fx.engine;
    apply(e, EditCommand::BufferEnd);
    assert_eq!(apply(e, EditCommand::BeginCorrection), Outcome::Applied);
    type_text(e, " v2");
    apply(e, EditCommand::DeleteBackward);
    type_text(e, "3");
    assert_eq!(apply(e, EditCommand::EndCorrection), Outcome::Applied);
    assert_eq!(text(e), "draft v3");

    assert_eq!(apply(e, EditCommand::Undo), Outcome::Applied);
    assert_eq!(text(e), "draft");
    assert_eq!(point(e), 5);
    assert_eq!(
        apply(e, EditCommand::Undo),
        Outcome::Alert(Alert::NothingToUndo)
    );
}

#[test]
fn correction_markers_must_pair() {
    let mut fx = engine_with("text");
    let e = &mut fx.engine;
    assert_eq!(
        apply(e, EditCommand::EndCorrection),
        Outcome::Alert(Alert::NoOpenCorrection)
    );
    apply(e, EditCommand::BeginCorrection);
    assert_eq!(
        apply(e, EditCommand::BeginCorrection),
        Outcome::Alert(Alert::CorrectionAlreadyOpen)
    );
    type_text(e, "x");
    assert_eq!(
        apply(e, EditCommand::Undo),
        Outcome::Alert(Alert::CorrectionOpen)
    );
    assert_eq!(text(e), "xtext");
}

#[test]
fn history_depth_follows_undo_limit() {
    let settings = EngineSettings {
        limits: Limits {
            kill_ring_capacity: 60,
            undo_limit: 2,
        },
        page_lines: 18,
    };
    let mut fx = engine_with_settings("", settings);
    let e = &mut fx.engine;
    type_text(e, "abcd");
    assert_eq!(apply(e, EditCommand::Undo), Outcome::Applied);
    assert_eq!(apply(e, EditCommand::Undo), Outcome::Applied);
    assert_eq!(
        apply(e, EditCommand::Undo),
        Outcome::Alert(Alert::NothingToUndo)
    );
    assert_eq!(text(e), "ab");
}

#[test]
fn motions_leave_no_history() {
    let mut fx = engine_with("one two\nthree");
    let e = &mut fx.engine;
    apply_all(
        e,
        &[
            EditCommand::NextLine,
            EditCommand::WordRight,
            EditCommand::SetMark,
            EditCommand::BufferEnd,
            EditCommand::ToggleBookmark,
        ],
    );
    assert!(e.state().undo.is_empty());
    assert_eq!(
        apply(e, EditCommand::Undo),
        Outcome::Alert(Alert::NothingToUndo)
    );
}
