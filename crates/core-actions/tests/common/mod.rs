#![allow(dead_code)] // Shared across many integration tests; each test binary uses a subset of helpers.

use core_actions::{Alert, EditEngine, EngineSettings, Outcome, SessionObserver};
use core_codec::DocumentCodec;
use core_events::EditCommand;
use core_input::TerminalDecoder;
use std::path::PathBuf;

/// An engine editing a freshly initialized temporary document.
pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub path: PathBuf,
    pub engine: EditEngine,
}

pub fn engine_with(text: &str) -> Fixture {
    engine_with_settings(text, EngineSettings::default())
}

pub fn engine_with_settings(text: &str, settings: EngineSettings) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    std::fs::write(&path, text).unwrap();
    let codec = DocumentCodec::default();
    let doc = codec.load(&path).unwrap();
    let engine = EditEngine::new(doc, codec, settings);
    Fixture { dir, path, engine }
}

pub fn apply(engine: &mut EditEngine, command: EditCommand) -> Outcome {
    engine.apply(command).unwrap()
}

pub fn apply_all(engine: &mut EditEngine, commands: &[EditCommand]) -> Vec<Outcome> {
    commands.iter().map(|c| apply(engine, *c)).collect()
}

pub fn type_text(engine: &mut EditEngine, text: &str) {
    for ch in text.chars() {
        let command = if ch == '\n' {
            EditCommand::InsertNewline
        } else {
            EditCommand::InsertChar(ch)
        };
        assert_eq!(apply(engine, command), Outcome::Applied);
    }
}

/// Decode `bytes` and apply every resulting command.
pub fn feed(engine: &mut EditEngine, bytes: &[u8]) -> Vec<Outcome> {
    let mut decoder = TerminalDecoder::new();
    let mut outcomes = Vec::new();
    for byte in bytes {
        if let Some(decoded) = decoder.feed(*byte) {
            for command in decoded.commands() {
                outcomes.push(apply(engine, command));
            }
        }
    }
    outcomes
}

pub fn text(engine: &EditEngine) -> String {
    engine.state().buffer().text()
}

pub fn point(engine: &EditEngine) -> usize {
    engine.state().point()
}

pub fn goto(engine: &mut EditEngine, offset: usize) {
    engine.state_mut().set_point(offset);
}

/// Select `start..end` with the mark at `start` and point at `end`.
pub fn select(engine: &mut EditEngine, start: usize, end: usize) {
    goto(engine, start);
    assert_eq!(apply(engine, EditCommand::SetMark), Outcome::Applied);
    goto(engine, end);
}

/// Observer recording everything the session reports.
#[derive(Default)]
pub struct Recorder {
    pub alerts: Vec<Alert>,
    pub saves: usize,
    pub recenters: usize,
}

impl SessionObserver for Recorder {
    fn on_alert(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }

    fn on_saved(&mut self) {
        self.saves += 1;
    }

    fn on_recenter(&mut self) {
        self.recenters += 1;
    }
}
