//! Edit engine: applies decoded `EditCommand`s to the revised buffer.
//!
//! `EditEngine` owns the `EditorState` built from a document's revised
//! section together with the codec needed to write it back. `apply` is the
//! single entry point; user-level failures (no mark, nothing to undo, search
//! miss) come back as `Outcome::Alert` and never abort the session, while
//! I/O failures surface as `EngineError`.
//!
//! `session::Session` drives an engine from a byte source.

mod dispatcher;
pub mod io_ops;
pub mod session;

pub use session::{Session, SessionEnd, SessionObserver};

use core_codec::{CodecError, Document, DocumentCodec};
use core_config::Config;
use core_events::EditCommand;
use core_state::{EditorState, Limits};
use dispatcher::search::SearchState;
use thiserror::Error;

/// User-visible conditions that leave the document untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Alert {
    #[error("no mark set")]
    NoMark,
    #[error("region is empty")]
    EmptyRegion,
    #[error("beginning of buffer")]
    BeginningOfBuffer,
    #[error("end of buffer")]
    EndOfBuffer,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
    #[error("kill ring is empty")]
    KillRingEmpty,
    #[error("previous command was not a yank")]
    NotAfterYank,
    #[error("no bookmark in that direction")]
    NoBookmark,
    #[error("a correction is already open")]
    CorrectionAlreadyOpen,
    #[error("no correction is open")]
    NoOpenCorrection,
    #[error("close the open correction first")]
    CorrectionOpen,
    #[error("search failed")]
    SearchFailed,
    #[error("save failed")]
    SaveFailed,
}

/// Result of applying one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Alert(Alert),
    /// Request to redraw with point centered; the engine itself has no view.
    Recenter,
    Saved,
    Exit,
}

impl From<Alert> for Outcome {
    fn from(alert: Alert) -> Self {
        Outcome::Alert(alert)
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("saving the document failed")]
    Save(#[from] CodecError),
    #[error("reading terminal input failed")]
    Input(#[source] std::io::Error),
}

/// Engine tunables taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub limits: Limits,
    pub page_lines: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            page_lines: 18,
        }
    }
}

impl From<&Config> for EngineSettings {
    fn from(cfg: &Config) -> Self {
        let editing = &cfg.file.editing;
        Self {
            limits: Limits {
                kill_ring_capacity: editing.kill_ring_capacity,
                undo_limit: editing.undo_limit,
            },
            page_lines: editing.page_lines.max(1),
        }
    }
}

pub struct EditEngine {
    pub(crate) state: EditorState,
    pub(crate) document: Document,
    pub(crate) codec: DocumentCodec,
    pub(crate) settings: EngineSettings,
    pub(crate) last_command: Option<EditCommand>,
    pub(crate) search: Option<SearchState>,
    pub(crate) last_query: String,
}

impl EditEngine {
    /// Build an engine editing the revised section of `document`.
    pub fn new(document: Document, codec: DocumentCodec, settings: EngineSettings) -> Self {
        let lines = codec.extract_revised(&document);
        let state = EditorState::from_lines(&lines, settings.limits);
        tracing::debug!(target: "actions.dispatch", lines = lines.len(), chars = state.buffer().len_chars(), "engine_ready");
        Self {
            state,
            document,
            codec,
            settings,
            last_command: None,
            search: None,
            last_query: String::new(),
        }
    }

    /// Apply one command to the buffer.
    pub fn apply(&mut self, command: EditCommand) -> Result<Outcome, EngineError> {
        let outcome = dispatcher::dispatch(self, command);
        self.last_command = Some(command);
        outcome
    }

    /// Encode the buffer into the revised section and persist the document.
    pub fn save(&mut self) -> Result<(), EngineError> {
        io_ops::save_revised(&mut self.state, &self.codec, &mut self.document)?;
        Ok(())
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// True while an incremental search is collecting input.
    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    /// Current search query, if a search is active.
    pub fn search_query(&self) -> Option<&str> {
        self.search.as_ref().map(|s| s.query.as_str())
    }

    /// Current buffer as lines.
    pub fn lines(&self) -> Vec<String> {
        self.state.to_lines()
    }
}
