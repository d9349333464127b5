//! Core command types shared between the input decoder and the edit engine.
//!
//! The decoder never mutates editor state; it only produces values from the
//! closed `EditCommand` set below. Every user-visible editing operation has
//! exactly one variant here, which keeps the dispatcher a single exhaustive
//! `match` and lets tests assert on decoded commands structurally.

use smallvec::SmallVec;
use std::fmt;

bitflags::bitflags! {
    /// Binary character attributes carried by a formatting run.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Attributes: u8 {
        const BOLD     = 0b0000_0001;
        const DIM      = 0b0000_0010;
        const REVERSE  = 0b0000_0100;
        const EMPHASIS = 0b0000_1000;
    }
}

/// Which color slot a color command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorLayer {
    Foreground,
    Background,
}

/// Abstract editing command produced by the terminal decoder.
///
/// Variants that mutate text are recorded in the undo log by the engine;
/// motions, mark handling and bookmark navigation are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditCommand {
    // Insertion / deletion
    InsertChar(char),
    InsertNewline,
    DeleteBackward,
    DeleteForward,
    Transpose,
    ToggleOverride,
    // Motion
    PreviousChar,
    NextChar,
    PreviousLine,
    NextLine,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
    BufferStart,
    BufferEnd,
    Recenter,
    // Mark / region / kill ring
    SetMark,
    SwapPointMark,
    Cancel,
    Kill,
    CutRegion,
    CopyRegion,
    Yank,
    CycleKillRing,
    // History
    Undo,
    ReverseUndoDirection,
    BeginCorrection,
    EndCorrection,
    // Bookmarks
    ToggleBookmark,
    NextBookmark,
    PreviousBookmark,
    // Formatting
    ToggleAttribute(Attributes),
    CycleColor(ColorLayer),
    UnformatAll,
    // Search
    Search,
    ReverseSearch,
    // Session
    Save,
    Exit,
}

impl EditCommand {
    /// True for commands that can change buffer text or formatting.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            EditCommand::InsertChar(_)
                | EditCommand::InsertNewline
                | EditCommand::DeleteBackward
                | EditCommand::DeleteForward
                | EditCommand::Transpose
                | EditCommand::Kill
                | EditCommand::CutRegion
                | EditCommand::Yank
                | EditCommand::CycleKillRing
                | EditCommand::ToggleAttribute(_)
                | EditCommand::CycleColor(_)
                | EditCommand::UnformatAll
        )
    }
}

impl fmt::Display for EditCommand {
    /// Log-safe rendering: inserted characters are never printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditCommand::InsertChar(_) => f.write_str("InsertChar"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Result of decoding one complete input token.
///
/// `command` is applied first, then every entry of `follow_ups` in order.
/// Follow-ups let a single chord expand into a short fixed command sequence
/// without the decoder re-injecting synthetic bytes into its own input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub command: EditCommand,
    pub follow_ups: SmallVec<[EditCommand; 2]>,
}

impl Decoded {
    pub fn single(command: EditCommand) -> Self {
        Self {
            command,
            follow_ups: SmallVec::new(),
        }
    }

    pub fn with_follow_ups(
        command: EditCommand,
        follow_ups: impl IntoIterator<Item = EditCommand>,
    ) -> Self {
        Self {
            command,
            follow_ups: follow_ups.into_iter().collect(),
        }
    }

    /// All commands in application order.
    pub fn commands(&self) -> impl Iterator<Item = EditCommand> + '_ {
        std::iter::once(self.command).chain(self.follow_ups.iter().copied())
    }
}

impl From<EditCommand> for Decoded {
    fn from(command: EditCommand) -> Self {
        Decoded::single(command)
    }
}
