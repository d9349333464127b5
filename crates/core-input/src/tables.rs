//! Byte → command lookup tables for each decoder state.

use core_events::{Attributes, ColorLayer, EditCommand as C};

pub(crate) type Table = &'static [(u8, C)];

/// Single-byte bindings in the normal state. Ctrl-O, Ctrl-Q, Ctrl-X and ESC
/// are prefixes or expansions and are handled by the decoder itself.
pub(crate) const NORMAL: Table = &[
    (0x00, C::SetMark),
    (0x01, C::LineStart),
    (0x02, C::PreviousChar),
    (0x04, C::DeleteForward),
    (0x05, C::LineEnd),
    (0x06, C::NextChar),
    (0x07, C::Cancel),
    (0x08, C::DeleteBackward),
    (0x09, C::InsertChar('\t')),
    (0x0A, C::InsertNewline),
    (0x0B, C::Kill),
    (0x0C, C::Recenter),
    (0x0D, C::InsertNewline),
    (0x0E, C::NextLine),
    (0x10, C::PreviousLine),
    (0x12, C::ReverseSearch),
    (0x13, C::Search),
    (0x14, C::Transpose),
    (0x16, C::PageDown),
    (0x17, C::CutRegion),
    (0x19, C::Yank),
    (0x1A, C::Undo),
    (0x1F, C::Undo),
    (0x7F, C::DeleteBackward),
];

/// Bindings after a lone ESC (meta chords).
pub(crate) const META: Table = &[
    (b'b', C::WordLeft),
    (b'B', C::WordLeft),
    (b'f', C::WordRight),
    (b'F', C::WordRight),
    (b'n', C::NextBookmark),
    (b'N', C::NextBookmark),
    (b'p', C::PreviousBookmark),
    (b'P', C::PreviousBookmark),
    (b'u', C::ReverseUndoDirection),
    (b'U', C::ReverseUndoDirection),
    (b'w', C::CopyRegion),
    (b'W', C::CopyRegion),
    (b'y', C::CycleKillRing),
    (b'Y', C::CycleKillRing),
    (b'v', C::PageUp),
    (b'V', C::PageUp),
    (b'<', C::BufferStart),
    (b'>', C::BufferEnd),
    (b'0', C::UnformatAll),
    (b'1', C::ToggleAttribute(Attributes::BOLD)),
    (b'2', C::ToggleAttribute(Attributes::DIM)),
    (b'3', C::ToggleAttribute(Attributes::EMPHASIS)),
    (b'4', C::ToggleAttribute(Attributes::REVERSE)),
    (b'5', C::CycleColor(ColorLayer::Foreground)),
    (b'6', C::CycleColor(ColorLayer::Background)),
];

/// Bindings after Ctrl-X.
pub(crate) const CTRL_X: Table = &[
    (0x18, C::SwapPointMark),
    (0x13, C::Save),
    (0x03, C::Exit),
    (b'(', C::BeginCorrection),
    (b')', C::EndCorrection),
    (0x02, C::ToggleBookmark),
    (b'b', C::ToggleBookmark),
];

/// Final bytes shared by CSI (any parameters) and SS3.
pub(crate) const CURSOR_FINAL: Table = &[
    (b'A', C::PreviousLine),
    (b'B', C::NextLine),
    (b'C', C::NextChar),
    (b'D', C::PreviousChar),
    (b'H', C::LineStart),
    (b'F', C::LineEnd),
];

/// `ESC [ <n> ~` keys, keyed by the first numeric parameter. 7 and 8 are
/// the rxvt Home/End codes.
pub(crate) const TILDE_KEYS: &[(u16, C)] = &[
    (1, C::ToggleOverride),
    (2, C::LineStart),
    (3, C::LineEnd),
    (4, C::DeleteForward),
    (5, C::PageUp),
    (6, C::PageDown),
    (7, C::LineStart),
    (8, C::LineEnd),
];

pub(crate) fn lookup(table: Table, byte: u8) -> Option<C> {
    table.iter().find(|(b, _)| *b == byte).map(|(_, c)| *c)
}

pub(crate) fn lookup_tilde(code: u16) -> Option<C> {
    TILDE_KEYS.iter().find(|(n, _)| *n == code).map(|(_, c)| *c)
}
