//! Byte-at-a-time terminal input state machine.

use crate::tables::{self, CTRL_X, CURSOR_FINAL, META, NORMAL};
use core_events::{Decoded, EditCommand};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Longest CSI parameter run accepted before the sequence is abandoned.
pub const MAX_CSI_PARAMS: usize = 16;

const ESC: u8 = 0x1B;
const CTRL_O: u8 = 0x0F;
const CTRL_Q: u8 = 0x11;
const CTRL_X_BYTE: u8 = 0x18;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum State {
    #[default]
    Normal,
    AfterEsc,
    AfterEscEsc,
    InCsi {
        params: SmallVec<[u8; MAX_CSI_PARAMS]>,
    },
    AfterSs3,
    AfterCtrlX,
    AfterCtrlQ,
    Utf8 {
        buf: [u8; 4],
        len: u8,
        need: u8,
    },
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Normal => "normal",
            State::AfterEsc => "after_esc",
            State::AfterEscEsc => "after_esc_esc",
            State::InCsi { .. } => "csi",
            State::AfterSs3 => "ss3",
            State::AfterCtrlX => "after_ctrl_x",
            State::AfterCtrlQ => "after_ctrl_q",
            State::Utf8 { .. } => "utf8",
        }
    }
}

/// Turns raw terminal bytes into `EditCommand`s.
///
/// The decoder owns only its own sequence state; it never looks at editor
/// state. Unrecognized or malformed sequences are dropped and decoding
/// resumes with the next byte.
#[derive(Debug, Default)]
pub struct TerminalDecoder {
    state: State,
}

impl TerminalDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no partial sequence is buffered.
    pub fn is_idle(&self) -> bool {
        self.state == State::Normal
    }

    /// Feed one byte. Returns a command once a complete token has been seen.
    pub fn feed(&mut self, byte: u8) -> Option<Decoded> {
        match std::mem::take(&mut self.state) {
            State::Normal => self.normal(byte),
            State::AfterEsc => self.after_esc(byte),
            State::AfterEscEsc => match byte {
                b'[' => self.enter(State::InCsi {
                    params: SmallVec::new(),
                }),
                b'O' => self.enter(State::AfterSs3),
                _ => self.discard("after_esc_esc"),
            },
            State::InCsi { params } => self.in_csi(params, byte),
            State::AfterSs3 => match tables::lookup(CURSOR_FINAL, byte) {
                Some(cmd) => Some(cmd.into()),
                None => self.discard("ss3"),
            },
            State::AfterCtrlX => match tables::lookup(CTRL_X, byte) {
                Some(cmd) => Some(cmd.into()),
                None => self.discard("after_ctrl_x"),
            },
            State::AfterCtrlQ => {
                if byte < 0x80 {
                    Some(EditCommand::InsertChar(char::from(byte)).into())
                } else {
                    self.start_utf8(byte)
                }
            }
            State::Utf8 { buf, len, need } => self.continue_utf8(buf, len, need, byte),
        }
    }

    /// End of input: drop any partial sequence.
    pub fn finish(&mut self) {
        if !self.is_idle() {
            debug!(target: "input.decoder", state = self.state.name(), "partial_sequence_discarded");
            self.state = State::Normal;
        }
    }

    fn normal(&mut self, byte: u8) -> Option<Decoded> {
        match byte {
            ESC => self.enter(State::AfterEsc),
            CTRL_X_BYTE => self.enter(State::AfterCtrlX),
            CTRL_Q => self.enter(State::AfterCtrlQ),
            CTRL_O => Some(Decoded::with_follow_ups(
                EditCommand::InsertNewline,
                [EditCommand::PreviousChar],
            )),
            0x20..=0x7E => Some(EditCommand::InsertChar(char::from(byte)).into()),
            0x80..=0xFF => self.start_utf8(byte),
            _ => match tables::lookup(NORMAL, byte) {
                Some(cmd) => Some(cmd.into()),
                None => self.discard("normal"),
            },
        }
    }

    fn after_esc(&mut self, byte: u8) -> Option<Decoded> {
        match byte {
            b'[' => self.enter(State::InCsi {
                params: SmallVec::new(),
            }),
            ESC => self.enter(State::AfterEscEsc),
            b'O' => self.enter(State::AfterSs3),
            _ => match tables::lookup(META, byte) {
                Some(cmd) => Some(cmd.into()),
                None => self.discard("after_esc"),
            },
        }
    }

    fn in_csi(&mut self, mut params: SmallVec<[u8; MAX_CSI_PARAMS]>, byte: u8) -> Option<Decoded> {
        match byte {
            // parameter and intermediate bytes
            0x20..=0x3F => {
                if params.len() == MAX_CSI_PARAMS {
                    return self.discard("csi_overflow");
                }
                params.push(byte);
                self.enter(State::InCsi { params })
            }
            b'~' => match first_param(&params).and_then(tables::lookup_tilde) {
                Some(cmd) => Some(cmd.into()),
                None => self.discard("csi"),
            },
            0x40..=0x7D => match tables::lookup(CURSOR_FINAL, byte) {
                Some(cmd) => Some(cmd.into()),
                None => self.discard("csi"),
            },
            _ => {
                // A control byte cannot occur inside CSI; treat it as fresh input.
                trace!(target: "input.decoder", state = "csi", "sequence_interrupted");
                self.normal(byte)
            }
        }
    }

    fn start_utf8(&mut self, byte: u8) -> Option<Decoded> {
        let need = match byte {
            0xC2..=0xDF => 1,
            0xE0..=0xEF => 2,
            0xF0..=0xF4 => 3,
            _ => return self.discard("utf8_lead"),
        };
        let mut buf = [0u8; 4];
        buf[0] = byte;
        self.enter(State::Utf8 { buf, len: 1, need })
    }

    fn continue_utf8(&mut self, mut buf: [u8; 4], len: u8, need: u8, byte: u8) -> Option<Decoded> {
        if !(0x80..=0xBF).contains(&byte) {
            trace!(target: "input.decoder", state = "utf8", "sequence_interrupted");
            return self.normal(byte);
        }
        buf[len as usize] = byte;
        let len = len + 1;
        if len <= need {
            return self.enter(State::Utf8 { buf, len, need });
        }
        match std::str::from_utf8(&buf[..len as usize])
            .ok()
            .and_then(|s| s.chars().next())
        {
            Some(ch) => Some(EditCommand::InsertChar(ch).into()),
            None => self.discard("utf8_invalid"),
        }
    }

    fn enter(&mut self, state: State) -> Option<Decoded> {
        self.state = state;
        None
    }

    fn discard(&mut self, state: &'static str) -> Option<Decoded> {
        trace!(target: "input.decoder", state, "sequence_discarded");
        self.state = State::Normal;
        None
    }
}

/// First `;`-separated numeric parameter.
fn first_param(params: &[u8]) -> Option<u16> {
    let digits = params.split(|b| *b == b';').next()?;
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    digits
        .iter()
        .try_fold(0u16, |acc, d| acc.checked_mul(10)?.checked_add(u16::from(d - b'0')))
}
