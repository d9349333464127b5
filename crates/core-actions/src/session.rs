//! Interactive loop: bytes in, commands applied, alerts out.

use crate::{Alert, EditEngine, EngineError, Outcome};
use core_input::ByteDecoder;
use std::io::Read;
use tracing::{debug, error, info};

/// Receives user-visible side effects of the session.
pub trait SessionObserver {
    fn on_alert(&mut self, _alert: Alert) {}
    fn on_saved(&mut self) {}
    fn on_recenter(&mut self) {}
}

/// Observer that ignores everything.
impl SessionObserver for () {}

/// Why `Session::run` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Exit,
    EndOfInput,
}

pub struct Session {
    engine: EditEngine,
    save_on_exit: bool,
    commands: u64,
}

impl Session {
    pub fn new(engine: EditEngine, save_on_exit: bool) -> Self {
        Self {
            engine,
            save_on_exit,
            commands: 0,
        }
    }

    pub fn engine(&self) -> &EditEngine {
        &self.engine
    }

    /// Decode `reader` and apply every command until Exit or end of input.
    ///
    /// A failed save is logged and reported as `Alert::SaveFailed`; the
    /// session continues. Input errors end the session.
    pub fn run<R: Read, O: SessionObserver>(
        &mut self,
        reader: R,
        observer: &mut O,
    ) -> Result<SessionEnd, EngineError> {
        info!(target: "runtime", save_on_exit = self.save_on_exit, "session_start");
        let mut end = SessionEnd::EndOfInput;
        'input: for decoded in ByteDecoder::new(reader) {
            let decoded = decoded.map_err(EngineError::Input)?;
            for command in decoded.commands() {
                self.commands += 1;
                match self.engine.apply(command) {
                    Ok(Outcome::Applied) => {}
                    Ok(Outcome::Alert(alert)) => observer.on_alert(alert),
                    Ok(Outcome::Recenter) => observer.on_recenter(),
                    Ok(Outcome::Saved) => observer.on_saved(),
                    Ok(Outcome::Exit) => {
                        end = SessionEnd::Exit;
                        break 'input;
                    }
                    Err(e) => {
                        error!(target: "runtime", error = %e, "command_failed");
                        observer.on_alert(Alert::SaveFailed);
                    }
                }
            }
        }
        if self.save_on_exit && self.engine.state().is_dirty() {
            debug!(target: "runtime", "save_on_exit");
            self.engine.save()?;
            observer.on_saved();
        }
        info!(target: "runtime", commands = self.commands, ?end, "session_end");
        Ok(end)
    }
}
