//! File IO helpers used by the dispatcher and the session.
//!
//! Synchronous and minimal: the buffer is split into lines, encoded into the
//! revised section and the whole document is written atomically by the codec.
//! Formatting runs live only for the session; the stored format has no slot
//! for them.

use core_codec::{CodecError, Document, DocumentCodec};
use core_state::EditorState;

/// Replace the revised section with the buffer and persist the document.
pub fn save_revised(
    state: &mut EditorState,
    codec: &DocumentCodec,
    document: &mut Document,
) -> Result<(), CodecError> {
    let lines = state.to_lines();
    codec.replace_revised(document, &lines);
    match codec.persist(document) {
        Ok(()) => {
            state.mark_saved();
            tracing::info!(target: "io", file = %document.path().display(), lines = lines.len(), "revised_saved");
            Ok(())
        }
        Err(e) => {
            tracing::error!(target: "io", file = %document.path().display(), error = %e, "save_failed");
            Err(e)
        }
    }
}
