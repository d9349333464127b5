//! Dual-version document codec.
//!
//! A managed file stores two copies of the same text: the original submission
//! and the revised copy that the editor mutates. Layout, top to bottom:
//!
//! ```text
//! #!/usr/bin/env twofold     header
//! ...                         original section (encoded)
//! .                           sentinel
//! ...                         revised section (encoded)
//! ```
//!
//! Encoding of one content line happens in three steps, each reversible:
//! 1. every ESC is doubled (`escape::escape_esc`), which frees a lone ESC
//!    for use as the wrap marker;
//! 2. over-width lines are split into fragments, all but the last ending in
//!    the wrap marker (`wrap::LineWrapper`);
//! 3. each fragment that starts with `.` gains one more `.` so no content
//!    line can equal the sentinel (`escape::escape_dot`).
//!
//! Decoding (`document::decode_section`) runs the steps backwards.

pub mod document;
pub mod escape;
pub mod wrap;

pub use document::{Document, DocumentCodec, HEADER, decode_section, read_lines, save};
pub use escape::{ESC, SENTINEL, Unescaped};
pub use wrap::{DEFAULT_WRAP_WIDTH, LineWrapper, WRAP_MARKER};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by loading or persisting a document.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{op} failed for {}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} starts with the document header but has no sentinel line", path.display())]
    MissingSentinel { path: PathBuf },
}

impl CodecError {
    pub(crate) fn io(op: &'static str, path: &Path, source: std::io::Error) -> Self {
        CodecError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Underlying I/O error kind, when the failure came from the filesystem.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            CodecError::Io { source, .. } => Some(source.kind()),
            CodecError::MissingSentinel { .. } => None,
        }
    }
}
