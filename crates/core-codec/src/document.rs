//! Loading, first-run initialization, section extraction and persistence.

use crate::CodecError;
use crate::escape::{SENTINEL, escape_dot, escape_esc, is_sentinel, strip_dot, unescape_esc};
use crate::wrap::LineWrapper;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// First line of every managed file.
pub const HEADER: &str = "#!/usr/bin/env twofold";

/// A managed file held in its encoded form.
///
/// Invariant: `lines[0] == HEADER` and `lines[sentinel] == SENTINEL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    lines: Vec<String>,
    sentinel: usize,
    initialized: bool,
}

impl Document {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every encoded line, header included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Encoded lines of the original section.
    pub fn stored_original(&self) -> &[String] {
        &self.lines[1..self.sentinel]
    }

    /// Encoded lines of the revised section.
    pub fn stored_revised(&self) -> &[String] {
        &self.lines[self.sentinel + 1..]
    }

    /// True when the load that produced this document ran first-run initialization.
    pub fn was_initialized(&self) -> bool {
        self.initialized
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentCodec {
    wrapper: LineWrapper,
}

impl DocumentCodec {
    pub fn new(wrapper: LineWrapper) -> Self {
        Self { wrapper }
    }

    /// Read `path`, initializing and persisting it first when it is not yet managed.
    pub fn load(&self, path: &Path) -> Result<Document, CodecError> {
        let lines = trim_trailing_empty(read_lines(path)?);
        debug!(target: "codec", file = %path.display(), lines = lines.len(), "document_read");

        let managed = lines.first().is_some_and(|first| first == HEADER);
        let lines = if managed {
            lines
        } else {
            let encoded = self.initialize(&lines);
            save(path, &encoded)?;
            info!(target: "codec", file = %path.display(), source_lines = lines.len(), stored_lines = encoded.len(), "first_run_initialized");
            encoded
        };

        let sentinel = lines
            .iter()
            .skip(1)
            .position(|line| is_sentinel(line))
            .map(|idx| idx + 1)
            .ok_or_else(|| CodecError::MissingSentinel {
                path: path.to_path_buf(),
            })?;

        Ok(Document {
            path: path.to_path_buf(),
            lines,
            sentinel,
            initialized: !managed,
        })
    }

    /// Produce the full encoded file for a plain document.
    ///
    /// Pure; `load` calls it and persists the result. Passing an already
    /// encoded file here would encode it again; idempotence is provided by the
    /// header check in `load`.
    pub fn initialize<S: AsRef<str>>(&self, plain: &[S]) -> Vec<String> {
        let section = self.encode_section(plain);
        let mut out = Vec::with_capacity(section.len() * 2 + 2);
        out.push(HEADER.to_string());
        out.extend(section.iter().cloned());
        out.push(SENTINEL.to_string());
        out.extend(section);
        out
    }

    /// Escape and wrap content lines into stored lines.
    pub fn encode_section<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            let escaped = escape_esc(line.as_ref());
            for fragment in self.wrapper.wrap(&escaped) {
                out.push(escape_dot(&fragment).into_owned());
            }
        }
        out
    }

    /// Plain lines of the original section (dot, ESC and wrap escaping undone).
    pub fn extract_original(&self, doc: &Document) -> Vec<String> {
        decode_section(doc.stored_original())
    }

    /// Plain lines of the revised section (dot, ESC and wrap escaping undone).
    pub fn extract_revised(&self, doc: &Document) -> Vec<String> {
        decode_section(doc.stored_revised())
    }

    /// Replace the revised section with the encoding of `lines`. Memory only.
    pub fn replace_revised<S: AsRef<str>>(&self, doc: &mut Document, lines: &[S]) {
        let encoded = self.encode_section(lines);
        doc.lines.truncate(doc.sentinel + 1);
        doc.lines.extend(encoded);
    }

    /// Write the document back to its path.
    pub fn persist(&self, doc: &Document) -> Result<(), CodecError> {
        save(&doc.path, &doc.lines)
    }
}

/// Undo dot escaping, ESC escaping and wrapping for a run of stored lines.
pub fn decode_section<S: AsRef<str>>(stored: &[S]) -> Vec<String> {
    let mut out = Vec::with_capacity(stored.len());
    let mut pending: Option<String> = None;
    for line in stored {
        let fragment = unescape_esc(strip_dot(line.as_ref()));
        let mut joined = pending.take().unwrap_or_default();
        joined.push_str(&fragment.text);
        if fragment.continued {
            pending = Some(joined);
        } else {
            out.push(joined);
        }
    }
    if let Some(rest) = pending {
        warn!(target: "codec", "dangling_wrap_continuation");
        out.push(rest);
    }
    out
}

/// Read a UTF-8 file as `\n`-separated lines.
pub fn read_lines(path: &Path) -> Result<Vec<String>, CodecError> {
    let content = fs::read_to_string(path).map_err(|e| CodecError::io("read", path, e))?;
    Ok(content.split('\n').map(str::to_string).collect())
}

/// Write each line followed by `\n`, replacing `path` atomically.
///
/// Data goes to a temporary file next to `path` which is flushed, synced and
/// renamed over the target. The target's permissions are carried over.
pub fn save<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<(), CodecError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| CodecError::io("create temp", path, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        for line in lines {
            writer
                .write_all(line.as_ref().as_bytes())
                .map_err(|e| CodecError::io("write", path, e))?;
            writer
                .write_all(b"\n")
                .map_err(|e| CodecError::io("write", path, e))?;
        }
        writer.flush().map_err(|e| CodecError::io("flush", path, e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| CodecError::io("sync", path, e))?;
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| CodecError::io("set permissions", path, e))?;
    }
    tmp.persist(path)
        .map_err(|e| CodecError::io("rename", path, e.error))?;
    debug!(target: "codec", file = %path.display(), lines = lines.len(), "document_saved");
    Ok(())
}

/// Drop trailing empty lines, keeping at least one line.
fn trim_trailing_empty(mut lines: Vec<String>) -> Vec<String> {
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn v(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn trim_keeps_one_line() {
        assert_eq!(trim_trailing_empty(v(&["", "", ""])), v(&[""]));
        assert_eq!(trim_trailing_empty(v(&["a", "", "b", ""])), v(&["a", "", "b"]));
    }

    #[test]
    fn initialize_lays_out_header_sections_and_sentinel() {
        let codec = DocumentCodec::default();
        let encoded = codec.initialize(&["Hello", ".World"]);
        assert_eq!(
            encoded,
            v(&[HEADER, "Hello", "..World", ".", "Hello", "..World"])
        );
    }

    #[test]
    fn decode_section_joins_wrapped_fragments() {
        let stored = v(&["ab\u{1b}", "..cd\u{1b}", "ef", "g"]);
        assert_eq!(decode_section(&stored), v(&["ab.cdef", "g"]));
    }

    #[test]
    fn dangling_continuation_is_kept() {
        let stored = v(&["ab\u{1b}"]);
        assert_eq!(decode_section(&stored), v(&["ab"]));
    }

    #[test]
    fn replace_revised_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "one\ntwo\n").unwrap();
        let codec = DocumentCodec::default();
        let mut doc = codec.load(&path).unwrap();
        codec.replace_revised(&mut doc, &["uno", ".dos", "tres"]);
        assert_eq!(codec.extract_original(&doc), v(&["one", "two"]));
        assert_eq!(codec.extract_revised(&doc), v(&["uno", ".dos", "tres"]));
        assert_eq!(doc.stored_revised(), &v(&["uno", "..dos", "tres"])[..]);
    }

    #[test]
    fn headed_file_without_sentinel_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.txt");
        std::fs::write(&path, format!("{HEADER}\nonly\n")).unwrap();
        let err = DocumentCodec::default().load(&path).unwrap_err();
        assert!(matches!(err, CodecError::MissingSentinel { .. }));
    }

    #[test]
    fn missing_file_reports_io_kind() {
        let dir = tempfile::tempdir().unwrap();
        let err = DocumentCodec::default()
            .load(&dir.path().join("absent.txt"))
            .unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[cfg(unix)]
    #[test]
    fn save_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perm.txt");
        std::fs::write(&path, "x\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();
        save(&path, &["y"]).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "y\n");
    }
}
