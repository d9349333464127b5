//! Configuration loading and parsing.
//!
//! Parses `twofold.toml` (or an override path provided by the binary) into
//! typed sections with defaults for every field. A missing file yields the
//! defaults silently; a malformed file yields the defaults plus a warning so
//! a typo never blocks editing. Unknown fields are ignored.
//!
//! Values that would make the editor misbehave (zero capacities, a wrap width
//! below the codec minimum) are clamped by `Config::sanitize` and the clamp is
//! logged under the `config` target.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, io::ErrorKind, path::PathBuf};
use tracing::{info, warn};

/// Smallest accepted wrap width; mirrors the codec's own floor.
pub const MIN_WRAP_WIDTH: usize = 3;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct WrapConfig {
    #[serde(default = "WrapConfig::default_width")]
    pub width: usize,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
        }
    }
}

impl WrapConfig {
    const fn default_width() -> usize {
        90
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditingConfig {
    #[serde(default = "EditingConfig::default_kill_ring_capacity")]
    pub kill_ring_capacity: usize,
    #[serde(default = "EditingConfig::default_undo_limit")]
    pub undo_limit: usize,
    #[serde(default = "EditingConfig::default_page_lines")]
    pub page_lines: usize,
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self {
            kill_ring_capacity: Self::default_kill_ring_capacity(),
            undo_limit: Self::default_undo_limit(),
            page_lines: Self::default_page_lines(),
        }
    }
}

impl EditingConfig {
    const fn default_kill_ring_capacity() -> usize {
        60
    }
    const fn default_undo_limit() -> usize {
        1000
    }
    const fn default_page_lines() -> usize {
        18
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Persist the buffer when the session ends with Exit.
    #[serde(default)]
    pub save_on_exit: bool,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Directory for `twofold.log`; platform cache dir when absent.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub wrap: WrapConfig,
    #[serde(default)]
    pub editing: EditingConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub source: Option<PathBuf>,
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("twofold.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("twofold").join("twofold.toml");
    }
    PathBuf::from("twofold.toml")
}

/// Default directory for the log file.
pub fn default_log_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("twofold"))
        .unwrap_or_else(std::env::temp_dir)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => {
            warn!(target: "config", file = %path.display(), error = %e, "config_unreadable");
            return Ok(Config::default());
        }
    };
    match parse(&content) {
        Ok(file) => {
            let mut cfg = Config {
                raw: Some(content),
                file,
                source: Some(path),
            };
            cfg.sanitize();
            Ok(cfg)
        }
        Err(e) => {
            warn!(target: "config", file = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

/// Parse a TOML document without touching the filesystem.
pub fn parse(content: &str) -> Result<ConfigFile> {
    toml::from_str::<ConfigFile>(content).context("invalid twofold configuration")
}

impl Config {
    /// Clamp out-of-range values. Returns true when anything changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        let wrap = &mut self.file.wrap;
        if wrap.width < MIN_WRAP_WIDTH {
            info!(target: "config", raw = wrap.width, clamped = MIN_WRAP_WIDTH, "wrap_width_clamped");
            wrap.width = MIN_WRAP_WIDTH;
            changed = true;
        }
        let editing = &mut self.file.editing;
        for (name, value) in [
            ("kill_ring_capacity", &mut editing.kill_ring_capacity),
            ("undo_limit", &mut editing.undo_limit),
            ("page_lines", &mut editing.page_lines),
        ] {
            if *value == 0 {
                info!(target: "config", field = name, clamped = 1, "editing_value_clamped");
                *value = 1;
                changed = true;
            }
        }
        changed
    }

    pub fn log_dir(&self) -> PathBuf {
        self.file.log.dir.clone().unwrap_or_else(default_log_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn capture<F: FnOnce()>(f: F) -> String {
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();
        with_default(subscriber, f);
        let out = buffer.lock().unwrap().clone();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.file, ConfigFile::default());
        assert_eq!(cfg.file.wrap.width, 90);
        assert_eq!(cfg.file.editing.kill_ring_capacity, 60);
        assert_eq!(cfg.file.editing.undo_limit, 1000);
        assert_eq!(cfg.file.editing.page_lines, 18);
        assert!(!cfg.file.session.save_on_exit);
        assert!(cfg.source.is_none());
    }

    #[test]
    fn parses_all_sections() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[wrap]\nwidth = 72\n[editing]\nkill_ring_capacity = 5\nundo_limit = 20\npage_lines = 10\n[session]\nsave_on_exit = true\n[log]\ndir = \"/tmp/twofold-logs\"\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.wrap.width, 72);
        assert_eq!(cfg.file.editing.kill_ring_capacity, 5);
        assert_eq!(cfg.file.editing.undo_limit, 20);
        assert_eq!(cfg.file.editing.page_lines, 10);
        assert!(cfg.file.session.save_on_exit);
        assert_eq!(cfg.log_dir(), PathBuf::from("/tmp/twofold-logs"));
        assert!(cfg.raw.is_some());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = parse("[editing]\nundo_limit = 7\n").unwrap();
        assert_eq!(file.editing.undo_limit, 7);
        assert_eq!(file.editing.kill_ring_capacity, 60);
        assert_eq!(file.wrap.width, 90);
    }

    #[test]
    fn parse_error_falls_back_to_defaults_with_warning() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[wrap\nwidth = ").unwrap();
        let path = tmp.path().to_path_buf();
        let mut cfg = None;
        let log = capture(|| cfg = Some(load_from(Some(path)).unwrap()));
        assert_eq!(cfg.unwrap().file, ConfigFile::default());
        assert!(log.contains("WARN config:"));
        assert!(log.contains("config_parse_failed"));
    }

    #[test]
    fn zero_values_are_clamped_and_logged() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[wrap]\nwidth = 1\n[editing]\nkill_ring_capacity = 0\n").unwrap();
        let path = tmp.path().to_path_buf();
        let mut cfg = None;
        let log = capture(|| cfg = Some(load_from(Some(path)).unwrap()));
        let cfg = cfg.unwrap();
        assert_eq!(cfg.file.wrap.width, MIN_WRAP_WIDTH);
        assert_eq!(cfg.file.editing.kill_ring_capacity, 1);
        assert!(log.contains("INFO config:"));
        assert!(log.contains("wrap_width_clamped"));
        assert!(log.contains("editing_value_clamped"));
    }
}
