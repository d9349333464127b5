//! Argument and environment checks that run before any document is touched.
//!
//! Every rejection maps to its own process exit code.

use core_terminal::{Geometry, MIN_COLUMNS, MIN_ROWS};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("only one file may be given")]
    TooManyFiles,
    #[error("no file given")]
    NoFile,
    #[error("-o and -r cannot be combined")]
    ConflictingDumps,
    #[error("{}: no such file", .0.display())]
    NotFound(PathBuf),
    #[error("{}: is a directory", .0.display())]
    IsDirectory(PathBuf),
    #[error("terminal is {columns}x{rows}; at least {}x{} is required", MIN_COLUMNS, MIN_ROWS)]
    TerminalTooSmall { columns: u16, rows: u16 },
}

impl UsageError {
    pub fn exit_code(&self) -> u8 {
        match self {
            UsageError::NoFile => 255,
            UsageError::ConflictingDumps => 254,
            UsageError::TooManyFiles => 253,
            UsageError::NotFound(_) => 252,
            UsageError::IsDirectory(_) => 251,
            UsageError::TerminalTooSmall { .. } => 250,
        }
    }
}

/// Section printed instead of starting an interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dump {
    Original,
    Revised,
}

/// A validated invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub path: PathBuf,
    pub dump: Option<Dump>,
}

pub struct ArgumentGate<'a> {
    files: &'a [PathBuf],
    original: bool,
    revised: bool,
}

impl<'a> ArgumentGate<'a> {
    pub fn new(files: &'a [PathBuf], original: bool, revised: bool) -> Self {
        Self {
            files,
            original,
            revised,
        }
    }

    pub fn check(&self) -> Result<Request, UsageError> {
        let path = match self.files {
            [] => return Err(UsageError::NoFile),
            [path] => path,
            _ => return Err(UsageError::TooManyFiles),
        };
        let dump = match (self.original, self.revised) {
            (true, true) => return Err(UsageError::ConflictingDumps),
            (true, false) => Some(Dump::Original),
            (false, true) => Some(Dump::Revised),
            (false, false) => None,
        };
        check_file(path)?;
        Ok(Request {
            path: path.clone(),
            dump,
        })
    }
}

/// Other metadata failures (permissions) surface later as I/O errors on load.
fn check_file(path: &Path) -> Result<(), UsageError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Err(UsageError::IsDirectory(path.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(UsageError::NotFound(path.to_path_buf())),
        _ => Ok(()),
    }
}

pub fn check_geometry(geometry: Geometry) -> Result<(), UsageError> {
    if geometry.is_usable() {
        Ok(())
    } else {
        Err(UsageError::TerminalTooSmall {
            columns: geometry.columns,
            rows: geometry.rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing_file() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "text\n").unwrap();
        (dir, path)
    }

    #[test]
    fn file_count_is_checked_first() {
        let none: Vec<PathBuf> = Vec::new();
        assert_eq!(
            ArgumentGate::new(&none, true, true).check(),
            Err(UsageError::NoFile)
        );
        let two = vec![PathBuf::from("a"), PathBuf::from("b")];
        assert_eq!(
            ArgumentGate::new(&two, false, false).check(),
            Err(UsageError::TooManyFiles)
        );
    }

    #[test]
    fn dump_flags_are_exclusive() {
        let (_dir, path) = existing_file();
        let files = vec![path.clone()];
        assert_eq!(
            ArgumentGate::new(&files, true, true).check(),
            Err(UsageError::ConflictingDumps)
        );
        assert_eq!(
            ArgumentGate::new(&files, false, true).check(),
            Ok(Request {
                path,
                dump: Some(Dump::Revised)
            })
        );
    }

    #[test]
    fn missing_and_directory_paths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = vec![dir.path().join("nope.txt")];
        assert!(matches!(
            ArgumentGate::new(&missing, false, false).check(),
            Err(UsageError::NotFound(_))
        ));
        let directory = vec![dir.path().to_path_buf()];
        assert!(matches!(
            ArgumentGate::new(&directory, false, false).check(),
            Err(UsageError::IsDirectory(_))
        ));
    }

    #[test]
    fn small_terminals_are_rejected() {
        let err = check_geometry(Geometry {
            columns: 80,
            rows: 24,
        })
        .unwrap_err();
        assert_eq!(err.exit_code(), 250);
        assert_eq!(
            err.to_string(),
            "terminal is 80x24; at least 100x20 is required"
        );
        assert!(
            check_geometry(Geometry {
                columns: 100,
                rows: 20
            })
            .is_ok()
        );
    }

    #[test]
    fn exit_codes_are_distinct() {
        let errors = [
            UsageError::TooManyFiles,
            UsageError::NoFile,
            UsageError::ConflictingDumps,
            UsageError::NotFound(PathBuf::new()),
            UsageError::IsDirectory(PathBuf::new()),
            UsageError::TerminalTooSmall {
                columns: 0,
                rows: 0,
            },
        ];
        let mut codes: Vec<u8> = errors.iter().map(UsageError::exit_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes, vec![250, 251, 252, 253, 254, 255]);
    }
}
