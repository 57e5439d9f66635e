//! Writing downloaded payloads to disk. Existing files are never overwritten.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// New file created with this many bytes.
    Written { bytes: usize },
    /// A file was already present; it was left untouched.
    Kept,
}

/// Create `path` exclusively and write `data` to it.
///
/// Existence check and create are a single `create_new` open. The handle is
/// closed on every return path.
pub fn save_file(path: &Path, data: &[u8]) -> io::Result<SaveOutcome> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(SaveOutcome::Kept),
        Err(e) => return Err(e),
    };
    file.write_all(data)?;
    file.flush()?;
    Ok(SaveOutcome::Written { bytes: data.len() })
}
