//! Logging init: stdout by default, or an append-only log file when configured.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,c64dl_core=debug,c64dl=debug";

/// Writer that is either the log file or stdout (used when file clone fails).
enum FileOrStdout {
    File(fs::File),
    Stdout,
}

impl io::Write for FileOrStdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStdout::File(f) => f.write(buf),
            FileOrStdout::Stdout => io::stdout().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStdout::File(f) => f.flush(),
            FileOrStdout::Stdout => io::stdout().lock().flush(),
        }
    }
}

struct FileMakeWriter(fs::File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = FileOrStdout;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrStdout::File)
            .unwrap_or(FileOrStdout::Stdout)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize structured logging. With `log_file` set, events are appended to
/// that file; if it can't be opened the error is returned and nothing is installed,
/// so the caller can fall back to `init_logging_stdout`.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        init_logging_stdout();
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log dir {}", parent.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(FileMakeWriter(file)))
        .with_ansi(false)
        .init();

    tracing::info!("c64dl logging initialized at {}", path.display());
    Ok(())
}

/// Initialize logging to stdout only.
pub fn init_logging_stdout() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stdout)
        .with_target(false)
        .init();
}
