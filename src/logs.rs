//! Diagnostic logging setup
//!
//! The terminal itself is the UI, so diagnostics must never reach
//! stdout/stderr; they go to a file when `--log-file` is given and nowhere
//! otherwise. Filtering follows `RUST_LOG` when set.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install the file-backed subscriber. No-op without a path; quietly keeps
/// an already-installed subscriber (relevant only under test harnesses).
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok();
    Ok(())
}
