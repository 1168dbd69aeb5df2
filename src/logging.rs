//! Logging initialization.
//!
//! The terminal belongs to the UI, so log lines go to a file. Filter
//! directives come from the `RECALL_LOG` environment variable and default
//! to `info`.
//!
//! ```bash
//! RECALL_LOG=debug recall
//! RECALL_LOG=recall::coordinator=debug,warn recall --log-file /tmp/recall.log
//! ```

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "RECALL_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber, appending to `path`.
///
/// Fails if the file cannot be opened or a subscriber is already set.
pub fn init(path: &Path) -> io::Result<()> {
    let file = open_log(path)?;

    fmt()
        .with_env_filter(filter())
        .with_ansi(false)
        .with_thread_names(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
