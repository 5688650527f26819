//! Manual-follow-up notes - service layer
//!
//! Only owns the "append a note" ability; never fails the calling job.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

/// Per-record note file name.
pub const NOTES_FILE_NAME: &str = "IMPORTANT-NOTES.txt";

/// Append-only per-record note writer.
///
/// Responsibilities:
/// - append one whole message at a time to a record folder's note file
/// - serialize concurrent appenders per folder so messages never interleave
/// - swallow its own I/O failures (a note must never sink a job)
pub struct NotesSink {
    locks: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl NotesSink {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Append one message to the record folder's note file.
    ///
    /// The folder is created if absent. Errors are logged, never returned.
    pub async fn append(&self, record_folder: &Path, message: &str) {
        let lock = self.lock_for(record_folder);
        let _guard = lock.lock().await;

        debug!(
            "note for {}: {}",
            record_folder.display(),
            message.lines().next().unwrap_or_default()
        );

        if let Err(e) = Self::write_line(record_folder, message) {
            error!(
                "failed to append note in {}: {}",
                record_folder.display(),
                e
            );
        }
    }

    fn write_line(record_folder: &Path, message: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(record_folder)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(record_folder.join(NOTES_FILE_NAME))?;

        // One write call per message keeps appends whole under the per-folder
        // lock.
        file.write_all(format!("{}\n", message).as_bytes())
    }

    fn lock_for(&self, record_folder: &Path) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks
            .entry(record_folder.to_path_buf())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}

impl Default for NotesSink {
    fn default() -> Self {
        Self::new()
    }
}
