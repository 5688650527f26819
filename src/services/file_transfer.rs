//! Direct file copies from network storage - service layer
//!
//! Copy failures are always non-fatal to the owning job: a missing source or
//! an OS-level error becomes a note in the record folder and the job carries
//! on.

use crate::error::FileError;
use crate::services::NotesSink;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Characters invalid in destination file names. Only the destination is
/// sanitized; the source path is used as stored.
const INVALID_NAME_CHARS: &str = r#"[<>:"/\\|?*]"#;

pub struct FileTransfer {
    notes: Arc<NotesSink>,
    sanitize: Regex,
}

impl FileTransfer {
    pub fn new(notes: Arc<NotesSink>) -> Self {
        Self {
            notes,
            sanitize: Regex::new(INVALID_NAME_CHARS).expect("literal pattern"),
        }
    }

    /// Copy one source file into `dest_folder`, creating the folder if
    /// absent. Failures append a note under `record_folder` and return
    /// normally.
    pub async fn copy_into(&self, source: &Path, dest_folder: &Path, record_folder: &Path) {
        match self.try_copy(source, dest_folder) {
            Ok(dest) => debug!("copied {} -> {}", source.display(), dest.display()),
            Err(FileError::NotFound { path }) => {
                warn!("file not found: {}", path);
                self.notes
                    .append(
                        record_folder,
                        &format!(
                            "File not found: {}. Unable to copy to destination folder: {}",
                            path,
                            dest_folder.display()
                        ),
                    )
                    .await;
            }
            Err(e) => {
                warn!("{}", e);
                self.notes
                    .append(
                        record_folder,
                        &format!("Failed to copy {}: {}", source.display(), e),
                    )
                    .await;
            }
        }
    }

    fn try_copy(&self, source: &Path, dest_folder: &Path) -> Result<PathBuf, FileError> {
        if !source.exists() {
            return Err(FileError::NotFound {
                path: source.display().to_string(),
            });
        }

        std::fs::create_dir_all(dest_folder).map_err(|e| FileError::CreateDirFailed {
            path: dest_folder.display().to_string(),
            source: Box::new(e),
        })?;

        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        let file_name = self.sanitize.replace_all(&file_name, "_").into_owned();
        let dest = dest_folder.join(file_name);

        std::fs::copy(long_path(source), long_path(&dest)).map_err(|e| FileError::CopyFailed {
            path: source.display().to_string(),
            dest: dest.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(dest)
    }
}

/// Windows needs the `\\?\` prefix to copy beyond MAX_PATH; elsewhere paths
/// pass through untouched.
#[cfg(windows)]
fn long_path(path: &Path) -> PathBuf {
    let display = path.display().to_string();
    if display.starts_with(r"\\?\") {
        path.to_path_buf()
    } else {
        PathBuf::from(format!(r"\\?\{}", display))
    }
}

#[cfg(not(windows))]
fn long_path(path: &Path) -> PathBuf {
    path.to_path_buf()
}
