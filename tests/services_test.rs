//! Service-layer tests: file transfer and concurrent note appends.

use bid_docs_extractor::services::{FileTransfer, NotesSink, NOTES_FILE_NAME};
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn copy_into_places_file_and_is_repeatable() {
    let source_dir = TempDir::new().unwrap();
    let dest_dir = TempDir::new().unwrap();
    let source = source_dir.path().join("award letter.pdf");
    std::fs::write(&source, b"award bytes").unwrap();

    let transfer = FileTransfer::new(Arc::new(NotesSink::new()));
    let dest_folder = dest_dir.path().join("Award").join("42");

    transfer.copy_into(&source, &dest_folder, dest_dir.path()).await;
    // Second copy of the same file is a no-op overwrite, never an error.
    transfer.copy_into(&source, &dest_folder, dest_dir.path()).await;

    let copied = dest_folder.join("award letter.pdf");
    assert_eq!(std::fs::read(&copied).unwrap(), b"award bytes");
}

#[tokio::test]
async fn copy_into_preserves_valid_names() {
    let source_dir = TempDir::new().unwrap();
    let dest_dir = TempDir::new().unwrap();
    // The destination sanitize pass must leave ordinary names untouched.
    let source = source_dir.path().join("plan v2.pdf");
    std::fs::write(&source, b"x").unwrap();

    let transfer = FileTransfer::new(Arc::new(NotesSink::new()));
    transfer
        .copy_into(&source, dest_dir.path(), dest_dir.path())
        .await;
    assert!(dest_dir.path().join("plan v2.pdf").is_file());
}

#[tokio::test]
async fn missing_source_becomes_a_note_not_an_error() {
    let dest_dir = TempDir::new().unwrap();
    let record_folder = dest_dir.path().join("1234");

    let transfer = FileTransfer::new(Arc::new(NotesSink::new()));
    transfer
        .copy_into(
            std::path::Path::new("/nonexistent/ghost.pdf"),
            &dest_dir.path().join("1234").join("Associated Components"),
            &record_folder,
        )
        .await;

    let body = std::fs::read_to_string(record_folder.join(NOTES_FILE_NAME)).unwrap();
    assert!(body.contains("ghost.pdf"), "note names the missing file: {}", body);
}

#[tokio::test]
async fn concurrent_appends_keep_lines_whole() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("record");
    let notes = Arc::new(NotesSink::new());

    let mut handles = Vec::new();
    for writer in 0..2 {
        let notes = notes.clone();
        let folder = folder.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..50 {
                notes
                    .append(&folder, &format!("writer {} line {}", writer, i))
                    .await;
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let body = std::fs::read_to_string(folder.join(NOTES_FILE_NAME)).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 100);
    for line in lines {
        assert!(
            line.starts_with("writer 0 ") || line.starts_with("writer 1 "),
            "interleaved line: {:?}",
            line
        );
    }
}
