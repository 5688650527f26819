//! End-to-end pipeline tests over a fake render surface.
//!
//! No browser involved: `FakeSurface` records every navigation and writes
//! stub PDF bytes, which is enough to exercise dispatch, worker parallelism,
//! render serialization and two-stage batch completion.

use anyhow::Result;
use async_trait::async_trait;
use bid_docs_extractor::config::Config;
use bid_docs_extractor::error::{AppError, BatchError};
use bid_docs_extractor::models::{BatchCriteria, CategorySelection, RecordStatus};
use bid_docs_extractor::orchestrator::Extractor;
use bid_docs_extractor::services::{InMemoryStore, NOTES_FILE_NAME};
use bid_docs_extractor::RenderSurface;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Render surface double. Records navigations in order; URLs containing a
/// configured marker "redirect" to the login page.
struct FakeSurface {
    navigations: Mutex<Vec<String>>,
    expire_marker: Option<String>,
}

impl FakeSurface {
    fn new() -> Self {
        Self {
            navigations: Mutex::new(Vec::new()),
            expire_marker: None,
        }
    }

    fn expiring_on(marker: &str) -> Self {
        Self {
            navigations: Mutex::new(Vec::new()),
            expire_marker: Some(marker.to_string()),
        }
    }

    fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

#[async_trait]
impl RenderSurface for FakeSurface {
    async fn navigate(&self, url: &str) -> Result<String> {
        self.navigations.lock().unwrap().push(url.to_string());
        if let Some(marker) = &self.expire_marker {
            if url.contains(marker.as_str()) {
                return Ok("https://notices.example/log-in.aspx".to_string());
            }
        }
        Ok(url.to_string())
    }

    async fn remove_element(&self, _selector: &str) -> Result<bool> {
        Ok(true)
    }

    async fn capture_pdf(&self, path: &Path) -> Result<()> {
        std::fs::write(path, b"%PDF-1.4 stub")?;
        Ok(())
    }
}

fn test_config(output: &TempDir, tender_root: &str) -> Config {
    Config {
        worker_count: 3,
        output_root: output.path().display().to_string(),
        tender_files_root: tender_root.to_string(),
        ..Config::default()
    }
}

fn any_criteria() -> BatchCriteria {
    BatchCriteria {
        organization_id: "10021".to_string(),
        status: "Awarded".to_string(),
        year: "2024".to_string(),
    }
}

#[tokio::test]
async fn no_matching_records_returns_zero() {
    let output = TempDir::new().unwrap();
    let store = Arc::new(InMemoryStore::new());
    let extractor = Extractor::with_surface(
        test_config(&output, "unused"),
        store,
        Arc::new(FakeSurface::new()),
    );

    let criteria = any_criteria();
    let completed = extractor
        .run_batch(&criteria, CategorySelection::all())
        .await
        .unwrap();
    assert_eq!(completed, 0);
    extractor.shutdown().await;
}

#[tokio::test]
async fn batch_with_no_documents_completes() {
    let output = TempDir::new().unwrap();
    let mut store = InMemoryStore::new();
    for id in ["9001", "9002", "9003", "9004"] {
        store.push_record(id, RecordStatus::Closed);
    }
    let extractor = Extractor::with_surface(
        test_config(&output, "unused"),
        Arc::new(store),
        Arc::new(FakeSurface::new()),
    );

    // Only the bid notice category, so every record produces one render.
    let mut categories = CategorySelection::none();
    categories.bid_notice = true;

    let completed = extractor
        .run_batch(&any_criteria(), categories)
        .await
        .unwrap();
    assert_eq!(completed, 4);

    for id in ["9001", "9002", "9003", "9004"] {
        let pdf = output.path().join(id).join("bid_notice_abstract.pdf");
        assert!(pdf.is_file(), "missing {}", pdf.display());
    }
    extractor.shutdown().await;
}

#[tokio::test]
async fn lookup_failure_is_contained_to_its_record() {
    let output = TempDir::new().unwrap();
    let mut store = InMemoryStore::new();
    store.push_record("7001", RecordStatus::Closed);
    store.push_record("7002", RecordStatus::Closed);
    store.push_record("7003", RecordStatus::Closed);
    store.fail_lookups_for("7002");

    let extractor = Extractor::with_surface(
        test_config(&output, "unused"),
        Arc::new(store),
        Arc::new(FakeSurface::new()),
    );

    let mut categories = CategorySelection::none();
    categories.associated_components = true;

    let completed = extractor
        .run_batch(&any_criteria(), categories)
        .await
        .unwrap();
    assert_eq!(completed, 3, "failed record still counts as processed");

    let notes = output.path().join("7002").join(NOTES_FILE_NAME);
    let body = std::fs::read_to_string(&notes).unwrap();
    assert!(body.contains("7002"));
    extractor.shutdown().await;
}

#[tokio::test]
async fn session_expiry_skips_pdf_and_leaves_note() {
    let output = TempDir::new().unwrap();
    let mut store = InMemoryStore::new();
    store.push_record("5050", RecordStatus::Closed);

    let surface = Arc::new(FakeSurface::expiring_on("refid=5050"));
    let extractor = Extractor::with_surface(
        test_config(&output, "unused"),
        Arc::new(store),
        surface.clone(),
    );

    let mut categories = CategorySelection::none();
    categories.bid_notice = true;

    let completed = extractor
        .run_batch(&any_criteria(), categories)
        .await
        .unwrap();
    assert_eq!(completed, 1);

    let record_folder = output.path().join("5050");
    assert!(!record_folder.join("bid_notice_abstract.pdf").exists());

    let body = std::fs::read_to_string(record_folder.join(NOTES_FILE_NAME)).unwrap();
    assert!(
        body.contains("refid=5050"),
        "note names the address that was skipped: {}",
        body
    );
    extractor.shutdown().await;
}

#[tokio::test]
async fn mixed_records_end_to_end() {
    let output = TempDir::new().unwrap();
    let tender = TempDir::new().unwrap();
    std::fs::write(tender.path().join("stored-plan.pdf"), b"stored bytes").unwrap();

    let mut store = InMemoryStore::new();
    // A: one electronic document, copied straight from the tender share.
    store.push_record("A100", RecordStatus::Closed);
    store.set_documents(
        "A100",
        vec![bid_docs_extractor::models::DocumentMeta {
            document_id: "d1".to_string(),
            name: "Project Plan".to_string(),
            physical_name: Some("stored-plan.pdf".to_string()),
            electronic: true,
        }],
    );
    // B: one non-electronic document, must be rendered.
    store.push_record("B200", RecordStatus::Closed);
    store.set_documents(
        "B200",
        vec![bid_docs_extractor::models::DocumentMeta {
            document_id: "d2".to_string(),
            name: "Paper Only".to_string(),
            physical_name: None,
            electronic: false,
        }],
    );
    // C: lookups fail outright.
    store.push_record("C300", RecordStatus::Closed);
    store.fail_lookups_for("C300");

    let extractor = Extractor::with_surface(
        test_config(&output, &tender.path().display().to_string()),
        Arc::new(store),
        Arc::new(FakeSurface::new()),
    );

    let mut categories = CategorySelection::none();
    categories.associated_components = true;

    let completed = extractor
        .run_batch(&any_criteria(), categories)
        .await
        .unwrap();
    assert_eq!(completed, 3);

    let copied = output
        .path()
        .join("A100")
        .join("Associated Components")
        .join("stored-plan.pdf");
    assert_eq!(std::fs::read(&copied).unwrap(), b"stored bytes");

    let rendered = output
        .path()
        .join("B200")
        .join("Associated Components")
        .join("d2.pdf");
    assert!(rendered.is_file());

    assert!(output.path().join("C300").join(NOTES_FILE_NAME).is_file());
    extractor.shutdown().await;
}

#[tokio::test]
async fn renders_are_serialized_in_submission_order() {
    let output = TempDir::new().unwrap();
    let mut store = InMemoryStore::new();
    // One worker, so submission order is deterministic.
    store.push_record("1", RecordStatus::Closed);
    store.push_record("2", RecordStatus::Closed);
    store.push_record("3", RecordStatus::Closed);

    let surface = Arc::new(FakeSurface::new());
    let mut config = test_config(&output, "unused");
    config.worker_count = 1;
    let extractor = Extractor::with_surface(config, Arc::new(store), surface.clone());

    let mut categories = CategorySelection::none();
    categories.bid_notice = true;

    extractor
        .run_batch(&any_criteria(), categories)
        .await
        .unwrap();

    let navigations = surface.navigations();
    assert_eq!(navigations.len(), 3);
    assert!(navigations[0].contains("refid=1"));
    assert!(navigations[1].contains("refid=2"));
    assert!(navigations[2].contains("refid=3"));
    extractor.shutdown().await;
}

#[tokio::test]
async fn submit_batch_rejects_empty_job_list() {
    let output = TempDir::new().unwrap();
    let store = Arc::new(InMemoryStore::new());
    let extractor = Extractor::with_surface(
        test_config(&output, "unused"),
        store,
        Arc::new(FakeSurface::new()),
    );

    // run_batch maps "no records" to Ok(0); the dispatcher itself refuses an
    // explicitly empty batch.
    let err = extractor
        .dispatcher()
        .submit_batch(Vec::new())
        .unwrap_err();
    assert!(matches!(err, AppError::Batch(BatchError::EmptyBatch)));
    extractor.shutdown().await;
}
