//! Metadata store interface - service layer
//!
//! The relational store behind batch selection and per-record document
//! availability is a black box: anything satisfying [`MetadataStore`] works.
//! [`InMemoryStore`] is the bundled implementation, loadable from a TOML
//! manifest, and doubles as the test store.

use crate::error::{AppError, AppResult, FileError};
use crate::models::{AwardFile, BatchCriteria, DocumentMeta, RecordStatus, SupplementMeta};
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

/// Upstream metadata collaborator.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Records matching the batch-selection criteria, with their status at
    /// selection time.
    async fn find_records(&self, criteria: &BatchCriteria)
        -> Result<Vec<(String, RecordStatus)>>;

    /// Associated components of one record.
    async fn associated_documents(&self, record_id: &str) -> Result<Vec<DocumentMeta>>;

    /// Bid supplements of one record.
    async fn supplements(&self, record_id: &str) -> Result<Vec<SupplementMeta>>;

    /// Award identifiers of one record.
    async fn award_ids(&self, record_id: &str) -> Result<Vec<String>>;

    /// Stored files attached to one award.
    async fn award_files(&self, award_id: &str) -> Result<Vec<AwardFile>>;
}

/// In-memory metadata store.
///
/// Serves a fixed record set, typically loaded from a TOML manifest. Tests
/// use the builder methods directly; `fail_lookups_for` simulates a broken
/// per-record query.
#[derive(Default)]
pub struct InMemoryStore {
    records: Vec<(String, RecordStatus)>,
    documents: HashMap<String, Vec<DocumentMeta>>,
    supplements: HashMap<String, Vec<SupplementMeta>>,
    awards: HashMap<String, Vec<String>>,
    award_files: HashMap<String, Vec<AwardFile>>,
    failing: HashSet<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_record(&mut self, record_id: impl Into<String>, status: RecordStatus) {
        self.records.push((record_id.into(), status));
    }

    pub fn set_documents(&mut self, record_id: impl Into<String>, documents: Vec<DocumentMeta>) {
        self.documents.insert(record_id.into(), documents);
    }

    pub fn set_supplements(
        &mut self,
        record_id: impl Into<String>,
        supplements: Vec<SupplementMeta>,
    ) {
        self.supplements.insert(record_id.into(), supplements);
    }

    pub fn set_awards(&mut self, record_id: impl Into<String>, award_ids: Vec<String>) {
        self.awards.insert(record_id.into(), award_ids);
    }

    pub fn set_award_files(&mut self, award_id: impl Into<String>, files: Vec<AwardFile>) {
        self.award_files.insert(award_id.into(), files);
    }

    /// Make every per-record lookup for this record fail.
    pub fn fail_lookups_for(&mut self, record_id: impl Into<String>) {
        self.failing.insert(record_id.into());
    }

    /// Load a store from a TOML manifest file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let store = Self::from_toml_str(&raw).map_err(|e| match e {
            AppError::File(FileError::TomlParseFailed { source, .. }) => {
                AppError::File(FileError::TomlParseFailed {
                    path: path.display().to_string(),
                    source,
                })
            }
            other => other,
        })?;
        info!("✓ loaded {} record(s) from {}", store.records.len(), path.display());
        Ok(store)
    }

    pub fn from_toml_str(raw: &str) -> AppResult<Self> {
        let manifest: Manifest = toml::from_str(raw)?;
        let mut store = Self::new();
        for record in manifest.records {
            let record_id = record.record_id;
            store.push_record(&record_id, RecordStatus::parse(&record.status));
            store.set_documents(&record_id, record.documents);
            store.set_supplements(&record_id, record.supplements);
            let mut award_ids = Vec::new();
            for award in record.awards {
                store.set_award_files(&award.award_id, award.files);
                award_ids.push(award.award_id);
            }
            store.set_awards(&record_id, award_ids);
        }
        Ok(store)
    }

    fn check(&self, record_id: &str) -> Result<()> {
        if self.failing.contains(record_id) {
            return Err(AppError::lookup_failed(record_id).into());
        }
        Ok(())
    }
}

#[async_trait]
impl MetadataStore for InMemoryStore {
    async fn find_records(
        &self,
        _criteria: &BatchCriteria,
    ) -> Result<Vec<(String, RecordStatus)>> {
        // The manifest is assumed to be pre-filtered by the criteria.
        Ok(self.records.clone())
    }

    async fn associated_documents(&self, record_id: &str) -> Result<Vec<DocumentMeta>> {
        self.check(record_id)?;
        Ok(self.documents.get(record_id).cloned().unwrap_or_default())
    }

    async fn supplements(&self, record_id: &str) -> Result<Vec<SupplementMeta>> {
        self.check(record_id)?;
        Ok(self.supplements.get(record_id).cloned().unwrap_or_default())
    }

    async fn award_ids(&self, record_id: &str) -> Result<Vec<String>> {
        self.check(record_id)?;
        Ok(self.awards.get(record_id).cloned().unwrap_or_default())
    }

    async fn award_files(&self, award_id: &str) -> Result<Vec<AwardFile>> {
        Ok(self.award_files.get(award_id).cloned().unwrap_or_default())
    }
}

// ========== manifest layout ==========

#[derive(Deserialize)]
struct Manifest {
    #[serde(default)]
    records: Vec<ManifestRecord>,
}

#[derive(Deserialize)]
struct ManifestRecord {
    record_id: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    documents: Vec<DocumentMeta>,
    #[serde(default)]
    supplements: Vec<SupplementMeta>,
    #[serde(default)]
    awards: Vec<ManifestAward>,
}

#[derive(Deserialize)]
struct ManifestAward {
    award_id: String,
    #[serde(default)]
    files: Vec<AwardFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn manifest_round_trips_into_store() {
        let store = InMemoryStore::from_toml_str(
            r#"
            [[records]]
            record_id = "1001"
            status = "Awarded"

            [[records.documents]]
            document_id = "d1"
            name = "Bidding Documents"
            physical_name = "TenderDoc_1001.pdf"
            electronic = true

            [[records.awards]]
            award_id = "a1"

            [[records.awards.files]]
            server_path = "2025/03"
            file_name = "noa.pdf"
            "#,
        )
        .unwrap();

        let records = store
            .find_records(&BatchCriteria::default())
            .await
            .unwrap();
        assert_eq!(records, vec![("1001".to_string(), RecordStatus::Awarded)]);

        let docs = store.associated_documents("1001").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].stored_file_name(), Some("TenderDoc_1001.pdf"));

        assert_eq!(store.award_ids("1001").await.unwrap(), vec!["a1"]);
        assert_eq!(store.award_files("a1").await.unwrap()[0].file_name, "noa.pdf");
    }

    #[tokio::test]
    async fn failing_record_errors_on_lookup() {
        let mut store = InMemoryStore::new();
        store.push_record("bad", RecordStatus::Open);
        store.fail_lookups_for("bad");

        assert!(store.associated_documents("bad").await.is_err());
        assert!(store.supplements("bad").await.is_err());
    }
}
