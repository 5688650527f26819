//! Per-record processing flow - workflow layer
//!
//! Defines the complete procedure for one record:
//! 1. bid notice → render request
//! 2. associated components → direct copy or render request
//! 3. bid supplements → direct copy or render request(s), external links noted
//! 4. awards (closed/awarded only) → award notice render, stored file copies
//!
//! The flow never waits on the render requests it enqueues; they drain
//! through the serialized session on their own. It holds no scarce resource
//! and only depends on service-layer abilities.

use crate::config::Config;
use crate::models::{BatchState, RecordJob, RenderRequest, RenderTarget};
use crate::services::{FileTransfer, MetadataStore, NotesSink, RenderQueue};
use crate::utils::logging::truncate_text;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Record-folder subfolder names.
const ASSOC_FOLDER: &str = "Associated Components";
const SUPPLEMENT_FOLDER: &str = "Bid Supplements";
const AWARD_FOLDER: &str = "Award";

pub struct RecordFlow {
    store: Arc<dyn MetadataStore>,
    transfer: FileTransfer,
    notes: Arc<NotesSink>,
    renders: RenderQueue,
    config: Arc<Config>,
}

impl RecordFlow {
    pub fn new(
        store: Arc<dyn MetadataStore>,
        notes: Arc<NotesSink>,
        renders: RenderQueue,
        config: Arc<Config>,
    ) -> Self {
        Self {
            store,
            transfer: FileTransfer::new(notes.clone()),
            notes,
            renders,
            config,
        }
    }

    /// Root folder of one record's output.
    pub fn record_folder(&self, record_id: &str) -> PathBuf {
        Path::new(&self.config.output_root).join(record_id)
    }

    /// Append a processing-failure note for a record. Used by the worker
    /// boundary when this flow errors out.
    pub async fn note_failure(&self, record_id: &str, message: &str) {
        self.notes
            .append(&self.record_folder(record_id), message)
            .await;
    }

    /// Run the full procedure for one record.
    ///
    /// A lookup error aborts the record's remaining steps; the caller turns
    /// it into a note and the job still counts as complete.
    pub async fn run(&self, job: &RecordJob, batch: &Arc<BatchState>) -> Result<()> {
        let record_folder = self.record_folder(&job.record_id);
        std::fs::create_dir_all(&record_folder)
            .with_context(|| format!("unable to create {}", record_folder.display()))?;

        debug!(
            "[record {}/{}] processing {} (status {})",
            job.sequence, job.batch_size, job.record_id, job.status
        );

        if job.categories.bid_notice {
            self.enqueue_render(
                RenderTarget::BidNotice {
                    record_id: job.record_id.clone(),
                },
                record_folder.clone(),
                &record_folder,
                batch,
            );
        }

        if job.categories.associated_components {
            self.process_associated(job, &record_folder, batch).await?;
        }

        if job.categories.supplements {
            self.process_supplements(job, &record_folder, batch).await?;
        }

        if (job.categories.award_notice || job.categories.award_documents)
            && job.status.is_awardable()
        {
            self.process_awards(job, &record_folder, batch).await?;
        }

        Ok(())
    }

    // ========== step 2: associated components ==========

    async fn process_associated(
        &self,
        job: &RecordJob,
        record_folder: &Path,
        batch: &Arc<BatchState>,
    ) -> Result<()> {
        let documents = self
            .store
            .associated_documents(&job.record_id)
            .await
            .with_context(|| format!("associated-document lookup for {}", job.record_id))?;

        if documents.is_empty() {
            debug!("record {}: no associated components", job.record_id);
            return Ok(());
        }

        let dest = record_folder.join(ASSOC_FOLDER);
        for document in &documents {
            match document.stored_file_name() {
                Some(file_name) => {
                    let source = Path::new(&self.config.tender_files_root).join(file_name);
                    self.transfer.copy_into(&source, &dest, record_folder).await;
                }
                None => {
                    if self.config.verbose_logging {
                        info!(
                            "record {}: non-electronic document {}, rendering as PDF",
                            job.record_id, document.document_id
                        );
                    }
                    self.enqueue_render(
                        RenderTarget::AssociatedComponent {
                            record_id: job.record_id.clone(),
                            document_id: document.document_id.clone(),
                        },
                        dest.clone(),
                        record_folder,
                        batch,
                    );
                }
            }
        }

        Ok(())
    }

    // ========== step 3: bid supplements ==========

    async fn process_supplements(
        &self,
        job: &RecordJob,
        record_folder: &Path,
        batch: &Arc<BatchState>,
    ) -> Result<()> {
        let supplements = self
            .store
            .supplements(&job.record_id)
            .await
            .with_context(|| format!("supplement lookup for {}", job.record_id))?;

        if supplements.is_empty() {
            debug!("record {}: no bid supplements", job.record_id);
            return Ok(());
        }

        let dest = record_folder.join(SUPPLEMENT_FOLDER);
        for supplement in &supplements {
            if let Some(file_name) = supplement.physical_name.as_deref() {
                let source = Path::new(&self.config.supplement_files_root).join(file_name);
                self.transfer.copy_into(&source, &dest, record_folder).await;
            } else {
                self.enqueue_render(
                    RenderTarget::Supplement {
                        record_id: job.record_id.clone(),
                        supplement_id: supplement.supplement_id.clone(),
                    },
                    dest.clone(),
                    record_folder,
                    batch,
                );

                // Supplements with full collection details also carry a
                // printable attachment page.
                if supplement.has_collection_details() {
                    self.enqueue_render(
                        RenderTarget::SupplementItem {
                            record_id: job.record_id.clone(),
                            supplement_id: supplement.supplement_id.clone(),
                            document_id: supplement
                                .document_id
                                .clone()
                                .unwrap_or_else(|| "0".to_string()),
                            document_name: supplement
                                .document_name
                                .clone()
                                .unwrap_or_default(),
                        },
                        dest.clone(),
                        record_folder,
                        batch,
                    );
                }
            }

            if let Some(link) = supplement.external_link() {
                info!(
                    "record {}: supplement {} points at external storage ({})",
                    job.record_id,
                    supplement.supplement_id,
                    truncate_text(link, 60)
                );
                self.notes
                    .append(
                        record_folder,
                        &format!(
                            "Bid Supplement No. {} contains files stored in an external drive. \
                             Please manually follow this link to download all available files: {}",
                            supplement.supplement_id, link
                        ),
                    )
                    .await;
            }
        }

        Ok(())
    }

    // ========== step 4: awards ==========

    async fn process_awards(
        &self,
        job: &RecordJob,
        record_folder: &Path,
        batch: &Arc<BatchState>,
    ) -> Result<()> {
        let award_ids = self
            .store
            .award_ids(&job.record_id)
            .await
            .with_context(|| format!("award lookup for {}", job.record_id))?;

        if award_ids.is_empty() {
            debug!("record {}: no awards", job.record_id);
            return Ok(());
        }

        for award_id in award_ids {
            let award_folder = record_folder.join(AWARD_FOLDER).join(&award_id);

            if job.categories.award_notice {
                self.enqueue_render(
                    RenderTarget::AwardNotice {
                        award_id: award_id.clone(),
                    },
                    award_folder.clone(),
                    record_folder,
                    batch,
                );
            }

            if job.categories.award_documents {
                let files = self
                    .store
                    .award_files(&award_id)
                    .await
                    .with_context(|| format!("award-file lookup for award {}", award_id))?;

                for file in files {
                    let source = Path::new(&self.config.award_files_root)
                        .join(&file.server_path)
                        .join(&file.file_name);
                    self.transfer
                        .copy_into(&source, &award_folder, record_folder)
                        .await;
                }
            }
        }

        Ok(())
    }

    fn enqueue_render(
        &self,
        target: RenderTarget,
        dest_folder: PathBuf,
        record_folder: &Path,
        batch: &Arc<BatchState>,
    ) {
        self.renders.submit(
            RenderRequest {
                target,
                dest_folder,
                record_folder: record_folder.to_path_buf(),
            },
            batch,
        );
    }
}
