//! Batch dispatcher
//!
//! Validates a batch of record jobs and feeds them to the worker pool's
//! intake channel, handing back a `BatchHandle` for completion tracking.

use crate::error::{AppResult, BatchError};
use crate::models::{BatchState, RecordJob};
use crate::orchestrator::progress::BatchHandle;
use crate::orchestrator::worker_pool::QueuedJob;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

pub struct Dispatcher {
    intake: UnboundedSender<QueuedJob>,
}

impl Dispatcher {
    pub(crate) fn new(intake: UnboundedSender<QueuedJob>) -> Self {
        Self { intake }
    }

    /// Submit a batch of jobs for processing.
    ///
    /// Rejects empty batches and a closed intake up front, so a batch is
    /// either enqueued whole or not at all.
    pub fn submit_batch(&self, jobs: Vec<RecordJob>) -> AppResult<BatchHandle> {
        if jobs.is_empty() {
            return Err(BatchError::EmptyBatch.into());
        }
        if self.intake.is_closed() {
            return Err(BatchError::IntakeClosed.into());
        }

        let batch = Arc::new(BatchState::new(jobs.len()));
        info!("📦 batch accepted: {} record(s)", jobs.len());

        for job in jobs {
            if self
                .intake
                .send(QueuedJob {
                    job,
                    batch: batch.clone(),
                })
                .is_err()
            {
                return Err(BatchError::IntakeClosed.into());
            }
        }

        Ok(BatchHandle::new(batch))
    }
}
