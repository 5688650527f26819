//! Record worker pool
//!
//! N identical workers pull jobs from a shared intake channel and run each
//! through the `RecordFlow`. A job failure is contained at the worker
//! boundary: it is logged, noted in the record's folder, and the job still
//! counts toward batch completion.

use crate::models::{BatchState, RecordJob};
use crate::workflow::RecordFlow;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// One intake-channel item: the job plus the batch it belongs to.
pub struct QueuedJob {
    pub job: RecordJob,
    pub batch: Arc<BatchState>,
}

pub struct RecordWorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl RecordWorkerPool {
    /// Spawn `worker_count` workers over a shared intake receiver.
    pub fn spawn(
        worker_count: usize,
        intake: UnboundedReceiver<QueuedJob>,
        flow: Arc<RecordFlow>,
        cancel: CancellationToken,
    ) -> Self {
        let intake = Arc::new(Mutex::new(intake));
        let handles = (0..worker_count)
            .map(|worker_id| {
                let intake = intake.clone();
                let flow = flow.clone();
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    worker_loop(worker_id, intake, flow, cancel).await;
                })
            })
            .collect();
        Self { handles }
    }

    /// Wait for every worker to exit. Workers exit when the intake channel
    /// closes or the cancellation token fires.
    pub async fn join(self) {
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}

async fn worker_loop(
    worker_id: usize,
    intake: Arc<Mutex<UnboundedReceiver<QueuedJob>>>,
    flow: Arc<RecordFlow>,
    cancel: CancellationToken,
) {
    loop {
        // Hold the receiver lock only while waiting for the next job.
        let next = {
            let mut rx = intake.lock().await;
            tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                queued = rx.recv() => queued,
            }
        };

        let Some(queued) = next else {
            break;
        };

        if let Err(e) = flow.run(&queued.job, &queued.batch).await {
            error!(
                "❌ worker {}: record {} failed: {:#}",
                worker_id, queued.job.record_id, e
            );
            flow.note_failure(
                &queued.job.record_id,
                &format!("Processing failed for record {}: {:#}", queued.job.record_id, e),
            )
            .await;
        }

        // Renders were submitted before this point, so the completion check
        // can never observe jobs-zero with uncounted renders.
        let done = queued.batch.job_finished();
        info!(
            "[{}/{}] ✓ finished record {}",
            done,
            queued.batch.total_jobs(),
            queued.job.record_id
        );
    }
}
