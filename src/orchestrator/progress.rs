//! Batch progress handle
//!
//! A `BatchHandle` is what `Dispatcher::submit_batch` returns to the caller.
//! It wraps the batch's shared counters and offers a single blocking
//! question: "is every job done AND every render drained?"

use crate::models::BatchState;
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub struct BatchHandle {
    state: Arc<BatchState>,
}

impl BatchHandle {
    pub(crate) fn new(state: Arc<BatchState>) -> Self {
        Self { state }
    }

    /// Number of records fully processed so far.
    pub fn completed_records(&self) -> usize {
        self.state.completed_records()
    }

    /// True once both the job count and the outstanding-render count hit zero.
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Wait until the batch is fully complete, then return the number of
    /// completed records.
    ///
    /// Registers for notification *before* re-checking the counters, so a
    /// wakeup between the check and the await cannot be lost.
    pub async fn wait_complete(&self) -> usize {
        loop {
            let notified = self.state.notified();
            if self.state.is_complete() {
                if self.state.mark_fired() {
                    info!(
                        "🏁 batch complete: {} record(s) processed, all renders drained",
                        self.state.completed_records()
                    );
                }
                return self.state.completed_records();
            }
            notified.await;
        }
    }
}
