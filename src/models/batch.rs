//! Batch completion bookkeeping
//!
//! Tracks both pipeline stages of one batch: outstanding record jobs
//! (parallel stage) and outstanding render requests (serialized stage).
//! Completion of the batch means both counts reached zero.
//!
//! The ordering invariant that makes this race-free: a worker increments the
//! render count at enqueue time, strictly before it decrements its own job
//! count. So once `outstanding_jobs` is zero, every render request the batch
//! will ever produce has already been counted, and "queue empty" is never used
//! as a completion signal.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::futures::Notified;
use tokio::sync::Notify;

/// Shared counters for one batch.
#[derive(Debug)]
pub struct BatchState {
    total_jobs: usize,
    outstanding_jobs: AtomicUsize,
    outstanding_renders: AtomicUsize,
    completed_records: AtomicUsize,
    complete_fired: AtomicBool,
    notify: Notify,
}

impl BatchState {
    pub fn new(total_jobs: usize) -> Self {
        Self {
            total_jobs,
            outstanding_jobs: AtomicUsize::new(total_jobs),
            outstanding_renders: AtomicUsize::new(0),
            completed_records: AtomicUsize::new(0),
            complete_fired: AtomicBool::new(false),
            notify: Notify::new(),
        }
    }

    pub fn total_jobs(&self) -> usize {
        self.total_jobs
    }

    /// Record that a worker enqueued one render request.
    ///
    /// Must be called before the owning job is marked finished.
    pub fn render_submitted(&self) {
        self.outstanding_renders.fetch_add(1, Ordering::SeqCst);
    }

    /// Record that the render actor finished one request (success or logged
    /// failure).
    pub fn render_finished(&self) {
        self.outstanding_renders.fetch_sub(1, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Record that one job finished (success or logged failure). Returns the
    /// new completed-records count for "i of N" reporting.
    pub fn job_finished(&self) -> usize {
        let done = self.completed_records.fetch_add(1, Ordering::SeqCst) + 1;
        self.outstanding_jobs.fetch_sub(1, Ordering::SeqCst);
        self.notify.notify_waiters();
        done
    }

    pub fn completed_records(&self) -> usize {
        self.completed_records.load(Ordering::SeqCst)
    }

    pub fn is_complete(&self) -> bool {
        self.outstanding_jobs.load(Ordering::SeqCst) == 0
            && self.outstanding_renders.load(Ordering::SeqCst) == 0
    }

    /// Claims the one-shot completion signal. True for exactly one caller.
    pub fn mark_fired(&self) -> bool {
        !self.complete_fired.swap(true, Ordering::SeqCst)
    }

    /// Register for the next counter transition. The returned future must be
    /// created before re-checking [`is_complete`](Self::is_complete) to avoid
    /// losing a wakeup.
    pub fn notified(&self) -> Notified<'_> {
        self.notify.notified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_only_when_both_stages_drain() {
        let state = BatchState::new(1);
        assert!(!state.is_complete());

        state.render_submitted();
        state.job_finished();
        assert!(!state.is_complete());

        state.render_finished();
        assert!(state.is_complete());
    }

    #[test]
    fn completion_signal_fires_once() {
        let state = BatchState::new(0);
        assert!(state.is_complete());
        assert!(state.mark_fired());
        assert!(!state.mark_fired());
    }

    #[test]
    fn job_finished_reports_sequence() {
        let state = BatchState::new(3);
        assert_eq!(state.job_finished(), 1);
        assert_eq!(state.job_finished(), 2);
        assert_eq!(state.job_finished(), 3);
        assert_eq!(state.completed_records(), 3);
    }
}
