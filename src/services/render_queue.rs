//! Render queue handle - service layer
//!
//! The single authenticated session lives behind this queue: workers enqueue
//! render requests here and never touch the session themselves. Submission
//! also does the progress bookkeeping: the outstanding-render count is
//! incremented before the command is sent, which is what lets the batch
//! monitor trust "jobs drained implies all renders counted".

use crate::models::{BatchState, RenderRequest};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

/// One queued unit of work for the render actor.
pub struct RenderCommand {
    pub request: RenderRequest,
    pub batch: Arc<BatchState>,
}

/// Cloneable sending side of the render actor's private queue.
#[derive(Clone)]
pub struct RenderQueue {
    tx: mpsc::UnboundedSender<RenderCommand>,
}

impl RenderQueue {
    /// Create the queue; the receiver goes to the render actor.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RenderCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Enqueue one render request on behalf of `batch`.
    ///
    /// Counts the request as outstanding before sending. If the actor is
    /// gone the request is dropped and immediately un-counted so the batch
    /// can still complete.
    pub fn submit(&self, request: RenderRequest, batch: &Arc<BatchState>) {
        batch.render_submitted();
        let command = RenderCommand {
            request,
            batch: Arc::clone(batch),
        };
        if let Err(err) = self.tx.send(command) {
            let dropped = err.0;
            warn!(
                "render queue closed, dropping {} request for {}",
                dropped.request.target.category_name(),
                dropped.request.record_folder.display()
            );
            dropped.batch.render_finished();
        }
    }
}
