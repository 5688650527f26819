//! Orchestration layer - batch-level coordination
//!
//! ## Structure
//! - `extractor`: top-level assembly of browser, workers and render actor
//! - `dispatcher`: batch validation and intake
//! - `worker_pool`: N parallel record workers over a shared channel
//! - `render_actor`: single serialized owner of the browser session
//! - `progress`: completion tracking handle returned to callers
//!
//! Layering rule: this layer composes the workflow below it and is the only
//! layer that spawns tasks or owns channels.

pub mod dispatcher;
pub mod extractor;
pub mod progress;
pub mod render_actor;
pub mod worker_pool;

pub use dispatcher::Dispatcher;
pub use extractor::Extractor;
pub use progress::BatchHandle;
pub use render_actor::RenderActor;
pub use worker_pool::{QueuedJob, RecordWorkerPool};
