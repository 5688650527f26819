//! Service layer: single-purpose capabilities used by the record workflow.
//!
//! Each service answers "what can I do" for exactly one concern: metadata
//! lookups, file copies, note appends, render submission. None of them
//! spawns tasks or knows about batches beyond the counters it is handed.

pub mod file_transfer;
pub mod metadata;
pub mod notes;
pub mod render_queue;

pub use file_transfer::FileTransfer;
pub use metadata::{InMemoryStore, MetadataStore};
pub use notes::{NotesSink, NOTES_FILE_NAME};
pub use render_queue::{RenderCommand, RenderQueue};
