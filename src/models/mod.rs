//! Domain model types shared across all layers.

pub mod batch;
pub mod document;
pub mod record;
pub mod render;

pub use batch::BatchState;
pub use document::{AwardFile, DocumentMeta, SupplementMeta, EXTERNAL_STORAGE_MARKER};
pub use record::{BatchCriteria, CategorySelection, RecordJob, RecordStatus};
pub use render::{RenderRequest, RenderTarget};
