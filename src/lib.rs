//! # Bid Docs Extractor
//!
//! Bulk extraction of Philippine government procurement notice documents
//! into per-record folders, combining direct file-share copies with
//! page-to-PDF captures from an authenticated portal session.
//!
//! ## Architecture
//!
//! The system keeps a strict four-layer structure:
//!
//! ### ① Infrastructure
//! - `infrastructure/` - holds the scarce resource (the browser page) and
//!   exposes only capabilities
//! - `RenderSurface` - navigate / strip / capture-PDF ability over a page
//!
//! ### ② Services
//! - `services/` - "what I can do", each for a single record or file
//! - `MetadataStore` - record, document, supplement and award lookups
//! - `FileTransfer` - copy stored files into destination folders
//! - `NotesSink` - append to a record's IMPORTANT-NOTES.txt
//! - `RenderQueue` - submit render requests with batch accounting
//!
//! ### ③ Workflow
//! - `workflow/` - the complete treatment of one record
//! - `RecordFlow` - notice → components → supplements → awards
//!
//! ### ④ Orchestration
//! - `orchestrator/worker_pool` - N parallel record workers
//! - `orchestrator/render_actor` - single serialized session owner
//! - `orchestrator/extractor` - assembly, batch submission, shutdown

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// Re-export the commonly used types
pub use browser::Credentials;
pub use config::{Config, UrlSet};
pub use error::{AppError, AppResult};
pub use infrastructure::{PageSurface, RenderSurface};
pub use models::{
    BatchCriteria, BatchState, CategorySelection, RecordJob, RecordStatus, RenderRequest,
    RenderTarget,
};
pub use orchestrator::{BatchHandle, Extractor};
pub use services::{InMemoryStore, MetadataStore};
pub use workflow::RecordFlow;
