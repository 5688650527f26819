//! Workflow layer - record-level procedures
//!
//! Composes service-layer abilities into the end-to-end treatment of one
//! record. The orchestrator layer above decides *which* records run and on
//! how many workers; this layer only knows how to process a single one.

pub mod record_flow;

pub use record_flow::RecordFlow;
