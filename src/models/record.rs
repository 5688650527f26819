//! Record-level domain types
//!
//! A "record" is one procurement/tender entry eligible for document
//! extraction. One [`RecordJob`] is dispatched per eligible record and is
//! immutable once enqueued.

use serde::Deserialize;
use std::fmt::Display;

/// Selection criteria for one extraction batch.
///
/// Mirrors the upstream query surface: organization, status, year. The
/// metadata store interprets these; the core only carries them.
#[derive(Debug, Clone, Default)]
pub struct BatchCriteria {
    pub organization_id: String,
    pub status: String,
    pub year: String,
}

/// Tender status of a record, as reported by the metadata store.
///
/// Parsing is lenient: upstream status strings vary ("Awarded",
/// "Awarded - Partial", ...), so matching is by substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Open,
    Closed,
    Awarded,
}

impl RecordStatus {
    /// Parse a raw status string from the store.
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        if lowered.contains("awarded") {
            RecordStatus::Awarded
        } else if lowered.contains("closed") {
            RecordStatus::Closed
        } else {
            RecordStatus::Open
        }
    }

    /// Award notices and award documents only exist for closed or awarded
    /// records.
    pub fn is_awardable(&self) -> bool {
        matches!(self, RecordStatus::Closed | RecordStatus::Awarded)
    }
}

impl Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecordStatus::Open => "Open",
            RecordStatus::Closed => "Closed",
            RecordStatus::Awarded => "Awarded",
        };
        write!(f, "{}", name)
    }
}

/// Which of the five document categories a batch should extract.
///
/// One flag per category, mirroring the submission surface's checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySelection {
    pub bid_notice: bool,
    pub associated_components: bool,
    pub supplements: bool,
    pub award_notice: bool,
    pub award_documents: bool,
}

impl CategorySelection {
    pub fn all() -> Self {
        Self {
            bid_notice: true,
            associated_components: true,
            supplements: true,
            award_notice: true,
            award_documents: true,
        }
    }

    pub fn none() -> Self {
        Self {
            bid_notice: false,
            associated_components: false,
            supplements: false,
            award_notice: false,
            award_documents: false,
        }
    }
}

impl Default for CategorySelection {
    fn default() -> Self {
        Self::all()
    }
}

/// One unit of work dispatched per eligible record.
///
/// Created by the dispatcher from a materialized batch result set, consumed
/// exactly once by one worker, never re-enqueued.
#[derive(Debug, Clone)]
pub struct RecordJob {
    /// Opaque record identifier (the tender reference id).
    pub record_id: String,
    /// Status at batch-selection time.
    pub status: RecordStatus,
    /// Requested document categories.
    pub categories: CategorySelection,
    /// 1-based position in the batch, for progress reporting.
    pub sequence: usize,
    /// Total records in the batch.
    pub batch_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_is_lenient() {
        assert_eq!(RecordStatus::parse("Awarded"), RecordStatus::Awarded);
        assert_eq!(
            RecordStatus::parse("Closed - Cancelled"),
            RecordStatus::Closed
        );
        assert_eq!(RecordStatus::parse("Open"), RecordStatus::Open);
        assert_eq!(RecordStatus::parse("unknown"), RecordStatus::Open);
    }

    #[test]
    fn only_closed_and_awarded_are_awardable() {
        assert!(RecordStatus::Awarded.is_awardable());
        assert!(RecordStatus::Closed.is_awardable());
        assert!(!RecordStatus::Open.is_awardable());
    }
}
