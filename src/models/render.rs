//! Render targets and render requests
//!
//! Every page the serialized session can be asked to capture is one variant
//! of [`RenderTarget`], carrying only the identifiers its navigation address
//! needs. This keeps the five address templates exhaustiveness-checked
//! instead of string-keyed.

use crate::config::UrlSet;
use std::path::PathBuf;

/// One of the five renderable document categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// Printable bid notice abstract of a record.
    BidNotice { record_id: String },
    /// Printable award notice abstract of one award.
    AwardNotice { award_id: String },
    /// Non-electronic associated component of a record.
    AssociatedComponent {
        record_id: String,
        document_id: String,
    },
    /// Non-electronic bid supplement.
    Supplement {
        record_id: String,
        supplement_id: String,
    },
    /// Printable attachment page of a supplement with collection details.
    SupplementItem {
        record_id: String,
        supplement_id: String,
        document_id: String,
        document_name: String,
    },
}

impl RenderTarget {
    /// Build the navigation address for this target.
    ///
    /// The query-string shapes are fixed by the rendering collaborator; only
    /// the base addresses come from configuration.
    pub fn navigation_url(&self, urls: &UrlSet) -> String {
        match self {
            RenderTarget::BidNotice { record_id } => {
                format!("{}?refid={}", urls.bid_notice_url, record_id)
            }
            RenderTarget::AwardNotice { award_id } => {
                format!("{}?awardID={}", urls.award_notice_url, award_id)
            }
            RenderTarget::AssociatedComponent {
                record_id,
                document_id,
            } => format!(
                "{}?directFrom=&refId={}&DocId={}&PageFrom=&OrgName=&OrgID=0\
                 &linkFrom=&PreviousPageFrom=ViewBidNoticeAssocCompUI",
                urls.assoc_comp_url, record_id, document_id
            ),
            RenderTarget::Supplement {
                record_id,
                supplement_id,
            } => format!(
                "{}?refId={}&bidSuppID={}&directFrom=BidAbstract",
                urls.bid_sup_url, record_id, supplement_id
            ),
            RenderTarget::SupplementItem {
                record_id,
                supplement_id,
                document_id,
                ..
            } => format!(
                "{}?refId={}&DocId={}&directFrom=BidAbstract&BidSupplID={}",
                urls.bid_sup_item_url, record_id, document_id, supplement_id
            ),
        }
    }

    /// Output file name convention per category.
    pub fn pdf_file_name(&self) -> String {
        match self {
            RenderTarget::BidNotice { .. } => "bid_notice_abstract.pdf".to_string(),
            RenderTarget::AwardNotice { .. } => "award_notice_abstract.pdf".to_string(),
            RenderTarget::AssociatedComponent { document_id, .. } => {
                format!("{}.pdf", document_id)
            }
            RenderTarget::Supplement { supplement_id, .. } => {
                format!("{}.pdf", supplement_id)
            }
            RenderTarget::SupplementItem {
                supplement_id,
                document_id,
                document_name,
                ..
            } => format!("{}_{}_{}.pdf", supplement_id, document_id, document_name),
        }
    }

    /// The two notice abstracts are already print-formatted; every other
    /// category carries a page banner that is stripped before capture.
    pub fn strips_page_banner(&self) -> bool {
        !matches!(
            self,
            RenderTarget::BidNotice { .. } | RenderTarget::AwardNotice { .. }
        )
    }

    /// Category name for logs and notes.
    pub fn category_name(&self) -> &'static str {
        match self {
            RenderTarget::BidNotice { .. } => "bid notice",
            RenderTarget::AwardNotice { .. } => "award notice",
            RenderTarget::AssociatedComponent { .. } => "associated component",
            RenderTarget::Supplement { .. } => "bid supplement",
            RenderTarget::SupplementItem { .. } => "bid supplement item",
        }
    }
}

/// One unit of work for the serialized render actor.
///
/// Consumed exactly once, strictly serially, in FIFO arrival order.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub target: RenderTarget,
    /// Folder the PDF lands in; created before capture if absent.
    pub dest_folder: PathBuf,
    /// The record's root folder, where failure notes are appended.
    pub record_folder: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UrlSet;

    #[test]
    fn bid_notice_url_and_file_name() {
        let urls = UrlSet::default();
        let target = RenderTarget::BidNotice {
            record_id: "12345".into(),
        };
        let url = target.navigation_url(&urls);
        assert!(url.starts_with(&urls.bid_notice_url));
        assert!(url.ends_with("?refid=12345"));
        assert_eq!(target.pdf_file_name(), "bid_notice_abstract.pdf");
        assert!(!target.strips_page_banner());
    }

    #[test]
    fn supplement_item_url_carries_all_ids() {
        let urls = UrlSet::default();
        let target = RenderTarget::SupplementItem {
            record_id: "r1".into(),
            supplement_id: "s2".into(),
            document_id: "d3".into(),
            document_name: "terms".into(),
        };
        let url = target.navigation_url(&urls);
        assert!(url.contains("refId=r1"));
        assert!(url.contains("DocId=d3"));
        assert!(url.contains("BidSupplID=s2"));
        assert_eq!(target.pdf_file_name(), "s2_d3_terms.pdf");
        assert!(target.strips_page_banner());
    }

    #[test]
    fn award_notice_uses_award_id() {
        let urls = UrlSet::default();
        let target = RenderTarget::AwardNotice {
            award_id: "a9".into(),
        };
        assert!(target.navigation_url(&urls).ends_with("?awardID=a9"));
        assert!(!target.strips_page_banner());
    }
}
