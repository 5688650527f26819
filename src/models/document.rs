//! Per-record document availability types returned by the metadata store.

use serde::Deserialize;

/// Marker identifying field values that point at externally hosted files
/// this system cannot fetch itself. Such values become manual-follow-up
/// notes instead of copies or renders.
pub const EXTERNAL_STORAGE_MARKER: &str = "https://drive.google.com/";

/// One associated component of a record.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentMeta {
    pub document_id: String,
    #[serde(default)]
    pub name: String,
    /// Physical file name on network storage, when the document was
    /// uploaded electronically.
    #[serde(default)]
    pub physical_name: Option<String>,
    /// Whether the document is stored electronically and can be copied
    /// directly instead of rendered.
    #[serde(default)]
    pub electronic: bool,
}

impl DocumentMeta {
    /// A document is directly copyable only when it is electronic and has a
    /// stored physical name.
    pub fn stored_file_name(&self) -> Option<&str> {
        if self.electronic {
            self.physical_name.as_deref()
        } else {
            None
        }
    }
}

/// One bid supplement of a record, possibly with an attached document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplementMeta {
    pub supplement_id: String,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub document_name: Option<String>,
    #[serde(default)]
    pub physical_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub collection_contact: Option<String>,
    #[serde(default)]
    pub collection_contact_id: Option<String>,
    #[serde(default)]
    pub collection_point: Option<String>,
    #[serde(default)]
    pub special_instruction: Option<String>,
}

impl SupplementMeta {
    /// Supplements carrying full collection details also have a printable
    /// attachment page, rendered as a separate PDF.
    pub fn has_collection_details(&self) -> bool {
        [
            &self.collection_contact,
            &self.collection_contact_id,
            &self.collection_point,
            &self.special_instruction,
        ]
        .iter()
        .all(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
    }

    /// Returns the first field value containing the external-storage
    /// marker, if any.
    pub fn external_link(&self) -> Option<&str> {
        [self.description.as_deref(), self.remarks.as_deref()]
            .into_iter()
            .flatten()
            .find(|value| value.contains(EXTERNAL_STORAGE_MARKER))
    }
}

/// One stored file attached to an award notice.
#[derive(Debug, Clone, Deserialize)]
pub struct AwardFile {
    /// Directory below the award files root.
    #[serde(default)]
    pub server_path: String,
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_link_detection() {
        let mut supp = SupplementMeta {
            supplement_id: "77".into(),
            ..Default::default()
        };
        assert!(supp.external_link().is_none());

        supp.remarks = Some("see https://drive.google.com/drive/u/0/x".into());
        assert_eq!(
            supp.external_link(),
            Some("see https://drive.google.com/drive/u/0/x")
        );
    }

    #[test]
    fn collection_details_require_all_fields() {
        let mut supp = SupplementMeta {
            supplement_id: "1".into(),
            collection_contact: Some("J. Cruz".into()),
            collection_contact_id: Some("42".into()),
            collection_point: Some("Main office".into()),
            ..Default::default()
        };
        assert!(!supp.has_collection_details());

        supp.special_instruction = Some("bring id".into());
        assert!(supp.has_collection_details());
    }

    #[test]
    fn non_electronic_documents_are_not_copyable() {
        let doc = DocumentMeta {
            document_id: "9".into(),
            name: "specs".into(),
            physical_name: Some("TenderDoc_9.pdf".into()),
            electronic: false,
        };
        assert!(doc.stored_file_name().is_none());
    }
}
