//! Turning an uploaded file into a [`Document`].

use std::collections::HashMap;

use crate::document::{Document, DocumentRef};
use crate::error::Result;

/// Extracts the text of an uploaded file.
///
/// The returned [`Document`] uses the reference's content-derived id, so
/// every chunk produced from it is keyed by that id.
pub trait DocumentLoader: Send + Sync {
    /// Load and extract the text of `document`.
    fn load(&self, document: &DocumentRef) -> Result<Document>;
}

/// Metadata attached to every document produced by a loader.
pub(crate) fn source_metadata(document: &DocumentRef) -> HashMap<String, String> {
    HashMap::from([("source".to_string(), document.name.clone())])
}

#[cfg(feature = "pdf")]
pub use pdf::PdfLoader;

#[cfg(feature = "pdf")]
mod pdf {
    use tracing::{debug, error};

    use super::{DocumentLoader, source_metadata};
    use crate::document::{Document, DocumentRef};
    use crate::error::{RagError, Result};

    /// Extracts text from PDF files with `pdf-extract`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct PdfLoader;

    impl PdfLoader {
        fn error(document: &DocumentRef, message: String) -> RagError {
            RagError::LoadError { path: document.path.display().to_string(), message }
        }
    }

    impl DocumentLoader for PdfLoader {
        fn load(&self, document: &DocumentRef) -> Result<Document> {
            let bytes = std::fs::read(&document.path)
                .map_err(|e| Self::error(document, format!("failed to read file: {e}")))?;
            let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
                error!(document.id = %document.id, error = %e, "PDF text extraction failed");
                Self::error(document, format!("PDF parse error: {e}"))
            })?;

            debug!(document.id = %document.id, chars = text.len(), "extracted PDF text");
            Ok(Document {
                id: document.id.clone(),
                text,
                metadata: source_metadata(document),
                source_uri: Some(document.path.display().to_string()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_records_upload_name() {
        let doc = DocumentRef::new("abc", "/tmp/abc_report.pdf", "report.pdf");
        assert_eq!(source_metadata(&doc)["source"], "report.pdf");
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn pdf_loader_reports_unreadable_file() {
        let doc = DocumentRef::new("abc", "/definitely/missing.pdf", "missing.pdf");
        let err = PdfLoader.load(&doc).unwrap_err();
        assert!(matches!(err, crate::error::RagError::LoadError { .. }));
    }
}
