//! The user's session: the active document and the error boundary.

use std::path::{Path, PathBuf};

use tempfile::TempPath;
use tracing::{error, info, warn};
use wxdoc_rag::{DocumentRef, document_id};

use crate::error::{AssistantError, Result};
use crate::router::Router;

/// Returned for a blank query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a query.";

/// Returned after the active document is cleared.
pub const CLEARED_MESSAGE: &str = "PDF cleared. Upload a new one for RAG.";

/// The active document and the copy it was read from.
///
/// The copy is deleted when this is dropped.
struct Upload {
    document: DocumentRef,
    copy: TempPath,
}

/// Holds at most one uploaded document and turns every failure into text.
///
/// The uploaded copy lives as long as it is the active document, and never
/// outlives the session.
pub struct Session {
    router: Router,
    active: Option<Upload>,
    upload_dir: PathBuf,
}

impl Session {
    /// Start a session whose uploads are copied to the system temp directory.
    pub fn new(router: Router) -> Self {
        Self { router, active: None, upload_dir: std::env::temp_dir() }
    }

    /// Copy uploads to `dir` instead.
    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = dir.into();
        self
    }

    /// The active document, if any.
    pub fn document(&self) -> Option<&DocumentRef> {
        self.active.as_ref().map(|upload| &upload.document)
    }

    /// Make the PDF at `path` the active document.
    ///
    /// The file is copied to `<upload dir>/<first 8 hex of its SHA-256>_<name>`
    /// with spaces in the name replaced by `_`. A previously active document
    /// is forgotten and its copy removed. Returns a confirmation, or
    /// `Failed to save PDF: ...` leaving the previous document active.
    pub async fn upload(&mut self, path: impl AsRef<Path>) -> String {
        let path = path.as_ref();
        let upload = match self.save_copy(path) {
            Ok(upload) => upload,
            Err(e) => {
                error!(path = %path.display(), error = %e, "upload failed");
                return format!("Failed to save PDF: {e}");
            }
        };

        let document = &upload.document;
        info!(document.id = %document.id, path = %document.path.display(), "document uploaded");
        let reply = format!(
            "PDF uploaded: {}\ndoc_id: {}… (retrieval filtered to this file)",
            document.name,
            document.short_id()
        );

        if let Some(previous) = self.active.replace(upload) {
            self.discard(previous).await;
        }
        reply
    }

    fn save_copy(&self, source: &Path) -> Result<Upload> {
        let failure = |message: String| AssistantError::Upload { path: source.display().to_string(), message };

        let is_pdf = source.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(failure("only .pdf files can be uploaded".to_string()));
        }
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().replace(' ', "_"))
            .ok_or_else(|| failure("not a file".to_string()))?;

        let bytes = std::fs::read(source).map_err(|e| failure(e.to_string()))?;
        let id = document_id(&bytes);
        let target = self.upload_dir.join(format!("{}_{file_name}", &id[..8]));
        std::fs::write(&target, &bytes).map_err(|e| failure(e.to_string()))?;

        Ok(Upload { document: DocumentRef::new(id, target.clone(), file_name), copy: TempPath::from_path(target) })
    }

    /// Forget a document that is no longer active and delete its copy.
    async fn discard(&self, upload: Upload) {
        let Upload { document, copy } = upload;
        let still_active = self.document().is_some_and(|active| active.id == document.id);

        if !still_active {
            if let Some(qa) = self.router.qa() {
                qa.forget(&document.id).await;
            }
        }
        if self.document().is_some_and(|active| active.path == document.path) {
            // Re-upload of the same file: the new upload owns the copy now.
            let _ = copy.keep();
        } else if let Err(e) = copy.close() {
            warn!(path = %document.path.display(), error = %e, "could not remove uploaded copy");
        }
        info!(document.id = %document.id, "document discarded");
    }

    /// Drop the active document and its temporary copy.
    pub async fn clear(&mut self) -> String {
        if let Some(upload) = self.active.take() {
            self.discard(upload).await;
        }
        CLEARED_MESSAGE.to_string()
    }

    /// Answer `query`; never fails.
    ///
    /// Blank queries get [`EMPTY_QUERY_MESSAGE`] and any error is rendered as
    /// `Error while answering: ...`.
    pub async fn ask(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return EMPTY_QUERY_MESSAGE.to_string();
        }

        match self.router.answer(query, self.document()).await {
            Ok(answer) => answer,
            Err(e) => {
                error!(error = %e, "query failed");
                format!("Error while answering: {e}")
            }
        }
    }
}
