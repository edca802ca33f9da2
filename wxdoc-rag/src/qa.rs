//! Question answering over an uploaded document.
//!
//! [`RetrievalQa`] ties the pieces together: it loads the active document,
//! ingests it once, retrieves the closest chunks of that document for the
//! question and "stuffs" them into a single prompt for the language model.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::document::{DocumentRef, SearchResult};
use crate::error::{RagError, Result};
use crate::llm::LanguageModel;
use crate::loader::DocumentLoader;
use crate::pipeline::RagPipeline;

/// Returned instead of an answer when no document has been uploaded.
pub const NO_DOCUMENT_MESSAGE: &str = "Please upload a PDF first for RAG-based QA.";

/// Render the answer prompt: every retrieved chunk, blank-line separated, then the question.
///
/// Retrieved text is inserted as-is; braces in it are never treated as placeholders.
pub fn render_prompt(results: &[SearchResult], question: &str) -> String {
    let context =
        results.iter().map(|r| r.chunk.text.as_str()).collect::<Vec<_>>().join("\n\n");
    format!(
        "Use the following pieces of context to answer the question at the end. \
If you don't know the answer, just say that you don't know, don't try to make up an answer.\n\n\
{context}\n\nQuestion: {question}\nHelpful Answer:"
    )
}

/// Retrieval-augmented question answering over the session's document.
pub struct RetrievalQa {
    pipeline: Arc<RagPipeline>,
    model: Arc<dyn LanguageModel>,
    loader: Arc<dyn DocumentLoader>,
    collection: String,
    ingested: Mutex<HashSet<String>>,
}

impl RetrievalQa {
    /// Create a QA chain storing chunks in `collection`.
    pub fn new(
        pipeline: Arc<RagPipeline>,
        model: Arc<dyn LanguageModel>,
        loader: Arc<dyn DocumentLoader>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            pipeline,
            model,
            loader,
            collection: collection.into(),
            ingested: Mutex::new(HashSet::new()),
        }
    }

    /// Whether `document_id` has already been ingested by this process.
    pub async fn is_ingested(&self, document_id: &str) -> bool {
        self.ingested.lock().await.contains(document_id)
    }

    /// Stop treating `document_id` as ingested, e.g. after the user clears it.
    ///
    /// Its chunks stay in the collection; ingesting it again overwrites them.
    pub async fn forget(&self, document_id: &str) {
        self.ingested.lock().await.remove(document_id);
    }

    /// Load, chunk, embed and store `document` unless that already happened.
    ///
    /// Returns the number of chunks written (0 when it was already ingested).
    ///
    /// # Errors
    ///
    /// Propagates loader, embedding and vector store failures.
    pub async fn ingest(&self, document: &DocumentRef) -> Result<usize> {
        let mut ingested = self.ingested.lock().await;
        if ingested.contains(&document.id) {
            debug!(document.id = %document.id, "document already ingested");
            return Ok(0);
        }

        self.pipeline.ensure_collection(&self.collection).await?;
        let loader = Arc::clone(&self.loader);
        let target = document.clone();
        let loaded = tokio::task::spawn_blocking(move || loader.load(&target))
            .await
            .map_err(|e| RagError::LoadError {
                path: document.path.display().to_string(),
                message: format!("loader task failed: {e}"),
            })??;
        let chunks = self.pipeline.ingest(&self.collection, &loaded).await?;

        ingested.insert(document.id.clone());
        Ok(chunks.len())
    }

    /// Answer `query` from the content of `document`.
    ///
    /// With no document the fixed [`NO_DOCUMENT_MESSAGE`] is returned and
    /// nothing is ingested. Otherwise the document is ingested on first use,
    /// the `top_k` closest chunks of that document are retrieved, and the
    /// model's completion is returned verbatim.
    ///
    /// # Errors
    ///
    /// Any provider failure is returned as-is; no partial answer is produced.
    pub async fn answer_query(&self, query: &str, document: Option<&DocumentRef>) -> Result<String> {
        let Some(document) = document else {
            return Ok(NO_DOCUMENT_MESSAGE.to_string());
        };

        self.ingest(document).await?;

        let results = self.pipeline.query(&self.collection, query, Some(&document.id)).await?;
        let prompt = render_prompt(&results, query);
        debug!(model = self.model.name(), context_chunks = results.len(), "synthesizing answer");

        let answer = self.model.complete(&prompt).await.map_err(|e| match e {
            RagError::ModelError { .. } => e,
            other => RagError::ModelError {
                provider: self.model.name().to_string(),
                message: other.to_string(),
            },
        })?;

        info!(document.id = %document.id, answer_len = answer.len(), "answered document query");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::document::Chunk;

    fn hit(text: &str) -> SearchResult {
        SearchResult {
            chunk: Chunk {
                id: "d_0".into(),
                text: text.into(),
                embedding: vec![],
                metadata: HashMap::new(),
                document_id: "d".into(),
            },
            score: 1.0,
        }
    }

    #[test]
    fn prompt_stuffs_all_chunks_before_question() {
        let prompt = render_prompt(&[hit("first part"), hit("second part")], "What is covered?");
        assert!(prompt.contains("first part\n\nsecond part"));
        assert!(prompt.ends_with("Question: What is covered?\nHelpful Answer:"));
        assert!(!prompt.contains("{context}"));
    }

    #[test]
    fn placeholders_inside_chunks_are_left_alone() {
        let prompt = render_prompt(
            &[hit("Use the {question} token in templates."), hit("{context} stays too")],
            "What token?",
        );
        assert!(prompt.contains("Use the {question} token in templates."));
        assert!(prompt.contains("{context} stays too"));
        assert!(prompt.ends_with("Question: What token?\nHelpful Answer:"));
    }
}
