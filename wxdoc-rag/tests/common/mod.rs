//! Deterministic stand-ins for the hosted services.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use wxdoc_rag::{
    Document, DocumentLoader, DocumentRef, EmbeddingProvider, LanguageModel, RagError, Result,
};

pub const DIM: usize = 32;

/// Bag-of-words embedding: each lowercase word bumps one hashed bucket.
pub struct WordHashEmbedder {
    pub calls: AtomicUsize,
}

impl WordHashEmbedder {
    pub fn new() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl EmbeddingProvider for WordHashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut v = vec![0.0f32; DIM];
        for word in text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
            let hash = word
                .to_lowercase()
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            v[(hash % DIM as u64) as usize] += 1.0;
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// Embedder that always fails, as if the API key were rejected.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(RagError::EmbeddingError {
            provider: "test".into(),
            message: "API returned 401 Unauthorized: invalid key".into(),
        })
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// Model that records prompts and answers with a canned string.
pub struct RecordingModel {
    pub prompts: Mutex<Vec<String>>,
    pub answer: String,
}

impl RecordingModel {
    pub fn new(answer: &str) -> Self {
        Self { prompts: Mutex::new(Vec::new()), answer: answer.to_string() }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LanguageModel for RecordingModel {
    fn name(&self) -> &str {
        "recording-model"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

/// Loader serving fixed text per document id.
pub struct StaticLoader {
    pub texts: HashMap<String, String>,
    pub loads: AtomicUsize,
    pub threads: Mutex<Vec<std::thread::ThreadId>>,
}

impl StaticLoader {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            texts: entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            loads: AtomicUsize::new(0),
            threads: Mutex::new(Vec::new()),
        }
    }
}

impl DocumentLoader for StaticLoader {
    fn load(&self, document: &DocumentRef) -> Result<Document> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.threads.lock().unwrap().push(std::thread::current().id());
        let text = self.texts.get(&document.id).cloned().ok_or_else(|| RagError::LoadError {
            path: document.path.display().to_string(),
            message: "no such test document".into(),
        })?;
        Ok(Document { id: document.id.clone(), text, metadata: HashMap::new(), source_uri: None })
    }
}

pub fn doc_ref(id: &str) -> DocumentRef {
    DocumentRef::new(id, format!("/tmp/{id}.pdf"), format!("{id}.pdf"))
}
