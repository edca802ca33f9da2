//! # wxdoc-rag
//!
//! Document question answering for the wxdoc assistant: PDF loading,
//! chunking, embedding, vector storage and answer synthesis.
//!
//! External services sit behind traits ([`EmbeddingProvider`],
//! [`VectorStore`], [`LanguageModel`], [`DocumentLoader`]) so the pipeline can
//! be exercised with in-memory doubles.
//!
//! ## Features
//!
//! - `openai`: [`openai::OpenAIEmbeddingProvider`] and [`openai::OpenAIChatModel`]
//! - `qdrant`: [`qdrant::QdrantVectorStore`]
//! - `pdf`: [`PdfLoader`]

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod inmemory;
pub mod llm;
pub mod loader;
pub mod pipeline;
pub mod qa;
pub mod vectorstore;

#[cfg(feature = "openai")]
pub mod openai;
#[cfg(feature = "qdrant")]
pub mod qdrant;

pub use chunking::{CharacterChunker, Chunker, FixedSizeChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Chunk, Document, DocumentRef, SearchResult, document_id};
pub use embedding::{EmbeddingProvider, dimensions_for_model};
pub use error::{RagError, Result};
pub use inmemory::InMemoryVectorStore;
pub use llm::LanguageModel;
pub use loader::DocumentLoader;
#[cfg(feature = "pdf")]
pub use loader::PdfLoader;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use qa::{NO_DOCUMENT_MESSAGE, RetrievalQa};
pub use vectorstore::VectorStore;
