//! Qdrant vector store backend.
//!
//! Provides [`QdrantVectorStore`] which implements [`VectorStore`] using
//! the [qdrant-client](https://docs.rs/qdrant-client) crate over gRPC.
//!
//! This module is only available when the `qdrant` feature is enabled.
//!
//! # Example
//!
//! ```rust,ignore
//! use wxdoc_rag::qdrant::{QdrantSettings, QdrantVectorStore};
//!
//! let store = QdrantVectorStore::connect(&QdrantSettings::default())?;
//! store.create_collection("pdf_chunks", 1536).await?;
//! ```

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, DeletePointsBuilder, Distance, Filter, PointStruct,
    PointsIdsList, SearchPointsBuilder, UpsertPointsBuilder, Value as QdrantValue,
    VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// Default gRPC endpoint of a local Qdrant.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Connection settings for [`QdrantVectorStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct QdrantSettings {
    /// Full gRPC URL, e.g. `http://localhost:6334`.
    pub url: String,
    /// Optional API key for Qdrant Cloud.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for QdrantSettings {
    fn default() -> Self {
        Self { url: DEFAULT_QDRANT_URL.to_string(), api_key: None, timeout: Duration::from_secs(20) }
    }
}

impl QdrantSettings {
    /// Settings for a `host:port` pair.
    pub fn from_host(host: &str, port: u16) -> Self {
        Self { url: format!("http://{host}:{port}"), ..Self::default() }
    }
}

/// A [`VectorStore`] backed by [Qdrant](https://qdrant.tech/).
///
/// Collections use cosine distance. Each point's payload holds the chunk
/// text, its `document_id`, the original chunk id and the chunk metadata.
/// Point ids are UUID v5 values derived from the chunk id, so ingesting the
/// same document twice overwrites its points instead of duplicating them.
pub struct QdrantVectorStore {
    client: Qdrant,
}

impl QdrantVectorStore {
    /// Connect to Qdrant with the given settings.
    pub fn connect(settings: &QdrantSettings) -> Result<Self> {
        let client = Qdrant::from_url(&settings.url)
            .api_key(settings.api_key.clone())
            .timeout(settings.timeout)
            .build()
            .map_err(Self::map_err)?;
        debug!(url = %settings.url, "configured qdrant client");
        Ok(Self { client })
    }

    fn map_err(e: qdrant_client::QdrantError) -> RagError {
        RagError::VectorStoreError { backend: "qdrant".to_string(), message: e.to_string() }
    }

    /// Deterministic point id for a chunk id.
    fn point_id(chunk_id: &str) -> String {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, chunk_id.as_bytes()).to_string()
    }

    /// Extract a string from a Qdrant payload value.
    fn extract_string(value: &QdrantValue) -> Option<String> {
        match &value.kind {
            Some(Kind::StringValue(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn to_point(chunk: &Chunk) -> Result<PointStruct> {
        let payload = Payload::try_from(json!({
            "text": chunk.text,
            "document_id": chunk.document_id,
            "chunk_id": chunk.id,
            "metadata": chunk.metadata,
        }))
        .map_err(Self::map_err)?;

        Ok(PointStruct::new(Self::point_id(&chunk.id), chunk.embedding.clone(), payload))
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()> {
        let collections = self.client.list_collections().await.map_err(Self::map_err)?;
        if collections.collections.iter().any(|c| c.name == name) {
            debug!(collection = name, "qdrant collection already exists, skipping creation");
            return Ok(());
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(name)
                    .vectors_config(VectorParamsBuilder::new(dimensions as u64, Distance::Cosine)),
            )
            .await
            .map_err(Self::map_err)?;

        debug!(collection = name, dimensions, "created qdrant collection");
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        self.client.delete_collection(name).await.map_err(Self::map_err)?;
        debug!(collection = name, "deleted qdrant collection");
        Ok(())
    }

    async fn upsert(&self, collection: &str, chunks: &[Chunk]) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        let points = chunks.iter().map(Self::to_point).collect::<Result<Vec<_>>>()?;

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection, points).wait(true))
            .await
            .map_err(Self::map_err)?;

        debug!(collection, count = chunks.len(), "upserted chunks to qdrant");
        Ok(())
    }

    async fn delete(&self, collection: &str, ids: &[&str]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let point_ids: Vec<qdrant_client::qdrant::PointId> =
            ids.iter().map(|id| Self::point_id(id).into()).collect();

        self.client
            .delete_points(
                DeletePointsBuilder::new(collection)
                    .points(PointsIdsList { ids: point_ids })
                    .wait(true),
            )
            .await
            .map_err(Self::map_err)?;

        debug!(collection, count = ids.len(), "deleted points from qdrant");
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
        document_id: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        let mut request = SearchPointsBuilder::new(collection, embedding.to_vec(), top_k as u64)
            .with_payload(true);
        if let Some(id) = document_id {
            request = request.filter(Filter::must([Condition::matches("document_id", id.to_string())]));
        }

        let response = self.client.search_points(request).await.map_err(Self::map_err)?;

        let results = response
            .result
            .into_iter()
            .map(|scored| {
                let payload_string =
                    |key: &str| scored.payload.get(key).and_then(Self::extract_string).unwrap_or_default();

                let metadata: HashMap<String, String> = scored
                    .payload
                    .get("metadata")
                    .and_then(|v| match &v.kind {
                        Some(Kind::StructValue(s)) => Some(
                            s.fields
                                .iter()
                                .filter_map(|(k, v)| Self::extract_string(v).map(|s| (k.clone(), s)))
                                .collect(),
                        ),
                        _ => None,
                    })
                    .unwrap_or_default();

                SearchResult {
                    chunk: Chunk {
                        id: payload_string("chunk_id"),
                        text: payload_string("text"),
                        embedding: vec![],
                        metadata,
                        document_id: payload_string("document_id"),
                    },
                    score: scored.score,
                }
            })
            .collect::<Vec<_>>();

        debug!(collection, hits = results.len(), "qdrant search completed");
        Ok(results)
    }
}
