//! Embedding provider trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::Result;

/// Vector size of the small OpenAI embedding models.
pub const SMALL_EMBEDDING_DIMENSIONS: usize = 1536;

/// Vector size of `text-embedding-3-large`.
pub const LARGE_EMBEDDING_DIMENSIONS: usize = 3072;

/// Return the vector size produced by an embedding model, by name.
///
/// Any `*3-large*` model yields 3072-dimensional vectors; everything else is
/// assumed to be 1536-dimensional.
pub fn dimensions_for_model(model: &str) -> usize {
    if model.to_ascii_lowercase().contains("3-large") {
        LARGE_EMBEDDING_DIMENSIONS
    } else {
        SMALL_EMBEDDING_DIMENSIONS
    }
}

/// A provider that generates vector embeddings from text input.
///
/// The vector collection is created with [`dimensions`](EmbeddingProvider::dimensions),
/// so implementations must report exactly the size the backend returns.
/// The default [`embed_batch`](EmbeddingProvider::embed_batch) calls
/// [`embed`](EmbeddingProvider::embed) once per input; backends with native
/// batching should override it.
///
/// # Example
///
/// ```rust,ignore
/// use wxdoc_rag::EmbeddingProvider;
///
/// let embedding = provider.embed("monsoon onset dates").await?;
/// assert_eq!(embedding.len(), provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs, in input order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_models_use_3072_dimensions() {
        assert_eq!(dimensions_for_model("text-embedding-3-large"), 3072);
        assert_eq!(dimensions_for_model("TEXT-EMBEDDING-3-LARGE"), 3072);
        assert_eq!(dimensions_for_model("text-embedding-3-small"), 1536);
        assert_eq!(dimensions_for_model("text-embedding-ada-002"), 1536);
    }
}
