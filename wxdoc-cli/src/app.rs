//! Building the production clients from an [`AppConfig`].

use std::sync::Arc;

use tracing::{info, warn};
use wxdoc_rag::openai::{OpenAIChatModel, OpenAIEmbeddingProvider};
use wxdoc_rag::qdrant::QdrantVectorStore;
use wxdoc_rag::{EmbeddingProvider, PdfLoader, RagPipeline, RetrievalQa};
use wxdoc_weather::WeatherClient;

use crate::config::AppConfig;
use crate::error::Result;
use crate::router::Router;

/// OpenWeather for weather questions; OpenAI embeddings, OpenAI chat and
/// Qdrant for document questions.
///
/// Without `OPENAI_API_KEY` the document side is left out and only weather
/// questions can be answered.
pub fn build_router(config: &AppConfig) -> Result<Router> {
    let weather = Arc::new(WeatherClient::openweather(config.weather.clone())?);

    let qa = match config.openai_api_key.as_deref() {
        Some(api_key) => Some(Arc::new(build_qa(config, api_key)?)),
        None => {
            warn!("OPENAI_API_KEY not set, document questions are disabled");
            None
        }
    };

    Ok(Router::new(weather, qa))
}

fn build_qa(config: &AppConfig, api_key: &str) -> Result<RetrievalQa> {
    let embedder = OpenAIEmbeddingProvider::new(api_key)?
        .with_model(&config.embedding_model)
        .with_base_url(&config.openai_base_url)
        .with_timeout(config.timeout)?;
    let model = OpenAIChatModel::new(api_key)?
        .with_model(&config.chat_model)
        .with_base_url(&config.openai_base_url)
        .with_timeout(config.timeout)?;
    let store = QdrantVectorStore::connect(&config.qdrant)?;

    info!(
        chat_model = %config.chat_model,
        embedding_model = embedder.model(),
        dimensions = embedder.dimensions(),
        qdrant = %config.qdrant.url,
        collection = %config.collection,
        "document QA configured"
    );

    let pipeline = RagPipeline::builder()
        .config(config.rag.clone())
        .embedding_provider(Arc::new(embedder))
        .vector_store(Arc::new(store))
        .build()?;

    Ok(RetrievalQa::new(Arc::new(pipeline), Arc::new(model), Arc::new(PdfLoader), config.collection.clone()))
}
