//! Offline doubles for the weather provider, embedder, model and PDF loader.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wxdoc_cli::Router;
use wxdoc_rag::{
    Document, DocumentLoader, DocumentRef, EmbeddingProvider, InMemoryVectorStore, LanguageModel,
    RagConfig, RagError, RagPipeline, RetrievalQa,
};
use wxdoc_weather::{
    Endpoint, ProviderReply, WeatherClient, WeatherConfig, WeatherProvider, WeatherRequest,
};

pub const DIM: usize = 16;
pub const COLLECTION: &str = "test_chunks";

/// Answers every lookup for a known city with fixed conditions, 404 otherwise.
#[derive(Default)]
pub struct CannedWeather {
    pub cities: Mutex<Vec<String>>,
}

#[async_trait]
impl WeatherProvider for CannedWeather {
    async fn get(
        &self,
        endpoint: Endpoint,
        request: &WeatherRequest<'_>,
    ) -> wxdoc_weather::Result<ProviderReply> {
        self.cities.lock().unwrap().push(request.city.to_string());
        let known = ["Pune", "Pune,IN", "Mumbai", "San Francisco", "Zürich"];
        if !known.contains(&request.city) {
            return Ok(ProviderReply { status: 404, body: r#"{"message":"city not found"}"#.into() });
        }
        let body = match endpoint {
            Endpoint::Current => format!(
                r#"{{"name":"{}","weather":[{{"description":"clear sky"}}],"main":{{"temp":25,"humidity":40}},"wind":{{"speed":2}}}}"#,
                request.city.trim_end_matches(",IN")
            ),
            Endpoint::Forecast => r#"{"list":[]}"#.to_string(),
        };
        Ok(ProviderReply { status: 200, body })
    }
}

/// Character-trigram hashing, good enough to rank overlapping text first.
pub struct TrigramEmbedder;

#[async_trait]
impl EmbeddingProvider for TrigramEmbedder {
    async fn embed(&self, text: &str) -> wxdoc_rag::Result<Vec<f32>> {
        let chars: Vec<char> = text.to_lowercase().chars().collect();
        let mut v = vec![0.0f32; DIM];
        for window in chars.windows(3) {
            let hash = window.iter().fold(7u32, |acc, c| acc.wrapping_mul(31).wrapping_add(*c as u32));
            v[hash as usize % DIM] += 1.0;
        }
        if v.iter().all(|x| *x == 0.0) {
            v[0] = 1.0;
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// Echoes a canned answer, or fails like a rejected API key.
pub struct ScriptedModel {
    pub answer: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn answering(answer: &str) -> Self {
        Self { answer: Some(answer.to_string()), prompts: Mutex::new(Vec::new()) }
    }

    pub fn failing() -> Self {
        Self { answer: None, prompts: Mutex::new(Vec::new()) }
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> wxdoc_rag::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer.clone().ok_or_else(|| RagError::ModelError {
            provider: "scripted".into(),
            message: "API returned 401 Unauthorized".into(),
        })
    }
}

/// Treats the uploaded file as UTF-8 text instead of parsing a PDF.
#[derive(Default)]
pub struct TextFileLoader {
    pub loads: AtomicUsize,
}

impl DocumentLoader for TextFileLoader {
    fn load(&self, document: &DocumentRef) -> wxdoc_rag::Result<Document> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let text = std::fs::read_to_string(&document.path).map_err(|e| RagError::LoadError {
            path: document.path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Document { id: document.id.clone(), text, metadata: HashMap::new(), source_uri: None })
    }
}

pub struct Harness {
    pub router: Router,
    pub weather: Arc<CannedWeather>,
    pub model: Arc<ScriptedModel>,
    pub loader: Arc<TextFileLoader>,
}

pub fn weather_config() -> WeatherConfig {
    WeatherConfig { api_key: Some("test-key".into()), ..WeatherConfig::default() }
}

pub fn harness(weather_config: WeatherConfig, model: ScriptedModel) -> Harness {
    let weather = Arc::new(CannedWeather::default());
    let model = Arc::new(model);
    let loader = Arc::new(TextFileLoader::default());

    let pipeline = RagPipeline::builder()
        .config(RagConfig::builder().chunk_size(120).chunk_overlap(10).top_k(2).build().unwrap())
        .embedding_provider(Arc::new(TrigramEmbedder))
        .vector_store(Arc::new(InMemoryVectorStore::new()))
        .build()
        .unwrap();
    let qa = RetrievalQa::new(Arc::new(pipeline), model.clone(), loader.clone(), COLLECTION);

    let client = WeatherClient::new(weather.clone(), weather_config);
    Harness { router: Router::new(Arc::new(client), Some(Arc::new(qa))), weather, model, loader }
}
