//! Application configuration read from the environment.

use std::str::FromStr;
use std::time::Duration;

use wxdoc_rag::RagConfig;
use wxdoc_rag::config::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_TOP_K};
use wxdoc_rag::openai::{DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL, OPENAI_API_BASE};
use wxdoc_rag::qdrant::QdrantSettings;
use wxdoc_weather::{DEFAULT_FALLBACK_COUNTRY, OPENWEATHER_API_BASE, Units, WeatherConfig};

use crate::error::{AssistantError, Result};

/// Collection used when `QDRANT_COLLECTION` is unset.
pub const DEFAULT_COLLECTION: &str = "pdf_chunks";

/// Per-call timeout used when `WXDOC_HTTP_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

const DEFAULT_QDRANT_HOST: &str = "localhost";
const DEFAULT_QDRANT_PORT: u16 = 6334;

/// Everything the binary needs to build its clients.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Key for both chat completions and embeddings.
    pub openai_api_key: Option<String>,
    /// Chat model used for answer synthesis.
    pub chat_model: String,
    /// Embedding model; also decides the collection dimensionality.
    pub embedding_model: String,
    /// OpenAI-compatible API base.
    pub openai_base_url: String,
    /// Vector database connection.
    pub qdrant: QdrantSettings,
    /// Collection holding every uploaded document's chunks.
    pub collection: String,
    /// Chunking and retrieval parameters.
    pub rag: RagConfig,
    /// Weather client settings.
    pub weather: WeatherConfig,
    /// Timeout applied to every outbound call.
    pub timeout: Duration,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Config`] for unparsable numbers or units,
    /// and for retrieval parameters that fail validation.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timeout = Duration::from_secs(parse(&var, "WXDOC_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?);

        let qdrant_url = match var("QDRANT_URL") {
            Some(url) => url,
            None => {
                let host = var("QDRANT_HOST").unwrap_or_else(|| DEFAULT_QDRANT_HOST.to_string());
                let port = parse(&var, "QDRANT_PORT", DEFAULT_QDRANT_PORT)?;
                format!("http://{host}:{port}")
            }
        };
        let qdrant = QdrantSettings { url: qdrant_url, api_key: var("QDRANT_API_KEY"), timeout };

        let rag = RagConfig::builder()
            .chunk_size(parse(&var, "WXDOC_CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?)
            .chunk_overlap(parse(&var, "WXDOC_CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP)?)
            .top_k(parse(&var, "WXDOC_TOP_K", DEFAULT_TOP_K)?)
            .build()
            .map_err(|e| AssistantError::Config(e.to_string()))?;

        let units = match var("WEATHER_UNITS") {
            Some(units) => Units::from_str(&units).map_err(|e| AssistantError::Config(e.to_string()))?,
            None => Units::default(),
        };
        let weather = WeatherConfig {
            api_key: var("OPENWEATHER_API_KEY"),
            base_url: var("OPENWEATHER_BASE_URL").unwrap_or_else(|| OPENWEATHER_API_BASE.to_string()),
            units,
            fallback_country: lookup("WEATHER_FALLBACK_COUNTRY")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| DEFAULT_FALLBACK_COUNTRY.to_string()),
            default_city: var("DEFAULT_CITY"),
            timeout,
        };

        Ok(Self {
            openai_api_key: var("OPENAI_API_KEY"),
            chat_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            embedding_model: var("OPENAI_EMBED_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            openai_base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| OPENAI_API_BASE.to_string()),
            qdrant,
            collection: var("QDRANT_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            rag,
            weather,
            timeout,
        })
    }

    /// One `NAME: ✅/❌` line per required API key.
    pub fn keys_report(&self) -> String {
        let mark = |set: bool| if set { "✅" } else { "❌" };
        format!(
            "OPENAI_API_KEY: {}\nOPENWEATHER_API_KEY: {}",
            mark(self.openai_api_key.is_some()),
            mark(self.weather.api_key().is_some()),
        )
    }
}

fn parse<T: FromStr>(var: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match var(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| AssistantError::Config(format!("{name}={raw:?} is invalid: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config(&[]).unwrap();
        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.chat_model, "gpt-4o-mini");
        assert_eq!(config.embedding_model, "text-embedding-3-small");
        assert_eq!(config.qdrant.url, "http://localhost:6334");
        assert_eq!(config.collection, "pdf_chunks");
        assert_eq!(config.rag.chunk_size, 500);
        assert_eq!(config.rag.chunk_overlap, 50);
        assert_eq!(config.rag.top_k, 3);
        assert_eq!(config.weather.units, Units::Metric);
        assert_eq!(config.weather.fallback_country, "IN");
        assert_eq!(config.timeout, Duration::from_secs(20));
    }

    #[test]
    fn qdrant_url_wins_over_host_and_port() {
        let config = config(&[
            ("QDRANT_URL", "https://cluster.example:6334"),
            ("QDRANT_HOST", "ignored"),
            ("QDRANT_API_KEY", "secret"),
        ])
        .unwrap();
        assert_eq!(config.qdrant.url, "https://cluster.example:6334");
        assert_eq!(config.qdrant.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn qdrant_host_and_port_compose_url() {
        let config = config(&[("QDRANT_HOST", "qdrant"), ("QDRANT_PORT", "7334")]).unwrap();
        assert_eq!(config.qdrant.url, "http://qdrant:7334");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config(&[("OPENAI_API_KEY", "  "), ("DEFAULT_CITY", "")]).unwrap();
        assert!(config.openai_api_key.is_none());
        assert!(config.weather.default_city.is_none());
    }

    #[test]
    fn empty_fallback_country_disables_retry_qualifier() {
        let config = config(&[("WEATHER_FALLBACK_COUNTRY", "")]).unwrap();
        assert_eq!(config.weather.fallback_country, "");
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(matches!(config(&[("WXDOC_TOP_K", "three")]), Err(AssistantError::Config(_))));
        assert!(matches!(config(&[("WEATHER_UNITS", "kelvin")]), Err(AssistantError::Config(_))));
        assert!(matches!(
            config(&[("WXDOC_CHUNK_SIZE", "40"), ("WXDOC_CHUNK_OVERLAP", "40")]),
            Err(AssistantError::Config(_))
        ));
    }

    #[test]
    fn keys_report_marks_each_key() {
        let config = config(&[("OPENWEATHER_API_KEY", "abc")]).unwrap();
        assert_eq!(config.keys_report(), "OPENAI_API_KEY: ❌\nOPENWEATHER_API_KEY: ✅");
    }
}
