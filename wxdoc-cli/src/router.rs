//! Query classification and dispatch.
//!
//! A query mentioning any weather keyword goes to the weather client, every
//! other query to document question answering. The keyword match is a
//! heuristic: "rainbow" routes to weather, "is it cold outside" does not.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::info;
use wxdoc_rag::{DocumentRef, NO_DOCUMENT_MESSAGE, RetrievalQa};
use wxdoc_weather::{SPECIFY_CITY_MESSAGE, WeatherClient, sanitize_city};

use crate::error::{AssistantError, Result};

/// Substrings that send a query down the weather path.
pub const WEATHER_KEYWORDS: [&str; 7] =
    ["weather", "temperature", "humidity", "forecast", "rain", "sunny", "climate"];

/// Returned for a document question when no OpenAI key is configured.
pub const MISSING_OPENAI_KEY_MESSAGE: &str =
    "OpenAI API key missing. Set OPENAI_API_KEY in .env.";

static CITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\bin|\bat|\bfor)\s+(\p{L}[\p{L}\s\-\.,]+)").expect("city pattern is valid")
});

/// Which backend answers a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Answered by the weather client.
    Weather,
    /// Answered from the uploaded document.
    Document,
}

/// Case-insensitive keyword classification.
pub fn classify(query: &str) -> Route {
    let lowered = query.to_lowercase();
    if WEATHER_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
        Route::Weather
    } else {
        Route::Document
    }
}

/// The phrase after the first `in`/`at`/`for`, sanitized.
///
/// ```
/// use wxdoc_cli::router::extract_city;
///
/// assert_eq!(extract_city("What's the weather in Pune?").as_deref(), Some("Pune"));
/// assert_eq!(extract_city("Forecast for new york city").as_deref(), Some("new york city"));
/// assert_eq!(extract_city("What is the weather?"), None);
/// ```
pub fn extract_city(query: &str) -> Option<String> {
    let phrase = CITY_PATTERN.captures(query)?.get(1)?.as_str();
    Some(sanitize_city(phrase)).filter(|city| !city.is_empty())
}

/// Sends each query to the weather client or the document QA chain.
pub struct Router {
    weather: Arc<WeatherClient>,
    qa: Option<Arc<RetrievalQa>>,
}

impl Router {
    /// `qa` is `None` when no language model is configured; document
    /// questions then fail with a configuration error.
    pub fn new(weather: Arc<WeatherClient>, qa: Option<Arc<RetrievalQa>>) -> Self {
        Self { weather, qa }
    }

    /// The document QA chain, if configured.
    pub fn qa(&self) -> Option<&Arc<RetrievalQa>> {
        self.qa.as_ref()
    }

    /// Answer `query`, using `document` for document questions.
    ///
    /// Weather questions never fail: a missing city, key or provider outage
    /// all come back as explanatory text.
    ///
    /// # Errors
    ///
    /// Document questions propagate retrieval and model failures, and fail
    /// with [`AssistantError::Config`] when no language model is configured.
    pub async fn answer(&self, query: &str, document: Option<&DocumentRef>) -> Result<String> {
        let route = classify(query);
        info!(?route, has_document = document.is_some(), "routing query");

        match route {
            Route::Weather => {
                let default_city = self.weather.config().default_city.as_deref();
                let Some(city) = extract_city(query)
                    .or_else(|| default_city.map(sanitize_city).filter(|c| !c.is_empty()))
                else {
                    return Ok(SPECIFY_CITY_MESSAGE.to_string());
                };
                info!(city = %city, "weather lookup");
                Ok(self.weather.fetch_weather_default_units(&city).await)
            }
            Route::Document => {
                let Some(document) = document else {
                    return Ok(NO_DOCUMENT_MESSAGE.to_string());
                };
                let qa = self
                    .qa
                    .as_ref()
                    .ok_or_else(|| AssistantError::Config(MISSING_OPENAI_KEY_MESSAGE.to_string()))?;
                Ok(qa.answer_query(query, Some(document)).await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_keyword_in_any_case() {
        assert_eq!(classify("What's the WEATHER in Pune?"), Route::Weather);
        assert_eq!(classify("Will it rain tomorrow"), Route::Weather);
        assert_eq!(classify("Tell me about quantum computing."), Route::Document);
        assert_eq!(classify(""), Route::Document);
    }

    #[test]
    fn extracts_city_after_preposition() {
        assert_eq!(extract_city("humidity at San Francisco.").as_deref(), Some("San Francisco"));
        assert_eq!(extract_city("weather IN mumbai").as_deref(), Some("mumbai"));
        assert_eq!(extract_city("weather in Paris, FR?").as_deref(), Some("Paris, FR"));
    }

    #[test]
    fn extracts_accented_city_names() {
        assert_eq!(extract_city("weather in Zürich").as_deref(), Some("Zürich"));
        assert_eq!(extract_city("weather in São Paulo?").as_deref(), Some("São Paulo"));
        assert_eq!(extract_city("forecast for Ōsaka").as_deref(), Some("Ōsaka"));
    }

    #[test]
    fn preposition_must_be_a_whole_word() {
        assert_eq!(extract_city("rain forecast, within reason"), None);
        assert_eq!(extract_city("weather in 2024"), None);
    }
}
