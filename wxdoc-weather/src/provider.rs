//! Transport to the weather data provider.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::config::Units;
use crate::error::{Result, WeatherError};

/// Provider endpoints used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `/weather`: current conditions.
    Current,
    /// `/forecast`: 3-hourly forecast.
    Forecast,
}

impl Endpoint {
    /// Path segment appended to the API base.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Query parameters of a single lookup.
#[derive(Debug, Clone, Copy)]
pub struct WeatherRequest<'a> {
    /// City, optionally qualified (`Pune,IN`).
    pub city: &'a str,
    /// Provider API key.
    pub api_key: &'a str,
    /// Requested units.
    pub units: Units,
}

/// Raw HTTP outcome; status handling is left to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl ProviderReply {
    /// Whether the provider answered 200.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// The provider's `message` field, falling back to the raw body.
    pub fn message(&self) -> String {
        serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| self.body.clone())
    }
}

/// Issues lookups against a weather provider.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch `endpoint` for `request`. Non-success statuses are returned as
    /// replies, only transport failures are errors.
    async fn get(&self, endpoint: Endpoint, request: &WeatherRequest<'_>) -> Result<ProviderReply>;
}

/// [`WeatherProvider`] for the OpenWeather REST API.
pub struct OpenWeatherProvider {
    client: reqwest::Client,
    base_url: String,
}

impl OpenWeatherProvider {
    /// Create a provider for `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url: base_url.into().trim_end_matches('/').to_string() })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get(&self, endpoint: Endpoint, request: &WeatherRequest<'_>) -> Result<ProviderReply> {
        let url = format!("{}/{}", self.base_url, endpoint.path());
        debug!(%endpoint, city = request.city, units = %request.units, "weather request");

        let response = self
            .client
            .get(&url)
            .query(&[("q", request.city), ("appid", request.api_key), ("units", request.units.as_str())])
            .send()
            .await
            .map_err(|e| {
                error!(%endpoint, error = %e, "weather request failed");
                WeatherError::Transport { endpoint: endpoint.to_string(), message: e.to_string() }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| WeatherError::Transport {
            endpoint: endpoint.to_string(),
            message: format!("failed to read body: {e}"),
        })?;

        Ok(ProviderReply { status, body })
    }
}
