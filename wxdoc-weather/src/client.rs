//! The weather client: lookup with country fallback, then summary.

use std::sync::Arc;

use tracing::{info, warn};

use crate::city::sanitize_city;
use crate::config::{Units, WeatherConfig};
use crate::error::{Result, WeatherError};
use crate::provider::{Endpoint, OpenWeatherProvider, ProviderReply, WeatherProvider, WeatherRequest};
use crate::report::{self, CurrentConditions, Forecast};

/// Returned when no API key is configured.
pub const MISSING_KEY_MESSAGE: &str =
    "OpenWeather API key missing. Set OPENWEATHER_API_KEY in .env.";

/// Returned when neither the query nor the configuration names a city.
pub const SPECIFY_CITY_MESSAGE: &str = "Please specify a city for the weather.";

fn decode<T: serde::de::DeserializeOwned>(endpoint: Endpoint, body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| WeatherError::Decode { endpoint: endpoint.to_string(), message: e.to_string() })
}

/// Fetches current conditions and a short forecast and renders them as text.
///
/// [`fetch_weather`](WeatherClient::fetch_weather) never fails: missing
/// configuration, provider errors and unreadable payloads all come back as
/// explanatory strings.
pub struct WeatherClient {
    provider: Arc<dyn WeatherProvider>,
    config: WeatherConfig,
}

impl WeatherClient {
    /// Create a client over an arbitrary provider.
    pub fn new(provider: Arc<dyn WeatherProvider>, config: WeatherConfig) -> Self {
        Self { provider, config }
    }

    /// Create a client talking to OpenWeather at `config.base_url`.
    pub fn openweather(config: WeatherConfig) -> Result<Self> {
        let provider = OpenWeatherProvider::new(&config.base_url, config.timeout)?;
        Ok(Self::new(Arc::new(provider), config))
    }

    /// The active configuration.
    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Summarize the weather for `city` in the given units.
    ///
    /// A blank `city` falls back to the configured default city. When the
    /// bare name is not found (404) and carries no `,` qualifier, the lookup
    /// is retried once as `<city>,<fallback_country>`. A failed forecast only
    /// drops the forecast lines.
    pub async fn fetch_weather(&self, city: &str, units: Units) -> String {
        let Some(api_key) = self.config.api_key() else {
            warn!("weather lookup without API key");
            return MISSING_KEY_MESSAGE.to_string();
        };

        let mut city = sanitize_city(city);
        if city.is_empty() {
            city = self.config.default_city.as_deref().map(sanitize_city).unwrap_or_default();
        }
        if city.is_empty() {
            return SPECIFY_CITY_MESSAGE.to_string();
        }

        let reply = match self.lookup(Endpoint::Current, &city, api_key, units).await {
            Ok(reply) => reply,
            Err(e) => return format!("Sorry, couldn't fetch weather data: {e}"),
        };
        if !reply.is_ok() {
            warn!(city = %city, status = reply.status, "current conditions lookup failed");
            return format!("Sorry, couldn't fetch weather data ({}): {}", reply.status, reply.message());
        }
        let current: CurrentConditions = match decode(Endpoint::Current, &reply.body) {
            Ok(current) => current,
            Err(e) => return format!("Sorry, couldn't read weather data: {e}"),
        };

        let forecast = self.forecast(&city, api_key, units).await;
        info!(city = %city, %units, forecast_steps = forecast.list.len(), "weather summary ready");
        report::render(&current, &forecast, &city, units)
    }

    /// Summarize the weather using the configured default units.
    pub async fn fetch_weather_default_units(&self, city: &str) -> String {
        self.fetch_weather(city, self.config.units).await
    }

    async fn forecast(&self, city: &str, api_key: &str, units: Units) -> Forecast {
        let reply = match self.lookup(Endpoint::Forecast, city, api_key, units).await {
            Ok(reply) if reply.is_ok() => reply,
            Ok(reply) => {
                warn!(city, status = reply.status, "forecast unavailable");
                return Forecast::default();
            }
            Err(e) => {
                warn!(city, error = %e, "forecast request failed");
                return Forecast::default();
            }
        };

        decode(Endpoint::Forecast, &reply.body).unwrap_or_else(|e| {
            warn!(city, error = %e, "forecast unreadable");
            Forecast::default()
        })
    }

    /// One lookup with the single country-qualified retry on 404.
    async fn lookup(
        &self,
        endpoint: Endpoint,
        city: &str,
        api_key: &str,
        units: Units,
    ) -> Result<ProviderReply> {
        let reply = self.provider.get(endpoint, &WeatherRequest { city, api_key, units }).await?;
        if reply.status != 404 || city.contains(',') || self.config.fallback_country.is_empty() {
            return Ok(reply);
        }

        let qualified = format!("{city},{}", self.config.fallback_country);
        info!(%endpoint, city, retry = %qualified, "city not found, retrying with country");
        self.provider.get(endpoint, &WeatherRequest { city: &qualified, api_key, units }).await
    }
}
