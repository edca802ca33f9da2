//! Weather client configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// OpenWeather 2.5 API base.
pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// Country appended to a bare city name when the first lookup returns 404.
pub const DEFAULT_FALLBACK_COUNTRY: &str = "IN";

/// Measurement system requested from the provider and used for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Celsius and metres per second.
    #[default]
    Metric,
    /// Fahrenheit and miles per hour.
    Imperial,
}

impl Units {
    /// Value of the provider's `units` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Suffix appended to temperatures.
    pub fn temperature_suffix(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    /// Unit written after wind speeds.
    pub fn speed_unit(self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            other => Err(WeatherError::Config(format!(
                "unknown units '{other}', expected 'metric' or 'imperial'"
            ))),
        }
    }
}

/// Settings for [`WeatherClient`](crate::WeatherClient).
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherConfig {
    /// Provider API key; `None` makes every lookup return the key-missing message.
    pub api_key: Option<String>,
    /// API base, without trailing slash.
    pub base_url: String,
    /// Units used when the caller does not choose.
    pub units: Units,
    /// Country qualifier for the one-time 404 retry.
    pub fallback_country: String,
    /// City used when the query names none.
    pub default_city: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: OPENWEATHER_API_BASE.to_string(),
            units: Units::Metric,
            fallback_country: DEFAULT_FALLBACK_COUNTRY.to_string(),
            default_city: None,
            timeout: Duration::from_secs(20),
        }
    }
}

impl WeatherConfig {
    /// The API key, if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_units_case_insensitively() {
        assert_eq!("Metric".parse::<Units>().unwrap(), Units::Metric);
        assert_eq!(" imperial ".parse::<Units>().unwrap(), Units::Imperial);
        assert!("kelvin".parse::<Units>().is_err());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = WeatherConfig { api_key: Some("   ".into()), ..WeatherConfig::default() };
        assert_eq!(config.api_key(), None);
    }
}
