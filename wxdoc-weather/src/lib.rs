//! # wxdoc-weather
//!
//! Current conditions plus a short forecast from OpenWeather, rendered as a
//! few lines of text.
//!
//! ```rust,ignore
//! use wxdoc_weather::{Units, WeatherClient, WeatherConfig};
//!
//! let client = WeatherClient::openweather(WeatherConfig {
//!     api_key: std::env::var("OPENWEATHER_API_KEY").ok(),
//!     ..WeatherConfig::default()
//! })?;
//! println!("{}", client.fetch_weather("Pune", Units::Metric).await);
//! ```

pub mod city;
pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod report;

pub use city::sanitize_city;
pub use client::{MISSING_KEY_MESSAGE, SPECIFY_CITY_MESSAGE, WeatherClient};
pub use config::{DEFAULT_FALLBACK_COUNTRY, OPENWEATHER_API_BASE, Units, WeatherConfig};
pub use error::{Result, WeatherError};
pub use provider::{Endpoint, OpenWeatherProvider, ProviderReply, WeatherProvider, WeatherRequest};
