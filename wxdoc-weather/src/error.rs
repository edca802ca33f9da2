//! Error types for the `wxdoc-weather` crate.
//!
//! These never reach the user directly: [`WeatherClient::fetch_weather`](crate::WeatherClient::fetch_weather)
//! renders every failure into a readable sentence.

use thiserror::Error;

/// Errors raised while talking to the weather provider.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request could not be sent or timed out.
    #[error("request to {endpoint} failed: {message}")]
    Transport {
        /// Endpoint path that was called.
        endpoint: String,
        /// A description of the failure.
        message: String,
    },

    /// A success response did not have the expected shape.
    #[error("unexpected response from {endpoint}: {message}")]
    Decode {
        /// Endpoint path that was called.
        endpoint: String,
        /// A description of the failure.
        message: String,
    },

    /// The client could not be configured.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for weather operations.
pub type Result<T> = std::result::Result<T, WeatherError>;
