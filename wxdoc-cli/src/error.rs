//! Error types for the `wxdoc-cli` crate.

use thiserror::Error;
use wxdoc_rag::RagError;
use wxdoc_weather::WeatherError;

/// Errors surfaced by the router, the session and application wiring.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The document question-answering path failed.
    #[error(transparent)]
    Rag(#[from] RagError),

    /// The weather client could not be built.
    #[error(transparent)]
    Weather(#[from] WeatherError),

    /// An uploaded file could not be read or copied.
    #[error("{path}: {message}")]
    Upload {
        /// The file the user asked to upload.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The interactive terminal failed.
    #[error("terminal error: {0}")]
    Terminal(String),
}

/// A convenience result type for assistant operations.
pub type Result<T> = std::result::Result<T, AssistantError>;
