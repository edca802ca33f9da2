//! # wxdoc-cli
//!
//! Terminal front-end of the wxdoc assistant. A [`Router`] sends weather
//! questions to OpenWeather and everything else to question answering over
//! the uploaded PDF; a [`Session`] holds that PDF and turns every failure
//! into a readable reply.

pub mod app;
pub mod config;
pub mod error;
pub mod repl;
pub mod router;
pub mod session;
pub mod telemetry;

pub use app::build_router;
pub use config::AppConfig;
pub use error::{AssistantError, Result};
pub use router::{Route, Router, classify, extract_city};
pub use session::Session;
pub use telemetry::init_telemetry;
