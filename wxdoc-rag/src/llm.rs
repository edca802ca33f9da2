//! Language model trait used for answer synthesis.

use async_trait::async_trait;

use crate::error::Result;

/// A text-completion model.
///
/// The retrieval QA chain sends one fully rendered prompt and returns the
/// generated text unchanged.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Model identifier, used in logs.
    fn name(&self) -> &str;

    /// Generate a completion for `prompt`.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
