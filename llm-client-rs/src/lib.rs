// llm-client-rs/src/lib.rs
// Library interface for the text-generation client.
//
// This crate owns the seam between content logic and LLM providers:
// - `TextGenerator`: the trait everything else programs against.
// - `HttpTextGenerator`: production implementation over an
//   OpenAI-compatible chat-completions endpoint with retry.
//
// Downstream crates (content-pipeline-rs) take an
// `Arc<dyn TextGenerator + Send + Sync>` and never see HTTP details.

use async_trait::async_trait;

mod error;
mod http;

#[cfg(test)]
mod tests;

pub use crate::error::{is_retryable, GenerationError};
pub use crate::http::{GeneratorConfig, HttpTextGenerator};

/// External text-generation capability.
///
/// Implementations accept a user prompt plus an optional system prompt
/// and return generated text, or a categorized `GenerationError`.
/// Calls are synchronous from the caller's perspective (one await per
/// generation); any retry policy lives inside the implementation.
#[async_trait]
pub trait TextGenerator {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, GenerationError>;
}
