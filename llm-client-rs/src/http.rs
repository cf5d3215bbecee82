// llm-client-rs/src/http.rs
//
// HTTP implementation of `TextGenerator` against OpenAI-compatible
// chat-completions APIs.
//
// This module provides:
// - Real HTTP calls to LLM API providers via reqwest
// - Exponential backoff retry for retryable errors
// - Configuration via environment variables
//
// Configuration (.env file):
// - LLM_API_KEY: API key for the LLM provider
// - LLM_API_URL: API endpoint URL (defaults to OpenAI compatible endpoint)
// - LLM_MODEL: Model to use (e.g. "gpt-3.5-turbo")
// - LLM_MAX_RETRIES: Maximum number of retry attempts (default: 3)
// - LLM_INITIAL_RETRY_DELAY_MS: Initial delay between retries in ms (default: 1000)
// - LLM_MAX_RETRY_DELAY_MS: Maximum delay between retries in ms (default: 30000)

use std::env;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use backoff::{backoff::Backoff, ExponentialBackoff, ExponentialBackoffBuilder};
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{is_retryable, GenerationError};
use crate::TextGenerator;

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u32,
}

/// Provider configuration, read from environment variables.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_retries: u32,
    pub initial_retry_delay_ms: u64,
    pub max_retry_delay_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            max_retries: 3,
            initial_retry_delay_ms: 1000,
            max_retry_delay_ms: 30000,
        }
    }
}

impl GeneratorConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable. Never panics.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_url: env::var("LLM_API_URL").unwrap_or(defaults.api_url),
            api_key: env::var("LLM_API_KEY").unwrap_or_default(),
            model: env::var("LLM_MODEL").unwrap_or(defaults.model),
            temperature: Self::get_env_var("LLM_TEMPERATURE", defaults.temperature),
            max_tokens: Self::get_env_var("LLM_MAX_TOKENS", defaults.max_tokens),
            max_retries: Self::get_env_var("LLM_MAX_RETRIES", defaults.max_retries),
            initial_retry_delay_ms: Self::get_env_var(
                "LLM_INITIAL_RETRY_DELAY_MS",
                defaults.initial_retry_delay_ms,
            ),
            max_retry_delay_ms: Self::get_env_var(
                "LLM_MAX_RETRY_DELAY_MS",
                defaults.max_retry_delay_ms,
            ),
        }
    }

    // Helper to read environment variables with default values.
    fn get_env_var<T: FromStr>(name: &str, default: T) -> T {
        env::var(name)
            .ok()
            .and_then(|v| v.parse::<T>().ok())
            .unwrap_or(default)
    }
}

/// Production text generator backed by an OpenAI-compatible endpoint.
#[derive(Debug)]
pub struct HttpTextGenerator {
    client: Client,
    config: GeneratorConfig,
}

impl HttpTextGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        log::info!(
            "LLM client initialized for {} (model: {})",
            config.api_url,
            config.model
        );

        Self { client, config }
    }

    /// Construct a generator from environment configuration.
    pub fn from_env() -> Self {
        Self::new(GeneratorConfig::from_env())
    }

    /// Check if the client is properly configured.
    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    /// Create the exponential backoff policy.
    ///
    /// Starts at the initial delay, doubles after each failed attempt,
    /// adds jitter, caps individual delays at max_retry_delay_ms and the
    /// total elapsed retry time at 2 minutes.
    fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(self.config.initial_retry_delay_ms))
            .with_max_interval(Duration::from_millis(self.config.max_retry_delay_ms))
            .with_multiplier(2.0)
            .with_max_elapsed_time(Some(Duration::from_secs(120)))
            .with_randomization_factor(0.5)
            .build()
    }

    // Execute a single request attempt.
    async fn execute_request(
        &self,
        request_body: &ChatCompletionRequest,
    ) -> Result<String, GenerationError> {
        if self.config.api_key.is_empty() {
            return Err(GenerationError::InvalidRequest(
                "API key is not set".to_string(),
            ));
        }

        let response = match self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(request_body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                // Categorize network errors.
                if err.is_timeout() {
                    return Err(GenerationError::NetworkError(format!(
                        "request timed out: {}",
                        err
                    )));
                } else if err.is_connect() {
                    return Err(GenerationError::NetworkError(format!(
                        "connection failed: {}",
                        err
                    )));
                } else {
                    return Err(GenerationError::NetworkError(format!(
                        "network error: {}",
                        err
                    )));
                }
            }
        };

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return match status.as_u16() {
                400 => Err(GenerationError::InvalidRequest(format!(
                    "bad request: {}",
                    text
                ))),
                401 => Err(GenerationError::InvalidRequest(format!(
                    "unauthorized: {}",
                    text
                ))),
                403 => Err(GenerationError::InvalidRequest(format!(
                    "forbidden: {}",
                    text
                ))),
                404 => Err(GenerationError::InvalidRequest(format!(
                    "not found: {}",
                    text
                ))),
                429 => Err(GenerationError::RateLimitExceeded(format!(
                    "rate limit exceeded: {}",
                    text
                ))),
                // Server errors - retryable.
                500 | 502 | 503 | 504 => Err(GenerationError::ServerError(format!(
                    "server error ({}): {}",
                    status, text
                ))),
                _ => Err(GenerationError::UnknownError(format!(
                    "unknown error ({}): {}",
                    status, text
                ))),
            };
        }

        let response_data: Result<ChatCompletionResponse, _> = response.json().await;
        match response_data {
            Ok(data) => {
                if let Some(choice) = data.choices.first() {
                    if let Some(usage) = &data.usage {
                        log::info!("LLM request completed, used {} tokens", usage.total_tokens);
                    }

                    Ok(choice.message.content.clone())
                } else {
                    Err(GenerationError::ParseError(
                        "no choices returned in response".to_string(),
                    ))
                }
            }
            Err(err) => Err(GenerationError::ParseError(format!(
                "failed to parse response: {}",
                err
            ))),
        }
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    /// Generate text with the exponential backoff retry mechanism.
    ///
    /// Retries only errors classified as retryable, up to the configured
    /// retry count and the backoff policy's elapsed-time cap.
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, GenerationError> {
        let mut backoff = self.create_backoff();
        let mut attempt = 0;

        // Build the request body outside the retry loop.
        let mut messages = Vec::new();
        if let Some(system) = system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        });

        let request_body = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
        };

        log::debug!(
            "preparing LLM request to {} (model: {})",
            self.config.api_url,
            self.config.model
        );

        loop {
            attempt += 1;

            if attempt > 1 {
                log::info!("retry attempt {} for LLM request", attempt);
            }

            match self.execute_request(&request_body).await {
                Ok(response) => return Ok(response),

                Err(err) => {
                    if !is_retryable(&err) || attempt > self.config.max_retries {
                        log::error!("LLM request failed after {} attempts: {}", attempt, err);
                        return Err(err);
                    }

                    if let Some(backoff_duration) = backoff.next_backoff() {
                        log::warn!("retryable error: {}, retrying in {:?}", err, backoff_duration);

                        // Small random jitter so concurrent callers don't
                        // all retry at the same instant.
                        let jitter = rand::thread_rng().gen_range(0..=200);
                        let jittered = backoff_duration + Duration::from_millis(jitter);

                        tokio::time::sleep(jittered).await;
                    } else {
                        log::error!("exceeded maximum backoff time: {}", err);
                        return Err(err);
                    }
                }
            }
        }
    }
}
