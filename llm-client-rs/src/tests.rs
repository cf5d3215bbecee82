// llm-client-rs/src/tests.rs
// Tests for configuration parsing and error classification.

use std::env;

use crate::error::{is_retryable, GenerationError};
use crate::http::GeneratorConfig;

#[test]
fn generator_config_defaults() {
    let config = GeneratorConfig::default();
    assert_eq!(
        config.api_url,
        "https://api.openai.com/v1/chat/completions"
    );
    assert_eq!(config.model, "gpt-3.5-turbo");
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.initial_retry_delay_ms, 1000);
    assert_eq!(config.max_retry_delay_ms, 30000);
    assert!(config.api_key.is_empty());
}

#[test]
fn generator_config_reads_environment() {
    env::set_var("LLM_MODEL", "test-model");
    env::set_var("LLM_MAX_RETRIES", "7");
    env::set_var("LLM_INITIAL_RETRY_DELAY_MS", "250");

    let config = GeneratorConfig::from_env();
    assert_eq!(config.model, "test-model");
    assert_eq!(config.max_retries, 7);
    assert_eq!(config.initial_retry_delay_ms, 250);
    // Unset vars keep defaults.
    assert_eq!(config.max_retry_delay_ms, 30000);

    // Unparseable values fall back to defaults.
    env::set_var("LLM_MAX_RETRIES", "not-a-number");
    let config = GeneratorConfig::from_env();
    assert_eq!(config.max_retries, 3);

    env::remove_var("LLM_MODEL");
    env::remove_var("LLM_MAX_RETRIES");
    env::remove_var("LLM_INITIAL_RETRY_DELAY_MS");
}

#[test]
fn retryable_classification() {
    assert!(is_retryable(&GenerationError::ServerError(
        "502".to_string()
    )));
    assert!(is_retryable(&GenerationError::NetworkError(
        "timeout".to_string()
    )));
    assert!(is_retryable(&GenerationError::RateLimitExceeded(
        "429".to_string()
    )));

    assert!(!is_retryable(&GenerationError::InvalidRequest(
        "401".to_string()
    )));
    assert!(!is_retryable(&GenerationError::ParseError(
        "bad json".to_string()
    )));
    assert!(!is_retryable(&GenerationError::ModelNotAvailable(
        "gone".to_string()
    )));
    assert!(!is_retryable(&GenerationError::UnknownError(
        "???".to_string()
    )));
}
