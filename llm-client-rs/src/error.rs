// llm-client-rs/src/error.rs
// Error taxonomy for text-generation calls.
//
// The categories exist so the retry loop can distinguish transient
// provider trouble from requests that will never succeed without
// operator intervention.

/// Categorized error from a text-generation provider.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// 400, 401, 403, 404 - client-side errors that won't be fixed by retrying.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// 429 - provider rate limit; retried with exponential backoff.
    #[error("rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Model-specific refusal (deprecated model, policy violation).
    #[error("model not available: {0}")]
    ModelNotAvailable(String),

    /// 500, 502, 503, 504 - server-side errors that might be transient.
    #[error("server error: {0}")]
    ServerError(String),

    /// Connection issues, timeouts, DNS failures.
    #[error("network error: {0}")]
    NetworkError(String),

    /// Response body could not be parsed or contained no choices.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Anything unclassified.
    #[error("unknown error: {0}")]
    UnknownError(String),
}

/// Whether the retry loop should attempt the request again.
pub fn is_retryable(error: &GenerationError) -> bool {
    match error {
        // Server and network errors are always retryable.
        GenerationError::ServerError(_) | GenerationError::NetworkError(_) => true,

        // Rate limits are retryable with increasing delays to cool down.
        GenerationError::RateLimitExceeded(_) => true,

        // Client errors, parse errors and unknown errors need human
        // intervention to fix.
        _ => false,
    }
}
