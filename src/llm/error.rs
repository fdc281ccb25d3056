//! Error types for the llm module.
//!
//! Each error variant carries a stable error code (SCREAMING_SNAKE_CASE)
//! that is included in the Display output and accessible via
//! [`LlmError::code()`]. Codes are part of the public API contract and will
//! not change.

/// Stable error codes for programmatic error handling.
///
/// These codes never change and form part of the public API contract.
/// Use these for distinguishing errors rather than parsing Display output.
pub mod error_codes {
    /// Invalid or missing configuration.
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";

    /// Authentication failed (invalid/missing API key).
    pub const AUTH_FAILED: &str = "AUTH_FAILED";

    /// Request to the model provider failed.
    pub const REQUEST_FAILED: &str = "REQUEST_FAILED";

    /// Provider-side error not covered by other variants.
    pub const PROVIDER_ERROR: &str = "PROVIDER_ERROR";

    /// Structured response did not parse or missed required fields.
    pub const DECODE_FAILED: &str = "DECODE_FAILED";

    /// Every model candidate in the fallback list failed.
    pub const CANDIDATES_EXHAUSTED: &str = "CANDIDATES_EXHAUSTED";
}

/// Errors produced by the llm module.
///
/// Each variant includes a stable error code accessible via
/// [`LlmError::code()`]. The Display impl formats as `[CODE] message`.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Invalid or missing configuration.
    #[error("[{}] {}", error_codes::CONFIG_INVALID, .0)]
    ConfigError(String),

    /// Authentication failed (invalid/missing API key).
    #[error("[{}] {}", error_codes::AUTH_FAILED, .0)]
    AuthError(String),

    /// Request to the model provider failed.
    #[error("[{}] {}", error_codes::REQUEST_FAILED, .0)]
    RequestError(String),

    /// Provider-side error not covered by other variants.
    #[error("[{}] {}", error_codes::PROVIDER_ERROR, .0)]
    ProviderError(String),

    /// Structured response did not parse or missed required fields.
    #[error("[{}] {}", error_codes::DECODE_FAILED, .0)]
    DecodeError(String),

    /// Every model candidate in the fallback list failed.
    ///
    /// Only the last candidate's failure is preserved; earlier failures are
    /// logged at the attempt site and then discarded.
    #[error(
        "[{}] all {attempts} model candidates failed; last error: {last}",
        error_codes::CANDIDATES_EXHAUSTED
    )]
    Exhausted {
        /// Number of candidates attempted.
        attempts: usize,
        /// The failure returned by the final candidate.
        last: Box<LlmError>,
    },
}

impl LlmError {
    /// Returns the stable error code for this error.
    ///
    /// Codes are SCREAMING_SNAKE_CASE strings that remain stable across
    /// releases. Use these for programmatic error handling rather than
    /// parsing Display output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => error_codes::CONFIG_INVALID,
            Self::AuthError(_) => error_codes::AUTH_FAILED,
            Self::RequestError(_) => error_codes::REQUEST_FAILED,
            Self::ProviderError(_) => error_codes::PROVIDER_ERROR,
            Self::DecodeError(_) => error_codes::DECODE_FAILED,
            Self::Exhausted { .. } => error_codes::CANDIDATES_EXHAUSTED,
        }
    }

    /// Returns the underlying single-call failure.
    ///
    /// For [`LlmError::Exhausted`] this is the last candidate's error; for
    /// every other variant it is the error itself.
    pub fn last_failure(&self) -> &LlmError {
        match self {
            Self::Exhausted { last, .. } => last,
            other => other,
        }
    }
}

/// Convenience alias for llm results.
pub type Result<T> = std::result::Result<T, LlmError>;
