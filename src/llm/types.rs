//! Core request types for the llm module.
//!
//! Provides the types shared by the backend seam and the invoker:
//! - [`ResponseFormat`] — plain text vs. schema-constrained JSON output
//! - [`RequestOptions`] — generation parameters
//! - [`GenerationRequest`] — one full request, minus the model identifier

use serde::{Deserialize, Serialize};

/// The output contract requested from the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free-form text completion.
    #[default]
    Text,
    /// JSON output constrained by a response schema.
    ///
    /// The schema is carried as raw JSON (provider schema dialect) the same
    /// way tool parameters are elsewhere in the ecosystem.
    Json {
        /// The provider-dialect response schema.
        schema: serde_json::Value,
    },
}

/// Options controlling generation behavior.
///
/// # Examples
///
/// ```
/// use smartbridge::llm::RequestOptions;
///
/// let opts = RequestOptions::new().with_temperature(0.1);
/// assert_eq!(opts.temperature, Some(0.1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Sampling temperature. `None` means use the provider default.
    pub temperature: Option<f64>,
    /// Maximum tokens to generate. `None` means use the provider default.
    pub max_output_tokens: Option<u32>,
    /// Requested output contract.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl RequestOptions {
    /// Create request options with provider defaults everywhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens to generate.
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Request schema-constrained JSON output.
    pub fn with_json_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_format = ResponseFormat::Json { schema };
        self
    }
}

/// One generation request, excluding the model identifier.
///
/// The model is deliberately not part of the request: the invoker owns the
/// candidate list and supplies one identifier per attempt, so every
/// candidate sees byte-identical parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Optional system instruction framing the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
    /// The user-visible content of the request.
    pub user_text: String,
    /// Generation parameters.
    #[serde(default)]
    pub options: RequestOptions,
}

impl GenerationRequest {
    /// Create a plain-text request with default options.
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            user_text: user_text.into(),
            options: RequestOptions::default(),
        }
    }

    /// Attach a system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Replace the generation options.
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_format_defaults_to_text() {
        assert_eq!(ResponseFormat::default(), ResponseFormat::Text);
    }

    #[test]
    fn request_options_defaults() {
        let opts = RequestOptions::new();
        assert!(opts.temperature.is_none());
        assert!(opts.max_output_tokens.is_none());
        assert_eq!(opts.response_format, ResponseFormat::Text);
    }

    #[test]
    fn request_options_builder() {
        let schema = serde_json::json!({"type": "OBJECT"});
        let opts = RequestOptions::new()
            .with_temperature(0.1)
            .with_max_output_tokens(2048)
            .with_json_schema(schema.clone());

        assert_eq!(opts.temperature, Some(0.1));
        assert_eq!(opts.max_output_tokens, Some(2048));
        assert_eq!(opts.response_format, ResponseFormat::Json { schema });
    }

    #[test]
    fn generation_request_builder() {
        let request = GenerationRequest::new("Hello")
            .with_system_instruction("You are a translator.")
            .with_options(RequestOptions::new().with_temperature(0.5));

        assert_eq!(request.user_text, "Hello");
        assert_eq!(
            request.system_instruction.as_deref(),
            Some("You are a translator.")
        );
        assert_eq!(request.options.temperature, Some(0.5));
    }

    #[test]
    fn generation_request_has_no_model_field() {
        // The wire form must not carry a model identifier; the invoker
        // supplies it per attempt.
        let request = GenerationRequest::new("Hi");
        let json = serde_json::to_value(&request).unwrap_or_default();
        assert!(json.get("model").is_none());
    }

    #[test]
    fn generation_request_serde_round_trip() {
        let original = GenerationRequest::new("Translate this")
            .with_system_instruction("system")
            .with_options(
                RequestOptions::new().with_json_schema(serde_json::json!({"type": "OBJECT"})),
            );
        let json = serde_json::to_string(&original);
        assert!(json.is_ok());
        let parsed: std::result::Result<GenerationRequest, _> =
            serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or_else(|_| GenerationRequest::new("")), original);
    }
}
