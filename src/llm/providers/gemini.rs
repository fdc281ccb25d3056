//! Gemini provider adapter.
//!
//! Talks to the Generative Language `generateContent` REST endpoint
//! (`POST /v1beta/models/{model}:generateContent`) with the API key in the
//! `x-goog-api-key` header. Supports plain-text completions and
//! schema-constrained JSON output via `generationConfig.responseSchema`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use smartbridge::llm::providers::gemini::{GeminiClient, GeminiConfig};
//! use smartbridge::llm::{GenerateBackend, GenerationRequest};
//!
//! # async fn example() -> Result<(), smartbridge::llm::LlmError> {
//! let client = GeminiClient::new(GeminiConfig::new("AIza..."));
//! let request = GenerationRequest::new("Say hello in Japanese");
//! let text = client.generate("gemini-3-flash-preview", &request).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::llm::error::LlmError;
use crate::llm::provider::GenerateBackend;
use crate::llm::types::{GenerationRequest, ResponseFormat};

/// Default Generative Language API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

// ── Configuration ─────────────────────────────────────────────

/// Configuration for the Gemini adapter.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Base URL (defaults to the public Generative Language host).
    pub base_url: String,
}

impl GeminiConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl std::fmt::Debug for GeminiConfig {
    // The API key never appears in Debug output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

// ── Request Builder ───────────────────────────────────────────

/// Build the JSON request body for the `generateContent` endpoint.
pub fn build_generate_request(request: &GenerationRequest) -> serde_json::Value {
    let mut body = serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": request.user_text }],
        }],
    });

    if let Some(obj) = body.as_object_mut() {
        if let Some(instruction) = &request.system_instruction {
            obj.insert(
                "systemInstruction".into(),
                serde_json::json!({ "parts": [{ "text": instruction }] }),
            );
        }

        let mut generation_config = serde_json::Map::new();
        if let Some(temperature) = request.options.temperature {
            generation_config.insert("temperature".into(), serde_json::json!(temperature));
        }
        if let Some(max_tokens) = request.options.max_output_tokens {
            generation_config.insert("maxOutputTokens".into(), serde_json::json!(max_tokens));
        }
        if let ResponseFormat::Json { schema } = &request.options.response_format {
            generation_config
                .insert("responseMimeType".into(), serde_json::json!("application/json"));
            generation_config.insert("responseSchema".into(), schema.clone());
        }
        if !generation_config.is_empty() {
            obj.insert(
                "generationConfig".into(),
                serde_json::Value::Object(generation_config),
            );
        }
    }

    body
}

// ── Response Parsing ──────────────────────────────────────────

/// Extract the completion text from a `generateContent` response body.
///
/// Joins the text parts of the first candidate. A response with no
/// candidates or no text parts (e.g. a safety block) yields an empty
/// string; an unparseable body is a provider error.
pub fn parse_generate_response(body: &str) -> Result<String, LlmError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        LlmError::ProviderError(format!("Gemini returned an unparseable body: {e}"))
    })?;

    let text = value
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(text)
}

/// Map an HTTP error status to the appropriate LlmError.
pub fn map_http_error(status: reqwest::StatusCode, body: &str) -> LlmError {
    let message = extract_error_message(body);
    match status.as_u16() {
        401 | 403 => LlmError::AuthError(format!("Gemini authentication failed: {message}")),
        429 => LlmError::RequestError(format!("Gemini rate limited: {message}")),
        _ => LlmError::ProviderError(format!("Gemini HTTP {}: {message}", status.as_u16())),
    }
}

/// Extract an error message from a Gemini error response body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

// ── Adapter Implementation ────────────────────────────────────

/// Gemini provider adapter.
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl GeminiClient {
    /// Create a new Gemini adapter with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, model
        )
    }
}

#[async_trait]
impl GenerateBackend for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<String, LlmError> {
        let url = self.endpoint(model);
        let body = build_generate_request(request);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestError(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        let body_text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(map_http_error(status, &body_text));
        }

        parse_generate_response(&body_text)
    }
}
