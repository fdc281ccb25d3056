//! Translation service — the two model-backed operations.
//!
//! [`TranslationService`] shapes prompts and schemas for the model and
//! decodes what comes back. Its two operations deliberately fail
//! differently:
//!
//! - [`translate_auto`](TranslationService::translate_auto) runs in the
//!   background while the user types and must never interrupt them: every
//!   failure becomes a fixed placeholder string.
//! - [`translate_and_critique`](TranslationService::translate_and_critique)
//!   is an explicit user action and must visibly fail so the user knows to
//!   retry: every failure propagates.

pub mod prompts;
pub mod schema;
pub mod types;

pub use types::{CritiqueResult, Suggestion};

use crate::llm::{GenerationRequest, LlmError, ModelInvoker, RequestOptions};

/// Placeholder shown when the model answered but produced no text.
pub const PLACEHOLDER_EMPTY_COMPLETION: &str = "翻訳に失敗しました";

/// Placeholder shown when the auto-translation call itself failed.
pub const PLACEHOLDER_CALL_FAILED: &str = "エラーが発生しました";

/// Temperature for the auto-translation path: near-deterministic so the
/// displayed translation does not wobble between keystrokes.
const AUTO_TRANSLATE_TEMPERATURE: f64 = 0.1;

/// Prompt/schema shaping and response decoding for the two operations.
#[derive(Debug, Clone)]
pub struct TranslationService {
    invoker: ModelInvoker,
}

impl TranslationService {
    /// Create a service over the given invoker.
    pub fn new(invoker: ModelInvoker) -> Self {
        Self { invoker }
    }

    /// Translate an incoming English message into Japanese.
    ///
    /// Soft-fail contract: blank input returns an empty string without a
    /// call; an empty completion or any invocation error returns a fixed
    /// placeholder. This function never returns an error.
    pub async fn translate_auto(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let request = GenerationRequest::new(prompts::auto_translate_prompt(text)).with_options(
            RequestOptions::new().with_temperature(AUTO_TRANSLATE_TEMPERATURE),
        );

        match self.invoker.invoke(&request).await {
            Ok(translated) if translated.trim().is_empty() => {
                PLACEHOLDER_EMPTY_COMPLETION.to_owned()
            }
            Ok(translated) => translated,
            Err(e) => {
                tracing::error!(error = %e, "auto-translation failed");
                PLACEHOLDER_CALL_FAILED.to_owned()
            }
        }
    }

    /// Translate a drafted Japanese reply into context-appropriate English
    /// and critique it.
    ///
    /// Hard-fail contract: invocation and decode failures propagate
    /// unchanged; there is no partial result. `original_text` on the result
    /// echoes `reply_text`.
    pub async fn translate_and_critique(
        &self,
        reply_text: &str,
        context_text: &str,
    ) -> Result<CritiqueResult, LlmError> {
        let request =
            GenerationRequest::new(prompts::critique_user_content(reply_text, context_text))
                .with_system_instruction(prompts::critique_system_instruction())
                .with_options(
                    RequestOptions::new().with_json_schema(schema::critique_response_schema()),
                );

        let raw = self.invoker.invoke(&request).await?;
        schema::decode_critique(&raw, reply_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{GenerateBackend, ResponseFormat};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Records requests and replies with a canned response per call.
    struct CannedBackend {
        responses: Mutex<Vec<Result<String, LlmError>>>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl CannedBackend {
        fn new(responses: Vec<Result<String, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<GenerationRequest> {
            self.requests.lock().map(|r| r.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl GenerateBackend for CannedBackend {
        fn name(&self) -> &str {
            "canned"
        }

        async fn generate(
            &self,
            _model: &str,
            request: &GenerationRequest,
        ) -> Result<String, LlmError> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(request.clone());
            }
            self.responses
                .lock()
                .ok()
                .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
                .unwrap_or_else(|| Err(LlmError::ProviderError("script exhausted".into())))
        }
    }

    fn service(backend: Arc<CannedBackend>) -> TranslationService {
        TranslationService::new(ModelInvoker::new(backend, vec!["m".into()]))
    }

    fn valid_critique_json() -> String {
        serde_json::json!({
            "translatedText": "Thank you for yesterday.",
            "backTranslation": "昨日はありがとうございました。",
            "isAppropriate": true,
            "critique": "自然な表現です。",
            "suggestions": [
                {"text": "Thanks!", "label": "よりカジュアル", "backTranslation": "ありがとう！"},
                {"text": "I truly appreciate it.", "label": "より丁寧", "backTranslation": "心から感謝します。"}
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn auto_blank_input_makes_no_call() {
        let backend = CannedBackend::new(vec![]);
        let svc = service(backend.clone());

        assert_eq!(svc.translate_auto("").await, "");
        assert_eq!(svc.translate_auto("   \n\t ").await, "");
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn auto_returns_model_text() {
        let backend = CannedBackend::new(vec![Ok("昨日は助かりました。".into())]);
        let svc = service(backend);
        let translated = svc.translate_auto("That saved me yesterday.").await;
        assert_eq!(translated, "昨日は助かりました。");
    }

    #[tokio::test]
    async fn auto_uses_low_temperature_and_plain_text() {
        let backend = CannedBackend::new(vec![Ok("訳".into())]);
        let svc = service(backend.clone());
        let _ = svc.translate_auto("Hello").await;

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].options.temperature, Some(0.1));
        assert_eq!(requests[0].options.response_format, ResponseFormat::Text);
        assert!(requests[0].system_instruction.is_none());
        assert!(requests[0].user_text.contains("Hello"));
    }

    #[tokio::test]
    async fn auto_empty_completion_becomes_placeholder() {
        let backend = CannedBackend::new(vec![Ok("  ".into())]);
        let svc = service(backend);
        assert_eq!(
            svc.translate_auto("Hello").await,
            PLACEHOLDER_EMPTY_COMPLETION
        );
    }

    #[tokio::test]
    async fn auto_invocation_error_becomes_placeholder() {
        let backend =
            CannedBackend::new(vec![Err(LlmError::ProviderError("backend down".into()))]);
        let svc = service(backend);
        assert_eq!(svc.translate_auto("Hello").await, PLACEHOLDER_CALL_FAILED);
    }

    #[tokio::test]
    async fn critique_decodes_and_echoes_original_text() {
        let backend = CannedBackend::new(vec![Ok(valid_critique_json())]);
        let svc = service(backend.clone());

        let result = svc
            .translate_and_critique("昨日はありがとう", "Thanks for your help yesterday!")
            .await;
        let result = result.unwrap_or_else(|e| panic!("critique failed: {e}"));
        assert_eq!(result.original_text, "昨日はありがとう");
        assert_eq!(result.suggestions.len(), 2);
        for suggestion in &result.suggestions {
            assert!(!suggestion.text.trim().is_empty());
            assert!(!suggestion.label.trim().is_empty());
            assert!(!suggestion.back_translation.trim().is_empty());
        }

        // The request carries the schema and the context framing.
        let requests = backend.requests();
        assert!(matches!(
            requests[0].options.response_format,
            ResponseFormat::Json { .. }
        ));
        assert!(requests[0].system_instruction.is_some());
        assert!(requests[0].user_text.contains("Thanks for your help yesterday!"));
    }

    #[tokio::test]
    async fn critique_propagates_decode_failure() {
        let backend = CannedBackend::new(vec![Ok("{\"translatedText\": \"only\"}".into())]);
        let svc = service(backend);
        let result = svc.translate_and_critique("返信", "context").await;
        assert_eq!(result.map_err(|e| e.code()).unwrap_err(), "DECODE_FAILED");
    }

    #[tokio::test]
    async fn critique_propagates_invocation_failure() {
        let backend = CannedBackend::new(vec![Err(LlmError::RequestError("down".into()))]);
        let svc = service(backend);
        let result = svc.translate_and_critique("返信", "context").await;
        assert_eq!(
            result.map_err(|e| e.code()).unwrap_err(),
            "CANDIDATES_EXHAUSTED"
        );
    }
}
