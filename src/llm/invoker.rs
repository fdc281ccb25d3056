//! Model invoker with ordered-candidate fallback.
//!
//! Wraps a [`GenerateBackend`] with a fixed, ordered list of model
//! identifiers. Each invocation walks the list top to bottom with identical
//! request parameters until one model succeeds. Any failure moves on to the
//! next candidate regardless of its cause; there is no backoff, no circuit
//! breaker, and no success-rate memory between calls. When the whole list
//! fails, the invocation fails with the attempt count and the last
//! candidate's error.

use std::sync::Arc;

use uuid::Uuid;

use super::error::LlmError;
use super::provider::GenerateBackend;
use super::types::GenerationRequest;

/// Walks an ordered model-candidate list until one call succeeds.
///
/// The candidate list is fixed at construction and consulted in the same
/// order on every call; a failure on one invocation does not demote a
/// candidate for the next.
#[derive(Clone)]
pub struct ModelInvoker {
    backend: Arc<dyn GenerateBackend>,
    candidates: Vec<String>,
}

impl std::fmt::Debug for ModelInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelInvoker")
            .field("backend", &self.backend.name())
            .field("candidates", &self.candidates)
            .finish()
    }
}

impl ModelInvoker {
    /// Create an invoker over `backend` with the given candidate order.
    pub fn new(backend: Arc<dyn GenerateBackend>, candidates: Vec<String>) -> Self {
        Self {
            backend,
            candidates,
        }
    }

    /// The candidate list, in attempt order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Run `request` against the candidates in order, returning the first
    /// successful completion.
    ///
    /// Per-attempt logging is best-effort diagnostics, not part of the
    /// contract. Errors are not discriminated by kind: an auth failure is
    /// skipped past exactly like a rate limit.
    pub async fn invoke(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let request_id = Uuid::new_v4();
        let mut last_error: Option<LlmError> = None;

        for (attempt, model) in self.candidates.iter().enumerate() {
            tracing::debug!(
                %request_id,
                %model,
                attempt = attempt + 1,
                backend = self.backend.name(),
                "attempting model candidate"
            );
            match self.backend.generate(model, request).await {
                Ok(text) => {
                    tracing::debug!(%request_id, %model, "model candidate succeeded");
                    return Ok(text);
                }
                Err(e) => {
                    tracing::warn!(
                        %request_id,
                        %model,
                        error = %e,
                        "model candidate failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(last) => Err(LlmError::Exhausted {
                attempts: self.candidates.len(),
                last: Box::new(last),
            }),
            None => Err(LlmError::ConfigError(
                "model candidate list is empty".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// A test backend that fails for a configured set of models and records
    /// every call it receives.
    struct ScriptedBackend {
        failing: Vec<&'static str>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedBackend {
        fn failing(models: Vec<&'static str>) -> Self {
            Self {
                failing: models,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl GenerateBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(
            &self,
            model: &str,
            request: &GenerationRequest,
        ) -> Result<String, LlmError> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push((model.to_owned(), request.user_text.clone()));
            }
            if self.failing.contains(&model) {
                Err(LlmError::ProviderError(format!("{model} is down")))
            } else {
                Ok(format!("ok from {model}"))
            }
        }
    }

    fn invoker(backend: Arc<ScriptedBackend>, candidates: &[&str]) -> ModelInvoker {
        ModelInvoker::new(
            backend,
            candidates.iter().map(|s| (*s).to_owned()).collect(),
        )
    }

    #[tokio::test]
    async fn first_candidate_success_stops_iteration() {
        let backend = Arc::new(ScriptedBackend::failing(vec![]));
        let inv = invoker(backend.clone(), &["a", "b", "c"]);

        let result = inv.invoke(&GenerationRequest::new("hi")).await;
        assert_eq!(result.unwrap_or_default(), "ok from a");
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn failures_fall_through_to_next_candidate() {
        let backend = Arc::new(ScriptedBackend::failing(vec!["a", "b"]));
        let inv = invoker(backend.clone(), &["a", "b", "c"]);

        let result = inv.invoke(&GenerationRequest::new("hi")).await;
        assert_eq!(result.unwrap_or_default(), "ok from c");

        let models: Vec<String> = backend.calls().into_iter().map(|(m, _)| m).collect();
        assert_eq!(models, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn no_candidate_tried_after_success() {
        let backend = Arc::new(ScriptedBackend::failing(vec!["a"]));
        let inv = invoker(backend.clone(), &["a", "b", "c"]);

        let result = inv.invoke(&GenerationRequest::new("hi")).await;
        assert!(result.is_ok());
        // "c" is never attempted once "b" succeeds.
        let models: Vec<String> = backend.calls().into_iter().map(|(m, _)| m).collect();
        assert_eq!(models, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn every_candidate_sees_identical_parameters() {
        let backend = Arc::new(ScriptedBackend::failing(vec!["a", "b"]));
        let inv = invoker(backend.clone(), &["a", "b", "c"]);

        let _ = inv.invoke(&GenerationRequest::new("same text")).await;
        for (_, text) in backend.calls() {
            assert_eq!(text, "same text");
        }
    }

    #[tokio::test]
    async fn exhaustion_surfaces_last_failure_only() {
        let backend = Arc::new(ScriptedBackend::failing(vec!["a", "b", "c"]));
        let inv = invoker(backend.clone(), &["a", "b", "c"]);

        let result = inv.invoke(&GenerationRequest::new("hi")).await;
        let err = match result {
            Err(e) => e,
            Ok(_) => panic!("expected exhaustion"),
        };
        assert_eq!(err.code(), "CANDIDATES_EXHAUSTED");
        // Only the final candidate's failure is preserved.
        assert!(format!("{err}").contains("c is down"));
        assert!(!format!("{err}").contains("a is down"));
        match err {
            LlmError::Exhausted { attempts, .. } => assert_eq!(attempts, 3),
            _ => panic!("expected Exhausted variant"),
        }
    }

    #[tokio::test]
    async fn auth_failures_are_not_treated_specially() {
        // Cause-blind continuation: a non-retryable-looking error still
        // falls through to the next candidate.
        struct AuthThenOk;

        #[async_trait]
        impl GenerateBackend for AuthThenOk {
            fn name(&self) -> &str {
                "auth-then-ok"
            }

            async fn generate(
                &self,
                model: &str,
                _request: &GenerationRequest,
            ) -> Result<String, LlmError> {
                if model == "first" {
                    Err(LlmError::AuthError("invalid API key".into()))
                } else {
                    Ok("second answered".into())
                }
            }
        }

        let inv = ModelInvoker::new(
            Arc::new(AuthThenOk),
            vec!["first".into(), "second".into()],
        );
        let result = inv.invoke(&GenerationRequest::new("hi")).await;
        assert_eq!(result.unwrap_or_default(), "second answered");
    }

    #[tokio::test]
    async fn empty_candidate_list_is_a_config_error() {
        let backend = Arc::new(ScriptedBackend::failing(vec![]));
        let inv = ModelInvoker::new(backend, Vec::new());

        let result = inv.invoke(&GenerationRequest::new("hi")).await;
        assert_eq!(result.map_err(|e| e.code()).unwrap_err(), "CONFIG_INVALID");
    }

    #[tokio::test]
    async fn candidate_order_is_stable_across_calls() {
        // A failure on one call must not demote the candidate for the next.
        let backend = Arc::new(ScriptedBackend::failing(vec!["a"]));
        let inv = invoker(backend.clone(), &["a", "b"]);

        let _ = inv.invoke(&GenerationRequest::new("one")).await;
        let _ = inv.invoke(&GenerationRequest::new("two")).await;

        let models: Vec<String> = backend.calls().into_iter().map(|(m, _)| m).collect();
        assert_eq!(models, vec!["a", "b", "a", "b"]);
    }

    #[test]
    fn debug_shows_backend_and_candidates() {
        let backend = Arc::new(ScriptedBackend::failing(vec![]));
        let inv = invoker(backend, &["a", "b"]);
        let debug = format!("{inv:?}");
        assert!(debug.contains("scripted"));
        assert!(debug.contains("\"a\""));
    }
}
