//! Backend trait for text-generation calls.
//!
//! Defines the [`GenerateBackend`] trait implemented by provider adapters.
//! The trait is the seam between the invoker's fallback policy and the
//! network: production code injects a real adapter, tests inject in-memory
//! fakes.

use async_trait::async_trait;

use super::error::LlmError;
use super::types::GenerationRequest;

/// Trait for model-generation backends.
///
/// One call, one named model, one whole response. The invoker owns the
/// model-candidate list and calls this once per attempt; implementations
/// must not retry internally.
#[async_trait]
pub trait GenerateBackend: Send + Sync {
    /// Returns the backend name (e.g. `"gemini"`).
    fn name(&self) -> &str;

    /// Run one generation call against `model` and return the full
    /// completion text.
    async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<String, LlmError>;
}
