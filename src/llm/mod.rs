//! Model-call layer — backend seam, Gemini adapter, and fallback invoker.
//!
//! # Submodules
//!
//! - [`error`] — Error types with stable error codes
//! - [`types`] — Request types (options, response format)
//! - [`provider`] — The [`GenerateBackend`] trait
//! - [`providers`] — Adapter implementations (Gemini)
//! - [`invoker`] — The [`ModelInvoker`] ordered-fallback policy
//!
//! # Fallback policy
//!
//! The invoker is deliberately blunt: one pass over a fixed candidate list
//! per call, first success wins, failures of any kind fall through to the
//! next candidate, and only the last failure survives exhaustion.

pub mod error;
pub mod invoker;
pub mod provider;
pub mod providers;
pub mod types;

pub use error::{LlmError, Result};
pub use invoker::ModelInvoker;
pub use provider::GenerateBackend;
pub use providers::gemini::{GeminiClient, GeminiConfig};
pub use types::{GenerationRequest, RequestOptions, ResponseFormat};
