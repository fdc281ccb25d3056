//! SmartBridge: AI-assisted English↔Japanese reply drafting.
//!
//! The crate helps a user hold a conversation across the two languages:
//! an incoming English message is auto-translated into Japanese while the
//! user types, and a drafted Japanese reply is translated into English
//! together with a literal back-translation, an appropriateness critique,
//! and labeled alternative phrasings.
//!
//! # Architecture
//!
//! Three layers, each injected into the one above it:
//! - [`llm`] — the [`GenerateBackend`](llm::GenerateBackend) seam over the
//!   hosted model API, plus the [`ModelInvoker`](llm::ModelInvoker) that
//!   walks an ordered model-candidate list until one call succeeds.
//! - [`service`] — the [`TranslationService`](service::TranslationService):
//!   prompt and response-schema shaping for the two operations, and the
//!   soft-fail/hard-fail policy split between them.
//! - [`controller`] — the headless
//!   [`SessionController`](controller::SessionController): a channel-driven
//!   event loop owning the debounced auto-translation timer and the
//!   explicit reply-critique action.
//!
//! A frontend (the bundled terminal binary, or any UI) talks to the
//! controller exclusively through its input/update channels.

pub mod config;
pub mod controller;
pub mod llm;
pub mod service;

pub use config::AppConfig;
pub use controller::{InputEvent, SessionController, SessionHandle, ViewUpdate};
pub use llm::{GenerateBackend, GenerationRequest, LlmError, ModelInvoker, RequestOptions};
pub use service::{CritiqueResult, Suggestion, TranslationService};
