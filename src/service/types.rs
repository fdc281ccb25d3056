//! Result types for the translation service.
//!
//! Field names are snake_case in Rust and camelCase on the wire, matching
//! the structured-output schema the model is asked to fill.

use serde::{Deserialize, Serialize};

/// One alternative English phrasing offered by the critique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// The alternative English text.
    pub text: String,
    /// Japanese label naming when the phrasing fits (e.g. より丁寧).
    pub label: String,
    /// Literal Japanese back-translation of this phrasing.
    pub back_translation: String,
}

/// Result of translating and critiquing a drafted Japanese reply.
///
/// Created fresh on every critique action and held in controller state
/// until the next action overwrites it. `original_text` is always filled
/// locally from the input, never taken from the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CritiqueResult {
    /// The Japanese reply the user drafted (local echo of the input).
    #[serde(default)]
    pub original_text: String,
    /// The primary English translation.
    pub translated_text: String,
    /// Literal Japanese back-translation of the English translation.
    pub back_translation: String,
    /// Whether the reply is socially appropriate for the context.
    pub is_appropriate: bool,
    /// Japanese-language critique of the reply.
    pub critique: String,
    /// Alternative phrasings; 2–3 by the model's contract (not validated
    /// locally).
    pub suggestions: Vec<Suggestion>,
}
