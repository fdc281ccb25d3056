//! Session state: two independent regions, each written by exactly one
//! part of the controller.

use crate::service::CritiqueResult;

/// Lifecycle of the received-message region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReceivedPhase {
    /// No non-blank input, nothing displayed.
    #[default]
    Idle,
    /// Non-blank input seen; a translation is debounce-pending or in flight.
    PendingTranslation,
    /// A translation is displayed.
    Translated,
}

/// Lifecycle of the reply region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyPhase {
    /// Waiting for an explicit submit.
    #[default]
    Idle,
    /// A critique request is in flight.
    Processing,
    /// A critique result is displayed.
    Shown,
}

/// The controller-owned view state.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// The incoming English message as currently typed.
    pub received_text: String,
    /// The displayed Japanese auto-translation.
    pub received_translation: String,
    /// Received-message region phase.
    pub received_phase: ReceivedPhase,
    /// The drafted Japanese reply as currently typed.
    pub reply_text: String,
    /// Reply region phase.
    pub reply_phase: ReplyPhase,
    /// The last successful critique, until the next one overwrites it.
    pub critique: Option<CritiqueResult>,
}

impl SessionState {
    /// Whether the reply action is currently enabled: non-blank reply text
    /// and no critique already in flight.
    pub fn reply_submittable(&self) -> bool {
        !self.reply_text.trim().is_empty() && self.reply_phase != ReplyPhase::Processing
    }
}
