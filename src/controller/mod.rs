//! Interaction controller — the headless session event loop.
//!
//! [`SessionController`] owns the view state and drives the two regions:
//!
//! - **Received message**: every non-blank edit re-arms a single debounce
//!   timer; only the last edit inside the window issues an auto-translation
//!   call. Started calls are never cancelled — instead each carries a
//!   sequence number, and a result is applied only if it is newer than the
//!   last applied one, so a slow early response cannot overwrite a faster
//!   later one.
//! - **Reply**: an explicit submit with non-blank text starts a critique;
//!   success shows the result, failure emits an alert update and returns
//!   the region to idle with no structured error state retained.
//!
//! The controller is driven entirely through channels: a frontend sends
//! [`InputEvent`]s and renders [`ViewUpdate`]s. The loop ends when the
//! input side is closed.

pub mod state;

pub use state::{ReceivedPhase, ReplyPhase, SessionState};

use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::llm::LlmError;
use crate::service::{CritiqueResult, TranslationService};

/// Quiet period after the last keystroke before auto-translation fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

/// An input from the frontend.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The received-message text changed.
    ReceivedTextChanged(String),
    /// The drafted reply text changed.
    ReplyTextChanged(String),
    /// The user pressed the translate-and-check action.
    SubmitReply,
}

/// A state change for the frontend to render.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    /// Non-blank input arrived; a translation will follow.
    AutoTranslationPending,
    /// A new auto-translation is ready for display.
    AutoTranslationUpdated {
        /// The Japanese rendering of the received message.
        translation: String,
    },
    /// The received text went blank; clear the translation display.
    AutoTranslationCleared,
    /// A critique request was accepted and is in flight.
    CritiqueStarted,
    /// The critique finished successfully.
    CritiqueReady(Box<CritiqueResult>),
    /// The critique failed; show a blocking alert and allow a retry.
    CritiqueFailed {
        /// Human-readable failure description.
        message: String,
    },
}

/// The frontend's two ends of a controller session.
#[derive(Debug)]
pub struct SessionHandle {
    /// Send user input here.
    pub events: mpsc::Sender<InputEvent>,
    /// Render updates from here.
    pub updates: mpsc::Receiver<ViewUpdate>,
}

/// Result of one background call, routed back into the loop.
enum TaskOutcome {
    AutoTranslation { seq: u64, translation: String },
    Critique(Result<CritiqueResult, LlmError>),
}

type InflightSet = FuturesUnordered<BoxFuture<'static, TaskOutcome>>;

/// The session event loop.
pub struct SessionController {
    service: Arc<TranslationService>,
    debounce: Duration,
    state: SessionState,
    events: mpsc::Receiver<InputEvent>,
    updates: mpsc::Sender<ViewUpdate>,
    /// Armed while a keystroke is waiting out the quiet period.
    debounce_deadline: Option<Instant>,
    /// Sequence number of the most recently issued auto-translation.
    next_seq: u64,
    /// Highest sequence number applied (or invalidated) so far.
    applied_seq: u64,
}

impl SessionController {
    /// Create a controller and the handle a frontend drives it with.
    pub fn new(service: TranslationService, debounce: Duration) -> (Self, SessionHandle) {
        let (event_tx, event_rx) = mpsc::channel(32);
        let (update_tx, update_rx) = mpsc::channel(64);
        let controller = Self {
            service: Arc::new(service),
            debounce,
            state: SessionState::default(),
            events: event_rx,
            updates: update_tx,
            debounce_deadline: None,
            next_seq: 0,
            applied_seq: 0,
        };
        let handle = SessionHandle {
            events: event_tx,
            updates: update_rx,
        };
        (controller, handle)
    }

    /// Run the loop until the input channel closes.
    pub async fn run(mut self) {
        let mut inflight: InflightSet = FuturesUnordered::new();
        loop {
            let deadline = self.debounce_deadline;
            tokio::select! {
                event = self.events.recv() => {
                    match event {
                        Some(event) => self.handle_input(event, &mut inflight).await,
                        None => break,
                    }
                }
                _ = sleep_until_opt(deadline), if deadline.is_some() => {
                    self.debounce_deadline = None;
                    self.fire_auto_translation(&mut inflight);
                }
                Some(outcome) = inflight.next(), if !inflight.is_empty() => {
                    self.handle_outcome(outcome).await;
                }
            }
        }
    }

    async fn handle_input(&mut self, event: InputEvent, inflight: &mut InflightSet) {
        match event {
            InputEvent::ReceivedTextChanged(text) => {
                self.state.received_text = text;
                if self.state.received_text.trim().is_empty() {
                    // Blank input resolves immediately: no call, and any
                    // result still in flight is for superseded text.
                    self.debounce_deadline = None;
                    self.applied_seq = self.next_seq;
                    self.state.received_phase = ReceivedPhase::Idle;
                    self.state.received_translation.clear();
                    self.send(ViewUpdate::AutoTranslationCleared).await;
                } else {
                    // Every keystroke re-arms the single debounce timer.
                    self.debounce_deadline = Some(Instant::now() + self.debounce);
                    if self.state.received_phase != ReceivedPhase::PendingTranslation {
                        self.state.received_phase = ReceivedPhase::PendingTranslation;
                        self.send(ViewUpdate::AutoTranslationPending).await;
                    }
                }
            }
            InputEvent::ReplyTextChanged(text) => {
                self.state.reply_text = text;
            }
            InputEvent::SubmitReply => {
                if !self.state.reply_submittable() {
                    return;
                }
                self.state.reply_phase = ReplyPhase::Processing;
                self.send(ViewUpdate::CritiqueStarted).await;

                let service = self.service.clone();
                let reply = self.state.reply_text.clone();
                let context = self.state.received_text.clone();
                inflight.push(
                    async move {
                        TaskOutcome::Critique(
                            service.translate_and_critique(&reply, &context).await,
                        )
                    }
                    .boxed(),
                );
            }
        }
    }

    fn fire_auto_translation(&mut self, inflight: &mut InflightSet) {
        self.next_seq += 1;
        let seq = self.next_seq;
        let service = self.service.clone();
        let text = self.state.received_text.clone();
        inflight.push(
            async move {
                TaskOutcome::AutoTranslation {
                    seq,
                    translation: service.translate_auto(&text).await,
                }
            }
            .boxed(),
        );
    }

    async fn handle_outcome(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::AutoTranslation { seq, translation } => {
                if seq <= self.applied_seq {
                    tracing::debug!(
                        seq,
                        applied = self.applied_seq,
                        "dropping stale auto-translation result"
                    );
                    return;
                }
                self.applied_seq = seq;
                self.state.received_translation = translation.clone();
                // A newer edit may already be waiting out its quiet period
                // or in flight; the region stays pending until the newest
                // issued request has landed.
                if self.debounce_deadline.is_none() && seq == self.next_seq {
                    self.state.received_phase = ReceivedPhase::Translated;
                }
                self.send(ViewUpdate::AutoTranslationUpdated { translation })
                    .await;
            }
            TaskOutcome::Critique(Ok(result)) => {
                self.state.reply_phase = ReplyPhase::Shown;
                self.state.critique = Some(result.clone());
                self.send(ViewUpdate::CritiqueReady(Box::new(result))).await;
            }
            TaskOutcome::Critique(Err(e)) => {
                // The alert is the whole error surface; nothing structured
                // survives the transition back to idle.
                self.state.reply_phase = ReplyPhase::Idle;
                self.send(ViewUpdate::CritiqueFailed {
                    message: e.to_string(),
                })
                .await;
            }
        }
    }

    async fn send(&self, update: ViewUpdate) {
        // A closed update side means the frontend went away; the loop keeps
        // running until the input side closes too.
        let _ = self.updates.send(update).await;
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
