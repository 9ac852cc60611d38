//! Chat session: transcript ownership and submit sequencing.
//!
//! Lifecycle of one widget instance:
//! - created with a single greeting;
//! - `submit` resolves, awaits the reply, then appends user + bot messages;
//! - `clear` resets to a single greeting and invalidates pending replies;
//! - dropped with the widget, nothing persists.
//!
//! The state lock is never held across an await.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::intent::resolve;
use crate::reply::{ReplyOutcome, ReplySynthesizer};
use crate::types::{Message, SessionSnapshot};

/// Seed message of a fresh session.
pub const GREETING: &str = "¡Hola! Selecciona una pregunta para empezar \u{1f680}";

/// Seed message after `clear`.
pub const CLEARED_GREETING: &str =
    "Chat limpiado \u{1f9f9}. Selecciona otra pregunta \u{1f447}";

/// Quick-question buttons offered under the transcript.
pub const QUICK_QUESTIONS: [&str; 3] = [
    "¿Cuáles son los proyectos?",
    "¿Quién eres?",
    "¿Cómo puedo contactarte?",
];

/// Result of a `submit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// User and bot messages were appended.
    Appended,
    /// A reply was already pending; nothing happened.
    Ignored,
    /// The session was cleared while the reply was pending; the reply was dropped.
    Discarded,
}

#[derive(Debug)]
struct SessionState {
    transcript: Vec<Message>,
    busy: bool,
    open: bool,
    /// Bumped by `clear`; replies started under an older value are dropped.
    generation: u64,
}

/// One chat widget's session.
pub struct ChatSession {
    synthesizer: ReplySynthesizer,
    state: Mutex<SessionState>,
}

impl ChatSession {
    /// Create a closed, idle session seeded with the greeting.
    pub fn new(synthesizer: ReplySynthesizer) -> Self {
        Self {
            synthesizer,
            state: Mutex::new(SessionState {
                transcript: vec![Message::bot(GREETING)],
                busy: false,
                open: false,
                generation: 0,
            }),
        }
    }

    // -----------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------

    /// Handle one utterance.
    ///
    /// No-op while another reply is pending. Otherwise appends exactly two
    /// messages (the utterance, then the reply) unless `clear` ran meanwhile.
    /// Never fails: fetch errors are already turned into a bot message.
    pub async fn submit(&self, utterance: &str) -> SubmitOutcome {
        let generation = {
            let mut state = self.state();
            if state.busy {
                debug!("Submit ignored while a reply is pending");
                return SubmitOutcome::Ignored;
            }
            state.busy = true;
            state.generation
        };
        let mut busy = BusyGuard::new(&self.state);

        let intent = resolve(utterance);
        debug!(%intent, "Intent resolved");

        let reply = self.synthesizer.reply(intent).await;
        if reply.outcome == ReplyOutcome::Failed {
            debug!(%intent, "Reply fell back after fetch failure");
        }

        let mut state = self.state();
        state.busy = false;
        busy.disarm();

        if state.generation != generation {
            info!(%intent, "Reply discarded: session was cleared while it was pending");
            return SubmitOutcome::Discarded;
        }

        state.transcript.push(Message::user(utterance));
        state.transcript.push(reply.message);
        debug!(len = state.transcript.len(), "Transcript updated");
        SubmitOutcome::Appended
    }

    /// Submit one of [`QUICK_QUESTIONS`] by index. `None` if out of range.
    pub async fn submit_quick(&self, index: usize) -> Option<SubmitOutcome> {
        let question = QUICK_QUESTIONS.get(index)?;
        Some(self.submit(question).await)
    }

    /// Replace the transcript with a single greeting.
    ///
    /// Allowed while busy. A pending submit keeps running but its reply
    /// will be discarded.
    pub fn clear(&self) {
        let mut state = self.state();
        state.transcript = vec![Message::bot(CLEARED_GREETING)];
        state.generation += 1;
        debug!(generation = state.generation, busy = state.busy, "Transcript cleared");
    }

    pub fn open(&self) {
        self.state().open = true;
    }

    pub fn close(&self) {
        self.state().open = false;
    }

    /// Flip the open flag, as the floating chat button does.
    pub fn toggle(&self) {
        let mut state = self.state();
        state.open = !state.open;
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state();
        SessionSnapshot {
            transcript: state.transcript.clone(),
            is_busy: state.busy,
            is_open: state.open,
        }
    }

    pub fn transcript(&self) -> Vec<Message> {
        self.state().transcript.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state().busy
    }

    pub fn is_open(&self) -> bool {
        self.state().open
    }

    // Every mutation is a single assignment or push, so a poisoned lock
    // still guards consistent state.
    fn state(&self) -> MutexGuard<'_, SessionState> {
        lock(&self.state)
    }
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the busy flag if a submit future is dropped before completing.
struct BusyGuard<'a> {
    state: &'a Mutex<SessionState>,
    armed: bool,
}

impl<'a> BusyGuard<'a> {
    fn new(state: &'a Mutex<SessionState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            lock(self.state).busy = false;
            tracing::warn!("Pending submit dropped before completion; busy flag reset");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
