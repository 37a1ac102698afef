// ABOUTME: Bounded fixed-interval poll loop watching a session leave its transient state

use crate::ide::state::{lock_state, PollGuard, SharedIdeState};
use crate::ide::IdeApi;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// How one poll chain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Session reached `Running` and was adopted.
    Ready,
    /// Session left the transient set without becoming ready; the held
    /// session was cleared.
    Ended,
    /// Attempt ceiling reached. Deliberately quiet at the user surface.
    GaveUp,
    /// The guard was invalidated (stop or teardown won the race).
    Cancelled,
    /// The poll request itself failed; the error was queued as a notice.
    Failed,
}

/// Tuning for one poll chain. Requests are strictly sequential: each tick
/// is scheduled only after the previous response is processed.
#[derive(Debug, Clone)]
pub struct Poller {
    pub interval: Duration,
    pub max_attempts: u32,
    /// Reveal the stop control after this many loading ticks, the way the
    /// student dialog does on its long watch.
    pub reveal_stop_after: Option<u32>,
}

impl Poller {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
            reveal_stop_after: None,
        }
    }

    /// Run the chain to completion. Exactly one request is outstanding at a
    /// time; the guard is checked before every continuation.
    pub async fn run<A: IdeApi>(
        &self,
        api: &A,
        session_id: &str,
        state: &SharedIdeState,
        guard: &PollGuard,
    ) -> PollOutcome {
        for attempt in 1..=self.max_attempts {
            if !guard.is_live() {
                debug!(session_id, attempt, "poll chain cancelled");
                return PollOutcome::Cancelled;
            }

            let payload = match api.poll(session_id).await {
                Ok(normalized) => {
                    let mut ide = lock_state(state);
                    ide.push_note(normalized.note);
                    normalized.data
                }
                Err(error) => {
                    warn!(session_id, %error, "poll request failed");
                    let mut ide = lock_state(state);
                    ide.report_error(&error);
                    ide.loading = false;
                    ide.finish_poll(guard);
                    return PollOutcome::Failed;
                }
            };

            // A stop may have raced this request; its answer is stale.
            if !guard.is_live() {
                debug!(session_id, attempt, "poll response discarded after cancel");
                return PollOutcome::Cancelled;
            }

            if let Some(session) = &payload.session {
                lock_state(state).session_label = Some(session.state.label().to_string());
            }

            if !payload.loading {
                let mut ide = lock_state(state);
                let outcome = match payload.session {
                    Some(session) if session.is_running() => {
                        ide.adopt(Some(session));
                        ide.show_stop = true;
                        PollOutcome::Ready
                    }
                    _ => {
                        ide.session = None;
                        ide.show_stop = false;
                        PollOutcome::Ended
                    }
                };
                ide.loading = false;
                ide.finish_poll(guard);
                debug!(session_id, attempt, ?outcome, "poll chain finished");
                return outcome;
            }

            if Some(attempt) == self.reveal_stop_after {
                lock_state(state).show_stop = true;
            }

            if attempt == self.max_attempts {
                break;
            }

            sleep(self.interval).await;
        }

        // Quiet give-up: no adoption, no user-visible error, loading left
        // as-is, matching the original dialogs.
        warn!(
            session_id,
            attempts = self.max_attempts,
            "gave up polling session"
        );
        lock_state(state).finish_poll(guard);
        PollOutcome::GaveUp
    }
}
