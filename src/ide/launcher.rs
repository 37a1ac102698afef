// ABOUTME: Launch entry point: go-to-IDE short circuit, initialize call, poller handoff

use crate::ide::poller::{PollOutcome, Poller};
use crate::ide::state::{lock_state, SharedIdeState};
use crate::ide::{IdeApi, LaunchTarget, SessionScope};
use crate::models::SessionState;
use tracing::{debug, info};

/// What a "Launch Session" action amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// A session was already held; no network call was made. The caller
    /// decides what to do with the redirect URL (open a browser, print it).
    AlreadyHeld { redirect_url: Option<String> },
    /// Initialize answered with a non-transient session, adopted directly.
    Adopted,
    /// Initialize answered `Initializing`; the poll chain ran and ended
    /// this way.
    Polled(PollOutcome),
    /// Initialize answered without a session (server refused the launch).
    Refused,
    /// The initialize request itself failed; the error was queued.
    Failed,
}

/// Single entry point for the Launch / Go-to-IDE action.
///
/// A held session turns the action into "go to it". Otherwise the launch
/// sets `loading`, initializes, and either adopts the session immediately
/// or hands off to the poller, which alone clears `loading`.
pub async fn launch<A: IdeApi>(
    api: &A,
    state: &SharedIdeState,
    target: &LaunchTarget,
    poller: &Poller,
) -> LaunchOutcome {
    {
        let ide = lock_state(state);
        if let Some(session) = &ide.session {
            debug!(session_id = %session.id, "session already held, skipping initialize");
            return LaunchOutcome::AlreadyHeld {
                redirect_url: session.redirect_url.clone(),
            };
        }
    }

    lock_state(state).loading = true;

    let payload = match api.initialize(target).await {
        Ok(normalized) => {
            let mut ide = lock_state(state);
            ide.push_note(normalized.note);
            normalized.data
        }
        Err(error) => {
            let mut ide = lock_state(state);
            ide.report_error(&error);
            ide.loading = false;
            return LaunchOutcome::Failed;
        }
    };

    // The server may have normalized or defaulted settings fields; take its
    // word before looking at the session.
    if let Some(settings) = payload.settings {
        lock_state(state).settings = settings;
    }

    let Some(session) = payload.session else {
        lock_state(state).loading = false;
        return LaunchOutcome::Refused;
    };

    info!(session_id = %session.id, state = session.state.label(), "session initialized");

    if session.state == SessionState::Initializing {
        let session_id = session.id.clone();
        let guard = {
            let mut ide = lock_state(state);
            ide.show_stop = false;
            ide.adopt(Some(session));
            ide.begin_poll()
        };
        let outcome = poller.run(api, &session_id, state, &guard).await;
        return LaunchOutcome::Polled(outcome);
    }

    let mut ide = lock_state(state);
    ide.show_stop = session.is_running();
    ide.adopt(Some(session));
    ide.loading = false;
    LaunchOutcome::Adopted
}

/// Dialog-open refresh: look up the active session for the scope, adopt it,
/// and resume watching if it is still initializing. The admin variant also
/// refreshes the settings the session was launched with.
pub async fn refresh_active<A: IdeApi>(
    api: &A,
    state: &SharedIdeState,
    scope: &SessionScope,
    watch: &Poller,
) {
    let payload = match api.active(scope).await {
        Ok(normalized) => {
            let mut ide = lock_state(state);
            ide.push_note(normalized.note);
            normalized.data
        }
        Err(error) => {
            lock_state(state).report_error(&error);
            return;
        }
    };

    if let Some(settings) = payload.settings {
        lock_state(state).settings = settings;
    }

    let Some(session) = payload.session else {
        return;
    };

    debug!(session_id = %session.id, state = session.state.label(), "found active session");

    if session.state == SessionState::Initializing {
        let session_id = session.id.clone();
        let guard = {
            let mut ide = lock_state(state);
            ide.adopt(Some(session));
            ide.loading = true;
            ide.begin_poll()
        };
        watch.run(api, &session_id, state, &guard).await;
        return;
    }

    let mut ide = lock_state(state);
    ide.show_stop = session.is_running();
    ide.adopt(Some(session));
}
