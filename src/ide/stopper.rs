// ABOUTME: Session teardown: invalidate the watcher, call stop, clear held state on success

use crate::ide::state::{lock_state, SharedIdeState};
use crate::ide::IdeApi;
use tracing::info;

/// How a "Stop Session" action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Nothing to stop.
    NoSession,
    /// Server acknowledged; the held session was cleared.
    Stopped,
    /// Server reported a business error; the held session is unchanged.
    Refused,
    /// Transport/auth failure; the held session is unchanged.
    Failed,
}

/// Tear down the held session. The active poll guard is invalidated before
/// anything else so a stale poll answer cannot resurrect the session, and
/// `loading` ends false no matter how the call went.
pub async fn stop<A: IdeApi>(api: &A, state: &SharedIdeState, admin: bool) -> StopOutcome {
    let session_id = {
        let mut ide = lock_state(state);
        let Some(session) = &ide.session else {
            return StopOutcome::NoSession;
        };
        let session_id = session.id.clone();
        ide.invalidate_poll();
        ide.show_stop = false;
        ide.loading = true;
        session_id
    };

    match api.stop(&session_id, admin).await {
        Ok(normalized) => {
            info!(session_id, "session stopped");
            let mut ide = lock_state(state);
            ide.push_note(normalized.note);
            ide.session = None;
            ide.session_label = Some("Stopped".to_string());
            ide.loading = false;
            StopOutcome::Stopped
        }
        Err(error) => {
            let refused = matches!(error, crate::api::ApiError::Server(_));
            let mut ide = lock_state(state);
            ide.report_error(&error);
            ide.loading = false;
            if refused {
                StopOutcome::Refused
            } else {
                StopOutcome::Failed
            }
        }
    }
}
