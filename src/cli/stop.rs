// ABOUTME: stop subcommand: look up the active session and tear it down

use crate::api::ApiClient;
use crate::cli::{drain_notices, OutputFormat, StopArgs};
use crate::config::AppConfig;
use crate::ide::{lock_state, shared_state, stop, IdeApi, SessionScope, StopOutcome};
use anyhow::{anyhow, Context, Result};

pub async fn execute(args: StopArgs, format: OutputFormat, config: AppConfig) -> Result<()> {
    let api = ApiClient::new(&config.api_url, config.token.clone())?;
    let state = shared_state();

    let scope = if args.admin {
        SessionScope::Admin
    } else {
        let assignment_id = args
            .assignment_id
            .clone()
            .context("an assignment id is required for a student stop (or pass --admin)")?;
        SessionScope::Assignment(assignment_id)
    };

    let active = api
        .active(&scope)
        .await
        .map_err(|e| anyhow!("failed to look up the active session: {e}"))?;
    lock_state(&state).adopt(active.data.session);

    let outcome = stop(&api, &state, args.admin).await;
    let notices = drain_notices(&state, format);

    if format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "outcome": describe(outcome),
                "notices": notices,
            }))?
        );
    }

    match outcome {
        StopOutcome::Stopped => {
            if format == OutputFormat::Text {
                println!("session stopped");
            }
            Ok(())
        }
        StopOutcome::NoSession => {
            if format == OutputFormat::Text {
                println!("no active session");
            }
            Ok(())
        }
        StopOutcome::Refused | StopOutcome::Failed => Err(anyhow!("stop failed")),
    }
}

fn describe(outcome: StopOutcome) -> &'static str {
    match outcome {
        StopOutcome::NoSession => "no-session",
        StopOutcome::Stopped => "stopped",
        StopOutcome::Refused => "refused",
        StopOutcome::Failed => "failed",
    }
}
