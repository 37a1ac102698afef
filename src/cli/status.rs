// ABOUTME: status subcommand: report session quota and the active session

use crate::api::ApiClient;
use crate::cli::{OutputFormat, StatusArgs};
use crate::config::AppConfig;
use crate::ide::{IdeApi, SessionScope};
use crate::models::Session;
use anyhow::{anyhow, Context, Result};

pub async fn execute(args: StatusArgs, format: OutputFormat, config: AppConfig) -> Result<()> {
    let api = ApiClient::new(&config.api_url, config.token.clone())?;

    let scope = if args.admin {
        SessionScope::Admin
    } else {
        let assignment_id = args
            .assignment_id
            .clone()
            .context("an assignment id is required for a student status check (or pass --admin)")?;
        SessionScope::Assignment(assignment_id)
    };

    let available = api
        .sessions_available()
        .await
        .map_err(|e| anyhow!("failed to check session availability: {e}"))?
        .data
        .sessions_available;
    let active = api
        .active(&scope)
        .await
        .map_err(|e| anyhow!("failed to look up the active session: {e}"))?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "sessions_available": available,
                    "active": active.data.active,
                    "session": active.data.session,
                }))?
            );
        }
        OutputFormat::Text => {
            if available {
                println!("session quota: available");
            } else {
                println!("session quota: at capacity");
            }
            match active.data.session {
                Some(session) => print_session(&session),
                None => println!("no active session"),
            }
        }
    }

    Ok(())
}

fn print_session(session: &Session) {
    println!("session: {}", session.id);
    println!("state:   {}", session.state.label());
    if let Some(url) = &session.redirect_url {
        println!("url:     {url}");
    }
    if let Some(created) = &session.created {
        println!("created: {created}");
    }
}
