// ABOUTME: launch subcommand: initialize a session, run the poll loop, print the redirect

use crate::api::{ApiClient, InitializeOptions};
use crate::cli::{drain_notices, LaunchArgs, OutputFormat};
use crate::config::AppConfig;
use crate::ide::{launch, lock_state, shared_state, LaunchOutcome, LaunchTarget, PollOutcome};
use crate::models::{IdeSettings, SettingValue};
use anyhow::{anyhow, bail, Context, Result};

pub async fn execute(args: LaunchArgs, format: OutputFormat, config: AppConfig) -> Result<()> {
    let api = ApiClient::new(&config.api_url, config.token.clone())?;
    let state = shared_state();

    let target = build_target(&api, &args).await?;
    let poller = config.launch_poller();
    let outcome = launch(&api, &state, &target, &poller).await;

    let session = lock_state(&state).session.clone();
    let notices = drain_notices(&state, format);

    if format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "outcome": describe(&outcome),
                "session": session,
                "notices": notices,
            }))?
        );
    }

    match outcome {
        LaunchOutcome::AlreadyHeld { redirect_url } => {
            if format == OutputFormat::Text {
                match redirect_url {
                    Some(url) => println!("session already running: {url}"),
                    None => println!("session already running, redirect url not ready yet"),
                }
            }
            Ok(())
        }
        LaunchOutcome::Adopted | LaunchOutcome::Polled(PollOutcome::Ready) => {
            if format == OutputFormat::Text {
                match session.and_then(|s| s.redirect_url) {
                    Some(url) => println!("session ready: {url}"),
                    None => println!("session ready"),
                }
            }
            Ok(())
        }
        LaunchOutcome::Polled(PollOutcome::GaveUp) => {
            Err(anyhow!("session did not come up before the poll ceiling"))
        }
        LaunchOutcome::Polled(PollOutcome::Ended) => {
            Err(anyhow!("session ended before becoming ready"))
        }
        LaunchOutcome::Polled(PollOutcome::Cancelled) => {
            Err(anyhow!("session watch was cancelled"))
        }
        LaunchOutcome::Polled(PollOutcome::Failed)
        | LaunchOutcome::Refused
        | LaunchOutcome::Failed => Err(anyhow!("launch failed")),
    }
}

async fn build_target(api: &ApiClient, args: &LaunchArgs) -> Result<LaunchTarget> {
    if args.admin || !args.set.is_empty() {
        if args.set.is_empty() {
            return Ok(LaunchTarget::AdminDefault);
        }
        // Custom launches start from the server's defaults, the same way the
        // management dialog seeds its form.
        let mut settings = api
            .default_settings()
            .await
            .map_err(|e| anyhow!("failed to fetch default settings: {e}"))?
            .data
            .settings;
        for entry in &args.set {
            apply_override(&mut settings, entry)?;
        }
        return Ok(LaunchTarget::AdminCustom(settings));
    }

    let assignment_id = args
        .assignment_id
        .clone()
        .context("an assignment id is required for a student launch (or pass --admin)")?;
    Ok(LaunchTarget::Assignment {
        assignment_id,
        options: InitializeOptions {
            autosave: !args.no_autosave,
            persistent_storage: args.persistent_storage,
        },
    })
}

fn apply_override(settings: &mut IdeSettings, entry: &str) -> Result<()> {
    let (field, value) = entry
        .split_once('=')
        .with_context(|| format!("expected FIELD=VALUE, got: {entry}"))?;

    match settings.get(field) {
        Some(SettingValue::Flag(_)) => {
            let flag: bool = value
                .parse()
                .with_context(|| format!("{field} expects true or false, got: {value}"))?;
            settings.set(field, SettingValue::Flag(flag));
        }
        Some(SettingValue::Text(_)) => {
            settings.set(field, SettingValue::Text(value.to_string()));
        }
        None => bail!("unknown settings field: {field}"),
    }
    Ok(())
}

fn describe(outcome: &LaunchOutcome) -> &'static str {
    match outcome {
        LaunchOutcome::AlreadyHeld { .. } => "already-held",
        LaunchOutcome::Adopted => "adopted",
        LaunchOutcome::Polled(PollOutcome::Ready) => "ready",
        LaunchOutcome::Polled(PollOutcome::Ended) => "ended",
        LaunchOutcome::Polled(PollOutcome::GaveUp) => "gave-up",
        LaunchOutcome::Polled(PollOutcome::Cancelled) => "cancelled",
        LaunchOutcome::Polled(PollOutcome::Failed) => "poll-failed",
        LaunchOutcome::Refused => "refused",
        LaunchOutcome::Failed => "failed",
    }
}
