// ABOUTME: CLI argument parsing and command routing for anubis-ide
//
// Provides a command-line surface for the same lifecycle the TUI drives:
// - launch: initialize a session and wait for it to come up
// - stop: tear down the active session
// - status: quota flag plus the active session
// - tui (default): the dialog interface

pub mod launch;
pub mod status;
pub mod stop;

use crate::api::NoteLevel;
use crate::ide::{lock_state, SharedIdeState};
use clap::{Parser, Subcommand, ValueEnum};

/// Terminal client for Anubis Cloud IDE sessions
#[derive(Parser)]
#[command(name = "anubis-ide")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for commands
#[derive(Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the dialog TUI (default if no command given)
    Tui(TuiArgs),

    /// Initialize a session and wait until it is running
    Launch(LaunchArgs),

    /// Stop the active session
    Stop(StopArgs),

    /// Show the quota flag and the active session
    Status(StatusArgs),
}

/// Arguments for the tui command
#[derive(clap::Args)]
pub struct TuiArgs {
    /// Assignment the student dialog launches against
    #[arg(long)]
    pub assignment: Option<String>,

    /// Start on the admin management dialog
    #[arg(long)]
    pub admin: bool,
}

/// Arguments for the launch command
#[derive(clap::Args)]
pub struct LaunchArgs {
    /// Assignment to launch an IDE for (student launch)
    pub assignment_id: Option<String>,

    /// Disable autosave for this session
    #[arg(long)]
    pub no_autosave: bool,

    /// Mount a persistent volume for /home/anubis
    #[arg(long)]
    pub persistent_storage: bool,

    /// Admin launch with server-side default settings
    #[arg(long)]
    pub admin: bool,

    /// Override a settings field for an admin custom launch (repeatable).
    /// Implies --admin.
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,
}

/// Arguments for the stop command
#[derive(clap::Args)]
pub struct StopArgs {
    /// Assignment whose session should stop (student scope)
    pub assignment_id: Option<String>,

    /// Stop through the admin endpoints
    #[arg(long)]
    pub admin: bool,
}

/// Arguments for the status command
#[derive(clap::Args)]
pub struct StatusArgs {
    /// Assignment to look up (student scope)
    pub assignment_id: Option<String>,

    /// Look up the admin session
    #[arg(long)]
    pub admin: bool,
}

/// Drain queued notices to stderr in text mode, or collect them for the
/// json document.
pub fn drain_notices(state: &SharedIdeState, format: OutputFormat) -> Vec<serde_json::Value> {
    let notices: Vec<(NoteLevel, String)> = {
        let mut ide = lock_state(state);
        ide.notices
            .drain(..)
            .map(|notice| (notice.level, notice.message))
            .collect()
    };

    match format {
        OutputFormat::Text => {
            for (level, message) in &notices {
                eprintln!("[{}] {message}", level.as_str());
            }
            Vec::new()
        }
        OutputFormat::Json => notices
            .into_iter()
            .map(|(level, message)| {
                serde_json::json!({ "level": level.as_str(), "message": message })
            })
            .collect(),
    }
}
