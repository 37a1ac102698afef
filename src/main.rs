// ABOUTME: Main entry point for anubis-ide with TUI and CLI support
//
// Binary: anubis-ide
// Usage: anubis-ide [COMMAND]
// - No command: launches the dialog TUI
// - launch: initialize a session and wait until it is running
// - stop: tear down the active session
// - status: quota flag plus the active session

#![allow(missing_docs)]

use anubis_ide::api::ApiClient;
use anubis_ide::app::{App, AppState, DialogKind, EventHandler};
use anubis_ide::cli;
use anubis_ide::components::LayoutComponent;
use anubis_ide::config::AppConfig;
use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, IsTerminal},
    time::{Duration, Instant},
};

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = cli::Cli::parse();
    let config = AppConfig::load()?;

    let result = match args.command {
        Some(cli::Commands::Launch(launch_args)) => {
            cli::launch::execute(launch_args, args.format, config).await
        }
        Some(cli::Commands::Stop(stop_args)) => {
            cli::stop::execute(stop_args, args.format, config).await
        }
        Some(cli::Commands::Status(status_args)) => {
            cli::status::execute(status_args, args.format, config).await
        }
        Some(cli::Commands::Tui(tui_args)) => run_tui(tui_args, config).await,
        None => {
            run_tui(
                cli::TuiArgs {
                    assignment: None,
                    admin: false,
                },
                config,
            )
            .await
        }
    };

    // Ensure terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

async fn run_tui(args: cli::TuiArgs, config: AppConfig) -> Result<()> {
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Try running directly in a terminal instead of redirecting output."
        ));
    }

    let api = ApiClient::new(&config.api_url, config.token.clone())?;
    let dialog = if args.admin {
        DialogKind::Admin
    } else {
        DialogKind::Student
    };
    let mut app = App::new(api, config, AppState::new(dialog, args.assignment));
    app.init();
    let layout = LayoutComponent::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui_loop(&mut app, &layout, &mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_tui_loop(
    app: &mut App,
    layout: &LayoutComponent,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if let Some(app_event) = EventHandler::handle_key_event(key_event, &app.state) {
                    EventHandler::process_event(app_event, &mut app.state);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            return Ok(());
        }
    }
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use tracing_subscriber::prelude::*;

    let log_dir = dirs::home_dir()
        .map(|home| home.join(".anubis").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".anubis/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    let log_file = log_dir.join(format!(
        "anubis-ide-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        // Logging is best-effort; the TUI still runs without a log file.
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anubis_ide=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Restore the terminal before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
