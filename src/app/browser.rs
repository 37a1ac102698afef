// ABOUTME: Opens the session redirect URL in the user's browser

use anyhow::{anyhow, Result};
use std::process::{Command, Stdio};

/// Open a URL with the platform opener, detached from the TUI's terminal.
pub fn open_url(url: &str) -> Result<()> {
    let opener = ["xdg-open", "open", "wslview"]
        .into_iter()
        .find(|cmd| command_exists(cmd))
        .ok_or_else(|| anyhow!("no browser opener found on this system"))?;

    Command::new(opener)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| anyhow!("failed to run {opener}: {e}"))?;

    Ok(())
}

fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
