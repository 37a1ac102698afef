// ABOUTME: Configuration for the Anubis IDE client: API endpoint, token, poll tuning

use crate::ide::Poller;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://anubis.osiris.services/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Anubis API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Auth token (the `token` cookie value from a signed-in browser
    /// session). Also picked up from `ANUBIS_TOKEN`.
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub poll: PollConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Delay between poll ticks, in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Attempt ceiling for launch-driven polls.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Attempt ceiling when watching a session that was already
    /// initializing at dialog open.
    #[serde(default = "default_watch_max_attempts")]
    pub watch_max_attempts: u32,

    /// On the long watch, reveal the stop control after this many ticks.
    #[serde(default = "default_reveal_stop_after")]
    pub reveal_stop_after: u32,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_max_attempts() -> u32 {
    60
}

fn default_watch_max_attempts() -> u32 {
    600
}

fn default_reveal_stop_after() -> u32 {
    30
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_attempts: default_max_attempts(),
            watch_max_attempts: default_watch_max_attempts(),
            reveal_stop_after: default_reveal_stop_after(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            poll: PollConfig::default(),
        }
    }
}

impl AppConfig {
    /// `~/.anubis/config.toml`, next to where the original CLI kept its
    /// config.json.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".anubis").join("config.toml"))
    }

    /// Load the config file if present, fall back to defaults otherwise,
    /// then apply environment overrides (`ANUBIS_API_URL`, `ANUBIS_TOKEN`).
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };

        if let Ok(api_url) = std::env::var("ANUBIS_API_URL") {
            config.api_url = api_url;
        }
        if let Ok(token) = std::env::var("ANUBIS_TOKEN") {
            config.token = Some(token);
        }

        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().context("could not determine home directory")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config directory: {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("failed to write config file: {}", path.display()))
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(self.poll.interval_ms)
    }

    /// Poller for launch-driven chains (short horizon, no stop reveal).
    pub fn launch_poller(&self) -> Poller {
        Poller::new(self.interval(), self.poll.max_attempts)
    }

    /// Poller for watching an already-initializing session (long horizon,
    /// stop control revealed part-way through).
    pub fn watch_poller(&self) -> Poller {
        let mut poller = Poller::new(self.interval(), self.poll.watch_max_attempts);
        poller.reveal_stop_after = Some(self.poll.reveal_stop_after);
        poller
    }
}
