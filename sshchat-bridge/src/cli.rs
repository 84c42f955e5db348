//! Command-line flags and config resolution.

use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use sshchat_core::{Credentials, SessionConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "sshchat", version, about = "Chat-style front end for a mock SSH session")]
pub struct Args {
    /// Remote host name.
    #[arg(long)]
    pub host: Option<String>,

    /// Remote port (defaults to the configured port, normally 22).
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Remote user name.
    #[arg(long, short)]
    pub user: Option<String>,

    /// Password for the remote user.
    #[arg(long, env = "SSHCHAT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Config file (JSON). Defaults to the platform config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the simulated latency in milliseconds.
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Start with an empty conversation instead of the demo transcript.
    #[arg(long)]
    pub no_demo: bool,

    /// Log at debug level.
    #[arg(long, short)]
    pub verbose: bool,
}

impl Args {
    /// Config file to read: `--config`, else `<config dir>/sshchat/config.json`.
    pub fn config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config {
            return Some(path.clone());
        }
        ProjectDirs::from("", "", "sshchat").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load the config file and apply flag overrides.
    pub fn load_config(&self) -> Result<SessionConfig> {
        let mut config = match self.config_path() {
            Some(path) => SessionConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => SessionConfig::default(),
        };

        if let Some(latency) = self.latency_ms {
            config.latency_ms = latency;
        }
        if self.no_demo {
            config.seed_demo = false;
        }
        if self.verbose {
            config.log_level = "debug".to_string();
        }
        Ok(config)
    }

    /// Credentials from flags; anything not given stays empty.
    pub fn credentials(&self, config: &SessionConfig) -> Credentials {
        Credentials::new(
            self.host.clone().unwrap_or_default(),
            self.port.unwrap_or(config.default_port),
            self.user.clone().unwrap_or_default(),
            self.password.clone().unwrap_or_default(),
        )
    }
}
