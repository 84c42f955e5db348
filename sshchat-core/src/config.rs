use crate::credentials::DEFAULT_PORT;
use crate::error::{ChatError, ChatResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// User-tunable session settings, stored as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Simulated round trip per remote command.
    pub latency_ms: u64,
    /// Start new sessions with the demonstration transcript.
    pub seed_demo: bool,
    pub default_port: u16,
    /// `tracing` level name for the front end.
    pub log_level: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            latency_ms: 500,
            seed_demo: true,
            default_port: DEFAULT_PORT,
            log_level: "info".to_string(),
        }
    }
}

impl SessionConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> ChatResult<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ChatError::ConfigIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&text).map_err(|source| ChatError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}
