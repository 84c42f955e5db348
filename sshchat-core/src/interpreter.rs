use crate::builtins;
use crate::clock::{Clock, SystemClock};
use crate::credentials::Credentials;
use crate::runtime::parser::CommandParser;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Simulated round trip for every remote call.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// Outcome of running one command line on the remote side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// `None` means the remote reported no status.
    pub exit_status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(exit_status: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_status: Some(exit_status),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// The interface for anything that can run a command line for a session.
///
/// `Err` is reserved for the call itself failing; a command that merely
/// exits non-zero is still `Ok`.
#[async_trait]
pub trait RemoteShell: Send + Sync {
    async fn execute(&self, creds: &Credentials, command_line: &str) -> Result<ExecutionResult>;
}

/// Deterministic stand-in for a remote host. Never touches the network.
pub struct MockShell {
    latency: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for MockShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockShell")
            .field("latency", &self.latency)
            .finish()
    }
}

impl Default for MockShell {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

impl MockShell {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            clock: Arc::new(SystemClock::default()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Classify and answer a line with no delay.
    pub fn interpret(&self, creds: &Credentials, command_line: &str) -> ExecutionResult {
        let parsed = CommandParser::parse(command_line);
        builtins::dispatch(&parsed, creds, self.clock.as_ref())
    }
}

#[async_trait]
impl RemoteShell for MockShell {
    async fn execute(&self, creds: &Credentials, command_line: &str) -> Result<ExecutionResult> {
        // A suspension point only: concurrent calls wait out their delays in parallel.
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        tracing::debug!("mock exec on {}@{}: {:?}", creds.username, creds.host, command_line);
        Ok(self.interpret(creds, command_line))
    }
}
