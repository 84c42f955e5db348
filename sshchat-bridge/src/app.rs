//! Input handling for the terminal front end.
//!
//! `ChatApp` decides, line by line, whether input is a local `!` command or a
//! remote command line for the session store. Rendering of log entries is
//! driven separately by the store's event stream.

use crate::local::{self, LocalCommand, HELP_LINES};
use crate::render;
use sshchat_core::{Credentials, SessionStore, Submission};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// What the caller should do after one input line.
#[derive(Debug)]
pub struct Outcome {
    pub flow: Flow,
    /// Text to print that is not part of the conversation log.
    pub output: Vec<String>,
}

impl Outcome {
    fn lines(output: Vec<String>) -> Self {
        Self {
            flow: Flow::Continue,
            output,
        }
    }

    fn silent() -> Self {
        Self::lines(Vec::new())
    }
}

#[derive(Debug)]
pub struct ChatApp {
    store: SessionStore,
    pending: Vec<Submission>,
}

impl ChatApp {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            pending: Vec::new(),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Submissions whose reply has not been appended yet.
    pub fn in_flight(&self) -> usize {
        self.pending.iter().filter(|s| !s.is_finished()).count()
    }

    pub fn handle_line(&mut self, line: &str) -> Outcome {
        let Some(cmd) = local::parse(line) else {
            if let Some(sub) = self.store.submit(line) {
                self.pending.retain(|s| !s.is_finished());
                self.pending.push(sub);
            }
            return Outcome::silent();
        };

        tracing::debug!("local command: {:?}", cmd);

        match cmd {
            LocalCommand::Help => {
                Outcome::lines(HELP_LINES.iter().map(|s| s.to_string()).collect())
            }

            // The banner is printed off the store's Reset event.
            LocalCommand::Reset => {
                self.store.reset();
                Outcome::silent()
            }
            LocalCommand::Disconnect => {
                self.store.disconnect();
                Outcome::lines(vec![render::format_status(&self.store.credentials())])
            }

            LocalCommand::Connect(target) => {
                self.store.set_credentials(Credentials::new(
                    target.host,
                    target.port,
                    target.username,
                    target.secret,
                ));
                Outcome::lines(vec![render::format_status(&self.store.credentials())])
            }

            LocalCommand::Status => {
                Outcome::lines(vec![render::format_status(&self.store.credentials())])
            }

            LocalCommand::History => {
                let entries = self.store.entries();
                if entries.is_empty() {
                    return Outcome::lines(vec!["No conversation yet.".to_string()]);
                }
                Outcome::lines(entries.iter().map(render::format_entry).collect())
            }

            LocalCommand::Exit => Outcome {
                flow: Flow::Exit,
                output: Vec::new(),
            },

            LocalCommand::Usage(usage) => Outcome::lines(vec![usage.to_string()]),

            LocalCommand::Unknown(other) => Outcome::lines(vec![
                format!("Unknown command: !{}", other),
                "Type !help for available commands.".to_string(),
            ]),
        }
    }

    /// Wait for every outstanding reply.
    pub async fn drain(&mut self) {
        for sub in self.pending.drain(..) {
            sub.finished().await;
        }
    }
}
