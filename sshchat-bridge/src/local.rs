//! Front-end `!` commands.
//!
//! These never reach the session store's remote shell. Anything not starting
//! with `!` is a remote command line.

use sshchat_core::credentials::DEFAULT_PORT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalCommand {
    Help,
    Reset,
    Disconnect,
    Connect(ConnectTarget),
    Status,
    History,
    Exit,
    /// Recognized command, bad arguments. Holds the usage line.
    Usage(&'static str),
    Unknown(String),
}

/// `user@host[:port]` plus the secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectTarget {
    pub username: String,
    pub host: String,
    pub port: u16,
    pub secret: String,
}

pub const CONNECT_USAGE: &str = "Usage: !connect <user>@<host>[:<port>] <password>";

pub const HELP_LINES: &[&str] = &[
    "SSH Chat local commands:",
    "",
    "  !help                                  This help message",
    "  !connect <user>@<host>[:<port>] <pw>   Set the connection details",
    "  !status                                Show the connection state",
    "  !history                               Re-print the whole conversation",
    "  !reset                                 Clear the conversation",
    "  !disconnect                            Clear the conversation and forget the password",
    "  !exit, !quit                           Leave",
    "",
    "  (Anything else is sent to the remote shell. Try `help`.)",
];

/// `None` when the line is meant for the remote shell.
pub fn parse(line: &str) -> Option<LocalCommand> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix('!')?;
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let Some(cmd) = parts.first() else {
        return Some(LocalCommand::Unknown(String::new()));
    };

    let parsed = match *cmd {
        "help" => LocalCommand::Help,
        "reset" | "clear" => LocalCommand::Reset,
        "disconnect" => LocalCommand::Disconnect,
        "status" => LocalCommand::Status,
        "history" => LocalCommand::History,
        "exit" | "quit" => LocalCommand::Exit,
        "connect" => match (parts.get(1), parts.get(2)) {
            (Some(target), Some(secret)) => match parse_target(target) {
                Some((username, host, port)) => LocalCommand::Connect(ConnectTarget {
                    username,
                    host,
                    port,
                    secret: secret.to_string(),
                }),
                None => LocalCommand::Usage(CONNECT_USAGE),
            },
            _ => LocalCommand::Usage(CONNECT_USAGE),
        },
        other => LocalCommand::Unknown(other.to_string()),
    };
    Some(parsed)
}

fn parse_target(target: &str) -> Option<(String, String, u16)> {
    let (user, host_port) = target.split_once('@')?;
    let (host, port) = match host_port.rsplit_once(':') {
        Some((host, port)) => (host, port.parse::<u16>().ok()?),
        None => (host_port, DEFAULT_PORT),
    };
    if user.is_empty() || host.is_empty() {
        return None;
    }
    Some((user.to_string(), host.to_string(), port))
}
