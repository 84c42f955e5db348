/// A command line classified against the fixed remote verb table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCommand {
    Ls(ListFlags),
    Pwd,
    Echo(Vec<String>),
    Cat(Option<String>),
    Whoami,
    Date,
    Help,
    /// Anything outside the table. Holds the verb (empty for a blank line).
    Unknown(String),
}

/// `ls` switches. Detected by membership anywhere in the token list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFlags {
    pub all: bool,
    pub long: bool,
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(input: &str) -> RemoteCommand {
        let trimmed = input.trim();

        // Help aliases are matched against the whole line, not the verb.
        if matches!(trimmed, "help" | "--help" | "-h") {
            return RemoteCommand::Help;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        let Some(verb) = parts.first() else {
            return RemoteCommand::Unknown(String::new());
        };
        let args = &parts[1..];

        match *verb {
            "ls" => RemoteCommand::Ls(ListFlags {
                all: args.iter().any(|a| *a == "-a" || *a == "--all"),
                long: args.contains(&"-l"),
            }),
            "pwd" => RemoteCommand::Pwd,
            "echo" => RemoteCommand::Echo(args.iter().map(|s| s.to_string()).collect()),
            "cat" => RemoteCommand::Cat(args.first().map(|s| s.to_string())),
            "whoami" => RemoteCommand::Whoami,
            "date" => RemoteCommand::Date,
            other => RemoteCommand::Unknown(other.to_string()),
        }
    }
}
