//! Canned handlers for the remote verbs.
//!
//! Every handler is a pure function of the parsed command and the caller's
//! credentials; `date` additionally reads the injected clock.

use crate::clock::Clock;
use crate::credentials::Credentials;
use crate::interpreter::ExecutionResult;
use crate::runtime::parser::{ListFlags, RemoteCommand};

/// Exit status for a verb outside the table.
pub const EXIT_NOT_FOUND: i32 = 127;

const DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Z %Y";

const HELP_TEXT: &str = "Available commands: ls, pwd, echo, cat, whoami, date, help\n\
This is a mock SSH terminal for demonstration purposes.";

const LS_LONG: &str = "total 48
drwxr-xr-x  12 user  staff   384 Aug 22 14:30 .
drwxr-xr-x   5 user  staff   160 Aug 21 09:15 ..
-rw-r--r--   1 user  staff   287 Aug 20 11:22 .bashrc
-rw-r--r--   1 user  staff   128 Aug 19 16:45 .profile
drwxr-xr-x   3 user  staff    96 Aug 18 13:20 Documents
drwxr-xr-x   4 user  staff   128 Aug 17 10:30 Downloads
drwxr-xr-x   3 user  staff    96 Aug 16 08:15 Music
drwxr-xr-x   4 user  staff   128 Aug 15 14:20 Pictures
-rw-r--r--   1 user  staff  1024 Aug 14 09:45 README.md
drwxr-xr-x   2 user  staff    64 Aug 13 11:30 Projects";

const LS_SHORT: &str = "Documents    Downloads   Music    Pictures
README.md    Projects";

const LS_HIDDEN_PREFIX: &str = ".bashrc   .profile   ";

const README_MD: &str = "# Welcome to Mock SSH Server

This is a demonstration SSH terminal interface.
Available commands: ls, pwd, echo, cat, whoami, date, help

Try exploring the file system with 'ls -la' or
check the current directory with 'pwd'.";

const BASHRC: &str = r"# ~/.bashrc
export PS1='\u@\h:\w\$ '
alias ll='ls -la'
alias ..='cd ..'";

/// Central dispatch for all remote verbs.
pub fn dispatch(cmd: &RemoteCommand, creds: &Credentials, clock: &dyn Clock) -> ExecutionResult {
    match cmd {
        RemoteCommand::Ls(flags) => list(*flags),

        RemoteCommand::Pwd => ExecutionResult::success(format!("/home/{}", creds.username)),

        RemoteCommand::Whoami => ExecutionResult::success(creds.username.clone()),

        // Tokens were split on whitespace, so the original spacing is gone.
        RemoteCommand::Echo(args) => ExecutionResult::success(args.join(" ")),

        RemoteCommand::Cat(file) => cat(file.as_deref()),

        RemoteCommand::Date => {
            ExecutionResult::success(clock.now().format(DATE_FORMAT).to_string())
        }

        RemoteCommand::Help => ExecutionResult::success(HELP_TEXT),

        RemoteCommand::Unknown(verb) => ExecutionResult::failure(
            EXIT_NOT_FOUND,
            format!("{}: command not found", verb),
        ),
    }
}

// Long format already shows dotfiles, so `-a` only matters for the short table.
fn list(flags: ListFlags) -> ExecutionResult {
    if flags.long {
        return ExecutionResult::success(LS_LONG);
    }
    if flags.all {
        return ExecutionResult::success(format!("{}{}", LS_HIDDEN_PREFIX, LS_SHORT));
    }
    ExecutionResult::success(LS_SHORT)
}

fn cat(file: Option<&str>) -> ExecutionResult {
    let Some(file) = file else {
        return ExecutionResult::failure(1, "cat: missing file operand");
    };

    match file {
        "README.md" => ExecutionResult::success(README_MD),
        ".bashrc" => ExecutionResult::success(BASHRC),
        other => ExecutionResult::failure(
            1,
            format!("cat: {}: No such file or directory", other),
        ),
    }
}
