//! Command-line classification for the simulated remote shell.

pub mod parser;

pub use parser::{CommandParser, ListFlags, RemoteCommand};
