pub mod builtins;
pub mod clock;
pub mod config;
pub mod credentials;
pub mod entry;
pub mod error;
pub mod interpreter;
pub mod runtime;
pub mod store;

// Re-export the main types so users can just use `sshchat_core::SessionStore`
pub use config::SessionConfig;
pub use credentials::Credentials;
pub use entry::{Entry, EntryId, Origin};
pub use error::{ChatError, ChatResult};
pub use interpreter::{ExecutionResult, MockShell, RemoteShell};
pub use store::{SessionStore, StoreEvent, Submission};
