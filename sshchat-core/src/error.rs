use std::path::PathBuf;
use thiserror::Error;

/// Typed failures surfaced by the core.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("remote dispatch failed: {0}")]
    Dispatch(String),

    #[error("no async runtime to dispatch on: {0}")]
    NoRuntime(String),
}

pub type ChatResult<T> = std::result::Result<T, ChatError>;
