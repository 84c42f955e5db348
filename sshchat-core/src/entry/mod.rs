//! Entry model + demo transcript.
//!
//! An "entry" is one line of the conversation:
//! - who said it (user / remote / system)
//! - when
//! - the text

pub mod model;
pub mod transcript;

pub use model::{Entry, EntryId, Origin};
