//! Conversation entry model.
//!
//! Entries carry stable UUID ids so a front end can compare "last appended"
//! markers without holding on to the entries themselves.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub type EntryId = Uuid;

/// Who produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    User,
    Remote,
    System,
}

impl Origin {
    /// Prompt-style tag shown in front of the entry body.
    pub fn speaker_tag(self) -> &'static str {
        match self {
            Origin::User => "you$",
            Origin::Remote => "ssh▷",
            Origin::System => "sys#",
        }
    }
}

/// One immutable item in the conversation log.
///
/// Fields are private; there is no way to change an entry once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    origin: Origin,
    created_at: DateTime<Utc>,
    body: String,
}

impl Entry {
    pub fn new_now(origin: Origin, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            created_at: Utc::now(),
            body: body.into(),
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
