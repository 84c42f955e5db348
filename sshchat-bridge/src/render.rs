//! Plain-text timeline rendering.
//!
//! Zero terminal dependencies; the binary prints whatever these return.

use chrono::Local;
use sshchat_core::{Credentials, Entry, EntryId, StoreEvent};
use std::collections::HashSet;

/// One entry as `[HH:MM:SS] tag body`. Continuation lines are indented to
/// line up under the body.
pub fn format_entry(entry: &Entry) -> String {
    let stamp = entry.created_at().with_timezone(&Local).format("%H:%M:%S");
    let prefix = format!("[{}] {} ", stamp, entry.origin().speaker_tag());
    let indent = " ".repeat(prefix.chars().count());

    let mut out = String::new();
    for (i, line) in entry.body().split('\n').enumerate() {
        if i == 0 {
            out.push_str(&prefix);
        } else {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    out
}

/// Flatten a whole log, one rendered entry per block.
pub fn format_log(entries: &[Entry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format_entry(entry));
        out.push('\n');
    }
    out
}

pub fn format_status(creds: &Credentials) -> String {
    if creds.is_complete() {
        format!("● connected as {}@{}:{}", creds.username, creds.host, creds.port)
    } else {
        let mut missing = Vec::new();
        if creds.host.is_empty() {
            missing.push("host");
        }
        if creds.username.is_empty() {
            missing.push("user");
        }
        if creds.secret.is_empty() {
            missing.push("password");
        }
        format!("○ not connected (missing: {})", missing.join(", "))
    }
}

pub const RESET_BANNER: &str = "──────── session cleared ────────";

pub fn format_event(event: &StoreEvent) -> String {
    match event {
        StoreEvent::Appended(entry) => format_entry(entry),
        StoreEvent::Reset => RESET_BANNER.to_string(),
    }
}

/// Turns the event stream into printable text.
///
/// After a lag the whole log is reprinted, but appends already queued in the
/// receiver are still delivered afterwards. Ids shown by the reprint are
/// remembered so those late events are skipped instead of printed twice.
#[derive(Debug, Default)]
pub struct Timeline {
    reprinted: HashSet<EntryId>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a fresh snapshot of the log and remember what it showed.
    pub fn reprint(&mut self, entries: &[Entry]) -> String {
        self.reprinted = entries.iter().map(Entry::id).collect();
        format_log(entries)
    }

    /// `None` when the event's entry was already shown by a reprint.
    pub fn render(&mut self, event: &StoreEvent) -> Option<String> {
        // Ids are unique, so a reprinted id can only come back as a queued event.
        match event {
            StoreEvent::Appended(entry) if self.reprinted.remove(&entry.id()) => None,
            _ => Some(format_event(event)),
        }
    }
}
