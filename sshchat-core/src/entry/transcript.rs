use super::model::{Entry, Origin};

/// The fixed transcript a demo session opens with.
pub fn demo() -> Vec<Entry> {
    vec![
        Entry::new_now(Origin::System, "session started — terminal chat mockup"),
        Entry::new_now(
            Origin::Remote,
            "Connected to the mock SSH server. Type `help` to list the available commands.",
        ),
    ]
}
