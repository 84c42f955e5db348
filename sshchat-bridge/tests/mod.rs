use clap::Parser;
use sshchat_bridge::app::{ChatApp, Flow};
use sshchat_bridge::cli::Args;
use sshchat_bridge::render::{self, Timeline, RESET_BANNER};
use sshchat_core::{Credentials, Entry, MockShell, Origin, SessionStore, StoreEvent};

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;

fn app(connected: bool) -> ChatApp {
    let store = SessionStore::new(Arc::new(MockShell::new(Duration::ZERO)));
    if connected {
        store.set_credentials(Credentials::new("demo.local", 22, "sam", "pw"));
    }
    ChatApp::new(store)
}

// ============================================================================
// Render Tests
// ============================================================================

#[test]
fn test_format_entry_single_line() {
    let entry = Entry::new_now(Origin::User, "ls -a");
    let out = render::format_entry(&entry);
    assert!(out.starts_with('['));
    assert!(out.ends_with("] you$ ls -a"));
}

#[test]
fn test_format_entry_indents_continuation_lines() {
    let entry = Entry::new_now(Origin::Remote, "line one\nline two");
    let out = render::format_entry(&entry);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("ssh▷ line one"));

    let body_col = lines[0].chars().count() - "line one".chars().count();
    assert_eq!(lines[1].chars().count(), body_col + "line two".chars().count());
    assert!(lines[1].trim_start() == "line two");
}

#[test]
fn test_format_log_one_block_per_entry() {
    let entries = vec![
        Entry::new_now(Origin::System, "hello"),
        Entry::new_now(Origin::User, "pwd"),
    ];
    let out = render::format_log(&entries);
    assert_eq!(out.lines().count(), 2);
    assert!(out.ends_with('\n'));
    assert!(out.contains("sys# hello"));
}

#[test]
fn test_format_event_reset() {
    assert_eq!(render::format_event(&StoreEvent::Reset), RESET_BANNER);
}

#[test]
fn test_format_status() {
    let connected = Credentials::new("demo.local", 2222, "sam", "pw");
    assert_eq!(
        render::format_status(&connected),
        "● connected as sam@demo.local:2222"
    );

    let missing = Credentials::new("demo.local", 22, "", "");
    assert_eq!(
        render::format_status(&missing),
        "○ not connected (missing: user, password)"
    );
}

#[test]
fn test_timeline_skips_entries_shown_by_reprint() {
    let store = SessionStore::new(Arc::new(MockShell::new(Duration::ZERO)));
    let mut events = store.subscribe();
    let mut timeline = Timeline::new();

    // Entries land in the log before the renderer catches up, as after a lag.
    for _ in 0..3 {
        store.submit("pwd");
    }
    let snapshot = timeline.reprint(&store.entries());
    assert_eq!(snapshot.lines().count(), 6);

    let mut printed = Vec::new();
    loop {
        match events.try_recv() {
            Ok(event) => printed.extend(timeline.render(&event)),
            Err(TryRecvError::Empty) => break,
            Err(e) => panic!("Expected queued events, got {:?}", e),
        }
    }
    assert!(printed.is_empty(), "reprinted entries came back: {:?}", printed);

    let fresh = Entry::new_now(Origin::User, "whoami");
    let line = timeline.render(&StoreEvent::Appended(fresh.clone()));
    assert_eq!(line, Some(render::format_entry(&fresh)));
}

#[test]
fn test_timeline_skips_reprinted_entry_queued_behind_reset() {
    // Queue: Reset, then the reply that landed in the cleared log.
    let mut timeline = Timeline::new();
    let reply = Entry::new_now(Origin::Remote, "/home/sam\n(exit 0)");
    let snapshot = timeline.reprint(std::slice::from_ref(&reply));
    assert!(snapshot.contains("ssh▷ /home/sam"));

    assert_eq!(timeline.render(&StoreEvent::Reset), Some(RESET_BANNER.to_string()));
    assert_eq!(timeline.render(&StoreEvent::Appended(reply.clone())), None);

    // Only skipped once.
    assert!(timeline.render(&StoreEvent::Appended(reply)).is_some());
}

// ============================================================================
// ChatApp Tests
// ============================================================================

#[tokio::test]
async fn test_remote_line_goes_to_store() {
    let mut app = app(true);
    let outcome = app.handle_line("echo hi there");
    assert_eq!(outcome.flow, Flow::Continue);
    assert!(outcome.output.is_empty());
    assert_eq!(app.store().len(), 1);

    app.drain().await;
    let entries = app.store().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].body(), "hi there\n(exit 0)");
    assert_eq!(app.in_flight(), 0);
}

#[tokio::test]
async fn test_blank_line_is_ignored() {
    let mut app = app(true);
    let outcome = app.handle_line("   ");
    assert!(outcome.output.is_empty());
    assert!(app.store().is_empty());
}

#[tokio::test]
async fn test_local_commands_do_not_touch_log() {
    let mut app = app(true);
    let help = app.handle_line("!help");
    assert!(help.output.iter().any(|l| l.contains("!connect")));
    assert!(app.store().is_empty());
}

#[tokio::test]
async fn test_connect_then_run() {
    let mut app = app(false);
    let outcome = app.handle_line("!connect alice@box.example:2200 s3cret");
    assert_eq!(outcome.output, vec!["● connected as alice@box.example:2200".to_string()]);
    assert!(app.store().is_connected());

    app.handle_line("whoami");
    app.drain().await;
    assert_eq!(app.store().entries()[1].body(), "alice\n(exit 0)");
}

#[tokio::test]
async fn test_unconfigured_session_replies_with_config_error() {
    let mut app = app(false);
    app.handle_line("ls");
    app.drain().await;
    assert_eq!(
        app.store().entries()[1].body(),
        "SSH not configured: host/user/password missing."
    );
}

#[tokio::test]
async fn test_reset_and_disconnect() {
    let mut app = app(true);
    app.handle_line("pwd");
    app.drain().await;

    app.handle_line("!reset");
    assert!(app.store().is_empty());
    assert!(app.store().is_connected());

    app.handle_line("pwd");
    app.drain().await;
    let outcome = app.handle_line("!disconnect");
    assert!(app.store().is_empty());
    assert!(!app.store().is_connected());
    assert_eq!(outcome.output, vec!["○ not connected (missing: password)".to_string()]);
}

#[tokio::test]
async fn test_history() {
    let mut app = app(true);
    assert_eq!(app.handle_line("!history").output, vec!["No conversation yet.".to_string()]);

    app.handle_line("pwd");
    app.drain().await;
    let history = app.handle_line("!history").output;
    assert_eq!(history.len(), 2);
    assert!(history[0].ends_with("you$ pwd"));
}

#[tokio::test]
async fn test_exit() {
    let mut app = app(true);
    assert_eq!(app.handle_line("!quit").flow, Flow::Exit);
    assert_eq!(app.handle_line("!exit").flow, Flow::Exit);
}

#[tokio::test]
async fn test_unknown_local_command() {
    let mut app = app(true);
    let outcome = app.handle_line("!frobnicate");
    assert_eq!(outcome.output[0], "Unknown command: !frobnicate");
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_counts_pending_replies() {
    let store = SessionStore::new(Arc::new(MockShell::new(Duration::from_millis(500))));
    store.set_credentials(Credentials::new("demo.local", 22, "sam", "pw"));
    let mut app = ChatApp::new(store);

    app.handle_line("pwd");
    app.handle_line("whoami");
    assert_eq!(app.in_flight(), 2);

    app.drain().await;
    assert_eq!(app.in_flight(), 0);
    assert_eq!(app.store().len(), 4);
}

// ============================================================================
// CLI Tests
// ============================================================================

#[test]
fn test_args_override_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "latency_ms": 900, "default_port": 2022 }"#).unwrap();

    let args = Args::parse_from([
        "sshchat",
        "--config",
        path.to_str().unwrap(),
        "--latency-ms",
        "5",
        "--no-demo",
        "--host",
        "demo.local",
        "--user",
        "sam",
    ]);
    let config = args.load_config().unwrap();
    assert_eq!(config.latency_ms, 5);
    assert!(!config.seed_demo);

    let creds = args.credentials(&config);
    assert_eq!(creds.port, 2022);
    assert_eq!(creds.host, "demo.local");
    assert_eq!(creds.username, "sam");
}

#[test]
fn test_args_bad_config_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json").unwrap();

    let args = Args::parse_from(["sshchat", "--config", path.to_str().unwrap()]);
    let err = args.load_config().unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to load config"));
}

#[test]
fn test_verbose_sets_debug_level() {
    let dir = tempfile::tempdir().unwrap();
    let args = Args::parse_from([
        "sshchat",
        "--config",
        dir.path().join("none.json").to_str().unwrap(),
        "-v",
    ]);
    assert_eq!(args.load_config().unwrap().log_level, "debug");
}
