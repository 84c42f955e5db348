use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use sshchat_bridge::app::{ChatApp, Flow};
use sshchat_bridge::cli::Args;
use sshchat_bridge::render::{self, Timeline};
use sshchat_core::{SessionStore, StoreEvent};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;

    let level = config
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("=== SSH Chat Starting ===");

    let store = SessionStore::from_config(&config);
    store.set_credentials(args.credentials(&config));

    // Subscribe before anything can be appended so no event is missed.
    let mut events = store.subscribe();
    let mut app = ChatApp::new(store.clone());
    let mut timeline = Timeline::new();

    print!("{}", render::format_log(&store.entries()));
    println!("{}", render::format_status(&store.credentials()));
    println!("Type !help for local commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                let outcome = app.handle_line(&line);
                for text in &outcome.output {
                    println!("{}", text);
                }
                if outcome.flow == Flow::Exit {
                    break;
                }
            }

            event = events.recv() => match event {
                Ok(event) => print_event(&mut timeline, &event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("renderer lagged by {} events, reprinting log", skipped);
                    print!("{}", timeline.reprint(&store.entries()));
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    if app.in_flight() > 0 {
        tracing::info!("waiting for {} reply(s)", app.in_flight());
    }
    app.drain().await;

    loop {
        match events.try_recv() {
            Ok(event) => print_event(&mut timeline, &event),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!("renderer lagged by {} events, reprinting log", skipped);
                print!("{}", timeline.reprint(&store.entries()));
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }

    tracing::info!("session ended with {} entries", store.len());
    Ok(())
}

fn print_event(timeline: &mut Timeline, event: &StoreEvent) {
    if let Some(text) = timeline.render(event) {
        println!("{}", text);
    }
}
