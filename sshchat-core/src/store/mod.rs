//! The session store: sole owner of the conversation log.
//!
//! `submit` records the user's line immediately and hands the remote call to
//! a Tokio task. Each task runs to completion and appends exactly one reply,
//! even if the log was reset in the meantime. Every append, from either side,
//! goes through [`SessionStore::append`], which updates the log, the
//! last-appended marker and both notification channels under the log lock.

pub mod reply;

use crate::config::SessionConfig;
use crate::credentials::Credentials;
use crate::entry::{transcript, Entry, EntryId, Origin};
use crate::error::ChatError;
use crate::interpreter::{MockShell, RemoteShell};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub use reply::{format_reply, NO_OUTPUT};

/// Reply body when host, user or secret is missing.
pub const NOT_CONFIGURED: &str = "SSH not configured: host/user/password missing.";

const EVENT_CAPACITY: usize = 256;

/// Change notifications for front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Appended(Entry),
    Reset,
}

#[derive(Debug, Default)]
struct Log {
    entries: Vec<Entry>,
    last_appended: Option<EntryId>,
}

struct Inner {
    log: Mutex<Log>,
    credentials: RwLock<Credentials>,
    shell: Arc<dyn RemoteShell>,
    events: broadcast::Sender<StoreEvent>,
    last_appended_tx: watch::Sender<Option<EntryId>>,
}

/// Handle to one submitted line.
#[derive(Debug)]
pub struct Submission {
    entry_id: EntryId,
    // `None` when no runtime was available; the failure entry is already in the log.
    handle: Option<JoinHandle<()>>,
}

impl Submission {
    /// Id of the user entry that was appended.
    pub fn entry_id(&self) -> EntryId {
        self.entry_id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Wait until the reply (or failure) entry has been appended.
    pub async fn finished(self) {
        let Some(handle) = self.handle else {
            return;
        };
        if let Err(e) = handle.await {
            warn!("dispatch task ended abnormally: {}", e);
        }
    }
}

/// Cheap to clone; clones share one log.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("entries", &self.len())
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl SessionStore {
    /// Empty log, no credentials.
    pub fn new(shell: Arc<dyn RemoteShell>) -> Self {
        Self::with_entries(shell, Vec::new())
    }

    /// Log pre-seeded with the demo transcript.
    pub fn with_demo(shell: Arc<dyn RemoteShell>) -> Self {
        Self::with_entries(shell, transcript::demo())
    }

    /// Mock shell with the configured latency, seeded if the config says so.
    pub fn from_config(config: &SessionConfig) -> Self {
        let shell: Arc<dyn RemoteShell> = Arc::new(MockShell::new(config.latency()));
        let store = if config.seed_demo {
            Self::with_demo(shell)
        } else {
            Self::new(shell)
        };
        store.set_credentials(Credentials {
            port: config.default_port,
            ..Credentials::default()
        });
        store
    }

    fn with_entries(shell: Arc<dyn RemoteShell>, entries: Vec<Entry>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (last_appended_tx, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                log: Mutex::new(Log {
                    entries,
                    ..Log::default()
                }),
                credentials: RwLock::new(Credentials::default()),
                shell,
                events,
                last_appended_tx,
            }),
        }
    }

    // ────────────────────────────────────────────────────────────────
    // Credentials
    // ────────────────────────────────────────────────────────────────

    /// Copy of the current credentials.
    pub fn credentials(&self) -> Credentials {
        self.inner
            .credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the credential bundle. Takes effect for lines dispatched afterwards.
    pub fn set_credentials(&self, creds: Credentials) {
        info!(
            "credentials set: {}@{}:{} (complete: {})",
            creds.username,
            creds.host,
            creds.port,
            creds.is_complete()
        );
        *self
            .inner
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner) = creds;
    }

    pub fn is_connected(&self) -> bool {
        self.inner
            .credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_complete()
    }

    // ────────────────────────────────────────────────────────────────
    // Commands
    // ────────────────────────────────────────────────────────────────

    /// Record `text` and dispatch it to the remote shell in the background.
    ///
    /// Returns `None` for blank input. Outside a Tokio runtime the line is
    /// still recorded, followed by an `SSH error:` reply.
    pub fn submit(&self, text: &str) -> Option<Submission> {
        let line = text.trim();
        if line.is_empty() {
            return None;
        }

        info!("submit: {:?}", line);
        let runtime = Handle::try_current();
        let entry_id = self.append(Origin::User, line);

        let handle = match runtime {
            Ok(runtime) => {
                let store = self.clone();
                let line = line.to_string();
                Some(runtime.spawn(async move {
                    store.dispatch(line).await;
                }))
            }
            Err(e) => {
                let err = ChatError::NoRuntime(e.to_string());
                warn!("{}", err);
                self.append(Origin::Remote, format!("SSH error: {}", err));
                None
            }
        };

        Some(Submission { entry_id, handle })
    }

    /// Drop the whole conversation. Idempotent.
    pub fn reset(&self) {
        let mut log = self.lock_log();
        log.entries.clear();
        log.last_appended = None;
        self.inner.last_appended_tx.send_replace(None);
        let _ = self.inner.events.send(StoreEvent::Reset);
        info!("session reset");
    }

    /// Reset and forget the secret. Host, port and user are kept so the
    /// front end can offer them again on the next connect.
    pub fn disconnect(&self) {
        self.inner
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .secret
            .clear();
        self.reset();
    }

    async fn dispatch(&self, line: String) {
        let creds = self.credentials();
        debug!("dispatch {:?} as {:?}", line, creds);

        if !creds.is_complete() {
            warn!("command not sent, credentials incomplete");
            self.append(Origin::Remote, NOT_CONFIGURED);
            return;
        }

        // Run the call on its own task so a panic inside the shell becomes a
        // JoinError here instead of a lost reply.
        let shell = self.inner.shell.clone();
        let worker = tokio::spawn(async move { shell.execute(&creds, &line).await });

        let body = match worker.await {
            Ok(Ok(result)) => format_reply(&result),
            Ok(Err(e)) => {
                warn!("remote execution failed: {:#}", e);
                format!("SSH error: {:#}", e)
            }
            Err(join) => {
                let err = ChatError::Dispatch(join.to_string());
                warn!("{}", err);
                format!("SSH error: {}", err)
            }
        };

        self.append(Origin::Remote, body);
    }

    /// The single append path.
    fn append(&self, origin: Origin, body: impl Into<String>) -> EntryId {
        let mut log = self.lock_log();
        let entry = Entry::new_now(origin, body);
        let id = entry.id();
        log.entries.push(entry.clone());
        log.last_appended = Some(id);

        // Notify while still holding the lock so event order matches log order.
        self.inner.last_appended_tx.send_replace(Some(id));
        let _ = self.inner.events.send(StoreEvent::Appended(entry));

        id
    }

    fn lock_log(&self) -> MutexGuard<'_, Log> {
        self.inner.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ────────────────────────────────────────────────────────────────
    // Read path
    // ────────────────────────────────────────────────────────────────

    /// Snapshot of the log in insertion order.
    pub fn entries(&self) -> Vec<Entry> {
        self.lock_log().entries.clone()
    }

    pub fn entry(&self, id: EntryId) -> Option<Entry> {
        self.lock_log().entries.iter().find(|e| e.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock_log().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_log().entries.is_empty()
    }

    pub fn last_appended(&self) -> Option<EntryId> {
        self.lock_log().last_appended
    }

    /// Watch the last-appended marker.
    pub fn watch_last_appended(&self) -> watch::Receiver<Option<EntryId>> {
        self.inner.last_appended_tx.subscribe()
    }

    /// Stream of appends and resets from now on. A receiver that falls more
    /// than 256 events behind gets `Lagged` and should re-read `entries()`.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }
}
