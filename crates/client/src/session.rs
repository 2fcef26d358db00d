//! Persistent, observable session state.
//!
//! The session is the five-field record a logged-in client carries: token
//! pair plus user identity. [`SessionStore`] keeps the current value in a
//! watch channel so UI layers can observe changes, and writes every change
//! through a [`SessionBackend`] so the session survives restarts.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::ClientError;

/// The persisted session record.
///
/// An empty `access_token` means "logged out"; [`Session::default`] is the
/// logged-out state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

impl Session {
    /// Whether this session carries a usable access token.
    pub fn is_logged_in(&self) -> bool {
        !self.access_token.is_empty()
    }
}

/// Storage backend for session persistence.
pub trait SessionBackend: Send + Sync {
    /// Load the previously saved session, if one exists.
    fn load(&self) -> Result<Option<Session>, ClientError>;
    /// Persist the session, replacing any previous value.
    fn save(&self, session: &Session) -> Result<(), ClientError>;
}

/// JSON-file backend; the usual choice for desktop and CLI clients.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionBackend for FileBackend {
    fn load(&self) -> Result<Option<Session>, ClientError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &Session) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(session)?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryBackend {
    inner: Mutex<Option<Session>>,
}

impl SessionBackend for MemoryBackend {
    fn load(&self) -> Result<Option<Session>, ClientError> {
        Ok(self.inner.lock().map_err(poisoned)?.clone())
    }

    fn save(&self, session: &Session) -> Result<(), ClientError> {
        *self.inner.lock().map_err(poisoned)? = Some(session.clone());
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> ClientError {
    ClientError::Configuration("session backend mutex poisoned".into())
}

/// Holds the current [`Session`], persists changes, and publishes them.
///
/// `replace` and `clear` are the only mutators; both write through the
/// backend first and then notify subscribers, so an observer never sees a
/// state that was not also persisted.
pub struct SessionStore {
    backend: Box<dyn SessionBackend>,
    tx: watch::Sender<Session>,
}

impl SessionStore {
    /// Create a store over the given backend, loading any saved session.
    pub fn new(backend: Box<dyn SessionBackend>) -> Result<Self, ClientError> {
        let initial = backend.load()?.unwrap_or_default();
        let (tx, _rx) = watch::channel(initial);
        Ok(Self { backend, tx })
    }

    /// Create an in-memory store starting from the logged-out state.
    pub fn in_memory() -> Self {
        let (tx, _rx) = watch::channel(Session::default());
        Self {
            backend: Box::new(MemoryBackend::default()),
            tx,
        }
    }

    /// A copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// The current access token, or `None` when logged out.
    pub fn access_token(&self) -> Option<String> {
        let session = self.tx.borrow();
        if session.access_token.is_empty() {
            None
        } else {
            Some(session.access_token.clone())
        }
    }

    /// The current refresh token; may be empty.
    pub fn refresh_token(&self) -> String {
        self.tx.borrow().refresh_token.clone()
    }

    /// Atomically replace all session fields, persist, and notify.
    pub fn replace(&self, session: Session) -> Result<(), ClientError> {
        self.backend.save(&session)?;
        self.tx.send_replace(session);
        Ok(())
    }

    /// Reset to the logged-out state, persist, and notify.
    pub fn clear(&self) -> Result<(), ClientError> {
        self.replace(Session::default())
    }

    /// Subscribe to session changes.
    ///
    /// The receiver yields the current value immediately and every
    /// subsequent replace/clear after that.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }
}
