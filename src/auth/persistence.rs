//! Durable session storage behind a small adapter trait.
//!
//! The effect runner treats storage as an opaque external resource:
//! save, load, clear. Malformed or missing records load as "no
//! session", never as an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Session;

/// Storage key for the single session record.
const STORAGE_KEY: &str = "userData";

/// Errors from writing or clearing the session record.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write session record '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize session record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to remove session record '{path}': {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Durable save/load/clear for the one session record.
pub trait SessionStore: Send + Sync + 'static {
    /// Durably store the session, overwriting any prior record.
    fn save(&self, session: &Session) -> Result<(), PersistError>;

    /// The last saved session, or `None` if missing or unreadable.
    fn load(&self) -> Option<Session>;

    /// Remove the stored record. An absent record is not an error.
    fn clear(&self) -> Result<(), PersistError>;
}

/// On-disk JSON shape of the record. `expiresAt` is epoch milliseconds.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    email: String,
    id: String,
    token: String,
    #[serde(rename = "expiresAt")]
    expires_at: u64,
}

impl From<&Session> for StoredSession {
    fn from(session: &Session) -> Self {
        let expires_at = session
            .expires_at
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self {
            email: session.email.clone(),
            id: session.user_id.clone(),
            token: session.token.clone(),
            expires_at,
        }
    }
}

impl From<StoredSession> for Session {
    fn from(record: StoredSession) -> Self {
        Self {
            email: record.email,
            user_id: record.id,
            token: record.token,
            expires_at: UNIX_EPOCH + Duration::from_millis(record.expires_at),
        }
    }
}

/// File-backed session store: one JSON record at `<dir>/userData.json`.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store under the platform data directory
    /// (`<data_dir>/larder/userData.json`). Falls back to the current
    /// directory if the platform dir is unavailable.
    pub fn new() -> Self {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::at_dir(data_dir.join("larder"))
    }

    /// Store under an explicit directory.
    pub fn at_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// Path of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, session: &Session) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| PersistError::Write {
                path: self.path.clone(),
                source: e,
            })?;
        }
        let json = serde_json::to_string(&StoredSession::from(session))?;
        fs::write(&self.path, json).map_err(|e| PersistError::Write {
            path: self.path.clone(),
            source: e,
        })
    }

    fn load(&self) -> Option<Session> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<StoredSession>(&content) {
            Ok(record) => Some(record.into()),
            Err(error) => {
                // Corrupt records are "no session", never an error.
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "discarding unreadable session record"
                );
                None
            }
        }
    }

    fn clear(&self) -> Result<(), PersistError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistError::Remove {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

/// In-process store for tests and embedders without durable storage.
#[derive(Default)]
pub struct MemorySessionStore {
    record: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session) -> Result<(), PersistError> {
        *self.record.lock() = Some(session.clone());
        Ok(())
    }

    fn load(&self) -> Option<Session> {
        self.record.lock().clone()
    }

    fn clear(&self) -> Result<(), PersistError> {
        *self.record.lock() = None;
        Ok(())
    }
}
