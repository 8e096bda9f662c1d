//! Persistence contracts for the note sequence.
//!
//! # Responsibility
//! - Define the load/save/exclusive-write contract used by the note service.
//! - Report storage failures with the affected path and underlying cause.
//!
//! # Invariants
//! - Load and save always move the full ordered sequence; there is no
//!   partial read or write.
//! - Persisted state is either empty or a valid JSON array of notes; any
//!   other content is reported, never repaired.

use crate::model::note::Note;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_store;

pub use json_store::JsonNoteStore;

pub type RepoResult<T> = Result<T, RepoError>;

/// How `load` treats a store file that does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingStore {
    /// Treat as an empty sequence.
    Empty,
    /// Report `RepoError::Missing`.
    Fail,
}

#[derive(Debug)]
pub enum RepoError {
    /// Store file is absent and the caller required it.
    Missing { path: PathBuf, source: std::io::Error },
    /// Filesystem failure while reading, writing, or replacing the store.
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    /// Store content is not a JSON array of notes.
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// In-memory sequence could not be serialized.
    Encode(serde_json::Error),
    /// Advisory write lock could not be acquired.
    Lock { path: PathBuf, source: std::io::Error },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { path, source } => {
                write!(f, "open {}: {source}", path.display())
            }
            Self::Io {
                action,
                path,
                source,
            } => write!(f, "failed to {action} `{}`: {source}", path.display()),
            Self::Decode { path, source } => {
                write!(f, "malformed notes file `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
            Self::Lock { path, source } => {
                write!(f, "failed to lock `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Missing { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Lock { source, .. } => Some(source),
        }
    }
}

/// Storage contract for the ordered note sequence.
pub trait NoteRepository {
    /// Loads every persisted note in insertion order.
    fn load(&self, missing: MissingStore) -> RepoResult<Vec<Note>>;

    /// Replaces the persisted sequence with `notes`.
    fn save(&self, notes: &[Note]) -> RepoResult<()>;

    /// Runs `f` while holding exclusive write access to the store.
    ///
    /// The load/mutate/save cycle of every mutating operation runs inside
    /// this section so concurrent writers cannot lose each other's updates.
    fn with_write_lock<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepoError>;
}
