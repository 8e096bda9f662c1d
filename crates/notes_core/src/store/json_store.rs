//! JSON flat-file note store.
//!
//! # Responsibility
//! - Decode and encode the whole note sequence as one pretty-printed JSON array.
//! - Replace the store file atomically and serialize writers with an advisory lock.
//!
//! # Invariants
//! - An empty or whitespace-only file decodes to zero notes.
//! - Saves go through a sibling temp file renamed over the store, so a crash
//!   mid-write leaves the previous document intact.
//! - The lock lives in a sidecar `<store>.lock` file; the store itself is
//!   replaced on every save and cannot carry the lock.

use super::{MissingStore, NoteRepository, RepoError, RepoResult};
use crate::model::note::Note;
use fs2::FileExt;
use log::{debug, error, info, warn};
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

const LOCK_SUFFIX: &str = ".lock";

/// Note store backed by a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonNoteStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl JsonNoteStore {
    /// Creates a store handle for `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_name = OsString::from(path.as_os_str());
        lock_name.push(LOCK_SUFFIX);
        Self {
            path,
            lock_path: PathBuf::from(lock_name),
        }
    }

    /// Store file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar file used for the advisory write lock.
    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl NoteRepository for JsonNoteStore {
    fn load(&self, missing: MissingStore) -> RepoResult<Vec<Note>> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                debug!("event=store_load module=store status=missing policy={missing:?}");
                return match missing {
                    MissingStore::Empty => Ok(Vec::new()),
                    MissingStore::Fail => Err(RepoError::Missing {
                        path: self.path.clone(),
                        source,
                    }),
                };
            }
            Err(source) => {
                return Err(RepoError::Io {
                    action: "read",
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match decode_notes(&data) {
            Ok(notes) => {
                debug!(
                    "event=store_load module=store status=ok bytes={} count={}",
                    data.len(),
                    notes.len()
                );
                Ok(notes)
            }
            Err(source) => {
                error!(
                    "event=store_load module=store status=error error_code=decode_failed bytes={} line={} column={}",
                    data.len(),
                    source.line(),
                    source.column()
                );
                Err(RepoError::Decode {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    fn save(&self, notes: &[Note]) -> RepoResult<()> {
        let started_at = Instant::now();
        let encoded = encode_notes(notes)?;
        let dir = self.parent_dir();

        let mut temp = NamedTempFile::new_in(dir).map_err(|source| RepoError::Io {
            action: "create temp file in",
            path: dir.to_path_buf(),
            source,
        })?;
        temp.write_all(&encoded)
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|source| RepoError::Io {
                action: "write",
                path: temp.path().to_path_buf(),
                source,
            })?;
        temp.persist(&self.path).map_err(|err| RepoError::Io {
            action: "replace",
            path: self.path.clone(),
            source: err.error,
        })?;

        info!(
            "event=store_save module=store status=ok count={} bytes={} duration_ms={}",
            notes.len(),
            encoded.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn with_write_lock<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepoError>,
    {
        let lock_error = |source: std::io::Error| RepoError::Lock {
            path: self.lock_path.clone(),
            source,
        };
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)
            .map_err(lock_error)?;
        FileExt::lock_exclusive(&lock_file).map_err(lock_error)?;
        debug!("event=store_lock module=store status=acquired");

        let result = f();

        if let Err(err) = FileExt::unlock(&lock_file) {
            warn!("event=store_lock module=store status=unlock_failed error={err}");
        }
        result
    }
}

/// Decodes store bytes; blank content is the empty sequence.
pub(crate) fn decode_notes(data: &[u8]) -> serde_json::Result<Vec<Note>> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(data)
}

/// Encodes notes as a 2-space indented JSON array without a trailing newline.
pub(crate) fn encode_notes(notes: &[Note]) -> RepoResult<Vec<u8>> {
    serde_json::to_vec_pretty(notes).map_err(RepoError::Encode)
}
