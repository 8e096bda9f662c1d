//! Core logic for the go-notes journal.
//! Owns the note model, the JSON store, and the add/list/show/delete use-cases.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod view;

pub use config::{ConfigError, NotesConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::Note;
pub use model::number::{NoteNumber, NoteNumberError, INVALID_NOTE_NUMBER};
pub use service::note_service::{NoteService, NoteServiceError, NumberedNote, ServiceResult};
pub use store::{JsonNoteStore, MissingStore, NoteRepository, RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Opens the note service over the JSON store named by `config`.
pub fn open_service(config: &NotesConfig) -> NoteService<JsonNoteStore> {
    NoteService::new(JsonNoteStore::new(config.store_path.clone()))
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
