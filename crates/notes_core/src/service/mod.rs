//! Use-case services.
//!
//! # Responsibility
//! - Implement add/list/show/delete on top of a `NoteRepository`.
//! - Keep command-line dispatch free of storage details.

pub mod note_service;
