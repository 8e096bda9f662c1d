//! Domain model for the note journal.
//!
//! # Responsibility
//! - Define the persisted `Note` record and its display projections.
//! - Own the one-based note-number addressing scheme.
//!
//! # Invariants
//! - Notes carry no identifier; a note's number is its position plus one,
//!   recomputed on every load.

pub mod note;
pub mod number;
