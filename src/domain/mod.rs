//! # Domain Model
//!
//! The note entity and its create/update request shapes.

mod note;

pub use note::{CreateNoteRequest, Note, UpdateNoteRequest};
