//! # Item Store
//!
//! DynamoDB client construction, the notes repository, and the background
//! table bootstrap for local development.

mod bootstrap;
mod client;
mod note_repository;

pub use bootstrap::spawn_bootstrap;
pub use client::build_store_client;
pub use note_repository::NoteRepository;
