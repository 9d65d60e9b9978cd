//! Pasteline - paste storage with edit lineage
//!
//! Pasteline stores short text documents ("pastes"), lets authors derive a
//! new paste from an existing one, and lets users search pastes and browse
//! the resulting edit lineage as a tree.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, formats output)
//! - [`repository`] - Create/read contract over the two stores
//! - [`core`] - Domain types, lineage, search, verification, config
//! - [`store`] - Metadata (SQLite) and body (file) storage backends
//! - [`ui`] - Output helpers
//!
//! # Correctness Invariants
//!
//! 1. Paste ids are allocated by the metadata store and never reused
//! 2. A committed metadata row defines existence; a missing body is
//!    reported as not found, never hidden
//! 3. Neither metadata nor bodies are updated in place
//! 4. Cyclic lineage is an error; a dangling parent is a root

pub mod cli;
pub mod core;
pub mod repository;
pub mod store;
pub mod ui;
