//! core
//!
//! Core domain types and pure algorithms for pasteline.
//!
//! # Modules
//!
//! - [`types`] - Strong types: PasteId, Timestamp, NewPaste, PasteMetadata
//! - [`lineage`] - Family tree reconstruction from `edited_from` pointers
//! - [`search`] - Exact title/author matching with result decoration
//! - [`verify`] - Read-only consistency checks
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for stored data
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Lineage and search are pure functions of one metadata snapshot
//! - Malformed data becomes a typed error, never a hang

pub mod config;
pub mod lineage;
pub mod paths;
pub mod search;
pub mod types;
pub mod verify;
