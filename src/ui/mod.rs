//! ui
//!
//! User-facing output utilities.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing and list formatting
//! - [`family_tree`] - Text rendering of lineage trees
//!
//! # Design
//!
//! All user-facing output goes through this module. Diagnostics for
//! operators go through the `log` facade instead.

pub mod family_tree;
pub mod output;
