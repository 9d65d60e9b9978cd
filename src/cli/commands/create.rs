//! new command - Store a new paste
//!
//! The body comes from `--file` or stdin. Title and author are trimmed
//! here, before validation.

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use super::{describe_create_error, file_or_stdin, read_body};
use crate::cli::Context;
use crate::core::types::NewPaste;
use crate::repository::PasteError;
use crate::ui::output;

/// Store a new paste and print its id.
pub fn create(ctx: &Context, title: &str, author: &str, file: Option<&Path>) -> Result<()> {
    let body = read_body(file_or_stdin(file))?.unwrap_or_default();
    let paste = NewPaste::new(title.trim(), author.trim(), body, None).map_err(PasteError::from)?;

    let repo = ctx.open_repository()?;
    let id = repo.create(&paste).map_err(describe_create_error)?;

    if ctx.json {
        output::json(&json!({ "id": id }))?;
    } else {
        output::print(format!("Created paste #{id}"), ctx.verbosity);
    }
    Ok(())
}
