//! edit command - Store a new paste derived from an existing one
//!
//! The source paste is read in full first, so editing a paste whose body
//! is missing fails as not found. Fields not given on the command line
//! are copied from the source.

use anyhow::{Context as _, Result};
use serde_json::json;

use super::{describe_create_error, read_body, BodySource};
use crate::cli::Context;
use crate::core::types::{NewPaste, PasteId};
use crate::repository::PasteError;
use crate::ui::output;

/// Derive a new paste from `id`.
pub fn edit(
    ctx: &Context,
    id: PasteId,
    title: Option<&str>,
    author: Option<&str>,
    body: BodySource<'_>,
) -> Result<()> {
    let repo = ctx.open_repository()?;
    let source = repo
        .read(id)
        .with_context(|| format!("Cannot edit paste #{id}"))?;

    let title = title.map(str::trim).unwrap_or(source.title());
    let author = author.map(str::trim).unwrap_or(source.author());
    let body = read_body(body)?.unwrap_or_else(|| source.body.clone());

    let paste = NewPaste::new(title, author, body, Some(id)).map_err(PasteError::from)?;
    let new_id = repo.create(&paste).map_err(describe_create_error)?;

    if ctx.json {
        output::json(&json!({ "id": new_id, "edited_from": id }))?;
    } else {
        output::print(
            format!("Created paste #{new_id} (edited from #{id})"),
            ctx.verbosity,
        );
    }
    Ok(())
}
