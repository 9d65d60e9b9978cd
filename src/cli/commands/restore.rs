//! restore command - Write the missing body of a partially stored paste

use std::path::Path;

use anyhow::{Context as _, Result};

use super::{file_or_stdin, read_body};
use crate::cli::Context;
use crate::core::types::PasteId;
use crate::ui::output;

/// Store `id`'s body from `--file` or stdin.
pub fn restore(ctx: &Context, id: PasteId, file: Option<&Path>) -> Result<()> {
    let body = read_body(file_or_stdin(file))?.unwrap_or_default();
    let repo = ctx.open_repository()?;
    repo.restore_body(id, &body)
        .with_context(|| format!("Cannot restore body of paste #{id}"))?;

    output::print(format!("Restored body of paste #{id}"), ctx.verbosity);
    Ok(())
}
