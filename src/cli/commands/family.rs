//! family command - Show the edit lineage tree containing a paste

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::types::PasteId;
use crate::ui::{family_tree, output};

/// Print the family tree of `id`, marking `id` itself.
pub fn family(ctx: &Context, id: PasteId) -> Result<()> {
    let repo = ctx.open_repository()?;
    let family = repo
        .family(id)
        .with_context(|| format!("Cannot resolve family of paste #{id}"))?;

    if ctx.json {
        output::json(&family)?;
        return Ok(());
    }

    println!("{}", family_tree::render(&family, Some(id), repo.time_format()));
    output::print(
        format!("({} paste(s), root #{})", family.len(), family.paste.id),
        ctx.verbosity,
    );
    Ok(())
}
