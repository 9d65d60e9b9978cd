//! show command - Display one paste with its body

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::core::types::{Paste, PasteId};
use crate::ui::output;

#[derive(Serialize)]
struct ShowOutput<'a> {
    #[serde(flatten)]
    paste: &'a Paste,
    created: String,
    family_member: bool,
}

/// Print paste `id`.
pub fn show(ctx: &Context, id: PasteId) -> Result<()> {
    let repo = ctx.open_repository()?;
    let paste = repo
        .read(id)
        .with_context(|| format!("Cannot show paste #{id}"))?;
    let family_member = repo.is_family_member(id)?;
    let created = paste.metadata.created_at.format(repo.time_format());

    if ctx.json {
        output::json(&ShowOutput {
            paste: &paste,
            created,
            family_member,
        })?;
        return Ok(());
    }

    println!("#{} {}", paste.id(), paste.title());
    println!("author:  {}", paste.author());
    println!("created: {}", created);
    if let Some(parent) = paste.metadata.edited_from {
        println!("edited from: #{}", parent);
    }
    if family_member {
        println!("family:  pl family {}", paste.id());
    }
    println!();
    print!("{}", paste.body);
    if !paste.body.ends_with('\n') {
        println!();
    }
    Ok(())
}
