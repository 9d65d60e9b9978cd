//! search command - List pastes matching an exact title or author

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::search::SearchQuery;
use crate::ui::output;

/// Print every paste matching the filters.
pub fn search(ctx: &Context, title: Option<&str>, author: Option<&str>) -> Result<()> {
    let repo = ctx.open_repository()?;
    let query = SearchQuery::new(title, author);
    let results = repo.search(&query).context("Search failed")?;

    if ctx.json {
        output::json(&results)?;
        return Ok(());
    }

    if results.is_empty() {
        output::print("No matching pastes.", ctx.verbosity);
        return Ok(());
    }

    for hit in &results {
        println!(
            "#{}\t{}\t{} by {}{}",
            hit.paste.id,
            hit.created,
            hit.paste.title,
            hit.paste.author,
            output::family_marker(hit.family_member)
        );
    }
    Ok(())
}
