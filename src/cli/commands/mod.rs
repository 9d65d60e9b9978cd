//! cli::commands
//!
//! Command handlers. Each handler opens the repository through the
//! [`Context`], calls one repository operation, and formats the result.

mod check;
mod completion;
mod create;
mod edit;
mod family;
mod restore;
mod search;
mod show;

pub use check::check;
pub use completion::completion;
pub use create::create;
pub use edit::edit;
pub use family::family;
pub use restore::restore;
pub use search::search;
pub use show::show;

use std::io::Read;
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::args::Command;
use crate::cli::Context;
use crate::repository::PasteError;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::New {
            title,
            author,
            file,
        } => create(ctx, &title, &author, file.as_deref()),
        Command::Edit {
            id,
            title,
            author,
            file,
            stdin,
        } => edit(
            ctx,
            id,
            title.as_deref(),
            author.as_deref(),
            BodySource::from_flags(file.as_deref(), stdin),
        ),
        Command::Show { id } => show(ctx, id),
        Command::Search { title, author } => search(ctx, title.as_deref(), author.as_deref()),
        Command::Family { id } => family(ctx, id),
        Command::Restore { id, file } => restore(ctx, id, file.as_deref()),
        Command::Check => check(ctx),
        Command::Completion { shell } => completion(shell),
    }
}

/// Where a paste body comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySource<'a> {
    File(&'a Path),
    Stdin,
    /// Reuse the body of the paste being edited
    Inherit,
}

impl<'a> BodySource<'a> {
    fn from_flags(file: Option<&'a Path>, stdin: bool) -> Self {
        match (file, stdin) {
            (Some(path), _) => BodySource::File(path),
            (None, true) => BodySource::Stdin,
            (None, false) => BodySource::Inherit,
        }
    }
}

/// Body source for commands that take `--file` or fall back to stdin.
fn file_or_stdin(file: Option<&Path>) -> BodySource<'_> {
    match file {
        Some(path) => BodySource::File(path),
        None => BodySource::Stdin,
    }
}

/// Turn a repository error into a CLI error, adding the restore hint
/// when only the body half of a create failed.
fn describe_create_error(err: PasteError) -> anyhow::Error {
    match err {
        PasteError::PartialWrite { id, .. } => anyhow::Error::new(err).context(format!(
            "Paste #{id} was recorded without a body; retry with `pl restore {id}`"
        )),
        other => anyhow::Error::new(other).context("Failed to store paste"),
    }
}

/// Read a body from a file or stdin. `Inherit` yields `None`.
fn read_body(source: BodySource<'_>) -> Result<Option<String>> {
    match source {
        BodySource::File(path) => std::fs::read_to_string(path)
            .map(Some)
            .with_context(|| format!("Failed to read {}", path.display())),
        BodySource::Stdin => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read body from stdin")?;
            Ok(Some(body))
        }
        BodySource::Inherit => Ok(None),
    }
}
