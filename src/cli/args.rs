//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--data-dir <path>`: Use this data directory instead of the configured one
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::PasteId;

/// Pasteline - paste storage with edit lineage
#[derive(Parser, Debug)]
#[command(name = "pl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data directory holding the paste database and bodies
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store a new paste
    #[command(after_help = "\
EXAMPLES:
    pl new --title notes --author ada --file notes.txt
    echo 'hello' | pl new --title greeting --author ada")]
    New {
        /// Paste title
        #[arg(long)]
        title: String,

        /// Paste author
        #[arg(long)]
        author: String,

        /// Read the body from this file instead of stdin
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Store a new paste derived from an existing one
    #[command(
        long_about = "Store a new paste derived from an existing one.\n\n\
            Title, author, and body default to the source paste's. The source \
            paste is never modified; the edit is a new paste pointing back at it."
    )]
    Edit {
        /// Id of the paste to edit
        id: PasteId,

        /// New title (defaults to the source's)
        #[arg(long)]
        title: Option<String>,

        /// New author (defaults to the source's)
        #[arg(long)]
        author: Option<String>,

        /// Read the new body from this file
        #[arg(long, value_name = "FILE", conflicts_with = "stdin")]
        file: Option<PathBuf>,

        /// Read the new body from stdin
        #[arg(long)]
        stdin: bool,
    },

    /// Show a paste
    Show {
        /// Paste id
        id: PasteId,
    },

    /// Search pastes by exact title or author
    #[command(
        long_about = "Search pastes by exact title or author.\n\n\
            A paste matches if its title equals --title OR its author equals \
            --author. With neither filter, every paste is listed."
    )]
    Search {
        /// Exact title to match
        #[arg(long)]
        title: Option<String>,

        /// Exact author to match
        #[arg(long)]
        author: Option<String>,
    },

    /// Show the edit family tree containing a paste
    Family {
        /// Paste id
        id: PasteId,
    },

    /// Write the body of a paste whose body write failed
    #[command(
        long_about = "Write the body of a paste whose body write failed.\n\n\
            Only pastes that have metadata but no body can be restored; an \
            existing body is never overwritten."
    )]
    Restore {
        /// Paste id
        id: PasteId,

        /// Read the body from this file instead of stdin
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Check for missing bodies, dangling parents, and lineage cycles
    Check,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pl", "show", "3", "--json", "--data-dir", "/tmp/x"])
            .expect("parse");
        assert!(cli.json);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Command::Show { id } => assert_eq!(id.get(), 3),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_positive_id() {
        assert!(Cli::try_parse_from(["pl", "show", "0"]).is_err());
        assert!(Cli::try_parse_from(["pl", "family", "abc"]).is_err());
    }

    #[test]
    fn edit_file_conflicts_with_stdin() {
        let result = Cli::try_parse_from(["pl", "edit", "1", "--file", "x", "--stdin"]);
        assert!(result.is_err());
    }
}
