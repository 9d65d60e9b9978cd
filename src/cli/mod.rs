//! cli
//!
//! Command-line interface layer for pasteline.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Trim user input before it reaches the repository
//! - Format repository results for the terminal
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, opens a
//! [`PasteRepository`] for the configured data directory, and dispatches
//! to a command handler. All storage rules live in the repository.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use log::debug;

use crate::core::config::Config;
use crate::repository::PasteRepository;
use crate::store::{open_stores, FileBlobStore, SqliteMetadataStore};
use crate::ui::output::Verbosity;

/// Repository over the default durable stores.
pub type DefaultRepository = PasteRepository<SqliteMetadataStore, FileBlobStore>;

/// Per-invocation settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// `--data-dir` override
    pub data_dir: Option<PathBuf>,
    /// Output verbosity
    pub verbosity: Verbosity,
    /// Print JSON instead of text
    pub json: bool,
}

impl Context {
    /// Load config and open the repository it points at.
    pub fn open_repository(&self) -> Result<DefaultRepository> {
        let config = Config::load().context("Failed to load configuration")?;
        let paths = config
            .storage_paths(self.data_dir.as_deref())
            .context("Failed to resolve data directory")?;
        debug!("using data directory {}", paths.data_dir().display());

        let (metadata, blobs) = open_stores(&paths).with_context(|| {
            format!("Failed to open stores in {}", paths.data_dir().display())
        })?;
        Ok(PasteRepository::new(metadata, blobs).with_time_format(config.time_format()))
    }
}

/// Initialize the `log` backend for this process.
///
/// `RUST_LOG` overrides the verbosity-derived default.
pub fn init_logging(verbosity: Verbosity) {
    use std::io::Write;

    let env = env_logger::Env::default().default_filter_or(verbosity.log_filter());
    let _ = env_logger::Builder::from_env(env)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .try_init();
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    init_logging(verbosity);

    let ctx = Context {
        data_dir: cli.data_dir.clone(),
        verbosity,
        json: cli.json,
    };

    commands::dispatch(cli.command, &ctx)
}
