//! Command implementations.
//!
//! Every command except `schema` and `completions` runs against a
//! [`MemoryStorage`] loaded once per invocation from `--data` or the demo
//! dataset. Mutations apply to that snapshot only.

pub mod completions;
pub mod create;
pub mod delete;
pub mod export;
pub mod list;
pub mod schema;
pub mod show;
pub mod update;

use crate::cli::Cli;
use crate::config::{self, CliOverrides, DeskConfig};
use crate::error::Result;
use crate::storage::{MemoryStorage, demo_issues, read_jsonl};
use chrono::Utc;
use serde::Serialize;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings shared by every command of one invocation.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: DeskConfig,
    pub data: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
    pub use_color: bool,
}

impl CommandContext {
    /// Resolve configuration for the current directory and CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is malformed or a value is invalid.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let overrides = CliOverrides {
            locale: cli.locale.clone(),
            timezone: cli.timezone.clone(),
        };
        let layer = config::load_config(Path::new("."), &overrides)?;
        let config = DeskConfig::from_layer(&layer)?;
        debug!(?config, "Resolved configuration");

        Ok(Self {
            config,
            data: cli.data.clone(),
            json: cli.json,
            quiet: cli.quiet,
            use_color: should_use_color(cli.no_color),
        })
    }

    /// Load the snapshot this invocation works on.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSONL file cannot be read or holds invalid or
    /// duplicate records.
    pub fn load_storage(&self) -> Result<MemoryStorage> {
        let issues = match &self.data {
            Some(path) => read_jsonl(path)?,
            None => demo_issues(
                self.config.demo_count,
                self.config.demo_seed,
                self.config.demo_now.unwrap_or_else(Utc::now),
            ),
        };
        let mut storage = MemoryStorage::with_id_config(self.config.id.clone());
        storage.extend(issues)?;
        Ok(storage)
    }
}

/// Color only when allowed by flag and `NO_COLOR`, and stdout is a terminal.
#[must_use]
pub fn should_use_color(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
}

/// Print a value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
