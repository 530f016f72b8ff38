//! CLI definitions and entry point.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Issue desk: browse, search and edit a snapshot of issues
#[derive(Parser, Debug)]
#[command(name = "idesk", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSONL snapshot to load (default: built-in demo dataset)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Locale for month names and date strings (e.g. en_US, de_DE)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Time zone for rendering dates (utc, local, or an offset like +02:00)
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub timezone: Option<String>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Append logs as JSON lines to this file instead of stderr
    #[arg(long, global = true, env = "DESK_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List issues: search, filter, sort and paginate
    List(ListArgs),

    /// Show issue details
    Show {
        /// Issue ID
        id: String,
    },

    /// Create a new issue
    Create(CreateArgs),

    /// Update an issue
    Update(UpdateArgs),

    /// Delete an issue
    Delete {
        /// Issue ID
        id: String,
    },

    /// Write the loaded snapshot as JSONL to stdout
    Export,

    /// Print the JSON Schema of issues and result pages
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: ShellType,
}

/// Supported shells for completion generation.
#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShellType {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    #[value(name = "powershell")]
    #[value(alias = "pwsh")]
    /// `PowerShell`
    PowerShell,
    /// Elvish
    Elvish,
}

/// Output format for list results.
#[derive(ValueEnum, Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON output
    Json,
    /// CSV output with configurable fields
    Csv,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive text matched against every visible field and date
    #[arg(long, short = 'S')]
    pub search: Option<String>,

    /// Filter by status (new, in_progress, resolved, closed)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Filter by priority (low, medium, high, critical)
    #[arg(long, short = 'p')]
    pub priority: Option<String>,

    /// Filter by category (exact match)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Sort field (title, status, priority, category, assigned_to,
    /// created_date, updated_date, or none for snapshot order).
    /// Default from config: created_date, newest first
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, short = 'r', conflicts_with = "asc")]
    pub desc: bool,

    /// Sort ascending
    #[arg(long)]
    pub asc: bool,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Items per page (default from config, 10)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Output format (text, json, csv)
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// CSV fields to include (comma-separated)
    ///
    /// Available: id, title, description, status, priority, category,
    /// `assigned_to`, tags, `created_date`, `updated_date`
    #[arg(long)]
    pub fields: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CreateArgs {
    /// Issue title
    #[arg(long, short = 't')]
    pub title: String,

    /// Description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Initial status (default: new)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Priority (default: medium)
    #[arg(long, short = 'p')]
    pub priority: Option<String>,

    /// Category (Bug, Feature, ...)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Assign to person
    #[arg(long, short = 'a')]
    pub assignee: Option<String>,

    /// Tag (repeatable, or comma-separated)
    #[arg(long = "tag", value_delimiter = ',')]
    pub tags: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct UpdateArgs {
    /// Issue ID
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// New status
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// New priority
    #[arg(long, short = 'p')]
    pub priority: Option<String>,

    /// New category
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// New assignee
    #[arg(long, short = 'a', conflicts_with = "unassign")]
    pub assignee: Option<String>,

    /// Clear the assignee
    #[arg(long)]
    pub unassign: bool,

    /// Replace tags (repeatable, or comma-separated)
    #[arg(long = "tag", value_delimiter = ',')]
    pub tags: Vec<String>,
}
