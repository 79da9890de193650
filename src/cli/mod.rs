//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for list/query commands.
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Table,
    /// JSON (same as --json)
    Json,
    /// Comma-separated values
    Csv,
}

pub mod commands;

/// LinkStash CLI - Save links with AI summaries and ask questions about your collection
#[derive(Parser, Debug)]
#[command(name = "lks", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: ~/.linkstash/data/linkstash.db)
    #[arg(long, global = true, env = "LKS_DB")]
    pub db: Option<PathBuf>,

    /// Output as JSON (for scripting)
    #[arg(long, alias = "robot", global = true)]
    pub json: bool,

    /// Output format (table, json, csv)
    #[arg(long, value_enum, global = true, default_value_t)]
    pub format: OutputFormat,

    /// Output only the ID (for scripting)
    #[arg(long, global = true)]
    pub silent: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the LinkStash database
    Init {
        /// Overwrite existing database
        #[arg(long)]
        force: bool,
    },

    /// Print version information
    Version,

    /// Save a page with an AI-generated summary
    Save(SaveArgs),

    /// List saved links, newest first
    List(ListArgs),

    /// Delete a saved link
    Delete {
        /// Id of the link to delete
        id: i64,
    },

    /// Ask a question about your saved links
    Ask {
        /// Free-text question
        question: String,
    },

    /// API key management
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    /// URL of the page to save
    pub url: String,

    /// Page title (skips title extraction when given)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Page text (skips the page fetch entirely)
    #[arg(short, long)]
    pub content: Option<String>,

    /// Read the page text from a file
    #[arg(long, conflicts_with = "content")]
    pub content_file: Option<PathBuf>,

    /// Read the page text from stdin
    #[arg(long, conflicts_with_all = ["content", "content_file"])]
    pub stdin: bool,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Maximum links to display (all by default)
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum KeyCommands {
    /// Show the stored API key
    Show,

    /// Store an API key
    Set {
        /// Key value (must start with "sk-")
        value: String,
    },

    /// Check the key against the models endpoint
    Test,
}
