//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for a source-forge REST API
#[derive(Parser, Debug)]
#[command(name = "forge-rest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API entry point, overriding the configuration
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one JSON object, e.g. `repos/octocat/hello-world`
    Get {
        /// Path below the API entry point
        path: String,
    },

    /// Walk a paginated collection, printing one record per line
    List {
        /// Path below the API entry point, e.g. `repos/octocat/hello-world/issues`
        path: String,

        /// Stop after this many records; no further pages are fetched
        #[arg(long)]
        max: Option<usize>,

        /// Extra query parameter (repeatable)
        #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },

    /// Apply a partial update to a JSON object
    Patch {
        /// Path below the API entry point
        path: String,

        /// JSON object to send
        #[arg(long)]
        json: String,
    },

    /// Render markdown to HTML
    Markdown {
        /// Markdown source text
        text: String,
    },

    /// Show the current rate limit status
    RateLimit,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one value per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// Parse `KEY=VALUE`
fn parse_param(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}
