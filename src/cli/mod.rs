//! CLI module
//!
//! Command-line front end over the library.
//!
//! # Commands
//!
//! - `get` - Fetch one JSON object
//! - `list` - Walk a paginated collection, one record per line
//! - `patch` - Apply a partial update
//! - `markdown` - Render markdown through the API
//! - `rate-limit` - Show the current rate limit status

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
