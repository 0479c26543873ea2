//! CLI module
//!
//! Command-line interface for the tender scraper.
//!
//! # Commands
//!
//! - `scrape` - Collect tenders and write them to CSV (default)
//! - `serve` - Start HTTP server mode
//! - `config` - Print the effective configuration

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::{router, serve, ServerConfig};
