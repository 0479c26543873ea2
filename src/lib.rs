// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Tender Scraper
//!
//! Collects tender listings from a paginated, server-rendered listing site
//! into structured records.
//!
//! ## Features
//!
//! - **Record extraction**: one declarative selector table drives every field,
//!   with a sentinel default for anything missing or unparsable
//! - **Paginated collection**: pages are fetched in order until the target
//!   count is reached, a page comes back empty, or the page ceiling is hit
//! - **Partial results**: transport failures stop the run and keep what was
//!   collected
//! - **Output**: CSV files (UTF-8 with BOM) and a JSON HTTP API
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tender_scraper::{ScraperConfig, TenderCollector, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ScraperConfig::default().with_count(20);
//!     let collector = TenderCollector::from_config(&config)?;
//!
//!     let report = collector.collect(config.count_tenders).await;
//!     println!("{} tenders ({})", report.records.len(), report.stats.stop_reason);
//!
//!     tender_scraper::output::write_csv(&report.records, &config.output_file)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │         CLI (scrape → CSV)         │   Server (GET /tenders)  │
//! └────────────────────────────────────┴──────────────────────────┘
//!                                │
//!                     ┌──────────┴──────────┐
//!                     │  TenderCollector    │
//!                     └──────────┬──────────┘
//!                                │
//! ┌────────────────────┬─────────┴──────────┬────────────────────┐
//! │  Page Fetcher      │  Pagination        │  Record Extractor  │
//! ├────────────────────┼────────────────────┼────────────────────┤
//! │ GET ?page=N        │ target / ceiling   │ selector table     │
//! │ split fragments    │ stop reasons       │ field rules        │
//! │ network errors     │ cancel / deadline  │ sentinel defaults  │
//! └────────────────────┴────────────────────┴────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the scraper
pub mod error;

/// Tender record types and sentinels
pub mod types;

/// Scraper configuration
pub mod config;

/// HTTP client
pub mod http;

/// Record extraction from listing fragments
pub mod extract;

/// Page fetching
pub mod fetch;

/// Pagination controller
pub mod pagination;

/// CSV output
pub mod output;

/// Collector wiring
pub mod collector;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use collector::TenderCollector;
pub use config::ScraperConfig;
pub use extract::{Fragment, RecordExtractor};
pub use fetch::{FetchOutcome, HttpPageFetcher, PageFetcher};
pub use pagination::{PaginationController, RunConfig, RunReport, RunStats, StopReason};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
