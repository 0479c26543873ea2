//! Page fetcher module
//!
//! Retrieves one listing page and splits it into listing fragments.
//!
//! # Overview
//!
//! - [`PageFetcher`] - the seam the pagination controller drives
//! - [`FetchOutcome`] - explicit success / transport-failure result
//! - [`HttpPageFetcher`] - `GET {base_url}?page={n}` over reqwest

mod fetcher;
mod types;

pub use fetcher::HttpPageFetcher;
pub use types::{FetchOutcome, PageFetcher};
