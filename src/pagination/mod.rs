//! Pagination module
//!
//! Drives the fetch/extract cycle across listing pages.
//!
//! # Overview
//!
//! A run starts at page 1 and stops, in this order of precedence, when:
//! 1. the fetcher reports a transport failure
//! 2. a page has no listings (the source is exhausted)
//! 3. the target record count is reached
//! 4. the page ceiling is passed
//!
//! Cancellation and the optional run deadline are checked before every
//! fetch. A fetch in flight is abandoned on cancellation, and a page that
//! arrives after cancellation is not processed. Whatever was collected is
//! returned in every case, truncated to the target.

mod controller;
mod types;

pub use controller::PaginationController;
pub use types::{PaginationState, RunConfig, RunReport, RunStats, StopReason};
