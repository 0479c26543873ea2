//! Pagination types
//!
//! Run configuration, per-run state and the report handed back to callers.

use crate::config::{ScraperConfig, DEFAULT_MAX_PAGES};
use crate::types::TenderRecord;
use serde::Serialize;
use std::time::Duration;

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Enough records were collected
    TargetReached,
    /// A page came back without listings
    SourceExhausted,
    /// The page ceiling was passed
    PageLimit,
    /// A page could not be fetched
    TransportError,
    /// The caller cancelled the run
    Cancelled,
    /// The run deadline passed
    DeadlineExceeded,
}

impl StopReason {
    /// Check if the run ended before the target or the source ran out
    pub fn is_early(&self) -> bool {
        matches!(
            self,
            Self::TransportError | Self::Cancelled | Self::DeadlineExceeded
        )
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::TargetReached => "target reached",
            Self::SourceExhausted => "source exhausted",
            Self::PageLimit => "page limit reached",
            Self::TransportError => "transport error",
            Self::Cancelled => "cancelled",
            Self::DeadlineExceeded => "deadline exceeded",
        };
        f.write_str(text)
    }
}

/// Configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Maximum pages fetched per run
    pub max_pages: u32,
    /// Wall-clock budget for the run, checked between pages
    pub deadline: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            deadline: None,
        }
    }
}

impl RunConfig {
    /// Create a run config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run settings derived from the scraper config
    #[must_use]
    pub fn from_scraper(config: &ScraperConfig) -> Self {
        Self::new().with_max_pages(config.max_pages)
    }

    /// Set the page ceiling
    #[must_use]
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = pages;
        self
    }

    /// Set the run deadline
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Mutable state of a run in progress
#[derive(Debug, Clone)]
pub struct PaginationState {
    /// Records collected so far, in page then document order
    pub collected: Vec<TenderRecord>,
    /// Next page to fetch (1-based)
    pub page: u32,
    /// Requested record count
    pub target: usize,
}

impl PaginationState {
    /// Create the state for a new run
    pub fn new(target: usize) -> Self {
        Self {
            collected: Vec::new(),
            page: 1,
            target,
        }
    }

    /// Check if enough records were collected
    pub fn target_reached(&self) -> bool {
        self.collected.len() >= self.target
    }

    /// Advance to the next page
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Drop records past the target, keeping the earliest
    pub fn into_records(mut self) -> Vec<TenderRecord> {
        self.collected.truncate(self.target);
        self.collected
    }
}

/// Statistics from a run
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    /// Pages requested, including a failed or empty last one
    pub pages_fetched: u32,
    /// Listing fragments seen across all pages
    pub fragments_seen: usize,
    /// Fragments that could not be extracted
    pub fragments_skipped: usize,
    /// Records returned after truncation
    pub records: usize,
    /// Why the run stopped
    pub stop_reason: StopReason,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl RunStats {
    /// Create stats for a run that has not fetched anything yet
    pub fn new(stop_reason: StopReason) -> Self {
        Self {
            pages_fetched: 0,
            fragments_seen: 0,
            fragments_skipped: 0,
            records: 0,
            stop_reason,
            duration_ms: 0,
        }
    }

    /// Count a fetched page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Count fragments seen on a page
    pub fn add_fragments(&mut self, count: usize) {
        self.fragments_seen += count;
    }

    /// Count a skipped fragment
    pub fn add_skipped(&mut self) {
        self.fragments_skipped += 1;
    }
}

/// Records and statistics of a finished run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Collected records, at most the target count
    pub records: Vec<TenderRecord>,
    /// Run statistics
    pub stats: RunStats,
}
