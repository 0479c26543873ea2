//! Pagination controller
//!
//! Owns the record sequence for the duration of a run. Pages are fetched
//! strictly one after another, so output order is page order, then document
//! order within a page.

use super::types::{PaginationState, RunConfig, RunReport, RunStats, StopReason};
use crate::extract::{Fragment, RecordExtractor};
use crate::fetch::{FetchOutcome, PageFetcher};
use crate::types::TenderRecord;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Runs the fetch/extract cycle across pages
#[derive(Debug)]
pub struct PaginationController<F> {
    fetcher: F,
    extractor: RecordExtractor,
    config: RunConfig,
}

impl<F: PageFetcher> PaginationController<F> {
    /// Create a controller with the default page ceiling
    pub fn new(fetcher: F, extractor: RecordExtractor) -> Self {
        Self {
            fetcher,
            extractor,
            config: RunConfig::default(),
        }
    }

    /// Set run configuration
    #[must_use]
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the run configuration
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Get the page fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Collect up to `target` records
    pub async fn get_tenders(&self, target: usize) -> Vec<TenderRecord> {
        self.run(target).await.records
    }

    /// Collect up to `target` records and report how the run went
    pub async fn run(&self, target: usize) -> RunReport {
        self.run_with_cancel(target, &CancellationToken::new()).await
    }

    /// Collect up to `target` records, stopping early if `cancel` fires
    pub async fn run_with_cancel(&self, target: usize, cancel: &CancellationToken) -> RunReport {
        let start = Instant::now();
        let deadline = self.config.deadline.map(|budget| start + budget);

        info!("Starting collection: {} tenders requested", target);

        let mut state = PaginationState::new(target);
        let mut stats = RunStats::new(StopReason::TargetReached);

        if target == 0 {
            return finish(state, stats, start);
        }

        stats.stop_reason = loop {
            if cancel.is_cancelled() {
                warn!("Collection cancelled before page {}", state.page);
                break StopReason::Cancelled;
            }
            if deadline.is_some_and(|at| Instant::now() >= at) {
                warn!("Run deadline passed before page {}", state.page);
                break StopReason::DeadlineExceeded;
            }

            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    warn!("Collection cancelled while loading page {}", state.page);
                    break StopReason::Cancelled;
                }
                outcome = self.fetcher.fetch(state.page) => outcome,
            };
            stats.add_page();

            if cancel.is_cancelled() {
                warn!("Collection cancelled, discarding page {}", state.page);
                break StopReason::Cancelled;
            }

            let fragments = match outcome {
                FetchOutcome::NetworkError(e) => {
                    error!("Stopping collection, page {} failed: {}", state.page, e);
                    break StopReason::TransportError;
                }
                FetchOutcome::Ok(fragments) if fragments.is_empty() => {
                    warn!("Page {} is empty, no more tenders", state.page);
                    break StopReason::SourceExhausted;
                }
                FetchOutcome::Ok(fragments) => fragments,
            };

            stats.add_fragments(fragments.len());
            let records = self.extract_page(state.page, &fragments, &mut stats);
            debug!("Page {}: {} records", state.page, records.len());
            state.collected.extend(records);

            if state.target_reached() {
                info!("Requested number of tenders ({}) reached", target);
                break StopReason::TargetReached;
            }

            state.next_page();
            if state.page > self.config.max_pages {
                warn!(
                    "Page limit of {} reached, stopping collection",
                    self.config.max_pages
                );
                break StopReason::PageLimit;
            }
        };

        finish(state, stats, start)
    }

    /// Extract every fragment of a page, skipping the ones that fail
    fn extract_page(
        &self,
        page: u32,
        fragments: &[Fragment],
        stats: &mut RunStats,
    ) -> Vec<TenderRecord> {
        let mut records = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            match self.extractor.extract_fragment(fragment) {
                Ok(record) => {
                    debug!("Listing {} parsed: {}", fragment.index(), record);
                    records.push(record);
                }
                Err(e) => {
                    error!("Skipping listing #{} on page {}: {}", fragment.index(), page, e);
                    stats.add_skipped();
                }
            }
        }
        info!(
            "Parsed {} of {} listings on page {}",
            records.len(),
            fragments.len(),
            page
        );
        records
    }
}

fn finish(state: PaginationState, mut stats: RunStats, start: Instant) -> RunReport {
    let records = state.into_records();
    stats.records = records.len();
    stats.duration_ms = start.elapsed().as_millis() as u64;

    info!(
        "Collection finished ({}): {} tenders from {} pages in {}ms",
        stats.stop_reason,
        stats.records,
        stats.pages_fetched,
        stats.duration_ms
    );

    RunReport { records, stats }
}
