//! Collector wiring
//!
//! Builds the HTTP fetcher, the record extractor and the pagination
//! controller from one [`ScraperConfig`]. The CLI and the server both go
//! through here.

use crate::config::ScraperConfig;
use crate::error::Result;
use crate::extract::RecordExtractor;
use crate::fetch::HttpPageFetcher;
use crate::pagination::{PaginationController, RunConfig, RunReport};
use tokio_util::sync::CancellationToken;

/// Collects tender records from the configured site
#[derive(Debug)]
pub struct TenderCollector {
    controller: PaginationController<HttpPageFetcher>,
}

impl TenderCollector {
    /// Build a collector from a validated configuration
    pub fn from_config(config: &ScraperConfig) -> Result<Self> {
        config.validate()?;

        let extractor = RecordExtractor::new(config.site_root()?)?;
        let fetcher = HttpPageFetcher::new(config.clone(), extractor.row_selector().clone())?;
        let controller = PaginationController::new(fetcher, extractor)
            .with_config(RunConfig::from_scraper(config));

        Ok(Self { controller })
    }

    /// Replace the run configuration (page ceiling, deadline)
    #[must_use]
    pub fn with_run_config(mut self, config: RunConfig) -> Self {
        self.controller = self.controller.with_config(config);
        self
    }

    /// Get the scraper configuration
    pub fn config(&self) -> &ScraperConfig {
        self.controller.fetcher().config()
    }

    /// Collect up to `target` records
    pub async fn collect(&self, target: usize) -> RunReport {
        self.controller.run(target).await
    }

    /// Collect up to `target` records, stopping early if `cancel` fires
    pub async fn collect_with_cancel(&self, target: usize, cancel: &CancellationToken) -> RunReport {
        self.controller.run_with_cancel(target, cancel).await
    }
}
