//! HTTP page fetcher

use super::types::{FetchOutcome, PageFetcher};
use crate::config::ScraperConfig;
use crate::error::Result;
use crate::extract::split_page;
use crate::http::{HttpClient, HttpClientConfig};
use async_trait::async_trait;
use scraper::Selector;
use tracing::{error, info, warn};

/// Fetches listing pages from the source site
///
/// One GET per call, no retry.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: HttpClient,
    config: ScraperConfig,
    row: Selector,
}

impl HttpPageFetcher {
    /// Create a fetcher for the configured site
    ///
    /// `row` selects listing containers on a page.
    pub fn new(config: ScraperConfig, row: Selector) -> Result<Self> {
        let client = HttpClient::with_config(HttpClientConfig::from_scraper(&config))?;
        Ok(Self::with_client(client, config, row))
    }

    /// Create a fetcher with an existing client
    pub fn with_client(client: HttpClient, config: ScraperConfig, row: Selector) -> Self {
        Self {
            client,
            config,
            row,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, page: u32) -> FetchOutcome {
        let url = match self.config.page_url(page) {
            Ok(url) => url,
            Err(e) => return FetchOutcome::NetworkError(e),
        };

        info!("Loading page {}: {}", page, url);
        let body = match self.client.get_text(&url).await {
            Ok(body) => body,
            Err(e) => {
                error!("Request to {} failed: {}", url, e);
                return FetchOutcome::NetworkError(e);
            }
        };

        let fragments = split_page(&body, &self.row);
        if fragments.is_empty() {
            warn!("No listings found on page {}", page);
        } else {
            info!("Found {} listings on page {}", fragments.len(), page);
        }
        FetchOutcome::Ok(fragments)
    }
}
