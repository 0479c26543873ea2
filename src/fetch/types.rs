//! Fetcher types and traits

use crate::error::Error;
use crate::extract::Fragment;
use async_trait::async_trait;

/// Result of fetching one listing page
#[derive(Debug)]
pub enum FetchOutcome {
    /// The page was retrieved and parsed; no fragments means no more data
    Ok(Vec<Fragment>),
    /// Transport failure or non-2xx status; ends the run
    NetworkError(Error),
}

impl FetchOutcome {
    /// Check if this is a transport failure
    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError(_))
    }

    /// Number of fragments, zero for a failure
    pub fn fragment_count(&self) -> usize {
        match self {
            Self::Ok(fragments) => fragments.len(),
            Self::NetworkError(_) => 0,
        }
    }
}

/// Source of listing pages
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch page `page` (1-based)
    ///
    /// Never returns an error: transport problems are reported as
    /// [`FetchOutcome::NetworkError`].
    async fn fetch(&self, page: u32) -> FetchOutcome;
}
