//! Scraper configuration
//!
//! One explicit `ScraperConfig` value is built at startup and handed to the
//! fetcher, the pagination controller and the server. Sources are layered,
//! lowest precedence first:
//!
//! 1. built-in defaults
//! 2. YAML file (`--config`)
//! 3. environment variables (a `.env` file is loaded first if present)
//! 4. CLI flags (applied by the runner)

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default listing page of the source site; the site root serves page `n` at `/?page=n`
pub const DEFAULT_BASE_URL: &str = "https://rostender.info";

/// Default number of records to collect per run
pub const DEFAULT_COUNT_TENDERS: usize = 100;

/// Default browser-like user agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// Default CSV output path
pub const DEFAULT_OUTPUT_FILE: &str = "tenders.csv";

/// Hard ceiling on pages fetched per run
pub const DEFAULT_MAX_PAGES: u32 = 50;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Scraper Config
// ============================================================================

/// Complete scraper configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Listing page URL; pages are requested as `{base_url}?page={n}`
    pub base_url: String,

    /// Root used to resolve relative detail links (defaults to the origin of `base_url`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,

    /// Number of records to collect per run
    pub count_tenders: usize,

    /// User-Agent header sent to the source site
    pub user_agent: String,

    /// CSV output path
    pub output_file: PathBuf,

    /// Maximum pages fetched per run
    pub max_pages: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            site_url: None,
            count_tenders: DEFAULT_COUNT_TENDERS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            max_pages: DEFAULT_MAX_PAGES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ScraperConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the listing page URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the root used for detail links
    #[must_use]
    pub fn with_site_url(mut self, url: impl Into<String>) -> Self {
        self.site_url = Some(url.into());
        self
    }

    /// Set the target record count
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count_tenders = count;
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the output path
    #[must_use]
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    /// Set the page ceiling
    #[must_use]
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = pages;
        self
    }

    /// Set the request timeout in seconds
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Parse a config from YAML; missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Build the effective config: defaults, optional file, then environment
    ///
    /// The result is not validated yet; callers apply their own overrides
    /// and then call [`ScraperConfig::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // Missing .env is the normal case
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Ignoring unreadable .env file: {}", e);
            }
        }

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields from environment-style variables
    ///
    /// `lookup` maps a variable name to its value; the real environment is
    /// used in [`ScraperConfig::load`], tests pass a map.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("BASE_URL") {
            self.base_url = value;
        }
        if let Some(value) = lookup("SITE_URL") {
            self.site_url = Some(value);
        }
        if let Some(value) = lookup("COUNT_TENDERS") {
            self.count_tenders = parse_env("COUNT_TENDERS", &value)?;
        }
        if let Some(value) = lookup("USER_AGENT") {
            self.user_agent = value;
        }
        if let Some(value) = lookup("OUTPUT_FILE") {
            self.output_file = PathBuf::from(value);
        }
        if let Some(value) = lookup("MAX_PAGES") {
            self.max_pages = parse_env("MAX_PAGES", &value)?;
        }
        if let Some(value) = lookup("TIMEOUT_SECS") {
            self.timeout_secs = parse_env("TIMEOUT_SECS", &value)?;
        }
        Ok(())
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if let Some(site) = &self.site_url {
            Url::parse(site).map_err(|e| Error::invalid_value("site_url", e.to_string()))?;
        }
        if self.count_tenders == 0 {
            return Err(Error::invalid_value(
                "count_tenders",
                "must be greater than zero",
            ));
        }
        if self.max_pages == 0 {
            return Err(Error::invalid_value("max_pages", "must be greater than zero"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(Error::invalid_value("user_agent", "must not be empty"));
        }
        Ok(())
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Root URL that relative detail links are resolved against
    pub fn site_root(&self) -> Result<Url> {
        if let Some(site) = &self.site_url {
            return Ok(Url::parse(site)?);
        }
        let mut root = Url::parse(&self.base_url)?;
        root.set_path("/");
        root.set_query(None);
        root.set_fragment(None);
        Ok(root)
    }

    /// URL of a listing page: `{base_url}?page={n}`
    pub fn page_url(&self, page: u32) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "page")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (key, value) in &retained {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("page", &page.to_string());
        }
        Ok(url)
    }

    /// Render the config as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| Error::invalid_value(key, format!("'{value}': {e}")))
}
