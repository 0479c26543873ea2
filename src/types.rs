//! Common types used throughout the tender scraper
//!
//! `TenderRecord` is the structured form of one listing. Every field is
//! always populated: a value that could not be located or parsed holds its
//! sentinel default instead.

use serde::{Deserialize, Serialize};

// ============================================================================
// Sentinels
// ============================================================================

/// Fallback for text fields that could not be located or parsed
pub const MISSING: &str = "-";

/// Fallback for the tender identifier
pub const MISSING_ID: &str = "";

/// Column / key names of an exported record, in output order
pub const FIELD_NAMES: [&str; 9] = [
    "tender_id",
    "title",
    "url",
    "execution_place",
    "region_name",
    "starting_price",
    "publication_date",
    "deadline_msk",
    "categories",
];

// ============================================================================
// Tender Link
// ============================================================================

/// Title and detail URL of a listing
///
/// Both values come from the same anchor, so they are either both present or
/// both [`MISSING`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderLink {
    /// Listing title
    pub title: String,
    /// Absolute URL of the listing detail page
    pub url: String,
}

impl TenderLink {
    /// Create a link from a title and URL
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// The paired default used when the anchor is absent
    pub fn missing() -> Self {
        Self::new(MISSING, MISSING)
    }

    /// Check if this is the paired default
    pub fn is_missing(&self) -> bool {
        self.title == MISSING && self.url == MISSING
    }
}

impl Default for TenderLink {
    fn default() -> Self {
        Self::missing()
    }
}

// ============================================================================
// Tender Record
// ============================================================================

/// One scraped tender listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderRecord {
    /// Numeric identifier (digits after `№`), empty if absent
    pub id: String,
    /// Paired title and detail URL
    pub link: TenderLink,
    /// Place of delivery / execution
    pub execution_place: String,
    /// Region name
    pub region_name: String,
    /// Starting price, digits only
    pub starting_price: String,
    /// Publication date (`DD.MM.YY`)
    pub publication_date: String,
    /// Application deadline, Moscow time (`DD.MM.YYYY HH:MM` or a part of it)
    pub deadline: String,
    /// Industry tags in document order
    pub categories: Vec<String>,
}

impl Default for TenderRecord {
    fn default() -> Self {
        Self {
            id: MISSING_ID.to_string(),
            link: TenderLink::missing(),
            execution_place: MISSING.to_string(),
            region_name: MISSING.to_string(),
            starting_price: MISSING.to_string(),
            publication_date: MISSING.to_string(),
            deadline: MISSING.to_string(),
            categories: Vec::new(),
        }
    }
}

impl TenderRecord {
    /// Flat export view with title and url split out
    pub fn to_row(&self) -> TenderRow<'_> {
        TenderRow {
            tender_id: &self.id,
            title: &self.link.title,
            url: &self.link.url,
            execution_place: &self.execution_place,
            region_name: &self.region_name,
            starting_price: &self.starting_price,
            publication_date: &self.publication_date,
            deadline_msk: &self.deadline,
            categories: &self.categories,
        }
    }
}

impl std::fmt::Display for TenderRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Tender id={}>", self.id)
    }
}

/// Flat, borrowed view of a record as served over HTTP and written to CSV
///
/// Field order matches [`FIELD_NAMES`].
#[derive(Debug, Clone, Serialize)]
pub struct TenderRow<'a> {
    pub tender_id: &'a str,
    pub title: &'a str,
    pub url: &'a str,
    pub execution_place: &'a str,
    pub region_name: &'a str,
    pub starting_price: &'a str,
    pub publication_date: &'a str,
    pub deadline_msk: &'a str,
    pub categories: &'a [String],
}
