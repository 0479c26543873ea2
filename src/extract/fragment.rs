//! Listing fragments
//!
//! `scraper::Html` is neither `Send` nor `'static`, so listings leave the
//! page parser as owned HTML snippets and are re-parsed by the extractor.

use scraper::{ElementRef, Html, Selector};

/// Outer HTML of one listing, tagged with its 1-based position on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    index: usize,
    element_id: String,
    html: String,
}

impl Fragment {
    /// Create a fragment from raw HTML
    pub fn new(index: usize, element_id: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            index,
            element_id: element_id.into(),
            html: html.into(),
        }
    }

    /// Capture a listing element
    pub fn from_element(index: usize, element: ElementRef<'_>) -> Self {
        let element_id = element.value().attr("id").unwrap_or_default();
        Self::new(index, element_id, element.html())
    }

    /// Position on the page, starting at 1
    pub fn index(&self) -> usize {
        self.index
    }

    /// The container's `id` attribute
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Outer HTML of the container
    pub fn html(&self) -> &str {
        &self.html
    }
}

/// Split a listing page into fragments, in document order
///
/// Containers with an empty `id` attribute are not listings and are skipped.
pub fn split_page(html: &str, row: &Selector) -> Vec<Fragment> {
    let document = Html::parse_document(html);
    document
        .select(row)
        .filter(|element| {
            element
                .value()
                .attr("id")
                .is_some_and(|id| !id.trim().is_empty())
        })
        .enumerate()
        .map(|(i, element)| Fragment::from_element(i + 1, element))
        .collect()
}
