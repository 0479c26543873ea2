//! Text rules applied to located elements
//!
//! Each rule takes already-normalized element text and returns `None` when
//! the text does not contain what the field needs. The extractor turns `None`
//! into the field's default.

use crate::types::MISSING;
use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

/// Em-dash shown by the site instead of a price
pub const NO_PRICE_MARKER: &str = "—";

static TENDER_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"№([0-9]+)").unwrap());

static DIGITS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// `DD.MM.YY`
static SHORT_DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{2}\.[0-9]{2}\.[0-9]{2}").unwrap());

/// `DD.MM.YYYY`
static LONG_DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{2}\.[0-9]{2}\.[0-9]{4}").unwrap());

/// `HH:MM`
static TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{2}:[0-9]{2}").unwrap());

/// Element text with whitespace runs collapsed to one space and trimmed
///
/// Text nodes of nested markup are joined first, so `Supply of <b>paper</b>`
/// reads as `Supply of paper`.
pub fn normalized_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    collapse_whitespace(&raw)
}

/// Collapse whitespace runs (including non-breaking spaces) and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Digits following `№`
pub fn tender_id(text: &str) -> Option<String> {
    let text = text.trim();
    TENDER_ID_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Starting price as a bare run of digits
///
/// The em-dash marker means "no price" and maps to the missing sentinel.
/// Whitespace (including non-breaking spaces used as thousands separators)
/// is removed before matching, so `"1 234 567 ₽"` becomes `"1234567"`.
/// Only the first run of digits is kept: kopecks after a decimal comma are
/// dropped.
pub fn starting_price(text: &str) -> Option<String> {
    let text = text.trim();
    if text == NO_PRICE_MARKER {
        return Some(MISSING.to_string());
    }
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    DIGITS_REGEX
        .find(&compact)
        .map(|m| m.as_str().to_string())
}

/// First `DD.MM.YY` substring
pub fn publication_date(text: &str) -> Option<String> {
    SHORT_DATE_REGEX.find(text).map(|m| m.as_str().to_string())
}

/// `DD.MM.YYYY HH:MM`, or whichever half is present
pub fn deadline(text: &str) -> Option<String> {
    let date = LONG_DATE_REGEX.find(text).map(|m| m.as_str());
    let time = TIME_REGEX.find(text).map(|m| m.as_str());

    match (date, time) {
        (Some(date), Some(time)) => Some(format!("{date} {time}")),
        (Some(part), None) | (None, Some(part)) => Some(part.to_string()),
        (None, None) => None,
    }
}
