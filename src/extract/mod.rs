//! Record extraction module
//!
//! Turns listing HTML into [`TenderRecord`](crate::types::TenderRecord)s.
//!
//! # Overview
//!
//! - [`split_page`] cuts a listing page into per-listing [`Fragment`]s
//! - [`RecordExtractor`] evaluates the [`FIELD_TABLE`] against one listing
//! - [`rules`] holds the text rules (id, price, dates) used by the table
//!
//! Field-level misses never fail: each field falls back to its own default.

mod extractor;
mod fragment;
pub mod rules;
mod selectors;

pub use extractor::RecordExtractor;
pub use fragment::{split_page, Fragment};
pub use selectors::{Field, FieldSpec, FieldValue, Rule, FIELD_TABLE, LISTING_ROW};
