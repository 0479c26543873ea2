//! Selector table for listing fields
//!
//! Every field of a [`TenderRecord`](crate::types::TenderRecord) is described
//! by one [`FieldSpec`]: where to look, how to read what is found, and what to
//! fall back to. The extractor evaluates the table uniformly.

use crate::types::{TenderLink, MISSING, MISSING_ID};

/// Listing container: `<article class="tender-row row" id="...">`
pub const LISTING_ROW: &str = "article.tender-row.row[id]";

/// Fields of a tender record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Link,
    ExecutionPlace,
    RegionName,
    StartingPrice,
    PublicationDate,
    Deadline,
    Categories,
}

impl Field {
    /// Field name as used in logs
    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "tender_id",
            Field::Link => "title_and_url",
            Field::ExecutionPlace => "execution_place",
            Field::RegionName => "region_name",
            Field::StartingPrice => "starting_price",
            Field::PublicationDate => "publication_date",
            Field::Deadline => "deadline_msk",
            Field::Categories => "categories",
        }
    }

    /// Value used when the element is absent or the rule does not match
    pub fn default_value(self) -> FieldValue {
        match self {
            Field::Id => FieldValue::Text(MISSING_ID.to_string()),
            Field::Link => FieldValue::Link(TenderLink::missing()),
            Field::Categories => FieldValue::List(Vec::new()),
            _ => FieldValue::Text(MISSING.to_string()),
        }
    }
}

/// How the text of a located element is turned into a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Digits after `№`
    TenderId,
    /// Anchor text plus resolved `href`
    Anchor,
    /// Normalized text as-is
    Text,
    /// Digits only, em-dash means no price
    Price,
    /// `DD.MM.YY`
    ShortDate,
    /// `DD.MM.YYYY` and `HH:MM`
    Deadline,
    /// Text of every descendant matching `item`, in document order
    List { item: &'static str },
}

impl Rule {
    /// Check if this rule produces the kind of value `field` holds
    pub fn fits(self, field: Field) -> bool {
        match field {
            Field::Link => matches!(self, Rule::Anchor),
            Field::Categories => matches!(self, Rule::List { .. }),
            _ => matches!(
                self,
                Rule::TenderId | Rule::Text | Rule::Price | Rule::ShortDate | Rule::Deadline
            ),
        }
    }
}

/// Extracted value of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Link(TenderLink),
    List(Vec<String>),
}

/// One row of the field table
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: Field,
    pub selector: &'static str,
    pub rule: Rule,
}

/// Field table for rostender.info-style listings
pub const FIELD_TABLE: &[FieldSpec] = &[
    FieldSpec {
        field: Field::Id,
        selector: "span.tender__number",
        rule: Rule::TenderId,
    },
    FieldSpec {
        field: Field::Link,
        selector: "a.description[href]",
        rule: Rule::Anchor,
    },
    FieldSpec {
        field: Field::ExecutionPlace,
        selector: "div.line-clamp",
        rule: Rule::Text,
    },
    FieldSpec {
        field: Field::RegionName,
        selector: "a.tender__region-link",
        rule: Rule::Text,
    },
    FieldSpec {
        field: Field::StartingPrice,
        selector: "div.starting-price__price",
        rule: Rule::Price,
    },
    FieldSpec {
        field: Field::PublicationDate,
        selector: "span.tender__date-start",
        rule: Rule::ShortDate,
    },
    FieldSpec {
        field: Field::Deadline,
        selector: "span.tender__countdown-text",
        rule: Rule::Deadline,
    },
    FieldSpec {
        field: Field::Categories,
        selector: "ul.list-branches__ul",
        rule: Rule::List {
            item: "a.list-branches__link",
        },
    },
];
