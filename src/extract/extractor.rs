//! Record extractor
//!
//! Turns one listing element into a fully populated [`TenderRecord`].

use super::fragment::Fragment;
use super::rules;
use super::selectors::{Field, FieldSpec, FieldValue, Rule, FIELD_TABLE, LISTING_ROW};
use crate::error::{Error, Result};
use crate::types::{TenderLink, TenderRecord};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A field spec with its selectors compiled
#[derive(Debug, Clone)]
struct CompiledField {
    spec: FieldSpec,
    selector: Selector,
    item: Option<Selector>,
}

/// Extracts tender records from listing elements
///
/// Extraction is a pure function of the element and the site root: the same
/// input always yields the same record.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    fields: Vec<CompiledField>,
    row: Selector,
    site_root: Url,
}

impl RecordExtractor {
    /// Create an extractor using the built-in field table
    pub fn new(site_root: Url) -> Result<Self> {
        Self::with_table(site_root, FIELD_TABLE)
    }

    /// Create an extractor for a custom field table
    ///
    /// Fails on an invalid selector or on a rule that cannot produce the
    /// value its field holds.
    pub fn with_table(site_root: Url, table: &[FieldSpec]) -> Result<Self> {
        let fields = table
            .iter()
            .map(|spec| -> Result<CompiledField> {
                if !spec.rule.fits(spec.field) {
                    return Err(Error::config(format!(
                        "Rule {:?} cannot fill field {}",
                        spec.rule,
                        spec.field.name()
                    )));
                }
                let item = match spec.rule {
                    Rule::List { item } => Some(compile(item)?),
                    _ => None,
                };
                Ok(CompiledField {
                    spec: *spec,
                    selector: compile(spec.selector)?,
                    item,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            fields,
            row: compile(LISTING_ROW)?,
            site_root,
        })
    }

    /// Root that relative detail links are resolved against
    pub fn site_root(&self) -> &Url {
        &self.site_root
    }

    /// Selector matching listing containers
    pub fn row_selector(&self) -> &Selector {
        &self.row
    }

    /// Extract a record from a listing element
    ///
    /// Each field is resolved on its own; a missing element or a rule that
    /// does not match leaves that field at its default.
    pub fn extract(&self, element: ElementRef<'_>) -> TenderRecord {
        let mut record = TenderRecord::default();
        for compiled in &self.fields {
            let value = element
                .select(&compiled.selector)
                .next()
                .and_then(|node| self.apply(compiled, node))
                .unwrap_or_else(|| compiled.spec.field.default_value());
            assign(&mut record, compiled.spec.field, value);
        }
        record
    }

    /// Extract a record from a detached fragment
    ///
    /// Fails only when the fragment no longer contains a listing container.
    pub fn extract_fragment(&self, fragment: &Fragment) -> Result<TenderRecord> {
        let document = Html::parse_fragment(fragment.html());
        let root = document.select(&self.row).next().ok_or_else(|| {
            Error::extraction(fragment.index(), "listing container not found in fragment")
        })?;
        Ok(self.extract(root))
    }

    fn apply(&self, compiled: &CompiledField, node: ElementRef<'_>) -> Option<FieldValue> {
        match compiled.spec.rule {
            Rule::TenderId => rules::tender_id(&rules::normalized_text(node)).map(FieldValue::Text),
            Rule::Anchor => {
                let href = node.value().attr("href")?;
                let title = rules::normalized_text(node);
                Some(FieldValue::Link(TenderLink::new(title, self.resolve(href))))
            }
            Rule::Text => Some(FieldValue::Text(rules::normalized_text(node))),
            Rule::Price => rules::starting_price(&rules::normalized_text(node)).map(FieldValue::Text),
            Rule::ShortDate => {
                rules::publication_date(&rules::normalized_text(node)).map(FieldValue::Text)
            }
            Rule::Deadline => rules::deadline(&rules::normalized_text(node)).map(FieldValue::Text),
            Rule::List { .. } => {
                let item = compiled.item.as_ref()?;
                let values = node.select(item).map(rules::normalized_text).collect();
                Some(FieldValue::List(values))
            }
        }
    }

    fn resolve(&self, href: &str) -> String {
        let href = href.trim();
        match self.site_root.join(href) {
            Ok(url) => url.to_string(),
            Err(_) => href.to_string(),
        }
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::selector(selector, e.to_string()))
}

fn assign(record: &mut TenderRecord, field: Field, value: FieldValue) {
    match (field, value) {
        (Field::Link, FieldValue::Link(link)) => record.link = link,
        (Field::Categories, FieldValue::List(items)) => record.categories = items,
        (Field::Id, FieldValue::Text(text)) => record.id = text,
        (Field::ExecutionPlace, FieldValue::Text(text)) => record.execution_place = text,
        (Field::RegionName, FieldValue::Text(text)) => record.region_name = text,
        (Field::StartingPrice, FieldValue::Text(text)) => record.starting_price = text,
        (Field::PublicationDate, FieldValue::Text(text)) => record.publication_date = text,
        (Field::Deadline, FieldValue::Text(text)) => record.deadline = text,
        // with_table rejects mismatched pairs
        (field, value) => {
            tracing::debug!("Ignoring {:?} value for field {}", value, field.name());
        }
    }
}
