//! CSV file writer
//!
//! Provides utilities for writing tender records to CSV files.

use crate::error::{Error, Result};
use crate::types::{TenderRecord, FIELD_NAMES};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// UTF-8 byte-order mark written at the start of every file
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Separator between categories inside one CSV cell
pub const CATEGORY_SEPARATOR: &str = "; ";

/// Configuration for the CSV writer
#[derive(Debug, Clone)]
pub struct CsvWriterConfig {
    delimiter: u8,
    write_bom: bool,
    create_dirs: bool,
}

impl Default for CsvWriterConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            write_bom: true,
            create_dirs: true,
        }
    }
}

impl CsvWriterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enable or disable the byte-order mark
    #[must_use]
    pub fn with_bom(mut self, enabled: bool) -> Self {
        self.write_bom = enabled;
        self
    }

    /// Create missing parent directories
    #[must_use]
    pub fn with_create_dirs(mut self, enabled: bool) -> Self {
        self.create_dirs = enabled;
        self
    }

    /// Get the field delimiter
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

/// Writes tender records to CSV files
#[derive(Debug, Clone, Default)]
pub struct CsvWriter {
    config: CsvWriterConfig,
}

impl CsvWriter {
    /// Create a writer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom settings
    pub fn with_config(config: CsvWriterConfig) -> Self {
        Self { config }
    }

    /// Write records to `path`, returning the number of rows written
    ///
    /// An empty slice writes nothing and returns `Ok(0)`.
    pub fn write(&self, records: &[TenderRecord], path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();

        if records.is_empty() {
            warn!("Nothing to save: no tenders collected");
            return Ok(0);
        }

        if self.config.create_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::output(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            Error::output(format!("Failed to create '{}': {}", path.display(), e))
        })?;

        self.write_to(records, BufWriter::new(file))
            .map_err(|e| Error::output(format!("Failed to write '{}': {}", path.display(), e)))?;

        info!(
            "Saved {} tenders to {}",
            records.len(),
            path.display()
        );
        Ok(records.len())
    }

    /// Write records to any writer
    pub fn write_to<W: Write>(&self, records: &[TenderRecord], mut out: W) -> Result<()> {
        if self.config.write_bom {
            out.write_all(UTF8_BOM)?;
        }

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.config.delimiter)
            .from_writer(out);

        writer.write_record(FIELD_NAMES)?;
        for record in records {
            writer.write_record(row_fields(record))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Write records to a CSV file with default settings
pub fn write_csv(records: &[TenderRecord], path: impl AsRef<Path>) -> Result<usize> {
    CsvWriter::new().write(records, path)
}

fn row_fields(record: &TenderRecord) -> [String; 9] {
    let row = record.to_row();
    [
        row.tender_id.to_string(),
        row.title.to_string(),
        row.url.to_string(),
        row.execution_place.to_string(),
        row.region_name.to_string(),
        row.starting_price.to_string(),
        row.publication_date.to_string(),
        row.deadline_msk.to_string(),
        row.categories.join(CATEGORY_SEPARATOR),
    ]
}
