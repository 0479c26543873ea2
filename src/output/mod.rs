//! Output module
//!
//! Writes collected records to delimited text.
//!
//! # Overview
//!
//! - One CSV file per run, UTF-8 with a byte-order mark
//! - Header row uses the export field names
//! - An empty record set writes no file
//!
//! Write failures are returned to the caller: there is no partial success
//! for "collected but not saved".

mod writer;

pub use writer::{write_csv, CsvWriter, CsvWriterConfig, CATEGORY_SEPARATOR, UTF8_BOM};
