//! Core library for quotation spreadsheet extraction.
//!
//! This crate provides:
//! - Workbook loading and safe cell access (first worksheet only)
//! - Numeric/date normalization (currency text, Excel serials, locale dates)
//! - Multi-strategy scalar field extraction (ref no, client, date, terms)
//! - Synonym-based item table header detection and line-item extraction
//! - Structural validation of the assembled quotation record

pub mod error;
pub mod models;
pub mod quote;
pub mod sheet;

pub use error::{ExtractionError, QexError, Result, SheetError};
pub use models::config::{ExtractionConfig, QexConfig};
pub use models::quotation::{LineItem, Quotation};
pub use quote::{Extraction, QuotationParser};
pub use sheet::{Direction, Region, Sheet};

/// Extract a quotation from a workbook file with the given configuration.
pub fn extract_file(path: impl AsRef<std::path::Path>, config: &QexConfig) -> Result<Extraction> {
    let sheet = Sheet::open(path)?;
    let parser = QuotationParser::with_config(config.extraction.clone());
    Ok(parser.parse(&sheet)?)
}

/// Extract a quotation from in-memory xlsx bytes.
pub fn extract_bytes(bytes: &[u8], config: &QexConfig) -> Result<Extraction> {
    let sheet = Sheet::from_bytes(bytes)?;
    let parser = QuotationParser::with_config(config.extraction.clone());
    Ok(parser.parse(&sheet)?)
}
