//! Quotation parser orchestrating the field cascades.

use std::time::Instant;

use chrono::Local;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::models::config::ExtractionConfig;
use crate::models::quotation::{Quotation, DEFAULT_OFFER_VALIDITY, DEFAULT_PAYMENT_TERMS};
use crate::sheet::Sheet;

use super::rules::{
    extract_client_name, extract_date, extract_offer_validity, extract_payment_terms,
    extract_ref_no, extract_subtotal,
};
use super::table::{detect_header, extract_items};
use super::{ExtractionError, Result};

/// Result of quotation extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The assembled quotation record.
    pub quotation: Quotation,
    /// Soft-field fallbacks and other non-fatal findings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Stateless quotation parser.
///
/// Holds only configuration; parsing is pure over the sheet, so one parser
/// may serve any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct QuotationParser {
    config: ExtractionConfig,
}

impl QuotationParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Create a parser from an extraction configuration.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Set the issuing company's own name, excluded from client-name
    /// candidates.
    pub fn with_issuer_name(mut self, issuer_name: impl Into<String>) -> Self {
        self.config.issuer_name = issuer_name.into();
        self
    }

    /// Extract a quotation record from the loaded sheet.
    ///
    /// Fatal fields (ref no, client name, item table, subtotal) error out as
    /// soon as their whole cascade fails; soft fields (date, payment terms,
    /// offer validity) fall back to documented defaults with a warning.
    /// Deterministic: the same sheet always yields the same record.
    pub fn parse(&self, sheet: &Sheet) -> Result<Extraction> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("parsing quotation sheet ({}x{} cells)", sheet.rows(), sheet.cols());

        let ref_no = extract_ref_no(sheet, &self.config).ok_or(ExtractionError::RefNoNotFound)?;
        let client_name =
            extract_client_name(sheet, &self.config).ok_or(ExtractionError::ClientNotFound)?;

        let date = match extract_date(sheet, &self.config) {
            Some(date) => date,
            None => {
                let today = Local::now().date_naive();
                warn!("no quotation date found, defaulting to {}", today);
                warnings.push("Could not extract date, defaulted to today".to_string());
                today
            }
        };

        let payment_terms = extract_payment_terms(sheet, &self.config).unwrap_or_else(|| {
            warn!("no payment terms found, using default");
            warnings.push("Could not extract payment terms, used default".to_string());
            DEFAULT_PAYMENT_TERMS.to_string()
        });
        let offer_validity = extract_offer_validity(sheet, &self.config).unwrap_or_else(|| {
            warn!("no offer validity found, using default");
            warnings.push("Could not extract offer validity, used default".to_string());
            DEFAULT_OFFER_VALIDITY.to_string()
        });

        let header = detect_header(sheet, &self.config).ok_or(ExtractionError::HeaderNotFound)?;
        let items = extract_items(sheet, &header, &self.config);
        if items.is_empty() {
            return Err(ExtractionError::NoLineItems(header.row));
        }

        let subtotal =
            extract_subtotal(sheet, &self.config).ok_or(ExtractionError::SubtotalNotFound)?;

        let quotation = Quotation {
            ref_no,
            date,
            client_name,
            items,
            payment_terms,
            offer_validity,
            subtotal,
            // GST varies per item and is never aggregated at the document
            // level; the grand total is the subtotal unchanged.
            gst: Decimal::ZERO,
            grand_total: subtotal,
        };

        // Whole-record check after assembly; field cascades above already
        // failed fast on their own.
        let issues = quotation.validate();
        if !issues.is_empty() {
            return Err(ExtractionError::Validation(issues.join("; ")));
        }

        debug!(
            "extracted quotation {} for {} with {} items",
            quotation.ref_no,
            quotation.client_name,
            quotation.items.len()
        );

        Ok(Extraction {
            quotation,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

impl Default for QuotationParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::Data;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    fn sample_sheet() -> Sheet {
        Sheet::from_rows(vec![
            vec![s("SHUBH LAXMI STEEL")],
            vec![s("REF NO"), s("27788")],
            vec![s("DATE"), s("15.03.2024")],
            vec![s("To,"), s("ACME CONSTRUCTION PVT LTD")],
            vec![],
            vec![],
            vec![s("SR NO"), s("DESCRIPTION"), s("QTY"), s("RATE"), s("AMOUNT")],
            vec![Data::Int(1), s("MS PLATE 10MM"), Data::Int(4), Data::Float(2500.0), Data::Float(10000.0)],
            vec![Data::Int(2), s("MS ANGLE 50x50"), Data::Int(8), Data::Float(5000.0), Data::Float(40000.0)],
            vec![],
            vec![s("TOTAL"), Data::Empty, Data::Empty, Data::Empty, Data::Float(50000.0)],
            vec![s("PAYMENT IMMEDIATE")],
        ])
    }

    #[test]
    fn test_parse_complete_sheet() {
        let parser = QuotationParser::new().with_issuer_name("SHUBH LAXMI STEEL");
        let result = parser.parse(&sample_sheet()).unwrap();

        let quotation = &result.quotation;
        assert_eq!(quotation.ref_no, "27788");
        assert_eq!(quotation.client_name, "ACME CONSTRUCTION PVT LTD");
        assert_eq!(quotation.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(quotation.items.len(), 2);
        assert_eq!(quotation.subtotal, Decimal::from(50_000));
        assert_eq!(quotation.grand_total, quotation.subtotal);
        assert_eq!(quotation.gst, Decimal::ZERO);
        assert_eq!(quotation.payment_terms, "PAYMENT IMMEDIATE");
    }

    #[test]
    fn test_soft_defaults_produce_warnings() {
        // No date, no payment/validity lines.
        let sheet = Sheet::from_rows(vec![
            vec![s("REF NO"), s("27788")],
            vec![s("To,"), s("ACME CONSTRUCTION PVT LTD")],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![s("SR NO"), s("DESCRIPTION")],
            vec![Data::Int(1), s("MS PLATE 10MM")],
            vec![],
            vec![s("TOTAL"), Data::Float(500.0)],
        ]);
        let result = QuotationParser::new().parse(&sheet).unwrap();
        assert_eq!(result.warnings.len(), 3);
        assert_eq!(result.quotation.payment_terms, DEFAULT_PAYMENT_TERMS);
        assert_eq!(result.quotation.offer_validity, DEFAULT_OFFER_VALIDITY);
    }

    #[test]
    fn test_missing_ref_no_is_fatal() {
        let sheet = Sheet::from_rows(vec![vec![s("HELLO")]]);
        let err = QuotationParser::new().parse(&sheet).unwrap_err();
        assert!(matches!(err, ExtractionError::RefNoNotFound));
    }

    #[test]
    fn test_missing_subtotal_is_fatal() {
        let mut rows = vec![
            vec![s("REF NO"), s("27788")],
            vec![s("To,"), s("ACME CONSTRUCTION PVT LTD")],
        ];
        rows.resize(6, Vec::new());
        rows.push(vec![s("SR NO"), s("DESCRIPTION")]);
        rows.push(vec![Data::Int(1), s("MS PLATE 10MM")]);
        let sheet = Sheet::from_rows(rows);
        let err = QuotationParser::new().parse(&sheet).unwrap_err();
        assert!(matches!(err, ExtractionError::SubtotalNotFound));
    }

    #[test]
    fn test_reparse_is_idempotent() {
        let parser = QuotationParser::new();
        let sheet = sample_sheet();
        let first = parser.parse(&sheet).unwrap();
        let second = parser.parse(&sheet).unwrap();
        assert_eq!(first.quotation, second.quotation);
    }
}
