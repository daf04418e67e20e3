//! Quotation data models produced by the extraction engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default payment terms when no "PAYMENT ..." cell is found on the sheet.
pub const DEFAULT_PAYMENT_TERMS: &str = "PAYMENT IMMEDIATE";

/// Default offer validity when no "VALIDITY"/"OFFER ..." cell is found.
pub const DEFAULT_OFFER_VALIDITY: &str = "OFFER VALIDITY 1 WEEKS";

/// Default unit of measure for line items.
pub const DEFAULT_UNIT: &str = "NOS";

/// A normalized quotation record extracted from one workbook.
///
/// Constructed once per uploaded file and immutable afterwards; the caller
/// hands it off to whatever persistence layer it uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    /// Reference number (conventionally, but not strictly, 5 digits).
    pub ref_no: String,

    /// Quotation date. Falls back to the current date when the sheet
    /// carries no recognizable date.
    pub date: NaiveDate,

    /// Client (recipient) name. Never the issuing company's own name.
    pub client_name: String,

    /// Line items in table row order.
    pub items: Vec<LineItem>,

    /// Payment terms line, verbatim from the sheet.
    pub payment_terms: String,

    /// Offer validity line, verbatim from the sheet.
    pub offer_validity: String,

    /// Sum found next to the sheet's "TOTAL" cell.
    pub subtotal: Decimal,

    /// Document-level GST. Always zero: GST varies per item and is not
    /// aggregated at the document level.
    pub gst: Decimal,

    /// Grand total. Equals `subtotal` (no document-level GST addition).
    pub grand_total: Decimal,
}

/// A single row of the quotation's item table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Serial number as written in the sheet.
    pub sr_no: Decimal,

    /// Item description.
    pub description: String,

    /// Quantity (default 1).
    pub quantity: Decimal,

    /// Unit of measure (default "NOS").
    pub unit: String,

    /// Unit rate (default 0).
    pub rate: Decimal,

    /// GST percentage for this item (default 0).
    pub gst_percent: Decimal,

    /// Line amount (default 0).
    pub amount: Decimal,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            sr_no: Decimal::ZERO,
            description: String::new(),
            quantity: Decimal::ONE,
            unit: DEFAULT_UNIT.to_string(),
            rate: Decimal::ZERO,
            gst_percent: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }
}

impl Quotation {
    /// Check structural completeness, collecting every violation instead of
    /// stopping at the first.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.ref_no.trim().is_empty() {
            issues.push("Missing reference number".to_string());
        }

        if self.client_name.trim().is_empty() {
            issues.push("Missing client name".to_string());
        }

        if self.items.is_empty() {
            issues.push("No line items".to_string());
        }

        if self.subtotal <= Decimal::ZERO {
            issues.push("Subtotal is not positive".to_string());
        }

        issues
    }
}
