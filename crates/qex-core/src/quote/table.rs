//! Item table header detection and line-item row extraction.
//!
//! The header row is found by classifying each populated cell of candidate
//! rows against a closed set of column roles, so the physical column order
//! of the source sheet never matters.

use std::collections::HashMap;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::quotation::{LineItem, DEFAULT_UNIT};
use crate::sheet::Sheet;

use super::normalize::{cell_text, normalized_text, parse_number};
use super::rules::patterns::{
    HDR_AMOUNT, HDR_DESCRIPTION, HDR_GST, HDR_QUANTITY, HDR_RATE, HDR_SR_NO, HDR_UNIT,
};

/// Semantic roles of item table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    SrNo,
    Description,
    Quantity,
    Unit,
    Rate,
    GstPercent,
    Amount,
}

impl ColumnRole {
    const ALL: [ColumnRole; 7] = [
        ColumnRole::SrNo,
        ColumnRole::Description,
        ColumnRole::Quantity,
        ColumnRole::Unit,
        ColumnRole::Rate,
        ColumnRole::GstPercent,
        ColumnRole::Amount,
    ];

    fn synonyms(self) -> &'static Regex {
        match self {
            ColumnRole::SrNo => &HDR_SR_NO,
            ColumnRole::Description => &HDR_DESCRIPTION,
            ColumnRole::Quantity => &HDR_QUANTITY,
            ColumnRole::Unit => &HDR_UNIT,
            ColumnRole::Rate => &HDR_RATE,
            ColumnRole::GstPercent => &HDR_GST,
            ColumnRole::Amount => &HDR_AMOUNT,
        }
    }

    /// Classify one normalized header cell; first matching role wins.
    pub fn classify(text: &str) -> Option<ColumnRole> {
        Self::ALL
            .into_iter()
            .find(|role| role.synonyms().is_match(text))
    }
}

/// A detected header row and its column-role map.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    /// Row index of the header itself.
    pub row: usize,
    /// Column index per resolved role.
    pub columns: HashMap<ColumnRole, usize>,
}

impl HeaderMap {
    fn column(&self, role: ColumnRole) -> Option<usize> {
        self.columns.get(&role).copied()
    }
}

/// Scan the candidate window for the item table header.
///
/// A row qualifies only when both the serial-number and description roles
/// resolve in it. Within a row, the first column claiming a role keeps it.
pub fn detect_header(sheet: &Sheet, config: &ExtractionConfig) -> Option<HeaderMap> {
    let last = config.header_scan_end.min(sheet.rows().saturating_sub(1));
    for row in config.header_scan_start..=last {
        let mut columns = HashMap::new();
        for col in 0..sheet.cols() {
            let Some(text) = normalized_text(sheet.value(row, col)) else {
                continue;
            };
            if let Some(role) = ColumnRole::classify(&text) {
                columns.entry(role).or_insert(col);
            }
        }
        if columns.contains_key(&ColumnRole::SrNo) && columns.contains_key(&ColumnRole::Description)
        {
            debug!("item table header at row {}: {:?}", row, columns);
            return Some(HeaderMap { row, columns });
        }
    }
    None
}

/// Walk the rows beneath the header and build line items.
///
/// A blank serial-number cell is the termination sentinel. A serial that is
/// present but parses to zero, or does not parse at all, marks a non-item
/// row and is skipped without terminating; so is a row with no description.
/// The walk is additionally bounded by the occupied range and the item cap.
pub fn extract_items(sheet: &Sheet, header: &HeaderMap, config: &ExtractionConfig) -> Vec<LineItem> {
    let mut items = Vec::new();
    let sr_col = match header.column(ColumnRole::SrNo) {
        Some(col) => col,
        None => return items,
    };

    for row in header.row + 1..sheet.rows() {
        if items.len() >= config.max_items {
            break;
        }
        if sheet.is_blank(row, sr_col) {
            break;
        }
        let sr_no = match parse_number(sheet.value(row, sr_col)) {
            Some(n) if n != Decimal::ZERO => n,
            // Zero or unparseable serial: not an item row, but not the end
            // of the table either.
            _ => continue,
        };
        let description = match header
            .column(ColumnRole::Description)
            .and_then(|col| cell_text(sheet.value(row, col)))
        {
            Some(text) => text,
            None => continue,
        };

        let number_at = |role| {
            header
                .column(role)
                .and_then(|col| parse_number(sheet.value(row, col)))
        };
        let unit = header
            .column(ColumnRole::Unit)
            .and_then(|col| cell_text(sheet.value(row, col)))
            .unwrap_or_else(|| DEFAULT_UNIT.to_string());

        items.push(LineItem {
            sr_no,
            description,
            quantity: number_at(ColumnRole::Quantity).unwrap_or(Decimal::ONE),
            unit,
            rate: number_at(ColumnRole::Rate).unwrap_or(Decimal::ZERO),
            gst_percent: number_at(ColumnRole::GstPercent).unwrap_or(Decimal::ZERO),
            amount: number_at(ColumnRole::Amount).unwrap_or(Decimal::ZERO),
        });
    }

    items
}
