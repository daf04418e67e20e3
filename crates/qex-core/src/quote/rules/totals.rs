//! Subtotal extraction.
//!
//! Fatal field: the record's subtotal, grand total and (zero) GST all hang
//! off the number found here.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::sheet::{Region, Sheet};

use super::super::normalize::{normalized_text, parse_number};

/// How far right of a "TOTAL" cell the amount may sit.
const TOTAL_LOOKAHEAD_COLS: usize = 5;

/// Full-sheet row-major scan for a cell reading exactly "TOTAL", whose same
/// row holds a positive number within 5 columns to the right. The first
/// "TOTAL" cell with such a number wins; "TOTAL" cells without one (e.g. the
/// item table's amount header) are passed over.
pub fn extract_subtotal(sheet: &Sheet, config: &ExtractionConfig) -> Option<Decimal> {
    Region::full(sheet, config.scan_row_budget, config.scan_col_budget)
        .cells()
        .find_map(|(row, col)| {
            if normalized_text(sheet.value(row, col)).as_deref() != Some("TOTAL") {
                return None;
            }
            let amount = (1..=TOTAL_LOOKAHEAD_COLS).find_map(|dc| {
                parse_number(sheet.value(row, col + dc)).filter(|n| *n > Decimal::ZERO)
            })?;
            debug!(
                "subtotal {} right of TOTAL at {}",
                amount,
                Sheet::cell_ref(row, col)
            );
            Some(amount)
        })
}
