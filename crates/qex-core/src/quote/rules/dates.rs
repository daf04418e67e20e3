//! Quotation date extraction.
//!
//! Soft field: the parser substitutes the current date and logs a warning
//! when every strategy fails.

use chrono::NaiveDate;

use crate::models::config::ExtractionConfig;
use crate::sheet::{Region, Sheet};

use super::super::locate::find_label;
use super::super::normalize::parse_date;

/// Label synonyms announcing the quotation date.
const DATE_LABELS: &[&str] = &["DATE", "DATED"];

/// Historical fixed position: row 5, column E.
const FIXED_CELL: (usize, usize) = (5, 4);

/// Run the date cascade; first strategy producing a value wins.
pub fn extract_date(sheet: &Sheet, config: &ExtractionConfig) -> Option<NaiveDate> {
    by_label(sheet, config)
        .or_else(|| fixed_cell(sheet))
        .or_else(|| by_scan(sheet))
}

/// Strategy 1: a date label in the top rows, value to its right or in the
/// same row's columns E/F.
pub fn by_label(sheet: &Sheet, config: &ExtractionConfig) -> Option<NaiveDate> {
    let region = Region::new(0, config.label_row_limit, 0, sheet.cols().saturating_sub(1));
    let hit = find_label(sheet, DATE_LABELS, region)?;
    [(hit.row, hit.col + 1), (hit.row, 4), (hit.row, 5)]
        .into_iter()
        .find_map(|(row, col)| parse_date(sheet.value(row, col)))
}

/// Strategy 2: the historical fixed cell.
pub fn fixed_cell(sheet: &Sheet) -> Option<NaiveDate> {
    parse_date(sheet.value(FIXED_CELL.0, FIXED_CELL.1))
}

/// Strategy 3: brute-force parse over the top-left 11x11 window.
pub fn by_scan(sheet: &Sheet) -> Option<NaiveDate> {
    Region::new(0, 10, 0, 10)
        .cells()
        .find_map(|(row, col)| parse_date(sheet.value(row, col)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::Data;
    use pretty_assertions::assert_eq;

    fn config() -> ExtractionConfig {
        ExtractionConfig::default()
    }

    #[test]
    fn test_labeled_text_date() {
        let sheet = Sheet::from_rows(vec![vec![
            Data::String("Date:".into()),
            Data::String("15.03.2024".into()),
        ]]);
        assert_eq!(
            extract_date(&sheet, &config()),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn test_labeled_serial_in_column_e() {
        let sheet = Sheet::from_rows(vec![vec![
            Data::String("DATED".into()),
            Data::Empty,
            Data::Empty,
            Data::Empty,
            Data::Float(45000.0),
        ]]);
        assert_eq!(
            extract_date(&sheet, &config()),
            NaiveDate::from_ymd_opt(2023, 3, 15)
        );
    }

    #[test]
    fn test_unlabeled_scan_fallback() {
        let sheet = Sheet::from_rows(vec![
            vec![Data::String("QUOTATION".into())],
            vec![Data::Empty, Data::String("31/12/2024".into())],
        ]);
        assert_eq!(
            extract_date(&sheet, &config()),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
    }

    #[test]
    fn test_no_date_anywhere() {
        let sheet = Sheet::from_rows(vec![vec![Data::String("HELLO".into())]]);
        assert_eq!(extract_date(&sheet, &config()), None);
    }
}
