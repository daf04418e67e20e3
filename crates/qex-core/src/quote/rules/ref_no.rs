//! Reference number extraction.
//!
//! Fatal field: every strategy failing aborts the whole extraction.

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::sheet::{Region, Sheet};

use super::super::locate::{find_by_pattern, find_label, first_populated};
use super::super::normalize::cell_text;
use super::patterns::FIVE_DIGIT;

/// Label synonyms announcing the reference number.
const REF_NO_LABELS: &[&str] = &["REF NO", "REF. NO", "QUOTATION NO", "QUOTE NO"];

/// Historical fixed position: row 4, column E.
const FIXED_CELL: (usize, usize) = (4, 4);

/// Same-row fallback columns when the label has no right-adjacent value.
const FALLBACK_COLS: [usize; 2] = [4, 5];

/// Run the ref-no cascade; first strategy producing a value wins.
pub fn extract_ref_no(sheet: &Sheet, config: &ExtractionConfig) -> Option<String> {
    by_label(sheet, config)
        .or_else(|| fixed_cell(sheet))
        .or_else(|| by_pattern(sheet))
}

/// Strategy 1: locate a ref-no label in the top rows, then take the value to
/// its right, else the same row's columns E/F.
pub fn by_label(sheet: &Sheet, config: &ExtractionConfig) -> Option<String> {
    let region = Region::new(0, config.label_row_limit, 0, sheet.cols().saturating_sub(1));
    let hit = find_label(sheet, REF_NO_LABELS, region)?;
    let candidates = [
        (hit.row, hit.col + 1),
        (hit.row, FALLBACK_COLS[0]),
        (hit.row, FALLBACK_COLS[1]),
    ];
    let value = first_populated(sheet, candidates)?;
    let text = cell_text(value)?;
    debug!(
        "ref no from label at {}: {}",
        Sheet::cell_ref(hit.row, hit.col),
        text
    );
    Some(text)
}

/// Strategy 2: the historical fixed cell, accepted only if it still looks
/// like a 5-digit reference.
pub fn fixed_cell(sheet: &Sheet) -> Option<String> {
    let text = cell_text(sheet.value(FIXED_CELL.0, FIXED_CELL.1))?;
    FIVE_DIGIT.is_match(&text).then_some(text)
}

/// Strategy 3: any 5-digit token in the top-left 10x10 window.
pub fn by_pattern(sheet: &Sheet) -> Option<String> {
    let (row, col, text) = find_by_pattern(sheet, &FIVE_DIGIT, Region::new(0, 9, 0, 9))?;
    debug!("ref no by pattern at {}: {}", Sheet::cell_ref(row, col), text);
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::Data;
    use pretty_assertions::assert_eq;

    fn config() -> ExtractionConfig {
        ExtractionConfig::default()
    }

    fn blank_row() -> Vec<Data> {
        Vec::new()
    }

    #[test]
    fn test_label_with_right_adjacent_value() {
        let sheet = Sheet::from_rows(vec![
            blank_row(),
            vec![Data::String("Ref No.".into()), Data::String(" 27788 ".into())],
        ]);
        assert_eq!(extract_ref_no(&sheet, &config()), Some("27788".to_string()));
    }

    #[test]
    fn test_label_with_column_e_fallback() {
        let sheet = Sheet::from_rows(vec![vec![
            Data::String("QUOTATION NO".into()),
            Data::Empty,
            Data::Empty,
            Data::Empty,
            Data::Float(31205.0),
        ]]);
        assert_eq!(extract_ref_no(&sheet, &config()), Some("31205".to_string()));
    }

    #[test]
    fn test_fixed_cell_requires_five_digits() {
        let mut rows = vec![blank_row(), blank_row(), blank_row(), blank_row()];
        rows.push(vec![
            Data::Empty,
            Data::Empty,
            Data::Empty,
            Data::Empty,
            Data::String("27788".into()),
        ]);
        let sheet = Sheet::from_rows(rows);
        assert_eq!(fixed_cell(&sheet), Some("27788".to_string()));

        let mut rows = vec![blank_row(); 4];
        rows.push(vec![
            Data::Empty,
            Data::Empty,
            Data::Empty,
            Data::Empty,
            Data::String("DRAFT".into()),
        ]);
        let sheet = Sheet::from_rows(rows);
        assert_eq!(fixed_cell(&sheet), None);
    }

    #[test]
    fn test_pattern_fallback_without_label() {
        let sheet = Sheet::from_rows(vec![
            vec![Data::String("SOME HEADER".into())],
            vec![Data::Empty, Data::Empty, Data::Float(27788.0)],
        ]);
        assert_eq!(extract_ref_no(&sheet, &config()), Some("27788".to_string()));
    }

    #[test]
    fn test_no_signal_anywhere() {
        let sheet = Sheet::from_rows(vec![vec![Data::String("HELLO".into())]]);
        assert_eq!(extract_ref_no(&sheet, &config()), None);
    }
}
