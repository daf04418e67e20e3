//! Label and pattern search over a bounded sheet region.

use calamine::Data;
use regex::Regex;

use crate::sheet::{Region, Sheet};

use super::normalize::{cell_text, normalized_text};

/// Location of a matched label cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelHit {
    pub row: usize,
    pub col: usize,
}

/// Find the first cell (row-major) whose trimmed, uppercased text contains
/// any of the candidate labels.
///
/// Callers bound the region tightly (e.g. the first 15 rows) to keep false
/// positives and scan cost down.
pub fn find_label(sheet: &Sheet, labels: &[&str], region: Region) -> Option<LabelHit> {
    region.cells().find_map(|(row, col)| {
        let text = normalized_text(sheet.value(row, col))?;
        labels
            .iter()
            .any(|label| text.contains(label))
            .then_some(LabelHit { row, col })
    })
}

/// Find the first cell (row-major) whose stringified, trimmed value matches
/// the structural pattern. Returns the location and the matched text.
pub fn find_by_pattern(
    sheet: &Sheet,
    pattern: &Regex,
    region: Region,
) -> Option<(usize, usize, String)> {
    region.cells().find_map(|(row, col)| {
        let text = cell_text(sheet.value(row, col))?;
        pattern.is_match(&text).then_some((row, col, text))
    })
}

/// First non-empty value among the given cells, in order.
pub fn first_populated<'a>(
    sheet: &'a Sheet,
    cells: impl IntoIterator<Item = (usize, usize)>,
) -> Option<&'a Data> {
    cells.into_iter().find_map(|(row, col)| {
        let value = sheet.value(row, col);
        (!sheet.is_blank(row, col)).then_some(value)
    })
}
