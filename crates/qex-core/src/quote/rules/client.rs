//! Client name extraction.
//!
//! Fatal field. Whatever strategy fires, the candidate is rejected if it is
//! the issuing company's own name: quotations carry the issuer letterhead
//! in the same top rows the client address sits in.

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::sheet::{Direction, Region, Sheet};

use super::super::locate::find_label;
use super::super::normalize::cell_text;
use super::patterns::{COMPANY_SUFFIX, GENERIC_LABEL};

/// Label synonyms opening the recipient block.
const TO_LABELS: &[&str] = &["TO,", "TO:", "TO"];

/// Historical fixed position: row 5, column B.
const FIXED_CELL: (usize, usize) = (5, 1);

/// Run the client-name cascade; first strategy producing a value wins.
pub fn extract_client_name(sheet: &Sheet, config: &ExtractionConfig) -> Option<String> {
    by_label(sheet, config)
        .or_else(|| fixed_cell(sheet, config))
        .or_else(|| by_company_suffix(sheet, config))
}

/// Whether the candidate is the issuer's own name (case- and
/// substring-insensitive, both directions). Empty issuer disables the check.
fn is_issuer(candidate: &str, config: &ExtractionConfig) -> bool {
    let issuer = config.issuer_name.trim().to_uppercase();
    if issuer.is_empty() {
        return false;
    }
    let candidate = candidate.trim().to_uppercase();
    candidate.contains(&issuer) || issuer.contains(&candidate)
}

/// Strategy 1: a "TO" label in the top-left block, client name to its right.
pub fn by_label(sheet: &Sheet, config: &ExtractionConfig) -> Option<String> {
    let region = Region::new(0, config.label_row_limit, 0, 5);
    let hit = find_label(sheet, TO_LABELS, region)?;
    let text = cell_text(sheet.adjacent(hit.row, hit.col, Direction::Right))?;
    if is_issuer(&text, config) {
        debug!("client candidate at {} is the issuer, rejected", Sheet::cell_ref(hit.row, hit.col + 1));
        return None;
    }
    Some(text)
}

/// Strategy 2: the historical fixed cell, excluding generic caption text.
pub fn fixed_cell(sheet: &Sheet, config: &ExtractionConfig) -> Option<String> {
    let text = cell_text(sheet.value(FIXED_CELL.0, FIXED_CELL.1))?;
    if is_issuer(&text, config) || GENERIC_LABEL.is_match(&text.to_uppercase()) {
        return None;
    }
    Some(text)
}

/// Strategy 3: any cell in rows 3-12, cols 0-6 carrying a company-suffix
/// keyword (LTD, PVT, CONSTRUCTION, ...).
pub fn by_company_suffix(sheet: &Sheet, config: &ExtractionConfig) -> Option<String> {
    Region::new(3, 12, 0, 6).cells().find_map(|(row, col)| {
        let text = cell_text(sheet.value(row, col))?;
        let upper = text.to_uppercase();
        (COMPANY_SUFFIX.is_match(&upper) && !is_issuer(&text, config)).then_some(text)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::Data;
    use pretty_assertions::assert_eq;

    fn config() -> ExtractionConfig {
        ExtractionConfig {
            issuer_name: "SHUBH LAXMI STEEL".to_string(),
            ..ExtractionConfig::default()
        }
    }

    #[test]
    fn test_to_label_right_adjacent() {
        let sheet = Sheet::from_rows(vec![
            vec![],
            vec![Data::String("To,".into()), Data::String("ACME CONSTRUCTION PVT LTD".into())],
        ]);
        assert_eq!(
            extract_client_name(&sheet, &config()),
            Some("ACME CONSTRUCTION PVT LTD".to_string())
        );
    }

    #[test]
    fn test_issuer_name_is_rejected() {
        let sheet = Sheet::from_rows(vec![vec![
            Data::String("TO:".into()),
            Data::String("shubh laxmi steel".into()),
        ]]);
        assert_eq!(by_label(&sheet, &config()), None);
    }

    #[test]
    fn test_fixed_cell_excludes_generic_labels() {
        let mut rows = vec![Vec::new(); 5];
        rows.push(vec![Data::Empty, Data::String("CLIENT:".into())]);
        let sheet = Sheet::from_rows(rows);
        assert_eq!(fixed_cell(&sheet, &config()), None);

        let mut rows = vec![Vec::new(); 5];
        rows.push(vec![Data::Empty, Data::String("NORTHSTAR INFRA".into())]);
        let sheet = Sheet::from_rows(rows);
        assert_eq!(fixed_cell(&sheet, &config()), Some("NORTHSTAR INFRA".to_string()));
    }

    #[test]
    fn test_company_suffix_scan_skips_issuer() {
        let mut rows = vec![Vec::new(); 4];
        rows.push(vec![Data::String("SHUBH LAXMI STEEL".into())]);
        rows.push(vec![Data::Empty, Data::String("BLUEHILL PROJECTS".into())]);
        let sheet = Sheet::from_rows(rows);
        assert_eq!(
            by_company_suffix(&sheet, &config()),
            Some("BLUEHILL PROJECTS".to_string())
        );
    }
}
