//! Payment terms and offer validity extraction.
//!
//! Both are soft fields found by full-sheet scan: sheets put these lines
//! anywhere below the item table, so no positional strategy applies.

use crate::models::config::ExtractionConfig;
use crate::sheet::{Region, Sheet};

use super::super::normalize::cell_text;

/// First cell whose trimmed text starts with "PAYMENT", verbatim.
pub fn extract_payment_terms(sheet: &Sheet, config: &ExtractionConfig) -> Option<String> {
    full_scan(sheet, config, |upper| upper.starts_with("PAYMENT"))
}

/// First cell containing "VALIDITY" or starting with "OFFER", verbatim.
pub fn extract_offer_validity(sheet: &Sheet, config: &ExtractionConfig) -> Option<String> {
    full_scan(sheet, config, |upper| {
        upper.contains("VALIDITY") || upper.starts_with("OFFER")
    })
}

fn full_scan(
    sheet: &Sheet,
    config: &ExtractionConfig,
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    Region::full(sheet, config.scan_row_budget, config.scan_col_budget)
        .cells()
        .find_map(|(row, col)| {
            let text = cell_text(sheet.value(row, col))?;
            accept(&text.to_uppercase()).then_some(text)
        })
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
    fn test_payment_terms_anywhere_on_sheet() {
        let sheet = Sheet::from_rows(vec![
            vec![Data::String("QUOTATION".into())],
            vec![],
            vec![Data::Empty, Data::String("Payment within 30 days".into())],
        ]);
        assert_eq!(
            extract_payment_terms(&sheet, &config()),
            Some("Payment within 30 days".to_string())
        );
    }

    #[test]
    fn test_payment_requires_leading_match() {
        let sheet = Sheet::from_rows(vec![vec![Data::String("ADVANCE PAYMENT TERMS".into())]]);
        assert_eq!(extract_payment_terms(&sheet, &config()), None);
    }

    #[test]
    fn test_offer_validity_by_containment() {
        let sheet = Sheet::from_rows(vec![vec![
            Data::String("PRICE VALIDITY 2 WEEKS".into()),
        ]]);
        assert_eq!(
            extract_offer_validity(&sheet, &config()),
            Some("PRICE VALIDITY 2 WEEKS".to_string())
        );
    }

    #[test]
    fn test_offer_validity_by_prefix() {
        let sheet = Sheet::from_rows(vec![vec![
            Data::String("Offer valid till month end".into()),
        ]]);
        assert_eq!(
            extract_offer_validity(&sheet, &config()),
            Some("Offer valid till month end".to_string())
        );
    }
}
