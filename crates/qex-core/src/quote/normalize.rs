//! Numeric and date normalization for raw cell values.
//!
//! Real quotation sheets mix typed cells with formatted text: amounts
//! arrive as floats, as "₹1,23,456", or with stray percent signs; dates
//! arrive as typed date cells, as Excel serials in plain numeric cells, or
//! as day-first text. Everything funnels through the two parsers here so
//! callers only ever see `Option<Decimal>` / `Option<NaiveDate>` — absent
//! stays distinguishable from zero.

use calamine::Data;
use chrono::{Duration, NaiveDate};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Below this value a bare number is taken at face value rather than as an
/// Excel date serial (serials for any plausible quotation date are ~30000+).
const MIN_DATE_SERIAL: f64 = 1000.0;

/// Accepted textual date formats, tried in order (day-first before ISO).
const DATE_FORMATS: &[&str] = &[
    "%d.%m.%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d.%m.%y",
    "%d/%m/%y",
];

/// Parse a cell as a number.
///
/// Numeric cells pass through; textual cells are stripped of currency
/// symbols, grouping separators, whitespace and percent signs before
/// parsing. Returns `None` (not zero) for empty or unparseable input.
pub fn parse_number(value: &Data) -> Option<Decimal> {
    match value {
        Data::Int(i) => Some(Decimal::from(*i)),
        Data::Float(f) => Decimal::from_f64(*f),
        Data::DateTime(dt) => Decimal::from_f64(dt.as_f64()),
        Data::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| !matches!(c, '₹' | '$' | '€' | '£' | ',' | '%') && !c.is_whitespace())
                .collect();
            if cleaned.is_empty() {
                return None;
            }
            Decimal::from_str(&cleaned).ok()
        }
        _ => None,
    }
}

/// Parse a cell as a calendar date.
///
/// Typed date cells pass through; bare numbers above [`MIN_DATE_SERIAL`]
/// are treated as 1900-system Excel serials; text is tried against
/// [`DATE_FORMATS`] in order. Returns `None` if nothing matches.
pub fn parse_date(value: &Data) -> Option<NaiveDate> {
    match value {
        Data::DateTime(dt) => date_from_serial(dt.as_f64()),
        Data::DateTimeIso(s) => NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok(),
        Data::Float(f) if *f > MIN_DATE_SERIAL => date_from_serial(*f),
        Data::Int(i) if (*i as f64) > MIN_DATE_SERIAL => date_from_serial(*i as f64),
        Data::String(s) => {
            let s = s.trim();
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        }
        _ => None,
    }
}

/// Convert a 1900-system Excel date serial to a calendar date.
///
/// The epoch is 1899-12-30, not 1899-12-31: the offset absorbs Excel's
/// phantom 1900-02-29 so serials from real files land on the right day.
fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    let days = serial.trunc() as i64;
    if days <= 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(Duration::days(days))
}

/// Trimmed display text of a cell, for label matching and pattern scans.
///
/// Integral floats render without the trailing `.0` so a numeric cell
/// holding 27788 stringifies as "27788". Empty and date cells yield `None`.
pub fn cell_text(value: &Data) -> Option<String> {
    match value {
        Data::String(s) | Data::DateTimeIso(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Trimmed, uppercased cell text, the normal form for label comparison.
pub fn normalized_text(value: &Data) -> Option<String> {
    cell_text(value).map(|s| s.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_number_indian_grouping() {
        let value = Data::String("₹1,23,456".to_string());
        assert_eq!(parse_number(&value), Some(Decimal::from(123_456)));
    }

    #[test]
    fn test_parse_number_absent_vs_zero() {
        assert_eq!(parse_number(&Data::String(String::new())), None);
        assert_eq!(parse_number(&Data::String("  ".to_string())), None);
        assert_eq!(parse_number(&Data::Empty), None);
        // Zero is a value, not absence.
        assert_eq!(parse_number(&Data::Float(0.0)), Some(Decimal::ZERO));
        assert_eq!(parse_number(&Data::Int(0)), Some(Decimal::ZERO));
    }

    #[test]
    fn test_parse_number_percent_and_currency() {
        assert_eq!(
            parse_number(&Data::String("18%".to_string())),
            Some(Decimal::from(18))
        );
        assert_eq!(
            parse_number(&Data::String("$ 2,500.50".to_string())),
            Some(Decimal::from_str("2500.50").unwrap())
        );
        assert_eq!(parse_number(&Data::String("N/A".to_string())), None);
    }

    #[test]
    fn test_parse_date_serial() {
        // 45000 days past 1899-12-30.
        let date = parse_date(&Data::Float(45000.0)).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 3, 15).unwrap());
    }

    #[test]
    fn test_parse_date_small_number_is_not_a_serial() {
        assert_eq!(parse_date(&Data::Float(500.0)), None);
    }

    #[test]
    fn test_parse_date_day_first_and_iso_agree() {
        let dmy = parse_date(&Data::String("31.12.2024".to_string()));
        let iso = parse_date(&Data::String("2024-12-31".to_string()));
        assert_eq!(dmy, iso);
        assert_eq!(dmy, NaiveDate::from_ymd_opt(2024, 12, 31));
    }

    #[test]
    fn test_parse_date_slash_and_two_digit_year() {
        assert_eq!(
            parse_date(&Data::String("15/03/2024".to_string())),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(
            parse_date(&Data::String("15.03.24".to_string())),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn test_parse_date_garbage() {
        assert_eq!(parse_date(&Data::String("TOTAL".to_string())), None);
    }

    #[test]
    fn test_cell_text_collapses_integral_floats() {
        assert_eq!(cell_text(&Data::Float(27788.0)), Some("27788".to_string()));
        assert_eq!(cell_text(&Data::Float(2.5)), Some("2.5".to_string()));
        assert_eq!(cell_text(&Data::String("  REF NO ".to_string())), Some("REF NO".to_string()));
        assert_eq!(cell_text(&Data::Empty), None);
    }
}
