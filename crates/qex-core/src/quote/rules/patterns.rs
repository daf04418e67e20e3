//! Common regex patterns for quotation sheet extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Ref-no token (conventionally 5 digits)
    pub static ref FIVE_DIGIT: Regex = Regex::new(
        r"^\d{5}$"
    ).unwrap();

    // Company-suffix keywords marking a cell as a company name
    pub static ref COMPANY_SUFFIX: Regex = Regex::new(
        r"\b(?:LTD|LIMITED|PVT|PRIVATE|CONSTRUCTION|INFRASTRUCTURE|PROJECTS?|ENTERPRISES?|CORPORATION|COMPANY|INC)\b"
    ).unwrap();

    // Generic caption text never acceptable as a client name
    pub static ref GENERIC_LABEL: Regex = Regex::new(
        r"^(?:CLIENT|NAME|TO|M/S)\s*[.,:]?$"
    ).unwrap();

    // Item table header synonyms, one set per column role
    pub static ref HDR_SR_NO: Regex = Regex::new(
        r"^(?:S\.?\s*R\.?\s*NO\.?|S\.?\s*L\.?\s*NO\.?|S\.?\s*NO\.?|SR\.?|#)$"
    ).unwrap();

    pub static ref HDR_DESCRIPTION: Regex = Regex::new(
        r"^(?:DESC|DESCRIPTION|PARTICULARS?|ITEMS?|DETAILS?|PRODUCT)\b"
    ).unwrap();

    pub static ref HDR_QUANTITY: Regex = Regex::new(
        r"^(?:QTY\.?|QUANTITY)\b"
    ).unwrap();

    // Anchored both ends so "UNIT PRICE"/"UNIT RATE" fall through to the
    // rate role below
    pub static ref HDR_UNIT: Regex = Regex::new(
        r"^(?:UNITS?|UOM|U\.O\.M\.?)$"
    ).unwrap();

    pub static ref HDR_RATE: Regex = Regex::new(
        r"^(?:RATE|PRICE|UNIT\s*(?:PRICE|RATE))\b"
    ).unwrap();

    pub static ref HDR_GST: Regex = Regex::new(
        r"^(?:GST|IGST|CGST|SGST|TAX)\b"
    ).unwrap();

    pub static ref HDR_AMOUNT: Regex = Regex::new(
        r"^AMOUNT\b|^(?:TOTAL|AMT\.?|VALUE)$"
    ).unwrap();
}
