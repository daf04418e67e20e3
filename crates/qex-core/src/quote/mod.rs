//! Quotation field extraction module.

mod locate;
mod normalize;
mod parser;
pub mod rules;
pub mod table;

pub use locate::{find_by_pattern, find_label, LabelHit};
pub use normalize::{cell_text, normalized_text, parse_date, parse_number};
pub use parser::{Extraction, QuotationParser};
pub use table::{detect_header, extract_items, ColumnRole, HeaderMap};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
