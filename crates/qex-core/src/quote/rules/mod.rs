//! Scalar field cascades for quotation sheets.
//!
//! Each field is an ordered list of independent strategy functions; the
//! first one producing a value wins. Strategies are exported individually
//! so each stays unit-testable on its own.

pub mod client;
pub mod dates;
pub mod patterns;
pub mod ref_no;
pub mod terms;
pub mod totals;

pub use client::extract_client_name;
pub use dates::extract_date;
pub use ref_no::extract_ref_no;
pub use terms::{extract_offer_validity, extract_payment_terms};
pub use totals::extract_subtotal;
