//! Data models for quotation records and pipeline configuration.

pub mod config;
pub mod quotation;

pub use config::{ExtractionConfig, QexConfig};
pub use quotation::{LineItem, Quotation};
