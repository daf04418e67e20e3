//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the qex pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QexConfig {
    /// Quotation extraction configuration.
    pub extraction: ExtractionConfig,
}

impl Default for QexConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
        }
    }
}

/// Quotation extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// The issuing company's own name. Cells equal to or containing this
    /// string are never accepted as the client name. Empty disables the
    /// exclusion.
    pub issuer_name: String,

    /// Last row (inclusive) scanned for scalar field labels.
    pub label_row_limit: usize,

    /// First and last row (inclusive) scanned for the item table header.
    pub header_scan_start: usize,
    pub header_scan_end: usize,

    /// Hard cap on accepted line items.
    pub max_items: usize,

    /// Bounds applied to full-sheet scans (payment terms, validity,
    /// subtotal) so pathologically large sheets stay cheap.
    pub scan_row_budget: usize,
    pub scan_col_budget: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            issuer_name: String::new(),
            label_row_limit: 15,
            header_scan_start: 6,
            header_scan_end: 21,
            max_items: 100,
            scan_row_budget: 1000,
            scan_col_budget: 64,
        }
    }
}

impl QexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
