//! Error types for the qex-core library.

use thiserror::Error;

/// Main error type for the qex library.
#[derive(Error, Debug)]
pub enum QexError {
    /// Workbook/worksheet access error.
    #[error("sheet error: {0}")]
    Sheet(#[from] SheetError),

    /// Quotation extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to loading and reading workbooks.
#[derive(Error, Debug)]
pub enum SheetError {
    /// Failed to open/parse the workbook file.
    #[error("failed to open workbook: {0}")]
    Open(String),

    /// The workbook contains no worksheets.
    #[error("workbook has no worksheets")]
    NoWorksheet,

    /// Failed to read the first worksheet.
    #[error("failed to read worksheet: {0}")]
    Read(String),
}

/// Errors related to quotation field extraction.
///
/// Fatal fields produce a variant here the moment every strategy in their
/// cascade has failed; soft fields never do (they fall back to a default and
/// log a warning instead).
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No ref-no strategy produced a value.
    #[error("reference number not found")]
    RefNoNotFound,

    /// No client-name strategy produced a value.
    #[error("client name not found")]
    ClientNotFound,

    /// No candidate row classified as the line-item table header.
    #[error("item table header not found")]
    HeaderNotFound,

    /// The header was found but no valid item rows followed it.
    #[error("no line items found below header row {0}")]
    NoLineItems(usize),

    /// No "TOTAL" cell with a positive number to its right.
    #[error("subtotal not found")]
    SubtotalNotFound,

    /// Structural validation of the assembled record failed.
    #[error("validation failed: {0}")]
    Validation(String),
}

/// Result type for the qex library.
pub type Result<T> = std::result::Result<T, QexError>;
