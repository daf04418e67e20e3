//! Workbook loading and safe cell access.
//!
//! Quotation sheets have no guaranteed layout, so everything above this
//! module works in raw (row, col) coordinates. `Sheet` copies the first
//! worksheet into an owned dense grid: out-of-range and empty cells both
//! read as [`Data::Empty`] and no accessor ever panics.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_from_rs, Data, Range, Reader, Xlsx};

use crate::error::SheetError;

/// Result type for sheet operations.
pub type Result<T> = std::result::Result<T, SheetError>;

static EMPTY: Data = Data::Empty;

/// The first worksheet of a workbook, fully resident in memory.
#[derive(Debug, Clone)]
pub struct Sheet {
    grid: Vec<Vec<Data>>,
    rows: usize,
    cols: usize,
}

impl Sheet {
    /// Open a workbook file and load its first worksheet.
    ///
    /// Format is detected from the file contents (xlsx/xls/xlsb/ods).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut workbook =
            open_workbook_auto(path.as_ref()).map_err(|e| SheetError::Open(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SheetError::NoWorksheet)?
            .map_err(|e| SheetError::Read(e.to_string()))?;
        Ok(Self::from_range(&range))
    }

    /// Load the first worksheet from in-memory xlsx bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
            .map_err(|e: calamine::XlsxError| SheetError::Open(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SheetError::NoWorksheet)?
            .map_err(|e| SheetError::Read(e.to_string()))?;
        Ok(Self::from_range(&range))
    }

    /// Build a sheet from rows of cell values. Rows may be ragged; short
    /// rows are padded with empty cells.
    pub fn from_rows(rows: Vec<Vec<Data>>) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let grid: Vec<Vec<Data>> = rows
            .into_iter()
            .map(|mut row| {
                row.resize(cols, Data::Empty);
                row
            })
            .collect();
        let rows = grid.len();
        Self { grid, rows, cols }
    }

    fn from_range(range: &Range<Data>) -> Self {
        let (rows, cols) = match range.end() {
            Some((r, c)) => (r as usize + 1, c as usize + 1),
            None => (0, 0),
        };
        let mut grid = Vec::with_capacity(rows);
        for r in 0..rows {
            let mut row = Vec::with_capacity(cols);
            for c in 0..cols {
                let value = range
                    .get_value((r as u32, c as u32))
                    .cloned()
                    .unwrap_or(Data::Empty);
                row.push(value);
            }
            grid.push(row);
        }
        Self { grid, rows, cols }
    }

    /// Number of rows in the occupied range.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in the occupied range.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Raw value at (row, col). Out-of-range reads as an empty cell.
    pub fn value(&self, row: usize, col: usize) -> &Data {
        self.grid
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Whether the cell is empty or contains only whitespace.
    pub fn is_blank(&self, row: usize, col: usize) -> bool {
        match self.value(row, col) {
            Data::Empty => true,
            Data::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Value of the cell one step in `direction` from (row, col).
    ///
    /// Stepping off the top or left edge reads as an empty cell.
    pub fn adjacent(&self, row: usize, col: usize, direction: Direction) -> &Data {
        let (row, col) = match direction {
            Direction::Right => (Some(row), col.checked_add(1)),
            Direction::Down => (row.checked_add(1), Some(col)),
            Direction::Left => (Some(row), col.checked_sub(1)),
            Direction::Up => (row.checked_sub(1), Some(col)),
        };
        match (row, col) {
            (Some(r), Some(c)) => self.value(r, c),
            _ => &EMPTY,
        }
    }

    /// A1-style address of (row, col) for diagnostics, e.g. (3, 4) -> "E4".
    pub fn cell_ref(row: usize, col: usize) -> String {
        let mut letters = String::new();
        let mut c = col;
        loop {
            letters.insert(0, (b'A' + (c % 26) as u8) as char);
            if c < 26 {
                break;
            }
            c = c / 26 - 1;
        }
        format!("{}{}", letters, row + 1)
    }
}

/// Step direction for [`Sheet::adjacent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

/// An inclusive (row, col) window bounding a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl Region {
    pub fn new(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Self {
        Self {
            row_start,
            row_end,
            col_start,
            col_end,
        }
    }

    /// The sheet's full occupied range, clamped to a cell-visit budget so
    /// full-sheet scans stay bounded on pathologically large sheets.
    pub fn full(sheet: &Sheet, row_budget: usize, col_budget: usize) -> Self {
        Self {
            row_start: 0,
            row_end: sheet.rows().min(row_budget).saturating_sub(1),
            col_start: 0,
            col_end: sheet.cols().min(col_budget).saturating_sub(1),
        }
    }

    /// Row-major iteration over the region's coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.col_start..=self.col_end;
        (self.row_start..=self.row_end)
            .flat_map(move |r| cols.clone().map(move |c| (r, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sheet() -> Sheet {
        Sheet::from_rows(vec![
            vec![Data::String("REF NO".into()), Data::Float(27788.0)],
            vec![Data::Empty, Data::String("  ".into()), Data::Int(5)],
        ])
    }

    #[test]
    fn test_value_out_of_range_is_empty() {
        let s = sheet();
        assert_eq!(*s.value(99, 99), Data::Empty);
        assert_eq!(*s.value(0, 1), Data::Float(27788.0));
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let s = sheet();
        assert_eq!(s.rows(), 2);
        assert_eq!(s.cols(), 3);
        assert_eq!(*s.value(0, 2), Data::Empty);
    }

    #[test]
    fn test_is_blank_treats_whitespace_as_blank() {
        let s = sheet();
        assert!(s.is_blank(1, 0));
        assert!(s.is_blank(1, 1));
        assert!(!s.is_blank(1, 2));
    }

    #[test]
    fn test_adjacent_edges() {
        let s = sheet();
        assert_eq!(*s.adjacent(0, 0, Direction::Right), Data::Float(27788.0));
        assert_eq!(*s.adjacent(0, 0, Direction::Left), Data::Empty);
        assert_eq!(*s.adjacent(0, 0, Direction::Up), Data::Empty);
        assert_eq!(*s.adjacent(1, 2, Direction::Up), Data::Empty);
    }

    #[test]
    fn test_cell_ref() {
        assert_eq!(Sheet::cell_ref(3, 4), "E4");
        assert_eq!(Sheet::cell_ref(0, 0), "A1");
        assert_eq!(Sheet::cell_ref(9, 25), "Z10");
        assert_eq!(Sheet::cell_ref(0, 26), "AA1");
    }

    #[test]
    fn test_region_cells_row_major() {
        let region = Region::new(0, 1, 0, 1);
        let order: Vec<_> = region.cells().collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_region_full_respects_budget() {
        let s = sheet();
        let region = Region::full(&s, 1000, 2);
        assert_eq!(region.row_end, 1);
        assert_eq!(region.col_end, 1);
    }
}
