//! Cell and column identifiers for the 7 × 6 grid.
//!
//! Cells are numbered 1..=42 row-major from the top-left corner, so the top
//! row holds ids 1..=7 and the bottom row ids 36..=42. Every topological
//! question (which column, which row, what is below) is answered through the
//! explicit `(column, row)` coordinates defined here rather than through
//! stride arithmetic scattered across callers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of columns on the board.
pub const COLUMNS: u8 = 7;

/// Number of cells stacked in each column.
pub const ROWS: u8 = 6;

/// Total number of cells, which is also the longest possible game.
pub const CELL_COUNT: usize = (COLUMNS as usize) * (ROWS as usize);

/// Rejected cell id outside 1..=42.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cell id {0} is outside 1..=42")]
pub struct InvalidCellId(pub u8);

/// Rejected column number outside 1..=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("column {0} is outside 1..=7")]
pub struct InvalidColumn(pub u8);

/// A stable cell identifier in 1..=42.
///
/// Serializes as a bare integer so persisted move lists stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CellId(u8);

impl CellId {
    /// Returns the cell with the given id, or `None` outside 1..=42.
    pub const fn new(id: u8) -> Option<CellId> {
        if id >= 1 && id as usize <= CELL_COUNT {
            Some(CellId(id))
        } else {
            None
        }
    }

    /// Returns the cell at zero-based `(column, row)`; row 0 is the top.
    pub const fn from_coords(column: u8, row: u8) -> Option<CellId> {
        if column < COLUMNS && row < ROWS {
            Some(CellId::at(column, row))
        } else {
            None
        }
    }

    /// Unchecked coordinate constructor for table generation.
    pub(crate) const fn at(column: u8, row: u8) -> CellId {
        CellId(row * COLUMNS + column + 1)
    }

    /// The raw id in 1..=42.
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Zero-based index, suitable for arrays and bitsets.
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Single-bit mask of this cell within a 64-bit occupancy set.
    pub const fn bit(self) -> u64 {
        1u64 << self.index()
    }

    /// Zero-based column index.
    pub const fn column_index(self) -> u8 {
        (self.0 - 1) % COLUMNS
    }

    /// Zero-based row, counted from the top.
    pub const fn row(self) -> u8 {
        (self.0 - 1) / COLUMNS
    }

    /// The column containing this cell.
    pub const fn column(self) -> Column {
        Column(self.column_index() + 1)
    }

    /// The cell directly beneath this one, or `None` on the bottom row.
    pub const fn below(self) -> Option<CellId> {
        CellId::from_coords(self.column_index(), self.row() + 1)
    }

    /// Whether the cell sits on the bottom row.
    pub const fn is_bottom(self) -> bool {
        self.row() == ROWS - 1
    }

    /// Iterates over every cell in id order.
    pub fn all() -> impl Iterator<Item = CellId> {
        (1..=CELL_COUNT as u8).map(CellId)
    }
}

impl TryFrom<u8> for CellId {
    type Error = InvalidCellId;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        CellId::new(id).ok_or(InvalidCellId(id))
    }
}

impl From<CellId> for u8 {
    fn from(cell: CellId) -> u8 {
        cell.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A column number in 1..=7, as seen by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Column(u8);

/// All columns, left to right.
pub const ALL_COLUMNS: [Column; COLUMNS as usize] = [
    Column(1),
    Column(2),
    Column(3),
    Column(4),
    Column(5),
    Column(6),
    Column(7),
];

impl Column {
    /// Returns the column with the given 1-based number.
    pub const fn new(number: u8) -> Option<Column> {
        if number >= 1 && number <= COLUMNS {
            Some(Column(number))
        } else {
            None
        }
    }

    /// The 1-based column number.
    pub const fn number(self) -> u8 {
        self.0
    }

    /// The topmost cell; tokens enter the column here.
    pub const fn top(self) -> CellId {
        CellId::at(self.0 - 1, 0)
    }

    /// Iterates over the column's cells from top to bottom.
    pub fn cells(self) -> impl Iterator<Item = CellId> {
        let column = self.0 - 1;
        (0..ROWS).map(move |row| CellId::at(column, row))
    }
}

impl TryFrom<u8> for Column {
    type Error = InvalidColumn;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Column::new(number).ok_or(InvalidColumn(number))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
