//! Occupancy sets and gravity resolution.
//!
//! An `Occupancy` is a set of cells packed into a `u64`, one bit per cell id.
//! Gravity is a pure scan over such a set: a token enters at a cell and
//! keeps falling while the cell beneath it is free.

use super::cell::{CellId, Column, CELL_COUNT};
use super::lines::Line;

/// A set of occupied cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Occupancy(u64);

impl Occupancy {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Occupancy(0)
    }

    /// Raw bitset, bit `id - 1` per occupied cell.
    pub const fn bits(self) -> u64 {
        self.0
    }

    pub fn insert(&mut self, cell: CellId) {
        self.0 |= cell.bit();
    }

    pub const fn contains(self, cell: CellId) -> bool {
        self.0 & cell.bit() != 0
    }

    /// Whether every cell of `line` is in the set.
    pub const fn covers(self, line: &Line) -> bool {
        self.0 & line.mask() == line.mask()
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether all 42 cells are occupied.
    pub const fn is_full(self) -> bool {
        self.len() == CELL_COUNT
    }

    /// Iterates over the occupied cells in id order.
    pub fn cells(self) -> impl Iterator<Item = CellId> {
        CellId::all().filter(move |cell| self.contains(*cell))
    }
}

impl FromIterator<CellId> for Occupancy {
    fn from_iter<I: IntoIterator<Item = CellId>>(iter: I) -> Self {
        let mut set = Occupancy::new();
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}

/// Drops a token entering at `start` and returns where it comes to rest.
///
/// The token advances one row at a time while the next cell down is free,
/// stopping above the first occupied cell or on the bottom row. Returns
/// `None` if `start` itself is occupied.
pub fn drop_from(start: CellId, occupied: Occupancy) -> Option<CellId> {
    if occupied.contains(start) {
        return None;
    }
    let mut resting = start;
    while let Some(next) = resting.below() {
        if occupied.contains(next) {
            break;
        }
        resting = next;
    }
    Some(resting)
}

/// Returns the lowest free cell of `column`, or `None` if the column is full.
pub fn lowest_open_cell(column: Column, occupied: Occupancy) -> Option<CellId> {
    drop_from(column.top(), occupied)
}

/// Whether `cell` rests on the bottom row or on an occupied cell.
pub fn is_supported(cell: CellId, occupied: Occupancy) -> bool {
    match cell.below() {
        Some(next) => occupied.contains(next),
        None => true,
    }
}
