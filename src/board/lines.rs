//! The fixed table of winning lines.
//!
//! A line is four cells in a row in one of four directions: down a column,
//! across a row, or along either diagonal. The table is generated at compile
//! time from cell coordinates and is immutable thereafter.
//!
//! Breakdown on a 7 × 6 board:
//! - Vertical: 7 columns * 3 start rows = 21
//! - Horizontal: 6 rows * 4 start columns = 24
//! - Down-right diagonal: 4 * 3 = 12
//! - Down-left diagonal: 4 * 3 = 12
//! Total: 69

use super::cell::{CellId, CELL_COUNT, COLUMNS, ROWS};

/// Number of cells a line spans.
pub const LINE_LEN: usize = 4;

/// Total number of winning lines.
pub const LINE_COUNT: usize = 69;

/// Four cells in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    cells: [CellId; LINE_LEN],
    mask: u64,
}

impl Line {
    const fn new(cells: [CellId; LINE_LEN]) -> Line {
        let mut mask = 0u64;
        let mut i = 0;
        while i < LINE_LEN {
            mask |= cells[i].bit();
            i += 1;
        }
        Line { cells, mask }
    }

    /// The cells of the line, in walking order.
    pub const fn cells(&self) -> &[CellId; LINE_LEN] {
        &self.cells
    }

    /// Occupancy mask with one bit set per cell of the line.
    pub const fn mask(&self) -> u64 {
        self.mask
    }

    /// Whether the line passes through `cell`.
    pub const fn contains(&self, cell: CellId) -> bool {
        self.mask & cell.bit() != 0
    }
}

/// Step directions as `(column delta, row delta)`, row growing downward.
const DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

const fn build_lines() -> [Line; LINE_COUNT] {
    let placeholder = Line::new([CellId::at(0, 0); LINE_LEN]);
    let mut lines = [placeholder; LINE_COUNT];
    let mut n = 0;

    let mut d = 0;
    while d < DIRECTIONS.len() {
        let (dc, dr) = DIRECTIONS[d];
        let mut col = 0i8;
        while col < COLUMNS as i8 {
            let mut row = 0i8;
            while row < ROWS as i8 {
                let end_col = col + 3 * dc;
                let end_row = row + 3 * dr;
                if end_col >= 0 && end_col < COLUMNS as i8 && end_row < ROWS as i8 {
                    let mut cells = [CellId::at(0, 0); LINE_LEN];
                    let mut k = 0;
                    while k < LINE_LEN {
                        let c = col + k as i8 * dc;
                        let r = row + k as i8 * dr;
                        cells[k] = CellId::at(c as u8, r as u8);
                        k += 1;
                    }
                    lines[n] = Line::new(cells);
                    n += 1;
                }
                row += 1;
            }
            col += 1;
        }
        d += 1;
    }

    assert!(n == LINE_COUNT, "line table size mismatch");
    lines
}

/// Every winning line on the board.
pub static WINNING_LINES: [Line; LINE_COUNT] = build_lines();

/// Returns the full line table.
pub fn winning_lines() -> &'static [Line] {
    &WINNING_LINES
}

/// Board capacity; a game can never have more moves than this.
pub const fn capacity() -> usize {
    CELL_COUNT
}

/// Returns the lines passing through `cell`.
pub fn lines_through(cell: CellId) -> impl Iterator<Item = &'static Line> {
    WINNING_LINES.iter().filter(move |line| line.contains(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// The literal pattern list the board layout was taken from.
    const REFERENCE_LINES: [[u8; 4]; LINE_COUNT] = [
        [1, 8, 15, 22], [8, 15, 22, 29], [15, 22, 29, 36],
        [2, 9, 16, 23], [9, 16, 23, 30], [16, 23, 30, 37],
        [3, 10, 17, 24], [10, 17, 24, 31], [17, 24, 31, 38],
        [4, 11, 18, 25], [11, 18, 25, 32], [18, 25, 32, 39],
        [5, 12, 19, 26], [12, 19, 26, 33], [19, 26, 33, 40],
        [6, 13, 20, 27], [13, 20, 27, 34], [20, 27, 34, 41],
        [7, 14, 21, 28], [14, 21, 28, 35], [21, 28, 35, 42],
        [1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 6], [4, 5, 6, 7],
        [8, 9, 10, 11], [9, 10, 11, 12], [10, 11, 12, 13], [11, 12, 13, 14],
        [15, 16, 17, 18], [16, 17, 18, 19], [17, 18, 19, 20], [18, 19, 20, 21],
        [22, 23, 24, 25], [23, 24, 25, 26], [24, 25, 26, 27], [25, 26, 27, 28],
        [29, 30, 31, 32], [30, 31, 32, 33], [31, 32, 33, 34], [32, 33, 34, 35],
        [36, 37, 38, 39], [37, 38, 39, 40], [38, 39, 40, 41], [39, 40, 41, 42],
        [15, 23, 31, 39], [8, 16, 24, 32], [16, 24, 32, 40],
        [1, 9, 17, 25], [9, 17, 25, 33], [17, 25, 33, 41],
        [2, 10, 18, 26], [10, 18, 26, 34], [18, 26, 34, 42],
        [3, 11, 19, 27], [11, 19, 27, 35], [4, 12, 20, 28],
        [4, 10, 16, 22], [5, 11, 17, 23], [11, 17, 23, 29],
        [6, 12, 18, 24], [12, 18, 24, 30], [18, 24, 30, 36],
        [7, 13, 19, 25], [13, 19, 25, 31], [19, 25, 31, 37],
        [14, 20, 26, 32], [20, 26, 32, 38], [21, 27, 33, 39],
    ];

    fn sorted_ids(cells: &[CellId; LINE_LEN]) -> [u8; LINE_LEN] {
        let mut ids = cells.map(CellId::id);
        ids.sort_unstable();
        ids
    }

    #[test]
    fn table_has_69_distinct_lines() {
        assert_eq!(winning_lines().len(), 69);
        let masks: HashSet<u64> = winning_lines().iter().map(Line::mask).collect();
        assert_eq!(masks.len(), LINE_COUNT);
    }

    #[test]
    fn table_matches_reference_patterns() {
        let generated: HashSet<[u8; 4]> = winning_lines()
            .iter()
            .map(|l| sorted_ids(l.cells()))
            .collect();
        let reference: HashSet<[u8; 4]> = REFERENCE_LINES
            .iter()
            .map(|p| {
                let mut p = *p;
                p.sort_unstable();
                p
            })
            .collect();
        assert_eq!(generated, reference);
    }

    #[test]
    fn every_line_is_contiguous() {
        for line in winning_lines() {
            let cells = line.cells();
            let dc = cells[1].column_index() as i8 - cells[0].column_index() as i8;
            let dr = cells[1].row() as i8 - cells[0].row() as i8;
            assert!(dc.abs() <= 1 && dr.abs() <= 1 && (dc, dr) != (0, 0));
            for pair in cells.windows(2) {
                assert_eq!(pair[1].column_index() as i8 - pair[0].column_index() as i8, dc);
                assert_eq!(pair[1].row() as i8 - pair[0].row() as i8, dr);
            }
        }
    }

    #[test]
    fn mask_has_four_bits() {
        for line in winning_lines() {
            assert_eq!(line.mask().count_ones(), 4);
        }
    }

    #[test]
    fn direction_counts() {
        let vertical = winning_lines()
            .iter()
            .filter(|l| l.cells()[0].column_index() == l.cells()[3].column_index())
            .count();
        let horizontal = winning_lines()
            .iter()
            .filter(|l| l.cells()[0].row() == l.cells()[3].row())
            .count();
        assert_eq!(vertical, 21);
        assert_eq!(horizontal, 24);
        assert_eq!(LINE_COUNT - vertical - horizontal, 24);
    }

    #[test]
    fn center_cell_sits_on_many_lines() {
        // Row 2, column 3: the busiest cell on the board.
        let center = CellId::new(18).unwrap();
        assert_eq!(lines_through(center).count(), 13);
        // Corners only reach one line per direction.
        assert_eq!(lines_through(CellId::new(1).unwrap()).count(), 3);
    }

    #[test]
    fn capacity_is_cell_count() {
        assert_eq!(capacity(), 42);
    }
}
