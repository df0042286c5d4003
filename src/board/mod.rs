//! Board topology and player identities.
//!
//! Contains cell and column coordinates, the winning-line table, occupancy
//! sets with gravity resolution, and the two player identities.

pub mod cell;
pub mod lines;
pub mod occupancy;
pub mod player;

pub use cell::{
    CellId, Column, InvalidCellId, InvalidColumn, ALL_COLUMNS, CELL_COUNT, COLUMNS, ROWS,
};
pub use lines::{capacity, lines_through, winning_lines, Line, LINE_COUNT, LINE_LEN, WINNING_LINES};
pub use occupancy::{drop_from, is_supported, lowest_open_cell, Occupancy};
pub use player::{InvalidPlayerId, Player, PlayerId, ALL_PLAYER_IDS};
