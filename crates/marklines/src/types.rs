//! Core domain types: marks, coordinates and cell state.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Token identifying which player occupies a cell.
///
/// Seats receive marks in declaration order: the first player is `X`, the
/// second `O` and the third (when present) `*`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, EnumIter,
)]
pub enum Mark {
    /// First seat.
    #[display("X")]
    X,
    /// Second seat.
    #[display("O")]
    O,
    /// Third seat.
    #[display("*")]
    #[serde(rename = "*")]
    Star,
}

impl Mark {
    /// All marks in seat order.
    pub const ALL: [Mark; 3] = [Mark::X, Mark::O, Mark::Star];

    /// Marks handed out to a table of `count` players, in seat order.
    ///
    /// Returns `None` when `count` exceeds the number of marks.
    pub fn for_players(count: usize) -> Option<&'static [Mark]> {
        const ALL: &[Mark] = &Mark::ALL;
        ALL.get(..count)
    }
}

/// A 1-based cell index in `[1, N²]`, counted left to right, top to bottom.
///
/// A coordinate carries no board size; [`crate::Board::fill`] rejects values
/// outside the board it is applied to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Coordinate(usize);

impl Coordinate {
    /// Wraps a 1-based cell number.
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Coordinate of the zero-based `(row, col)` cell on a grid of `size`.
    pub const fn from_row_col(size: usize, row: usize, col: usize) -> Self {
        Self(row * size + col + 1)
    }

    /// The 1-based cell number.
    pub const fn get(self) -> usize {
        self.0
    }

    /// Zero-based offset into row-major cell storage.
    ///
    /// `None` for the out-of-range value 0.
    pub(crate) fn offset(self) -> Option<usize> {
        self.0.checked_sub(1)
    }
}

impl From<usize> for Coordinate {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<Coordinate> for usize {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.0
    }
}

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No mark yet.
    #[default]
    Empty,
    /// Occupied by a player.
    Marked(Mark),
}

impl Cell {
    /// Returns `true` if no mark occupies the cell.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The occupying mark, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(mark) => Some(mark),
        }
    }
}
