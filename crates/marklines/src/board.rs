//! Cell storage for one round, with move validation and win/full queries.

use crate::config::RoundConfig;
use crate::error::{InternalInconsistency, InvalidMove};
use crate::line::Line;
use crate::topology::GridTopology;
use crate::types::{Cell, Coordinate, Mark};
use tracing::{debug, instrument, warn};

/// N×N board built from a [`GridTopology`].
///
/// Cells change only through [`Board::fill`]. Lines are views over the cell
/// storage, so there is nothing else to keep in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    config: RoundConfig,
    topology: GridTopology,
    /// Row-major cell states; offset = coordinate - 1.
    cells: Vec<Cell>,
    /// Per cell offset, indices into the topology's templates.
    membership: Vec<Vec<usize>>,
    moves_applied: usize,
}

impl Board {
    /// Creates an empty board for the given configuration.
    #[instrument]
    pub fn new(config: RoundConfig) -> Self {
        let topology = GridTopology::for_config(&config);
        let membership = topology.membership();
        debug!(
            cells = topology.cell_count(),
            lines = topology.templates().len(),
            "Created board"
        );
        Self {
            cells: vec![Cell::Empty; topology.cell_count()],
            config,
            topology,
            membership,
            moves_applied: 0,
        }
    }

    /// Configuration the board was built from.
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Line geometry for this board.
    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    /// Grid edge length N.
    pub fn edge(&self) -> usize {
        self.config.grid_size().edge()
    }

    /// Marks in a row needed to win.
    pub fn win_length(&self) -> usize {
        self.config.win_length()
    }

    /// Highest valid coordinate, N².
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The center cell, `(N² + 1) / 2`.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.cell_count().div_ceil(2))
    }

    /// State of the cell at `coordinate`, or `None` off the board.
    pub fn cell(&self, coordinate: Coordinate) -> Option<Cell> {
        self.slot(coordinate).map(|offset| self.cells[offset])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells grouped by row, top row (coordinates `1..=N`) first.
    pub fn rows(&self) -> Vec<&[Cell]> {
        self.cells.chunks(self.edge()).collect()
    }

    /// Number of successful [`Board::fill`] calls.
    pub fn moves_applied(&self) -> usize {
        self.moves_applied
    }

    /// Number of cells holding a mark.
    pub fn marked_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Every line, in scan order.
    pub fn lines(&self) -> impl Iterator<Item = Line<'_>> {
        let cells = &self.cells;
        self.topology
            .templates()
            .iter()
            .map(move |template| Line::new(template, cells))
    }

    /// Lines passing through `coordinate`, in scan order.
    pub fn lines_through(&self, coordinate: Coordinate) -> impl Iterator<Item = Line<'_>> {
        let templates = self.topology.templates();
        let cells = &self.cells;
        self.slot(coordinate)
            .and_then(|offset| self.membership.get(offset))
            .into_iter()
            .flatten()
            .filter_map(move |&index| templates.get(index))
            .map(move |template| Line::new(template, cells))
    }

    /// Places `mark` at `coordinate`.
    ///
    /// Fails without touching the board if the coordinate is off the board or
    /// already taken.
    #[instrument(skip(self))]
    pub fn fill(&mut self, coordinate: Coordinate, mark: Mark) -> Result<(), InvalidMove> {
        let offset = self.slot(coordinate).ok_or(InvalidMove::OutOfRange {
            coordinate,
            max: self.cell_count(),
        })?;
        if !self.cells[offset].is_empty() {
            warn!(%coordinate, "Cell already occupied");
            return Err(InvalidMove::Occupied(coordinate));
        }
        self.cells[offset] = Cell::Marked(mark);
        self.moves_applied += 1;
        debug!(%coordinate, %mark, moves = self.moves_applied, "Filled cell");
        Ok(())
    }

    /// Returns `true` if any line holds `win_length` consecutive `mark`s.
    pub fn has_winner(&self, mark: Mark) -> bool {
        let win_length = self.win_length();
        self.lines().any(|line| line.complete(mark, win_length))
    }

    /// First mark in `marks` that has won, if any.
    pub fn winner(&self, marks: &[Mark]) -> Option<Mark> {
        marks.iter().copied().find(|&mark| self.has_winner(mark))
    }

    /// First line won by `mark`, if any.
    pub fn winning_line(&self, mark: Mark) -> Option<Line<'_>> {
        let win_length = self.win_length();
        self.lines().find(|line| line.complete(mark, win_length))
    }

    /// Returns `true` if the move at `coordinate` completed a line for `mark`.
    ///
    /// Checks only the lines through `coordinate`.
    pub fn completes_line(&self, coordinate: Coordinate, mark: Mark) -> bool {
        let win_length = self.win_length();
        self.lines_through(coordinate)
            .any(|line| line.complete(mark, win_length))
    }

    /// Returns `true` once no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Empty coordinates in ascending order.
    pub fn remaining_moves(&self) -> Vec<Coordinate> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(offset, _)| Coordinate::new(offset + 1))
            .collect()
    }

    /// Verifies that marked cells never outnumber applied moves.
    pub fn check_consistency(&self) -> Result<(), InternalInconsistency> {
        let marked = self.marked_count();
        if marked > self.moves_applied {
            return Err(InternalInconsistency::new(format!(
                "{marked} marked cells after {} moves",
                self.moves_applied
            )));
        }
        Ok(())
    }

    fn slot(&self, coordinate: Coordinate) -> Option<usize> {
        coordinate
            .offset()
            .filter(|&offset| offset < self.cells.len())
    }

    /// Writes a cell without validation or move accounting.
    #[cfg(test)]
    pub(crate) fn overwrite(&mut self, coordinate: Coordinate, cell: Cell) {
        if let Some(offset) = self.slot(coordinate) {
            self.cells[offset] = cell;
        }
    }
}
