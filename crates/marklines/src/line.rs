//! Live view of one line over a board's cells.

use crate::topology::LineTemplate;
use crate::types::{Cell, Coordinate, Mark};

/// A [`LineTemplate`] bound to the cell storage of a [`crate::Board`].
///
/// Holds no state of its own; every query reads the board's current cells.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    template: &'a LineTemplate,
    cells: &'a [Cell],
}

impl<'a> Line<'a> {
    pub(crate) fn new(template: &'a LineTemplate, cells: &'a [Cell]) -> Self {
        Self { template, cells }
    }

    /// The geometry this view is bound to.
    pub fn template(&self) -> &'a LineTemplate {
        self.template
    }

    /// Current cell states in line order.
    pub fn cells(self) -> impl Iterator<Item = Cell> + 'a {
        let cells = self.cells;
        self.template.coordinates().iter().map(move |coordinate| {
            coordinate
                .offset()
                .and_then(|offset| cells.get(offset))
                .copied()
                .unwrap_or_default()
        })
    }

    /// Returns `true` if some run of `win_length` consecutive cells is all `mark`.
    pub fn complete(&self, mark: Mark, win_length: usize) -> bool {
        if win_length == 0 {
            return false;
        }
        let states: Vec<Cell> = self.cells().collect();
        states
            .windows(win_length)
            .any(|window| window.iter().all(|&cell| cell == Cell::Marked(mark)))
    }

    /// Open coordinate that would complete a run of `win_length` for `mark`.
    ///
    /// Windows are scanned from the start of the line; the first one holding
    /// exactly `win_length - 1` of `mark` and one empty cell wins.
    pub fn nearly_complete(&self, mark: Mark, win_length: usize) -> Option<Coordinate> {
        if win_length == 0 {
            return None;
        }
        let states: Vec<Cell> = self.cells().collect();
        states
            .windows(win_length)
            .enumerate()
            .find_map(|(start, window)| {
                let owned = window
                    .iter()
                    .filter(|&&cell| cell == Cell::Marked(mark))
                    .count();
                if owned + 1 != win_length {
                    return None;
                }
                let open = window.iter().position(|cell| cell.is_empty())?;
                self.template.coordinates().get(start + open).copied()
            })
    }
}
