//! Winnable line geometry for a grid size and player count.
//!
//! Every line is enumerated once, up front, as a [`LineTemplate`] holding the
//! absolute coordinate at each of its positions. Later code translates a
//! line-local slot to a board coordinate by indexing that table.
//!
//! Diagonals come from one rule: each maximal down-right or down-left run of
//! cells that is at least as long as the win length is a line. Full-length
//! runs are [`LineCategory::Diagonal`]; shorter ones are
//! [`LineCategory::SubDiagonal`].

use crate::config::{DiagonalRule, GridSize, PlayerCount, RoundConfig};
use crate::types::Coordinate;
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use strum::EnumIter;
use tracing::{debug, instrument};

/// Geometric family of a line. Declaration order is scan order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    Serialize,
    Deserialize,
    EnumIter,
)]
pub enum LineCategory {
    /// Left to right along one row.
    Row,
    /// Top to bottom along one column.
    Column,
    /// Corner-to-corner diagonal (down-right first, then down-left).
    Diagonal,
    /// Diagonal run shorter than the grid edge.
    SubDiagonal,
}

/// One winnable line: an ordered list of board coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LineTemplate {
    /// Geometric family.
    category: LineCategory,
    /// Zero-based position within its category.
    index: usize,
    /// Board coordinate at each position along the line.
    coordinates: Vec<Coordinate>,
}

impl LineTemplate {
    /// Number of cells on the line.
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Returns `true` for a line with no cells.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Line-local position of `coordinate`, if the line passes through it.
    pub fn position_of(&self, coordinate: Coordinate) -> Option<usize> {
        self.coordinates.iter().position(|&c| c == coordinate)
    }

    /// Returns `true` if the line passes through `coordinate`.
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.position_of(coordinate).is_some()
    }
}

impl std::fmt::Display for LineTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} [", self.category, self.index + 1)?;
        for (i, coordinate) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{coordinate}")?;
        }
        write!(f, "]")
    }
}

/// Diagonal travel direction, used only while enumerating runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Slope {
    DownRight,
    DownLeft,
}

/// A diagonal run before it is sorted into a category.
#[derive(Debug)]
struct Run {
    slope: Slope,
    coordinates: Vec<Coordinate>,
}

/// Complete set of winnable lines for one configuration.
///
/// Templates are stored in scan order: rows, columns, diagonals,
/// sub-diagonals, each by ascending index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct GridTopology {
    /// Grid edge length N.
    edge: usize,
    /// Marks in a row needed to win.
    win_length: usize,
    /// All lines in scan order.
    templates: Vec<LineTemplate>,
}

impl GridTopology {
    /// Lines for a grid size and player count under the classic diagonal rule.
    #[instrument]
    pub fn build(grid_size: GridSize, player_count: PlayerCount) -> Self {
        Self::for_config(&RoundConfig::new(grid_size, player_count))
    }

    /// Lines for a full round configuration.
    #[instrument]
    pub fn for_config(config: &RoundConfig) -> Self {
        let edge = config.grid_size().edge();
        let win_length = config.win_length();

        let mut templates = Vec::new();
        templates.extend(rows(edge));
        templates.extend(columns(edge));

        let rows_and_columns_only = matches!(
            (config.diagonal_rule(), config.grid_size()),
            (DiagonalRule::Classic, GridSize::Nine)
        );
        if !rows_and_columns_only {
            templates.extend(diagonals(edge, win_length));
        }

        debug!(
            edge,
            win_length,
            lines = templates.len(),
            "Built grid topology"
        );

        Self {
            edge,
            win_length,
            templates,
        }
    }

    /// Number of cells, N².
    pub fn cell_count(&self) -> usize {
        self.edge * self.edge
    }

    /// Templates of one category, by ascending index.
    pub fn of_category(&self, category: LineCategory) -> impl Iterator<Item = &LineTemplate> {
        self.templates
            .iter()
            .filter(move |template| template.category == category)
    }

    /// For each cell offset (coordinate − 1), the indices into
    /// [`Self::templates`] of every line through that cell.
    pub fn membership(&self) -> Vec<Vec<usize>> {
        let mut membership = vec![Vec::new(); self.cell_count()];
        for (line, template) in self.templates.iter().enumerate() {
            for coordinate in &template.coordinates {
                if let Some(slot) = coordinate
                    .offset()
                    .and_then(|offset| membership.get_mut(offset))
                {
                    slot.push(line);
                }
            }
        }
        membership
    }
}

fn rows(edge: usize) -> impl Iterator<Item = LineTemplate> {
    (0..edge).map(move |row| LineTemplate {
        category: LineCategory::Row,
        index: row,
        coordinates: (0..edge)
            .map(|col| Coordinate::from_row_col(edge, row, col))
            .collect(),
    })
}

fn columns(edge: usize) -> impl Iterator<Item = LineTemplate> {
    (0..edge).map(move |col| LineTemplate {
        category: LineCategory::Column,
        index: col,
        coordinates: (0..edge)
            .map(|row| Coordinate::from_row_col(edge, row, col))
            .collect(),
    })
}

/// Walks from `(row, col)` along `slope` until leaving the grid.
fn walk(edge: usize, slope: Slope, mut row: usize, mut col: usize) -> Run {
    let mut coordinates = Vec::new();
    loop {
        coordinates.push(Coordinate::from_row_col(edge, row, col));
        row += 1;
        let next_col = match slope {
            Slope::DownRight => col.checked_add(1).filter(|&c| c < edge),
            Slope::DownLeft => col.checked_sub(1),
        };
        match next_col {
            Some(c) if row < edge => col = c,
            _ => break,
        }
    }
    Run { slope, coordinates }
}

/// Every maximal diagonal run of at least `min_len` cells, categorized.
fn diagonals(edge: usize, min_len: usize) -> Vec<LineTemplate> {
    // Each maximal run starts on the top row or on the side it moves away from.
    let mut runs = Vec::new();
    for col in 0..edge {
        runs.push(walk(edge, Slope::DownRight, 0, col));
    }
    for row in 1..edge {
        runs.push(walk(edge, Slope::DownRight, row, 0));
    }
    for col in (0..edge).rev() {
        runs.push(walk(edge, Slope::DownLeft, 0, col));
    }
    for row in 1..edge {
        runs.push(walk(edge, Slope::DownLeft, row, edge - 1));
    }
    runs.retain(|run| run.coordinates.len() >= min_len);

    let (mut full, mut partial): (Vec<Run>, Vec<Run>) = runs
        .into_iter()
        .partition(|run| run.coordinates.len() == edge);
    full.sort_by_key(|run| run.slope);
    partial.sort_by_key(|run| {
        (
            Reverse(run.coordinates.len()),
            run.slope,
            run.coordinates.first().copied(),
        )
    });

    let full = full.into_iter().enumerate().map(|(index, run)| LineTemplate {
        category: LineCategory::Diagonal,
        index,
        coordinates: run.coordinates,
    });
    let partial = partial
        .into_iter()
        .enumerate()
        .map(|(index, run)| LineTemplate {
            category: LineCategory::SubDiagonal,
            index,
            coordinates: run.coordinates,
        });
    full.chain(partial).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(values: &[usize]) -> Vec<Coordinate> {
        values.iter().copied().map(Coordinate::new).collect()
    }

    fn lines(topology: &GridTopology, category: LineCategory) -> Vec<Vec<Coordinate>> {
        topology
            .of_category(category)
            .map(|t| t.coordinates().clone())
            .collect()
    }

    #[test]
    fn test_walk_down_right() {
        let run = walk(5, Slope::DownRight, 0, 1);
        assert_eq!(run.coordinates, coords(&[2, 8, 14, 20]));
    }

    #[test]
    fn test_walk_down_left() {
        let run = walk(5, Slope::DownLeft, 1, 4);
        assert_eq!(run.coordinates, coords(&[10, 14, 18, 22]));
        let corner = walk(5, Slope::DownLeft, 0, 0);
        assert_eq!(corner.coordinates, coords(&[1]));
    }

    #[test]
    fn test_three_by_three_lines() {
        let topology = GridTopology::build(GridSize::Three, PlayerCount::Two);
        assert_eq!(
            lines(&topology, LineCategory::Row),
            vec![coords(&[1, 2, 3]), coords(&[4, 5, 6]), coords(&[7, 8, 9])]
        );
        assert_eq!(
            lines(&topology, LineCategory::Column),
            vec![coords(&[1, 4, 7]), coords(&[2, 5, 8]), coords(&[3, 6, 9])]
        );
        assert_eq!(
            lines(&topology, LineCategory::Diagonal),
            vec![coords(&[1, 5, 9]), coords(&[3, 5, 7])]
        );
        assert_eq!(topology.of_category(LineCategory::SubDiagonal).count(), 0);
    }

    #[test]
    fn test_five_by_five_two_players() {
        let topology = GridTopology::build(GridSize::Five, PlayerCount::Two);
        assert_eq!(
            lines(&topology, LineCategory::Diagonal),
            vec![coords(&[1, 7, 13, 19, 25]), coords(&[5, 9, 13, 17, 21])]
        );
        assert_eq!(
            lines(&topology, LineCategory::SubDiagonal),
            vec![
                coords(&[2, 8, 14, 20]),
                coords(&[6, 12, 18, 24]),
                coords(&[4, 8, 12, 16]),
                coords(&[10, 14, 18, 22]),
            ]
        );
    }

    #[test]
    fn test_five_by_five_three_players_adds_short_runs() {
        let topology = GridTopology::build(GridSize::Five, PlayerCount::Three);
        let subs = lines(&topology, LineCategory::SubDiagonal);
        assert_eq!(subs.len(), 8);
        assert_eq!(
            subs[4..].to_vec(),
            vec![
                coords(&[3, 9, 15]),
                coords(&[11, 17, 23]),
                coords(&[3, 7, 11]),
                coords(&[15, 19, 23]),
            ]
        );
    }

    #[test]
    fn test_nine_by_nine_classic_has_no_diagonals() {
        let topology = GridTopology::build(GridSize::Nine, PlayerCount::Two);
        assert_eq!(topology.templates().len(), 18);
        assert_eq!(topology.of_category(LineCategory::Diagonal).count(), 0);
    }

    #[test]
    fn test_nine_by_nine_complete_rule() {
        let config = RoundConfig::new(GridSize::Nine, PlayerCount::Two)
            .with_diagonal_rule(DiagonalRule::Complete);
        let topology = GridTopology::for_config(&config);
        // Lengths 5..=8 appear twice per slope, plus one full diagonal per slope.
        assert_eq!(topology.of_category(LineCategory::Diagonal).count(), 2);
        assert_eq!(topology.of_category(LineCategory::SubDiagonal).count(), 16);
        assert!(
            topology
                .of_category(LineCategory::SubDiagonal)
                .all(|t| t.len() >= 5 && t.len() < 9)
        );
    }

    #[test]
    fn test_indices_are_dense_per_category() {
        let topology = GridTopology::build(GridSize::Five, PlayerCount::Three);
        for category in [
            LineCategory::Row,
            LineCategory::Column,
            LineCategory::Diagonal,
            LineCategory::SubDiagonal,
        ] {
            for (expected, template) in topology.of_category(category).enumerate() {
                assert_eq!(*template.index(), expected);
            }
        }
    }

    #[test]
    fn test_membership_of_center() {
        let topology = GridTopology::build(GridSize::Three, PlayerCount::Two);
        let membership = topology.membership();
        // Center sits on row 2, column 2 and both diagonals.
        assert_eq!(membership[4].len(), 4);
        // Edge midpoint sits on one row and one column only.
        assert_eq!(membership[1].len(), 2);
    }

    #[test]
    fn test_template_display() {
        let topology = GridTopology::build(GridSize::Three, PlayerCount::Two);
        let first = &topology.templates()[0];
        assert_eq!(first.to_string(), "Row 1 [1, 2, 3]");
    }
}
