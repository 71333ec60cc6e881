//! One-ply move heuristic for automated players.
//!
//! Priority, first match wins:
//! 1. complete one of our own lines,
//! 2. block the first opponent (in caller order) about to complete a line,
//! 3. on the 3×3 grid, take the empty center,
//! 4. otherwise any empty cell, chosen by the caller.
//!
//! There is deliberately no look-ahead past the next move.

use crate::board::Board;
use crate::config::GridSize;
use crate::error::InternalInconsistency;
use crate::types::{Coordinate, Mark};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use tracing::{debug, error, instrument};

/// What the advisor recommends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MoveChoice {
    /// Completes a line for the acting mark.
    Win(Coordinate),
    /// Takes the open cell of an opponent's nearly complete line.
    Block {
        /// Cell to take.
        coordinate: Coordinate,
        /// Opponent being blocked.
        against: Mark,
    },
    /// Takes the center of a 3×3 board.
    Center(Coordinate),
    /// No preference; pick uniformly among these (never empty).
    Any(Vec<Coordinate>),
}

impl MoveChoice {
    /// The single recommended coordinate, if the advisor committed to one.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            MoveChoice::Win(c) | MoveChoice::Center(c) => Some(*c),
            MoveChoice::Block { coordinate, .. } => Some(*coordinate),
            MoveChoice::Any(_) => None,
        }
    }

    /// Every coordinate the choice allows.
    pub fn candidates(&self) -> Vec<Coordinate> {
        match self {
            MoveChoice::Any(candidates) => candidates.clone(),
            single => single.coordinate().into_iter().collect(),
        }
    }

    /// Settles on one coordinate, sampling uniformly for [`MoveChoice::Any`].
    ///
    /// Returns `None` only for an empty candidate set.
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Coordinate> {
        match self {
            MoveChoice::Any(candidates) => candidates.choose(rng).copied(),
            single => single.coordinate(),
        }
    }
}

/// Stateless one-ply heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveAdvisor;

impl MoveAdvisor {
    /// Creates an advisor.
    pub fn new() -> Self {
        Self
    }

    /// Recommends a move for `acting` against `opponents` (in blocking order).
    ///
    /// Fails with [`InternalInconsistency`] if the board holds more marks than
    /// moves applied, or has no empty cell left.
    #[instrument(skip(self, board), fields(edge = board.edge(), win_length = board.win_length()))]
    pub fn propose(
        &self,
        board: &Board,
        acting: Mark,
        opponents: &[Mark],
    ) -> Result<MoveChoice, InternalInconsistency> {
        if let Err(inconsistency) = board.check_consistency() {
            error!(%inconsistency, "Refusing to advise on inconsistent board");
            return Err(inconsistency);
        }

        if let Some(coordinate) = self.completion(board, acting) {
            debug!(%acting, %coordinate, "Offensive move");
            return Ok(MoveChoice::Win(coordinate));
        }

        for &opponent in opponents {
            if let Some(coordinate) = self.completion(board, opponent) {
                debug!(%acting, %opponent, %coordinate, "Defensive move");
                return Ok(MoveChoice::Block {
                    coordinate,
                    against: opponent,
                });
            }
        }

        let center = board.center();
        if board.config().grid_size() == GridSize::Three
            && board.cell(center).is_some_and(|cell| cell.is_empty())
        {
            debug!(%acting, %center, "Center move");
            return Ok(MoveChoice::Center(center));
        }

        let remaining = board.remaining_moves();
        if remaining.is_empty() {
            error!(%acting, "Asked to advise on a full board");
            return Err(InternalInconsistency::new(
                "no empty cell left to propose",
            ));
        }
        debug!(%acting, candidates = remaining.len(), "No forced move");
        Ok(MoveChoice::Any(remaining))
    }

    /// Open cell that completes a line for `mark`, scanning lines in order:
    /// rows, columns, diagonals, sub-diagonals.
    pub fn completion(&self, board: &Board, mark: Mark) -> Option<Coordinate> {
        let win_length = board.win_length();
        board
            .lines()
            .find_map(|line| line.nearly_complete(mark, win_length))
    }
}
