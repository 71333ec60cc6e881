//! Error types for board setup, moves and the turn loop.

use crate::types::Coordinate;
use derive_more::{Display, Error, From};

/// A move the board refused. The board is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InvalidMove {
    /// The coordinate lies outside `[1, max]`.
    #[display("Coordinate {coordinate} is outside the board (1-{max})")]
    OutOfRange {
        /// The rejected coordinate.
        coordinate: Coordinate,
        /// Highest valid coordinate (N²).
        max: usize,
    },

    /// The cell already holds a mark.
    #[display("Coordinate {_0} is already occupied")]
    Occupied(Coordinate),
}

impl std::error::Error for InvalidMove {}

/// Grid size, player count or roster outside the supported table.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unsupported configuration: {message}")]
pub struct UnsupportedConfiguration {
    /// What was rejected.
    pub message: String,
}

impl UnsupportedConfiguration {
    /// Creates a new configuration error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A board invariant does not hold.
///
/// Signals a defect in how the board was driven, never bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Internal inconsistency: {message}")]
pub struct InternalInconsistency {
    /// Which invariant failed.
    pub message: String,
}

impl InternalInconsistency {
    /// Creates a new inconsistency report.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A move source could not produce a coordinate (input closed, etc.).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Move source failed: {message}")]
pub struct SourceError {
    /// Why no move was produced.
    pub message: String,
}

impl SourceError {
    /// Creates a new move source error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Any failure surfaced by the turn loop.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum Error {
    /// An automated source produced an illegal move.
    #[display("{_0}")]
    InvalidMove(InvalidMove),
    /// The round could not be set up.
    #[display("{_0}")]
    Unsupported(UnsupportedConfiguration),
    /// A board invariant failed.
    #[display("{_0}")]
    Inconsistent(InternalInconsistency),
    /// A move source gave up.
    #[display("{_0}")]
    Source(SourceError),
}
