//! Marklines - board geometry and move heuristics for N-in-a-row games.
//!
//! Supports 3×3, 5×5 and 9×9 grids with two or three marks. The win length
//! comes from a fixed table keyed on grid size and player count.
//!
//! # Architecture
//!
//! - **Topology**: every winnable row, column and diagonal as a table of board
//!   coordinates, built once per configuration
//! - **Line**: window queries (complete / one move from complete) over live cells
//! - **Board**: cell storage, move validation, win and full checks
//! - **Advisor**: one-ply heuristic for computer players (win, block, center, any)
//! - **Round**: synchronous turn loop over pluggable move sources
//!
//! # Example
//!
//! ```
//! use marklines::{Board, Coordinate, GridSize, Mark, MoveAdvisor, MoveChoice, PlayerCount, RoundConfig};
//!
//! let mut board = Board::new(RoundConfig::new(GridSize::Three, PlayerCount::Two));
//! board.fill(Coordinate::new(1), Mark::X).unwrap();
//! board.fill(Coordinate::new(2), Mark::X).unwrap();
//!
//! let choice = MoveAdvisor::new().propose(&board, Mark::X, &[Mark::O]).unwrap();
//! assert_eq!(choice, MoveChoice::Win(Coordinate::new(3)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod advisor;
mod board;
mod config;
mod error;
mod line;
mod round;
mod topology;
mod types;

pub use advisor::{MoveAdvisor, MoveChoice};
pub use board::Board;
pub use config::{DiagonalRule, GridSize, PlayerCount, RoundConfig, win_length};
pub use error::{Error, InternalInconsistency, InvalidMove, SourceError, UnsupportedConfiguration};
pub use line::Line;
pub use round::{AdvisorSource, MoveSource, Roster, Round, RoundOutcome, Seat, SeatKind, Turn};
pub use topology::{GridTopology, LineCategory, LineTemplate};
pub use types::{Cell, Coordinate, Mark};
