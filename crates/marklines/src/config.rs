//! Round configuration: grid size, player count and the derived win length.

use crate::error::UnsupportedConfiguration;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};
use tracing::instrument;

/// Supported grid edge lengths.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, EnumIter,
)]
#[serde(try_from = "usize", into = "usize")]
pub enum GridSize {
    /// 3×3 grid.
    #[display("3")]
    Three,
    /// 5×5 grid.
    #[display("5")]
    Five,
    /// 9×9 grid.
    #[display("9")]
    Nine,
}

impl GridSize {
    /// Edge length N.
    pub const fn edge(self) -> usize {
        match self {
            GridSize::Three => 3,
            GridSize::Five => 5,
            GridSize::Nine => 9,
        }
    }

    /// Number of cells, N².
    pub const fn cell_count(self) -> usize {
        self.edge() * self.edge()
    }
}

impl TryFrom<usize> for GridSize {
    type Error = UnsupportedConfiguration;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(GridSize::Three),
            5 => Ok(GridSize::Five),
            9 => Ok(GridSize::Nine),
            other => Err(UnsupportedConfiguration::new(format!(
                "grid size {other} (expected 3, 5 or 9)"
            ))),
        }
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> Self {
        size.edge()
    }
}

/// Number of simultaneous markers on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, EnumIter,
)]
#[serde(try_from = "usize", into = "usize")]
pub enum PlayerCount {
    /// Two players (`X`, `O`).
    #[display("2")]
    Two,
    /// Three players (`X`, `O`, `*`).
    #[display("3")]
    Three,
}

impl PlayerCount {
    /// Number of seats.
    pub const fn get(self) -> usize {
        match self {
            PlayerCount::Two => 2,
            PlayerCount::Three => 3,
        }
    }
}

impl TryFrom<usize> for PlayerCount {
    type Error = UnsupportedConfiguration;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(PlayerCount::Two),
            3 => Ok(PlayerCount::Three),
            other => Err(UnsupportedConfiguration::new(format!(
                "{other} players (expected 2 or 3)"
            ))),
        }
    }
}

impl From<PlayerCount> for usize {
    fn from(count: PlayerCount) -> Self {
        count.get()
    }
}

/// Which diagonals count as winnable lines.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DiagonalRule {
    /// Every diagonal run of at least the win length, except on the 9×9 grid
    /// where only rows and columns win.
    #[default]
    #[display("classic")]
    Classic,
    /// Every diagonal run of at least the win length, on every grid.
    #[display("complete")]
    Complete,
}

/// Win length for a grid size and player count.
///
/// Fixed lookup: 3 on the 3×3 grid; on 5×5, 3 with three players and 4
/// otherwise; on 9×9, 4 with three players and 5 otherwise.
pub const fn win_length(grid_size: GridSize, players: PlayerCount) -> usize {
    match (grid_size, players) {
        (GridSize::Three, _) => 3,
        (GridSize::Five, PlayerCount::Three) => 3,
        (GridSize::Five, PlayerCount::Two) => 4,
        (GridSize::Nine, PlayerCount::Three) => 4,
        (GridSize::Nine, PlayerCount::Two) => 5,
    }
}

/// Everything a board needs to know about the round it serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ConfigFields")]
pub struct RoundConfig {
    grid_size: GridSize,
    player_count: PlayerCount,
    diagonal_rule: DiagonalRule,
    win_length: usize,
}

/// Serialized shape of a [`RoundConfig`]; the win length is always derived.
#[derive(Deserialize)]
struct ConfigFields {
    grid_size: GridSize,
    player_count: PlayerCount,
    #[serde(default)]
    diagonal_rule: DiagonalRule,
}

impl From<ConfigFields> for RoundConfig {
    fn from(fields: ConfigFields) -> Self {
        RoundConfig::new(fields.grid_size, fields.player_count)
            .with_diagonal_rule(fields.diagonal_rule)
    }
}

impl RoundConfig {
    /// Configuration with the classic diagonal rule.
    #[instrument]
    pub fn new(grid_size: GridSize, player_count: PlayerCount) -> Self {
        Self {
            grid_size,
            player_count,
            diagonal_rule: DiagonalRule::default(),
            win_length: win_length(grid_size, player_count),
        }
    }

    /// Validates raw numbers (e.g. from user input) against the supported table.
    #[instrument]
    pub fn from_numbers(
        grid_size: usize,
        player_count: usize,
    ) -> Result<Self, UnsupportedConfiguration> {
        Ok(Self::new(
            GridSize::try_from(grid_size)?,
            PlayerCount::try_from(player_count)?,
        ))
    }

    /// Replaces the diagonal rule.
    pub fn with_diagonal_rule(mut self, rule: DiagonalRule) -> Self {
        self.diagonal_rule = rule;
        self
    }

    /// Grid size.
    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    /// Player count.
    pub fn player_count(&self) -> PlayerCount {
        self.player_count
    }

    /// Diagonal rule.
    pub fn diagonal_rule(&self) -> DiagonalRule {
        self.diagonal_rule
    }

    /// Marks in a row needed to win.
    pub fn win_length(&self) -> usize {
        self.win_length
    }
}
