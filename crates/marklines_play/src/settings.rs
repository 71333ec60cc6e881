//! Session settings loaded from TOML.
//!
//! ```toml
//! grid_size = 5
//! diagonals = "classic"
//! rounds = 3
//!
//! [[seats]]
//! kind = "human"
//! name = "Ada"
//!
//! [[seats]]
//! kind = "computer"
//! ```

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use marklines::{
    DiagonalRule, GridSize, Mark, PlayerCount, Roster, RoundConfig, Seat, SeatKind,
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Names handed to unnamed computer seats, in order.
pub const COMPUTER_NAMES: [&str; 5] = ["Hal 9000", "The Maniac", "IA", "Robert", "Marcel Proust"];

/// One configured seat.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Deserialize, new)]
pub struct SeatSettings {
    /// Human or computer.
    kind: SeatKind,
    /// Display name; generated when absent.
    #[serde(default)]
    name: Option<String>,
}

/// Everything needed to start a session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Deserialize)]
pub struct Settings {
    /// Grid edge length (3, 5 or 9).
    #[serde(default = "default_grid_size")]
    grid_size: GridSize,

    /// Which diagonals can win.
    #[serde(default)]
    diagonals: DiagonalRule,

    /// Rounds to play; when absent the player is asked after each round.
    #[serde(default)]
    rounds: Option<u32>,

    /// Seats in turn order; marks are assigned X, O, * in this order.
    #[serde(default = "default_seats")]
    seats: Vec<SeatSettings>,
}

fn default_grid_size() -> GridSize {
    GridSize::Three
}

fn default_seats() -> Vec<SeatSettings> {
    vec![
        SeatSettings::new(SeatKind::Human, None),
        SeatSettings::new(SeatKind::Computer, None),
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            diagonals: DiagonalRule::default(),
            rounds: None,
            seats: default_seats(),
        }
    }
}

impl Settings {
    /// Creates settings with an open-ended round count.
    pub fn new(grid_size: GridSize, diagonals: DiagonalRule, seats: Vec<SeatSettings>) -> Self {
        Self {
            grid_size,
            diagonals,
            rounds: None,
            seats,
        }
    }

    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SettingsError::new(format!("Failed to read settings file: {e}")))?;
        let settings = Self::from_toml_str(&content)?;
        info!(
            grid_size = %settings.grid_size,
            seats = settings.seats.len(),
            "Settings loaded"
        );
        Ok(settings)
    }

    /// Parses settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content)
            .map_err(|e| SettingsError::new(format!("Failed to parse settings: {e}")))
    }

    /// Replaces the grid size.
    pub fn with_grid_size(mut self, grid_size: GridSize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Replaces the diagonal rule.
    pub fn with_diagonals(mut self, diagonals: DiagonalRule) -> Self {
        self.diagonals = diagonals;
        self
    }

    /// Replaces the round count.
    pub fn with_rounds(mut self, rounds: Option<u32>) -> Self {
        self.rounds = rounds;
        self
    }

    /// Replaces the seats.
    pub fn with_seats(mut self, seats: Vec<SeatSettings>) -> Self {
        self.seats = seats;
        self
    }

    /// Round configuration implied by the grid size, rule and seat count.
    pub fn round_config(&self) -> Result<RoundConfig, SettingsError> {
        let players = PlayerCount::try_from(self.seats.len())
            .map_err(|e| SettingsError::new(e.to_string()))?;
        Ok(RoundConfig::new(self.grid_size, players).with_diagonal_rule(self.diagonals))
    }

    /// Builds the roster, generating names for unnamed seats.
    ///
    /// Unnamed humans become `Player N` (1-based seat number). Unnamed
    /// computers take the first [`COMPUTER_NAMES`] entry not used elsewhere in
    /// the roster, falling back to `Computer <mark>`.
    #[instrument(skip(self), fields(seats = self.seats.len()))]
    pub fn roster(&self) -> Result<Roster, SettingsError> {
        let marks = Mark::for_players(self.seats.len()).ok_or_else(|| {
            SettingsError::new(format!(
                "{} seats configured (expected 2 or 3)",
                self.seats.len()
            ))
        })?;

        let taken: Vec<&str> = self
            .seats
            .iter()
            .filter_map(|seat| seat.name.as_deref())
            .collect();
        let mut pool = COMPUTER_NAMES
            .iter()
            .copied()
            .filter(|name| !taken.contains(name));

        let seats = self
            .seats
            .iter()
            .zip(marks)
            .enumerate()
            .map(|(i, (seat, &mark))| {
                let name = match (&seat.name, seat.kind) {
                    (Some(name), _) => name.clone(),
                    (None, SeatKind::Human) => format!("Player {}", i + 1),
                    (None, SeatKind::Computer) => pool
                        .next()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("Computer {mark}")),
                };
                debug!(%mark, %name, kind = %seat.kind, "Seat assigned");
                Seat::new(mark, name, seat.kind)
            })
            .collect();

        Roster::new(seats).map_err(|e| SettingsError::new(e.to_string()))
    }
}

/// Settings could not be read or do not describe a playable table.
#[derive(Debug, Clone, Display, Error)]
#[display("Settings error: {} at {}:{}", message, file, line)]
pub struct SettingsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SettingsError {
    /// Creates a new settings error at the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
