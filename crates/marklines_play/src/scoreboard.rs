//! Running tally of round results.

use marklines::{Mark, Roster, RoundOutcome};
use serde::Serialize;
use std::fmt;

/// Wins per seat plus draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    entries: Vec<Entry>,
    draws: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Entry {
    name: String,
    mark: Mark,
    wins: u32,
}

impl Scoreboard {
    /// Creates an empty scoreboard with one entry per seat.
    pub fn new(roster: &Roster) -> Self {
        Self {
            entries: roster
                .seats()
                .iter()
                .map(|seat| Entry {
                    name: seat.name().clone(),
                    mark: *seat.mark(),
                    wins: 0,
                })
                .collect(),
            draws: 0,
        }
    }

    /// Adds one finished round.
    pub fn record(&mut self, outcome: &RoundOutcome) {
        match outcome {
            RoundOutcome::Won { seat, .. } => {
                if let Some(entry) = self.entries.get_mut(*seat) {
                    entry.wins += 1;
                }
            }
            RoundOutcome::Draw => self.draws += 1,
        }
    }

    /// Wins credited to seat `index`.
    pub fn wins(&self, index: usize) -> u32 {
        self.entries.get(index).map_or(0, |entry| entry.wins)
    }

    /// Rounds without a winner.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Rounds recorded so far.
    pub fn rounds(&self) -> u32 {
        self.entries.iter().map(|entry| entry.wins).sum::<u32>() + self.draws
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self
            .entries
            .iter()
            .map(|entry| format!("{} ({})", entry.name, entry.mark))
            .collect();
        let width = labels
            .iter()
            .map(String::len)
            .chain(std::iter::once("Draws".len()))
            .max()
            .unwrap_or(0);

        for (label, entry) in labels.iter().zip(&self.entries) {
            writeln!(f, "{label:<width$}  {}", entry.wins)?;
        }
        write!(f, "{:<width$}  {}", "Draws", self.draws)
    }
}
