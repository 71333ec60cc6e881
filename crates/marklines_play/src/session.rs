//! Repeated rounds over one roster.

use crate::scoreboard::Scoreboard;
use derive_getters::Getters;
use marklines::{
    Error, MoveSource, Roster, Round, RoundConfig, RoundOutcome, Turn, UnsupportedConfiguration,
};
use serde::Serialize;
use std::fmt;
use tracing::{info, instrument};

/// Result of one finished round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct RoundReport {
    /// How the round ended.
    outcome: RoundOutcome,
    /// Moves applied.
    turns: usize,
    /// Name of the winning seat, if any.
    winner: Option<String>,
}

impl fmt::Display for RoundReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.outcome, &self.winner) {
            (RoundOutcome::Won { mark, .. }, Some(name)) => {
                write!(f, "{name} ({mark}) wins after {} turns", self.turns)
            }
            (RoundOutcome::Won { mark, .. }, None) => {
                write!(f, "{mark} wins after {} turns", self.turns)
            }
            (RoundOutcome::Draw, _) => write!(f, "Draw after {} turns", self.turns),
        }
    }
}

/// Configuration, roster and scoreboard shared by consecutive rounds.
#[derive(Debug, Clone, Getters)]
pub struct Session {
    /// Configuration every round starts from.
    config: RoundConfig,
    /// Seats in turn order.
    roster: Roster,
    /// Results so far.
    scoreboard: Scoreboard,
    /// Finished rounds.
    rounds_played: u32,
}

impl Session {
    /// Creates a session; the roster must match the configured player count.
    #[instrument(skip(roster), fields(seats = roster.seats().len()))]
    pub fn new(config: RoundConfig, roster: Roster) -> Result<Self, UnsupportedConfiguration> {
        if roster.player_count() != config.player_count() {
            return Err(UnsupportedConfiguration::new(format!(
                "roster has {} seats but the configuration expects {}",
                roster.seats().len(),
                config.player_count()
            )));
        }
        Ok(Self {
            scoreboard: Scoreboard::new(&roster),
            config,
            roster,
            rounds_played: 0,
        })
    }

    /// Plays one round to completion and records it.
    ///
    /// `sources[i]` moves for seat `i`. `on_turn` runs after every applied
    /// move with the round as it stands.
    #[instrument(skip_all)]
    pub fn play_round<F>(
        &mut self,
        sources: &mut [Box<dyn MoveSource>],
        mut on_turn: F,
    ) -> Result<RoundReport, Error>
    where
        F: FnMut(&Round, &Turn),
    {
        if sources.len() != self.roster.seats().len() {
            return Err(UnsupportedConfiguration::new(format!(
                "{} move sources for {} seats",
                sources.len(),
                self.roster.seats().len()
            ))
            .into());
        }

        let mut round = Round::new(self.config, self.roster.clone())?;
        let outcome = loop {
            let seat = round.history().len() % sources.len();
            let outcome = round.play_turn(sources[seat].as_mut())?;
            if let Some(turn) = round.history().last() {
                on_turn(&round, turn);
            }
            if let Some(outcome) = outcome {
                break outcome;
            }
        };

        self.scoreboard.record(&outcome);
        self.rounds_played += 1;

        let winner = match outcome {
            RoundOutcome::Won { seat, .. } => self
                .roster
                .seats()
                .get(seat)
                .map(|seat| seat.name().clone()),
            RoundOutcome::Draw => None,
        };
        let report = RoundReport {
            outcome,
            turns: round.history().len(),
            winner,
        };
        info!(%report, rounds_played = self.rounds_played, "Round finished");
        Ok(report)
    }
}
