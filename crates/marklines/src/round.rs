//! Turn loop for one round: seats, move sources and termination.

use crate::advisor::MoveAdvisor;
use crate::board::Board;
use crate::config::{PlayerCount, RoundConfig};
use crate::error::{Error, InternalInconsistency, UnsupportedConfiguration};
use crate::types::{Coordinate, Mark};
use derive_getters::Getters;
use derive_more::Display;
use derive_new::new;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::EnumString;
use tracing::{debug, error, info, instrument, warn};

/// Who supplies a seat's moves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SeatKind {
    /// Moves typed by a person; illegal moves are asked for again.
    #[display("human")]
    Human,
    /// Moves from the advisor; an illegal move is a defect.
    #[display("computer")]
    Computer,
}

/// One player at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, new)]
pub struct Seat {
    /// Token placed by this seat.
    mark: Mark,
    /// Display name.
    name: String,
    /// Source of this seat's moves.
    kind: SeatKind,
}

impl Seat {
    /// Returns `true` for computer seats.
    pub fn is_automated(&self) -> bool {
        self.kind == SeatKind::Computer
    }
}

/// Ordered seats, fixed for a round. Turn order is seat order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    seats: Vec<Seat>,
}

impl Roster {
    /// Validates seat count (2 or 3) and that every mark is distinct.
    #[instrument(skip(seats), fields(seats = seats.len()))]
    pub fn new(seats: Vec<Seat>) -> Result<Self, UnsupportedConfiguration> {
        PlayerCount::try_from(seats.len())?;
        for (i, seat) in seats.iter().enumerate() {
            if seats[..i].iter().any(|other| other.mark == seat.mark) {
                return Err(UnsupportedConfiguration::new(format!(
                    "mark {} assigned to more than one seat",
                    seat.mark
                )));
            }
        }
        Ok(Self { seats })
    }

    /// Seats in turn order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Number of seats as a [`PlayerCount`].
    pub fn player_count(&self) -> PlayerCount {
        match self.seats.len() {
            2 => PlayerCount::Two,
            _ => PlayerCount::Three,
        }
    }

    /// Marks in turn order.
    pub fn marks(&self) -> Vec<Mark> {
        self.seats.iter().map(|seat| seat.mark).collect()
    }

    /// Every mark except `mark`, in turn order.
    pub fn opponents_of(&self, mark: Mark) -> Vec<Mark> {
        self.seats
            .iter()
            .map(|seat| seat.mark)
            .filter(|&other| other != mark)
            .collect()
    }
}

/// Supplies coordinates for one seat.
///
/// Implementations may block (e.g. waiting on a terminal).
pub trait MoveSource {
    /// Picks the next coordinate for `seat` on `board`.
    fn next_move(&mut self, board: &Board, seat: &Seat, opponents: &[Mark])
    -> Result<Coordinate, Error>;
}

/// Move source backed by [`MoveAdvisor`], sampling with `rng` when the advisor
/// has no preference.
#[derive(Debug, Clone)]
pub struct AdvisorSource<R> {
    advisor: MoveAdvisor,
    rng: R,
}

impl<R: Rng> AdvisorSource<R> {
    /// Creates an advisor-backed source.
    pub fn new(rng: R) -> Self {
        Self {
            advisor: MoveAdvisor::new(),
            rng,
        }
    }
}

impl<R: Rng> MoveSource for AdvisorSource<R> {
    fn next_move(
        &mut self,
        board: &Board,
        seat: &Seat,
        opponents: &[Mark],
    ) -> Result<Coordinate, Error> {
        let choice = self.advisor.propose(board, seat.mark, opponents)?;
        let coordinate = choice
            .resolve(&mut self.rng)
            .ok_or_else(|| InternalInconsistency::new("advisor returned no candidate"))?;
        debug!(seat = %seat.name, %coordinate, ?choice, "Advisor chose move");
        Ok(coordinate)
    }
}

/// One applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Getters)]
pub struct Turn {
    /// Index of the seat that moved.
    seat: usize,
    /// Mark placed.
    mark: Mark,
    /// Where it was placed.
    coordinate: Coordinate,
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundOutcome {
    /// A seat completed a line.
    Won {
        /// Index of the winning seat.
        seat: usize,
        /// Winning mark.
        mark: Mark,
    },
    /// The board filled with no winner.
    Draw,
}

/// A single round: board, roster and move history.
#[derive(Debug, Clone)]
pub struct Round {
    board: Board,
    roster: Roster,
    history: Vec<Turn>,
    next_seat: usize,
    outcome: Option<RoundOutcome>,
}

impl Round {
    /// Starts a round; the roster must match the configured player count.
    #[instrument(skip(roster))]
    pub fn new(config: RoundConfig, roster: Roster) -> Result<Self, UnsupportedConfiguration> {
        if roster.player_count() != config.player_count() {
            return Err(UnsupportedConfiguration::new(format!(
                "roster has {} seats but the round expects {}",
                roster.seats().len(),
                config.player_count()
            )));
        }
        info!(
            grid_size = %config.grid_size(),
            win_length = config.win_length(),
            "Starting round"
        );
        Ok(Self {
            board: Board::new(config),
            roster,
            history: Vec::new(),
            next_seat: 0,
            outcome: None,
        })
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Seats in turn order.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Moves applied so far.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Seat due to move next.
    pub fn next_seat(&self) -> &Seat {
        &self.roster.seats[self.next_seat]
    }

    /// Final result, once the round is over.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Asks `source` for the next seat's move and applies it.
    ///
    /// Illegal moves from a human seat are logged and asked for again; from a
    /// computer seat they end the round with an error. Returns the outcome if
    /// this move ended the round.
    #[instrument(skip(self, source))]
    pub fn play_turn(
        &mut self,
        source: &mut dyn MoveSource,
    ) -> Result<Option<RoundOutcome>, Error> {
        if self.outcome.is_some() {
            return Ok(self.outcome);
        }

        let index = self.next_seat;
        let seat = &self.roster.seats[index];
        let opponents = self.roster.opponents_of(seat.mark);

        let coordinate = loop {
            let coordinate = source.next_move(&self.board, seat, &opponents)?;
            match self.board.fill(coordinate, seat.mark) {
                Ok(()) => break coordinate,
                Err(invalid) if !seat.is_automated() => {
                    warn!(seat = %seat.name, %invalid, "Rejected move, asking again");
                }
                Err(invalid) => {
                    error!(seat = %seat.name, %invalid, "Automated seat made an illegal move");
                    return Err(invalid.into());
                }
            }
        };

        self.history.push(Turn {
            seat: index,
            mark: seat.mark,
            coordinate,
        });

        if self.board.completes_line(coordinate, seat.mark) {
            info!(seat = %seat.name, mark = %seat.mark, turns = self.history.len(), "Round won");
            self.outcome = Some(RoundOutcome::Won {
                seat: index,
                mark: seat.mark,
            });
        } else if self.board.is_full() {
            info!(turns = self.history.len(), "Round drawn");
            self.outcome = Some(RoundOutcome::Draw);
        }

        self.next_seat = (index + 1) % self.roster.seats.len();
        Ok(self.outcome)
    }

    /// Plays turns until the round ends. `sources[i]` moves for seat `i`.
    pub fn play(&mut self, sources: &mut [Box<dyn MoveSource>]) -> Result<RoundOutcome, Error> {
        if sources.len() != self.roster.seats.len() {
            return Err(UnsupportedConfiguration::new(format!(
                "{} move sources for {} seats",
                sources.len(),
                self.roster.seats.len()
            ))
            .into());
        }
        loop {
            let source = &mut sources[self.next_seat];
            if let Some(outcome) = self.play_turn(source.as_mut())? {
                return Ok(outcome);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridSize;
    use crate::error::InvalidMove;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;

    /// Replays a fixed list of coordinates.
    struct Scripted(VecDeque<usize>);

    impl MoveSource for Scripted {
        fn next_move(
            &mut self,
            _board: &Board,
            _seat: &Seat,
            _opponents: &[Mark],
        ) -> Result<Coordinate, Error> {
            self.0
                .pop_front()
                .map(Coordinate::new)
                .ok_or_else(|| crate::error::SourceError::new("script exhausted").into())
        }
    }

    fn roster(kinds: &[SeatKind]) -> Roster {
        let seats = kinds
            .iter()
            .zip(Mark::ALL)
            .map(|(&kind, mark)| Seat::new(mark, format!("Player {mark}"), kind))
            .collect();
        Roster::new(seats).unwrap()
    }

    fn scripted(moves: &[usize]) -> Box<dyn MoveSource> {
        Box::new(Scripted(moves.iter().copied().collect()))
    }

    #[test]
    fn test_roster_rejects_bad_sizes() {
        let one = vec![Seat::new(Mark::X, "a".into(), SeatKind::Human)];
        assert!(Roster::new(one).is_err());
        let dup = vec![
            Seat::new(Mark::X, "a".into(), SeatKind::Human),
            Seat::new(Mark::X, "b".into(), SeatKind::Human),
        ];
        assert!(Roster::new(dup).is_err());
    }

    #[test]
    fn test_opponents_in_turn_order() {
        let roster = roster(&[SeatKind::Human, SeatKind::Computer, SeatKind::Computer]);
        assert_eq!(roster.opponents_of(Mark::O), vec![Mark::X, Mark::Star]);
    }

    #[test]
    fn test_round_rejects_mismatched_roster() {
        let config = RoundConfig::new(GridSize::Three, PlayerCount::Three);
        let result = Round::new(config, roster(&[SeatKind::Human, SeatKind::Human]));
        assert!(result.is_err());
    }

    #[test]
    fn test_scripted_win() {
        let config = RoundConfig::new(GridSize::Three, PlayerCount::Two);
        let mut round = Round::new(config, roster(&[SeatKind::Human, SeatKind::Human])).unwrap();
        let mut sources = vec![scripted(&[1, 2, 3]), scripted(&[4, 5])];
        let outcome = round.play(&mut sources).unwrap();
        assert_eq!(
            outcome,
            RoundOutcome::Won {
                seat: 0,
                mark: Mark::X
            }
        );
        assert_eq!(round.history().len(), 5);
        assert_eq!(*round.history()[4].coordinate(), Coordinate::new(3));
    }

    #[test]
    fn test_human_retry_on_occupied() {
        let config = RoundConfig::new(GridSize::Three, PlayerCount::Two);
        let mut round = Round::new(config, roster(&[SeatKind::Human, SeatKind::Human])).unwrap();
        let mut x = Scripted([5].into());
        let mut o = Scripted([5, 42, 1].into());
        round.play_turn(&mut x).unwrap();
        round.play_turn(&mut o).unwrap();
        assert_eq!(round.history().len(), 2);
        assert_eq!(*round.history()[1].coordinate(), Coordinate::new(1));
    }

    #[test]
    fn test_computer_illegal_move_is_error() {
        let config = RoundConfig::new(GridSize::Three, PlayerCount::Two);
        let mut round =
            Round::new(config, roster(&[SeatKind::Human, SeatKind::Computer])).unwrap();
        round.play_turn(&mut Scripted([5].into())).unwrap();
        let result = round.play_turn(&mut Scripted([5].into()));
        assert_eq!(
            result,
            Err(Error::InvalidMove(InvalidMove::Occupied(Coordinate::new(5))))
        );
    }

    #[test]
    fn test_draw() {
        let config = RoundConfig::new(GridSize::Three, PlayerCount::Two);
        let mut round = Round::new(config, roster(&[SeatKind::Human, SeatKind::Human])).unwrap();
        // X O X / X O O / O X X
        let mut sources = vec![scripted(&[1, 3, 4, 8, 9]), scripted(&[2, 5, 6, 7])];
        assert_eq!(round.play(&mut sources).unwrap(), RoundOutcome::Draw);
        assert!(round.board().is_full());
    }

    #[test]
    fn test_finished_round_ignores_further_turns() {
        let config = RoundConfig::new(GridSize::Three, PlayerCount::Two);
        let mut round = Round::new(config, roster(&[SeatKind::Human, SeatKind::Human])).unwrap();
        let mut sources = vec![scripted(&[1, 2, 3]), scripted(&[4, 5])];
        let outcome = round.play(&mut sources).unwrap();
        assert_eq!(
            round.play_turn(&mut Scripted(VecDeque::new())).unwrap(),
            Some(outcome)
        );
    }

    #[test]
    fn test_advisor_source_blocks() {
        let config = RoundConfig::new(GridSize::Three, PlayerCount::Two);
        let mut round =
            Round::new(config, roster(&[SeatKind::Human, SeatKind::Computer])).unwrap();
        let mut human = Scripted([1, 2].into());
        let mut computer = AdvisorSource::new(StdRng::seed_from_u64(1));
        round.play_turn(&mut human).unwrap();
        // Computer takes the center on an open 3x3.
        round.play_turn(&mut computer).unwrap();
        assert_eq!(*round.history()[1].coordinate(), Coordinate::new(5));
        round.play_turn(&mut human).unwrap();
        // X threatens 3 on row 1.
        round.play_turn(&mut computer).unwrap();
        assert_eq!(*round.history()[3].coordinate(), Coordinate::new(3));
    }
}
