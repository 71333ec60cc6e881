//! Human seats reading coordinates from a line-oriented input.

use crate::render::list_choices;
use marklines::{Board, Coordinate, Error, Mark, MoveSource, Seat, SourceError};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use tracing::{debug, instrument, warn};

/// Prompts for a coordinate until the answer names an empty cell.
///
/// The input is shared so several human seats at one table read the same
/// stream without competing buffers.
#[derive(Debug)]
pub struct HumanSeat<R, W> {
    input: Rc<RefCell<R>>,
    output: W,
}

impl<R: BufRead, W: Write> HumanSeat<R, W> {
    /// Creates a seat reading from `input` and prompting on `output`.
    pub fn new(input: Rc<RefCell<R>>, output: W) -> Self {
        Self { input, output }
    }

    /// Prompt sink, e.g. for inspecting what was written.
    pub fn output(&self) -> &W {
        &self.output
    }

    fn read_line(&mut self) -> Result<Option<String>, SourceError> {
        let mut line = String::new();
        let read = self
            .input
            .borrow_mut()
            .read_line(&mut line)
            .map_err(|e| SourceError::new(format!("Failed to read move: {e}")))?;
        Ok((read > 0).then(|| line.trim().to_string()))
    }

    fn say(&mut self, text: std::fmt::Arguments<'_>) -> Result<(), SourceError> {
        self.output
            .write_fmt(text)
            .and_then(|()| self.output.flush())
            .map_err(|e| SourceError::new(format!("Failed to write prompt: {e}")))
    }
}

impl<R: BufRead, W: Write> MoveSource for HumanSeat<R, W> {
    #[instrument(skip_all, fields(seat = %seat.name()))]
    fn next_move(
        &mut self,
        board: &Board,
        seat: &Seat,
        _opponents: &[Mark],
    ) -> Result<Coordinate, Error> {
        let remaining = board.remaining_moves();
        loop {
            self.say(format_args!(
                "{} ({}), choose a cell: {}\n> ",
                seat.name(),
                seat.mark(),
                list_choices(&remaining)
            ))?;

            let Some(answer) = self.read_line()? else {
                return Err(SourceError::new("input closed before a move was chosen").into());
            };

            match answer.parse::<usize>().map(Coordinate::new) {
                Ok(coordinate) if remaining.contains(&coordinate) => {
                    debug!(%coordinate, "Human chose move");
                    return Ok(coordinate);
                }
                Ok(coordinate) => {
                    warn!(%coordinate, "Cell not available");
                    self.say(format_args!("Cell {coordinate} is not available.\n"))?;
                }
                Err(_) => {
                    warn!(%answer, "Not a cell number");
                    self.say(format_args!("'{answer}' is not a cell number.\n"))?;
                }
            }
        }
    }
}

/// Asks a yes/no question until answered. End of input counts as no.
pub fn ask_yes_no<R, W>(input: &mut R, output: &mut W, question: &str) -> Result<bool, SourceError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    loop {
        write!(output, "{question} [y/n] ")
            .and_then(|()| output.flush())
            .map_err(|e| SourceError::new(format!("Failed to write prompt: {e}")))?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .map_err(|e| SourceError::new(format!("Failed to read answer: {e}")))?;
        if read == 0 {
            return Ok(false);
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => continue,
        }
    }
}
