//! Plain text board rendering.
//!
//! Rows are drawn in numeric keypad layout: the row holding the highest
//! coordinates is on top. Empty cells show their coordinate so a human can
//! read off the number to type.

use marklines::{Board, Cell, Coordinate};

/// Renders `board` as text, one line per row with separator lines between.
///
/// ```
/// use marklines::{Board, GridSize, PlayerCount, RoundConfig};
///
/// let board = Board::new(RoundConfig::new(GridSize::Three, PlayerCount::Two));
/// assert_eq!(
///     marklines_play::render(&board),
///     "7|8|9\n-+-+-\n4|5|6\n-+-+-\n1|2|3"
/// );
/// ```
pub fn render(board: &Board) -> String {
    let edge = board.edge();
    let width = board.cell_count().to_string().len();
    let separator = vec!["-".repeat(width); edge].join("+");

    board
        .rows()
        .iter()
        .enumerate()
        .rev()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell {
                    Cell::Marked(mark) => format!("{:>width$}", mark.to_string()),
                    Cell::Empty => format!("{:>width$}", row * edge + col + 1),
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect::<Vec<_>>()
        .join(&format!("\n{separator}\n"))
}

/// Joins coordinates as `a, b or c`.
pub fn list_choices(choices: &[Coordinate]) -> String {
    match choices {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(Coordinate::to_string).collect();
            format!("{} or {last}", head.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marklines::{GridSize, Mark, PlayerCount, RoundConfig};

    #[test]
    fn test_marks_replace_numbers() {
        let mut board = Board::new(RoundConfig::new(GridSize::Three, PlayerCount::Two));
        board.fill(Coordinate::new(1), Mark::X).unwrap();
        board.fill(Coordinate::new(9), Mark::O).unwrap();
        assert_eq!(render(&board), "7|8|O\n-+-+-\n4|5|6\n-+-+-\nX|2|3");
    }

    #[test]
    fn test_wide_cells_are_padded() {
        let mut board = Board::new(RoundConfig::new(GridSize::Five, PlayerCount::Three));
        board.fill(Coordinate::new(25), Mark::Star).unwrap();
        let text = render(&board);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "21|22|23|24| *");
        assert_eq!(lines[1], "--+--+--+--+--");
        assert_eq!(lines[8], " 1| 2| 3| 4| 5");
    }

    #[test]
    fn test_list_choices() {
        let coords = |values: &[usize]| -> Vec<Coordinate> {
            values.iter().copied().map(Coordinate::new).collect()
        };
        assert_eq!(list_choices(&[]), "");
        assert_eq!(list_choices(&coords(&[4])), "4");
        assert_eq!(list_choices(&coords(&[4, 7])), "4 or 7");
        assert_eq!(list_choices(&coords(&[1, 2, 3])), "1, 2 or 3");
    }
}
