//! Tests for board moves, win detection and exhaustion.

use marklines::{Board, Cell, Coordinate, GridSize, InvalidMove, Mark, PlayerCount, RoundConfig};
use strum::IntoEnumIterator;

fn board_with(size: GridSize, players: PlayerCount, moves: &[(usize, Mark)]) -> Board {
    let mut board = Board::new(RoundConfig::new(size, players));
    for &(coordinate, mark) in moves {
        board
            .fill(Coordinate::new(coordinate), mark)
            .expect("Scripted move should be legal");
    }
    board
}

#[test]
fn test_second_fill_is_rejected_without_change() {
    for size in GridSize::iter() {
        let mut board = board_with(size, PlayerCount::Two, &[(1, Mark::X)]);
        let before = board.cells().to_vec();
        for mark in [Mark::X, Mark::O] {
            assert_eq!(
                board.fill(Coordinate::new(1), mark),
                Err(InvalidMove::Occupied(Coordinate::new(1)))
            );
        }
        assert_eq!(board.cells(), before.as_slice());
        assert_eq!(board.moves_applied(), 1);
    }
}

#[test]
fn test_out_of_range_reports_bounds() {
    let mut board = board_with(GridSize::Five, PlayerCount::Two, &[]);
    let err = board.fill(Coordinate::new(26), Mark::X).unwrap_err();
    assert_eq!(
        err,
        InvalidMove::OutOfRange {
            coordinate: Coordinate::new(26),
            max: 25
        }
    );
}

#[test]
fn test_row_win_three_by_three() {
    let board = board_with(
        GridSize::Three,
        PlayerCount::Two,
        &[(4, Mark::O), (5, Mark::O), (6, Mark::O)],
    );
    assert!(board.has_winner(Mark::O));
    assert!(!board.has_winner(Mark::X));
}

#[test]
fn test_broken_run_is_not_a_win() {
    // Row 1 on 5x5 (k=4): X X _ X X
    let board = board_with(
        GridSize::Five,
        PlayerCount::Two,
        &[(1, Mark::X), (2, Mark::X), (4, Mark::X), (5, Mark::X)],
    );
    assert!(!board.has_winner(Mark::X));
}

#[test]
fn test_window_win_inside_longer_row() {
    // Row 3 on 5x5 (k=4): _ X X X X
    let board = board_with(
        GridSize::Five,
        PlayerCount::Two,
        &[(12, Mark::X), (13, Mark::X), (14, Mark::X), (15, Mark::X)],
    );
    assert!(board.has_winner(Mark::X));
}

#[test]
fn test_sub_diagonal_win_five_by_five() {
    let board = board_with(
        GridSize::Five,
        PlayerCount::Two,
        &[(10, Mark::O), (14, Mark::O), (18, Mark::O), (22, Mark::O)],
    );
    assert!(board.has_winner(Mark::O));
}

#[test]
fn test_short_sub_diagonal_counts_only_with_three_players() {
    let moves = [(3, Mark::Star), (7, Mark::Star), (11, Mark::Star)];
    let three = board_with(GridSize::Five, PlayerCount::Three, &moves);
    assert!(three.has_winner(Mark::Star));
    assert_eq!(three.winner(&[Mark::X, Mark::O, Mark::Star]), Some(Mark::Star));

    // With two players the win length is 4 and the line does not exist.
    let two = board_with(GridSize::Five, PlayerCount::Two, &moves);
    assert!(!two.has_winner(Mark::Star));
}

#[test]
fn test_nine_by_nine_diagonal_does_not_win_by_default() {
    let moves: Vec<(usize, Mark)> = [1, 11, 21, 31, 41].iter().map(|&c| (c, Mark::X)).collect();
    let board = board_with(GridSize::Nine, PlayerCount::Two, &moves);
    assert!(!board.has_winner(Mark::X));

    let mut complete = Board::new(
        RoundConfig::new(GridSize::Nine, PlayerCount::Two)
            .with_diagonal_rule(marklines::DiagonalRule::Complete),
    );
    for (c, mark) in moves {
        complete.fill(Coordinate::new(c), mark).unwrap();
    }
    assert!(complete.has_winner(Mark::X));
}

#[test]
fn test_filling_every_remaining_move_terminates() {
    for size in GridSize::iter() {
        let mut board = board_with(size, PlayerCount::Three, &[]);
        let mut moves = 0;
        let mut marks = Mark::ALL.iter().cycle();
        while let Some(&coordinate) = board.remaining_moves().first() {
            let mark = *marks.next().unwrap();
            board.fill(coordinate, mark).unwrap();
            moves += 1;
            assert!(moves <= size.cell_count());
        }
        assert_eq!(moves, size.cell_count());
        assert!(board.is_full());
        assert!(board.remaining_moves().is_empty());
        assert!(board.check_consistency().is_ok());
    }
}

#[test]
fn test_remaining_moves_ascending() {
    let board = board_with(
        GridSize::Three,
        PlayerCount::Two,
        &[(5, Mark::X), (1, Mark::O), (9, Mark::X)],
    );
    let remaining: Vec<usize> = board.remaining_moves().iter().map(|c| c.get()).collect();
    assert_eq!(remaining, vec![2, 3, 4, 6, 7, 8]);
}

#[test]
fn test_rows_snapshot_matches_cells() {
    let board = board_with(GridSize::Five, PlayerCount::Two, &[(7, Mark::O)]);
    let rows = board.rows();
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|row| row.len() == 5));
    assert_eq!(rows[1][1], Cell::Marked(Mark::O));
}
