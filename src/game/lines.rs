//! Four-in-a-row windows and win detection.

use super::board::{Board, Cell};

/// Length of a winning line.
pub const WINDOW_LEN: usize = 4;

/// The four line directions, as (row step, column step). Rows grow downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
    DiagonalDownRight,
    DiagonalDownLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDownRight,
        Direction::DiagonalDownLeft,
    ];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDownRight => (1, 1),
            Direction::DiagonalDownLeft => (1, -1),
        }
    }
}

/// A borrowed view of four consecutive cells starting at (`row`, `col`).
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    board: &'a Board,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

/// Occupancy of a window relative to two symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowCounts {
    pub own: usize,
    pub opp: usize,
    pub empty: usize,
}

impl<'a> Window<'a> {
    pub fn cells(&self) -> [Cell; WINDOW_LEN] {
        let (dr, dc) = self.direction.delta();
        std::array::from_fn(|i| {
            let r = (self.row as isize + dr * i as isize) as usize;
            let c = (self.col as isize + dc * i as isize) as usize;
            self.board.get(r, c)
        })
    }

    pub fn counts(&self, own: Cell, opp: Cell) -> WindowCounts {
        let mut counts = WindowCounts::default();
        for cell in self.cells() {
            match cell {
                Cell::Empty => counts.empty += 1,
                c if c == own => counts.own += 1,
                c if c == opp => counts.opp += 1,
                _ => {}
            }
        }
        counts
    }

    pub fn is_all(&self, cell: Cell) -> bool {
        self.cells().iter().all(|&c| c == cell)
    }
}

/// Every window on the board: horizontal, vertical, then both diagonals.
pub fn windows(board: &Board) -> impl Iterator<Item = Window<'_>> + '_ {
    let span = WINDOW_LEN - 1;
    Direction::ALL.into_iter().flat_map(move |direction| {
        let rows = match direction {
            Direction::Horizontal => 0..board.rows(),
            _ => 0..board.rows().saturating_sub(span),
        };
        let cols = match direction {
            Direction::Vertical => 0..board.cols(),
            Direction::DiagonalDownLeft => span..board.cols(),
            _ => 0..board.cols().saturating_sub(span),
        };
        rows.flat_map(move |row| {
            cols.clone().map(move |col| Window {
                board,
                row,
                col,
                direction,
            })
        })
    })
}

/// Full-board scan: does `cell` own any complete window?
pub fn has_four_in_row(board: &Board, cell: Cell) -> bool {
    if cell == Cell::Empty {
        return false;
    }
    windows(board).any(|w| w.is_all(cell))
}

/// Incremental check: is the disk at (row, col) part of a line of four or more?
pub fn wins_at(board: &Board, row: usize, col: usize) -> bool {
    let cell = board.get(row, col);
    if cell == Cell::Empty {
        return false;
    }

    Direction::ALL.iter().any(|&direction| {
        let (dr, dc) = direction.delta();
        let count = 1 + run_length(board, row, col, dr, dc, cell)
            + run_length(board, row, col, -dr, -dc, cell);
        count >= WINDOW_LEN
    })
}

/// Number of consecutive `cell`s stepping away from (row, col), excluding it.
fn run_length(board: &Board, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
    let mut count = 0;
    let mut r = row as isize + dr;
    let mut c = col as isize + dc;
    while r >= 0
        && c >= 0
        && (r as usize) < board.rows()
        && (c as usize) < board.cols()
        && board.get(r as usize, c as usize) == cell
    {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{COLS, ROWS};
    use proptest::prelude::*;

    fn board_after(moves: &[usize]) -> Board {
        let mut board = Board::standard();
        for (i, &col) in moves.iter().enumerate() {
            let cell = if i % 2 == 0 { Cell::X } else { Cell::O };
            board.drop_piece(col, cell).unwrap();
        }
        board
    }

    #[test]
    fn test_window_count_on_standard_board() {
        let board = Board::standard();
        let count = |d: Direction| windows(&board).filter(|w| w.direction == d).count();
        assert_eq!(count(Direction::Horizontal), 24);
        assert_eq!(count(Direction::Vertical), 21);
        assert_eq!(count(Direction::DiagonalDownRight), 12);
        assert_eq!(count(Direction::DiagonalDownLeft), 12);
    }

    #[test]
    fn test_no_windows_on_small_board() {
        let board = Board::new(3, 3);
        assert_eq!(windows(&board).count(), 0);
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::standard();
        // Create horizontal line at bottom row
        for col in 0..4 {
            board.drop_piece(col, Cell::X).unwrap();
        }
        assert!(has_four_in_row(&board, Cell::X));
        assert!(!has_four_in_row(&board, Cell::O));
        assert!(wins_at(&board, 5, 2)); // Check middle of the line
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::standard();
        // Create vertical line in column 3
        for _ in 0..4 {
            board.drop_piece(3, Cell::O).unwrap();
        }
        assert!(has_four_in_row(&board, Cell::O));
        assert!(wins_at(&board, 2, 3)); // Check the 4th piece
    }

    #[test]
    fn test_diagonal_up_win() {
        // Create diagonal / pattern
        let board = board_after(&[0, 1, 1, 2, 2, 3, 2, 3, 3, 6, 3]);
        assert_eq!(board.get(2, 3), Cell::X);
        assert!(has_four_in_row(&board, Cell::X));
        assert!(wins_at(&board, 2, 3));
    }

    #[test]
    fn test_diagonal_down_win() {
        // Create diagonal \ pattern
        let board = board_after(&[6, 5, 5, 4, 4, 3, 4, 3, 3, 0, 3]);
        assert!(has_four_in_row(&board, Cell::X));
        assert!(wins_at(&board, 2, 3));
    }

    #[test]
    fn test_no_win_with_three() {
        let board = board_after(&[0, 0, 1, 1, 2]);
        assert!(!has_four_in_row(&board, Cell::X));
        assert!(!wins_at(&board, 5, 1)); // Only 3 in a row
    }

    #[test]
    fn test_empty_cell_never_wins() {
        let board = Board::standard();
        assert!(!has_four_in_row(&board, Cell::Empty));
        assert!(!wins_at(&board, 5, 0));
    }

    #[test]
    fn test_window_counts() {
        let board = board_after(&[0, 1]);
        let w = windows(&board)
            .find(|w| w.direction == Direction::Horizontal && w.row == 5 && w.col == 0)
            .unwrap();
        assert_eq!(
            w.counts(Cell::X, Cell::O),
            WindowCounts { own: 1, opp: 1, empty: 2 }
        );
    }

    proptest! {
        #[test]
        fn four_in_row_invariant_under_transpose(
            rows in 1usize..9,
            cols in 1usize..9,
            moves in prop::collection::vec((0usize..9, prop::bool::ANY), 0..60),
        ) {
            let mut board = Board::new(rows, cols);
            for (col, is_x) in moves {
                let cell = if is_x { Cell::X } else { Cell::O };
                let _ = board.drop_piece(col % cols, cell);
            }
            let t = board.transposed();
            for cell in [Cell::X, Cell::O] {
                prop_assert_eq!(has_four_in_row(&board, cell), has_four_in_row(&t, cell));
            }
        }

        #[test]
        fn incremental_check_matches_full_scan(moves in prop::collection::vec(0usize..COLS, 1..ROWS * COLS)) {
            let mut board = Board::standard();
            for (i, col) in moves.into_iter().enumerate() {
                let cell = if i % 2 == 0 { Cell::X } else { Cell::O };
                if has_four_in_row(&board, cell) {
                    break;
                }
                if let Ok(row) = board.drop_piece(col, cell) {
                    prop_assert_eq!(wins_at(&board, row, col), has_four_in_row(&board, cell));
                }
            }
        }
    }
}
