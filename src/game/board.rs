use std::fmt;

use crate::error::BoardError;

use super::lines;

/// Canonical Connect Four dimensions.
pub const ROWS: usize = 6;
pub const COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Boundary character: `' '`, `'X'` or `'O'`.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// Parse a boundary character. `'.'` is accepted as a blank.
    pub fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            ' ' | '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,
    #[error("column is out of range")]
    InvalidColumn,
    #[error("column is empty")]
    EmptyColumn,
}

/// Row-major grid, row 0 is the top. `heights[c]` is the number of disks in
/// column `c`, so the next disk in that column lands at `rows - 1 - heights[c]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    heights: Vec<usize>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board must have at least one row and column");
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            heights: vec![0; cols],
        }
    }

    /// Create an empty 6x7 board
    pub fn standard() -> Self {
        Self::new(ROWS, COLS)
    }

    /// Parse a board from text rows, top row first.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let grid: Vec<Vec<char>> = rows.iter().map(|r| r.chars().collect()).collect();
        let cols = grid.first().map_or(0, Vec::len);
        Self::from_grid(&grid, grid.len(), cols)
    }

    /// Parse a boundary grid and check it against the declared dimensions.
    pub fn from_grid(grid: &[Vec<char>], rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyDimensions { rows, cols });
        }
        if grid.len() != rows {
            return Err(BoardError::RowCount {
                expected: rows,
                found: grid.len(),
            });
        }

        let mut board = Board::new(rows, cols);
        for (row, line) in grid.iter().enumerate() {
            if line.len() != cols {
                return Err(BoardError::ColumnCount {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            for (col, &symbol) in line.iter().enumerate() {
                let cell = Cell::from_symbol(symbol)
                    .ok_or(BoardError::InvalidSymbol { row, col, symbol })?;
                board.cells[row * cols + col] = cell;
            }
        }

        // Gravity: once a column has a disk, everything below it is occupied.
        for col in 0..cols {
            let mut height = 0;
            for row in (0..rows).rev() {
                if board.get(row, col) == Cell::Empty {
                    if let Some(above) = (0..row).find(|&r| board.get(r, col) != Cell::Empty) {
                        return Err(BoardError::FloatingPiece { row: above, col });
                    }
                    break;
                }
                height += 1;
            }
            board.heights[col] = height;
        }

        Ok(board)
    }

    /// Parse either raw rows (`"..XO..."`, blanks as `.` or ` `) or the printed
    /// `|X|O| |` layout. In the printed layout only `|`-prefixed lines are board
    /// rows. In raw rows a line of spaces is an empty board row; only zero-length
    /// lines are skipped.
    pub fn parse_text(text: &str) -> Result<Self, BoardError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
            .collect();
        let printed = lines.iter().any(|l| l.starts_with('|'));

        let grid: Vec<Vec<char>> = if printed {
            lines
                .iter()
                .filter(|l| l.starts_with('|'))
                .map(|l| {
                    l.trim_matches('|')
                        .split('|')
                        .map(|c| c.chars().next().unwrap_or(' '))
                        .collect()
                })
                .collect()
        } else {
            lines.iter().map(|l| l.chars().collect()).collect()
        };
        let cols = grid.first().map_or(0, Vec::len);
        Self::from_grid(&grid, grid.len(), cols)
    }

    /// Boundary grid: one `char` per cell, row 0 first.
    pub fn to_grid(&self) -> Vec<Vec<char>> {
        (0..self.rows)
            .map(|row| (0..self.cols).map(|col| self.get(row, col).symbol()).collect())
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row `rows - 1` is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Number of disks in a column
    pub fn column_height(&self, col: usize) -> usize {
        self.heights[col]
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return true;
        }
        self.heights[col] == self.rows
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn);
        }
        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull);
        }

        let row = self.rows - 1 - self.heights[col];
        self.cells[row * self.cols + col] = cell;
        self.heights[col] += 1;
        Ok(row)
    }

    /// Remove the topmost disk of a column, returning what was there.
    ///
    /// Search code pairs every `drop_piece` with one `undo` in stack order.
    pub fn undo(&mut self, col: usize) -> Result<Cell, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn);
        }
        if self.heights[col] == 0 {
            return Err(MoveError::EmptyColumn);
        }

        let row = self.rows - self.heights[col];
        let idx = row * self.cols + col;
        let cell = self.cells[idx];
        self.cells[idx] = Cell::Empty;
        self.heights[col] -= 1;
        Ok(cell)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    pub fn is_empty(&self) -> bool {
        self.heights.iter().all(|&h| h == 0)
    }

    pub fn piece_count(&self) -> usize {
        self.heights.iter().sum()
    }

    /// Columns with an empty top cell, ascending
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.cols).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Columns with an empty top cell, center first
    pub fn legal_columns_center_out(&self) -> Vec<usize> {
        center_out_order(self.cols)
            .into_iter()
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Index of the center column (left of center on even widths)
    pub fn center_column(&self) -> usize {
        self.cols / 2
    }

    /// Check if the disk at (row, col) is part of a four-in-a-row
    pub fn check_win(&self, row: usize, col: usize) -> bool {
        lines::wins_at(self, row, col)
    }

    /// Swap rows and columns. The result is for line scans only: it generally
    /// breaks gravity, and its column heights count disks per column.
    pub fn transposed(&self) -> Board {
        let mut out = Board::new(self.cols, self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                out.cells[col * out.cols + row] = self.get(row, col);
            }
        }
        for col in 0..out.cols {
            out.heights[col] = (0..out.rows)
                .filter(|&r| out.get(r, col) != Cell::Empty)
                .count();
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            write!(f, "|")?;
            for col in 0..self.cols {
                write!(f, "{}|", self.get(row, col).symbol())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", "-".repeat(self.cols * 2 + 1))?;
        let footer: Vec<String> = (1..=self.cols).map(|c| c.to_string()).collect();
        write!(f, " {}", footer.join(" "))
    }
}

/// Column order for search: center, then alternating outward, left side first.
pub fn center_out_order(cols: usize) -> Vec<usize> {
    let center = cols / 2;
    let mut order = Vec::with_capacity(cols);
    order.push(center);
    for offset in 1..=cols {
        if offset <= center {
            order.push(center - offset);
        }
        if center + offset < cols {
            order.push(center + offset);
        }
    }
    order
}
