//! Core Connect Four game logic: parametric board, four-in-a-row windows,
//! player types, and the confirmed-move game state.

mod board;
pub mod lines;
mod player;
mod state;

pub use board::{center_out_order, Board, Cell, MoveError, COLS, ROWS};
pub use lines::{has_four_in_row, wins_at, Direction, Window, WindowCounts};
pub use player::Player;
pub use state::{GameOutcome, GameState, PlayError};
