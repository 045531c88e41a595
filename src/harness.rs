//! The contract a game manager uses to drive the engine: `init_agent`,
//! `choose_move` and `report_result`.
//!
//! Boards cross this boundary as row-major grids of `' '`, `'X'` and `'O'`
//! with row 0 on top, and columns are 1-based. Everything behind it is 0-based.

use tracing::{debug, error, info};

use crate::ai::{AgentMetrics, Decision, MoveSelector};
use crate::config::AppConfig;
use crate::error::AgentError;
use crate::game::{Board, Player};

/// Winner/loser name the game manager sends on a tie.
pub const DRAW: &str = "Draw";

/// How a finished game ended for this agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum GameResult {
    Won,
    Lost,
    Draw,
    /// Neither name was ours
    Unrelated,
}

/// One engine instance registered with a game manager under `name`.
pub struct Connect4Agent {
    name: String,
    config: AppConfig,
    selector: MoveSelector,
    symbol: Option<Player>,
    metrics: AgentMetrics,
}

impl Connect4Agent {
    pub fn new(name: impl Into<String>, config: AppConfig) -> Self {
        let selector = MoveSelector::from_config(&config);
        Connect4Agent {
            name: name.into(),
            config,
            selector,
            symbol: None,
            metrics: AgentMetrics::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metrics(&self) -> AgentMetrics {
        self.metrics
    }

    /// Symbol assigned by the last `init_agent`
    pub fn symbol(&self) -> Option<Player> {
        self.symbol
    }

    /// Start a new game. Nothing from a previous game carries over except the
    /// result tally.
    pub fn init_agent(
        &mut self,
        symbol: char,
        num_rows: usize,
        num_cols: usize,
        board: &[Vec<char>],
    ) -> Result<(), AgentError> {
        let player = Player::from_symbol(symbol).ok_or(AgentError::InvalidSymbol(symbol))?;
        let board = parse_board(board, num_rows, num_cols)?;

        self.selector = MoveSelector::from_config(&self.config);
        self.symbol = Some(player);
        info!(
            agent = %self.name,
            symbol = %player.symbol(),
            rows = board.rows(),
            cols = board.cols(),
            "agent initialized"
        );
        Ok(())
    }

    /// Choose a 1-based column for `my_symbol` to play on `board`.
    pub fn choose_move(
        &mut self,
        board: &[Vec<char>],
        num_rows: usize,
        num_cols: usize,
        my_symbol: char,
    ) -> Result<usize, AgentError> {
        let player = Player::from_symbol(my_symbol).ok_or(AgentError::InvalidSymbol(my_symbol))?;
        let board = parse_board(board, num_rows, num_cols)?;

        let Decision { column, reason } = self.selector.choose(&board, player)?;
        debug!(agent = %self.name, column = column + 1, ?reason, "move");
        Ok(column + 1)
    }

    /// Record the end of a game. `winner == loser == "Draw"` on a tie.
    pub fn report_result(&mut self, board: &[Vec<char>], winner: &str, loser: &str) -> GameResult {
        let result = if winner == DRAW && loser == DRAW {
            GameResult::Draw
        } else if winner == self.name {
            GameResult::Won
        } else if loser == self.name {
            GameResult::Lost
        } else {
            GameResult::Unrelated
        };

        match result {
            GameResult::Won => self.metrics.wins += 1,
            GameResult::Lost => self.metrics.losses += 1,
            GameResult::Draw => self.metrics.draws += 1,
            GameResult::Unrelated => {}
        }
        if result != GameResult::Unrelated {
            self.metrics.total_games += 1;
        }

        info!(agent = %self.name, winner, loser, ?result, "game over");
        let rows = board.len();
        let cols = board.first().map_or(0, Vec::len);
        if let Ok(final_board) = Board::from_grid(board, rows, cols) {
            debug!("final board\n{final_board}");
        }
        result
    }
}

/// Dimension mismatches are configuration faults: log once and hand back.
fn parse_board(grid: &[Vec<char>], rows: usize, cols: usize) -> Result<Board, AgentError> {
    Board::from_grid(grid, rows, cols).map_err(|e| {
        error!(rows, cols, error = %e, "rejected board");
        AgentError::Board(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_grid(rows: usize, cols: usize) -> Vec<Vec<char>> {
        vec![vec![' '; cols]; rows]
    }

    fn agent() -> Connect4Agent {
        let mut config = AppConfig::default();
        config.policy.seed = Some(11);
        Connect4Agent::new("Team1", config)
    }

    #[test]
    fn init_accepts_either_symbol() {
        let mut a = agent();
        a.init_agent('X', 6, 7, &empty_grid(6, 7)).unwrap();
        assert_eq!(a.symbol(), Some(Player::X));
        a.init_agent('O', 6, 7, &empty_grid(6, 7)).unwrap();
        assert_eq!(a.symbol(), Some(Player::O));
    }

    #[test]
    fn init_rejects_bad_symbol_and_dimensions() {
        let mut a = agent();
        assert!(matches!(
            a.init_agent('Z', 6, 7, &empty_grid(6, 7)),
            Err(AgentError::InvalidSymbol('Z'))
        ));
        assert!(matches!(
            a.init_agent('X', 6, 7, &empty_grid(5, 7)),
            Err(AgentError::Board(_))
        ));
    }

    #[test]
    fn choose_move_is_one_based() {
        let mut a = agent();
        let col = a.choose_move(&empty_grid(6, 7), 6, 7, 'X').unwrap();
        assert_eq!(col, 4);
    }

    #[test]
    fn choose_move_on_full_board_fails() {
        let grid = vec![vec!['X', 'O'], vec!['O', 'X']];
        let mut a = agent();
        assert!(matches!(
            a.choose_move(&grid, 2, 2, 'X'),
            Err(AgentError::NoLegalMoves)
        ));
    }

    #[test]
    fn report_result_tallies() {
        let mut a = agent();
        let grid = empty_grid(6, 7);
        assert_eq!(a.report_result(&grid, "Team1", "Team2"), GameResult::Won);
        assert_eq!(a.report_result(&grid, "Team2", "Team1"), GameResult::Lost);
        assert_eq!(a.report_result(&grid, DRAW, DRAW), GameResult::Draw);
        assert_eq!(a.report_result(&grid, "Team3", "Team4"), GameResult::Unrelated);
        assert_eq!(
            a.metrics(),
            AgentMetrics {
                wins: 1,
                losses: 1,
                draws: 1,
                total_games: 3,
            }
        );
    }
}
