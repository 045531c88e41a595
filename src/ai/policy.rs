use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::ai::heuristic::WindowHeuristic;
use crate::ai::search::{AlphaBetaSearch, BestFirstSearch, SearchConfig, SearchEngine, Strategy};
use crate::config::AppConfig;
use crate::error::AgentError;
use crate::game::{wins_at, Board, Player};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Play the center column on an empty board without searching.
    pub open_center: bool,
    /// Seed for the random fallback. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            open_center: true,
            seed: None,
        }
    }
}

/// Why a column was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Reason {
    Win,
    Block,
    Opening,
    Search,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Decision {
    /// Chosen column, 0-based
    pub column: usize,
    pub reason: Reason,
}

/// Turn policy: immediate win, then immediate block, then the opening rule,
/// then the search engine, then center, then a random legal column.
pub struct MoveSelector {
    config: PolicyConfig,
    engine: Box<dyn SearchEngine>,
    rng: StdRng,
}

impl MoveSelector {
    pub fn new(config: PolicyConfig, engine: Box<dyn SearchEngine>) -> Self {
        let rng = seeded_rng(config.seed);
        MoveSelector { config, engine, rng }
    }

    /// Build the selector and search engine described by `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let engine = build_engine(&config.search, WindowHeuristic::new(config.heuristic.clone()));
        Self::new(config.policy.clone(), engine)
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Pick a 0-based column for `player`. Fails only on a full board.
    pub fn choose(&mut self, board: &Board, player: Player) -> Result<Decision, AgentError> {
        let legal = board.legal_columns();
        if legal.is_empty() {
            return Err(AgentError::NoLegalMoves);
        }

        if let Some(column) = winning_column(board, player) {
            return Ok(self.decide(column, Reason::Win));
        }
        if let Some(column) = winning_column(board, player.other()) {
            return Ok(self.decide(column, Reason::Block));
        }

        let center = board.center_column();
        if self.config.open_center && board.is_empty() && legal.contains(&center) {
            return Ok(self.decide(center, Reason::Opening));
        }

        let outcome = self.engine.search(board, player);
        debug!(
            engine = self.engine.name(),
            column = ?outcome.column,
            score = outcome.score,
            depth = outcome.depth,
            nodes = outcome.nodes,
            stopped = outcome.stopped,
            "search finished"
        );
        if let Some(column) = outcome.column.filter(|c| legal.contains(c)) {
            return Ok(self.decide(column, Reason::Search));
        }

        if legal.contains(&center) {
            return Ok(self.decide(center, Reason::Fallback));
        }
        let column = random_column(&mut self.rng, &legal).ok_or(AgentError::NoLegalMoves)?;
        Ok(self.decide(column, Reason::Fallback))
    }

    fn decide(&self, column: usize, reason: Reason) -> Decision {
        debug!(column, ?reason, "move chosen");
        Decision { column, reason }
    }
}

pub fn build_engine(config: &SearchConfig, heuristic: WindowHeuristic) -> Box<dyn SearchEngine> {
    match config.strategy {
        Strategy::AlphaBeta => Box::new(AlphaBetaSearch::with_heuristic(
            config.clone(),
            Box::new(heuristic),
        )),
        Strategy::BestFirst => Box::new(BestFirstSearch::with_heuristic(
            config.clone(),
            Box::new(heuristic),
        )),
    }
}

/// RNG for fallback play. `None` seeds from the OS.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Uniform pick from `columns`.
pub fn random_column(rng: &mut StdRng, columns: &[usize]) -> Option<usize> {
    if columns.is_empty() {
        return None;
    }
    Some(columns[rng.random_range(0..columns.len())])
}

/// First column, ascending, where `player` completes four in a row.
pub fn winning_column(board: &Board, player: Player) -> Option<usize> {
    let mut scratch = board.clone();
    board.legal_columns().into_iter().find(|&col| {
        let Ok(row) = scratch.drop_piece(col, player.to_cell()) else {
            return false;
        };
        let wins = wins_at(&scratch, row, col);
        let undone = scratch.undo(col);
        debug_assert!(undone.is_ok());
        wins
    })
}
