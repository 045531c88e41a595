//! Adversarial search over hypothetical boards.
//!
//! Two interchangeable engines implement [`SearchEngine`]:
//!
//! - [`AlphaBetaSearch`]: depth-bounded minimax with alpha-beta pruning.
//! - [`BestFirstSearch`]: heuristic best-first expansion with a move-count bound.
//!   The heuristic is not a lower bound on anything, so this is not A*.
//!
//! Both work on a private copy of the caller's board; the confirmed board is
//! never left in a speculative state.

mod alpha_beta;
mod best_first;

use std::time::{Duration, Instant};

use crate::game::{Board, Player};

pub use alpha_beta::AlphaBetaSearch;
pub use best_first::{BestFirstSearch, SearchState};

/// Which engine the move selector falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    AlphaBeta,
    BestFirst,
}

/// Column iteration order inside the search tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOrdering {
    Ascending,
    CenterOut,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: Strategy,
    pub move_ordering: MoveOrdering,
    /// Depth used while fewer than `early_threshold` disks are on the board.
    pub early_depth: usize,
    pub default_depth: usize,
    /// Depth used once more than `late_threshold` disks are on the board.
    pub late_depth: usize,
    pub early_threshold: usize,
    pub late_threshold: usize,
    /// Terminal score; wins are `win_score - depth`, losses `-win_score + depth`.
    pub win_score: i64,
    pub best_first_max_moves: usize,
    pub dedupe_transpositions: bool,
    pub node_limit: Option<u64>,
    pub time_limit_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            strategy: Strategy::AlphaBeta,
            move_ordering: MoveOrdering::CenterOut,
            early_depth: 5,
            default_depth: 4,
            late_depth: 3,
            early_threshold: 10,
            late_threshold: 20,
            win_score: 1_000,
            best_first_max_moves: 4,
            dedupe_transpositions: true,
            node_limit: None,
            time_limit_ms: None,
        }
    }
}

impl SearchConfig {
    /// Search depth for a board holding `pieces` disks.
    pub fn depth_for(&self, pieces: usize) -> usize {
        if pieces < self.early_threshold {
            self.early_depth
        } else if pieces > self.late_threshold {
            self.late_depth
        } else {
            self.default_depth
        }
    }

    pub fn budget(&self) -> SearchBudget {
        SearchBudget::new(self.node_limit, self.time_limit_ms.map(Duration::from_millis))
    }
}

/// How often the wall clock is read, in nodes.
const TIME_CHECK_INTERVAL: u64 = 1024;

/// Node and wall-clock cap for one decision. Once exhausted it stays exhausted.
#[derive(Debug, Clone)]
pub struct SearchBudget {
    nodes: u64,
    node_limit: Option<u64>,
    deadline: Option<Instant>,
    exhausted: bool,
}

impl SearchBudget {
    pub fn new(node_limit: Option<u64>, time_limit: Option<Duration>) -> Self {
        SearchBudget {
            nodes: 0,
            node_limit,
            deadline: time_limit.map(|t| Instant::now() + t),
            exhausted: false,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(None, None)
    }

    /// Count one node. Returns `true` once the budget has run out.
    pub fn tick(&mut self) -> bool {
        self.nodes += 1;
        if self.exhausted {
            return true;
        }
        if self.node_limit.is_some_and(|limit| self.nodes > limit) {
            self.exhausted = true;
        } else if self.nodes % TIME_CHECK_INTERVAL == 0
            && self.deadline.is_some_and(|d| Instant::now() >= d)
        {
            self.exhausted = true;
        }
        self.exhausted
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

/// Result of one search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Chosen column (0-based), if the search produced one
    pub column: Option<usize>,
    pub score: i64,
    pub depth: usize,
    pub nodes: u64,
    /// True if the budget ran out before the search finished
    pub stopped: bool,
}

/// A search strategy that picks a column for `player`.
pub trait SearchEngine: Send {
    fn search(&self, board: &Board, player: Player) -> SearchOutcome;

    fn name(&self) -> &str;
}
