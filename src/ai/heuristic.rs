use crate::game::{lines, Board, Cell, Player, WindowCounts};

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, player: Player) -> i64;
}

/// Per-window score constants. Opponent terms outweigh own terms of the same
/// count, which biases play toward blocking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScoreTable {
    pub own_four: i64,
    pub opp_four: i64,
    pub own_three: i64,
    pub opp_three: i64,
    pub own_two: i64,
    pub opp_two: i64,
}

impl Default for ScoreTable {
    fn default() -> Self {
        ScoreTable {
            own_four: 100_000,
            opp_four: -200_000,
            own_three: 1_000,
            opp_three: -5_000,
            own_two: 100,
            opp_two: -200,
        }
    }
}

impl ScoreTable {
    /// Score one window. Mixed windows and single disks score zero.
    pub fn window_score(&self, counts: WindowCounts) -> i64 {
        match counts {
            WindowCounts { own: 4, .. } => self.own_four,
            WindowCounts { opp: 4, .. } => self.opp_four,
            WindowCounts { own: 3, empty: 1, .. } => self.own_three,
            WindowCounts { opp: 3, empty: 1, .. } => self.opp_three,
            WindowCounts { own: 2, empty: 2, .. } => self.own_two,
            WindowCounts { opp: 2, empty: 2, .. } => self.opp_two,
            _ => 0,
        }
    }

    /// Sum of window scores over every window on the board.
    pub fn score(&self, board: &Board, own: Cell, opp: Cell) -> i64 {
        lines::windows(board)
            .map(|w| self.window_score(w.counts(own, opp)))
            .sum()
    }
}

/// Default heuristic that scans all 4-cell windows and scores threats.
#[derive(Debug, Clone, Default)]
pub struct WindowHeuristic {
    table: ScoreTable,
}

impl WindowHeuristic {
    pub fn new(table: ScoreTable) -> Self {
        WindowHeuristic { table }
    }
}

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i64 {
        self.table
            .score(board, player.to_cell(), player.other().to_cell())
    }
}
