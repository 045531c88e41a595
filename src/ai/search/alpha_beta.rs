use crate::ai::heuristic::{Heuristic, WindowHeuristic};
use crate::game::{has_four_in_row, Board, Cell, Player};

use super::{MoveOrdering, SearchBudget, SearchConfig, SearchEngine, SearchOutcome};

/// Minimax with alpha-beta pruning. Depth adapts to the number of disks on
/// the board; the root picks the column whose reply value is highest.
pub struct AlphaBetaSearch {
    config: SearchConfig,
    heuristic: Box<dyn Heuristic>,
}

impl AlphaBetaSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_heuristic(config, Box::new(WindowHeuristic::default()))
    }

    pub fn with_heuristic(config: SearchConfig, heuristic: Box<dyn Heuristic>) -> Self {
        AlphaBetaSearch { config, heuristic }
    }

    /// Search to an explicit depth instead of the adaptive one.
    pub fn search_to_depth(&self, board: &Board, player: Player, max_depth: usize) -> SearchOutcome {
        let mut scratch = board.clone();
        let mut budget = self.config.budget();
        let center = board.center_column();

        let mut best_column = None;
        let mut best_score = i64::MIN;

        for col in order(&scratch, self.config.move_ordering) {
            if budget.is_exhausted() && best_column.is_some() {
                break;
            }
            if scratch.drop_piece(col, player.to_cell()).is_err() {
                continue;
            }
            let score = {
                let mut tree = Tree::new(self, player, max_depth, &mut budget);
                tree.alpha_beta(&mut scratch, 0, false, i64::MIN, i64::MAX)
            };
            let undone = scratch.undo(col);
            debug_assert!(undone.is_ok());

            if score > best_score || (score == best_score && col == center) {
                best_score = score;
                best_column = Some(col);
            }
        }

        SearchOutcome {
            column: best_column,
            score: best_score,
            depth: max_depth,
            nodes: budget.nodes(),
            stopped: budget.is_exhausted(),
        }
    }

    /// Value of `board` for `player` to move, searched as a maximizing root.
    pub fn value(&self, board: &Board, player: Player, max_depth: usize) -> i64 {
        let mut scratch = board.clone();
        let mut budget = SearchBudget::unlimited();
        let mut tree = Tree::new(self, player, max_depth, &mut budget);
        tree.alpha_beta(&mut scratch, 0, true, i64::MIN, i64::MAX)
    }
}

impl SearchEngine for AlphaBetaSearch {
    fn search(&self, board: &Board, player: Player) -> SearchOutcome {
        let depth = self.config.depth_for(board.piece_count());
        self.search_to_depth(board, player, depth)
    }

    fn name(&self) -> &str {
        "AlphaBeta"
    }
}

fn order(board: &Board, ordering: MoveOrdering) -> Vec<usize> {
    match ordering {
        MoveOrdering::Ascending => board.legal_columns(),
        MoveOrdering::CenterOut => board.legal_columns_center_out(),
    }
}

/// One root move's subtree walk. The acting player maximizes.
struct Tree<'a> {
    me: Cell,
    opp: Cell,
    player: Player,
    max_depth: usize,
    win_score: i64,
    ordering: MoveOrdering,
    heuristic: &'a dyn Heuristic,
    budget: &'a mut SearchBudget,
}

impl<'a> Tree<'a> {
    fn new(
        search: &'a AlphaBetaSearch,
        player: Player,
        max_depth: usize,
        budget: &'a mut SearchBudget,
    ) -> Self {
        Tree {
            me: player.to_cell(),
            opp: player.other().to_cell(),
            player,
            max_depth,
            win_score: search.config.win_score,
            ordering: search.config.move_ordering,
            heuristic: search.heuristic.as_ref(),
            budget,
        }
    }

    /// Terminal and cutoff scoring, in priority order: own win, opponent win,
    /// depth cutoff, draw, exhausted budget.
    fn leaf_value(&mut self, board: &Board, depth: usize) -> Option<i64> {
        let depth_score = depth as i64;
        if has_four_in_row(board, self.me) {
            return Some(self.win_score - depth_score);
        }
        if has_four_in_row(board, self.opp) {
            return Some(-self.win_score + depth_score);
        }
        if depth >= self.max_depth {
            return Some(self.heuristic.evaluate(board, self.player));
        }
        if board.is_full() {
            return Some(0);
        }
        if self.budget.tick() {
            return Some(self.heuristic.evaluate(board, self.player));
        }
        None
    }

    fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: usize,
        maximizing: bool,
        mut alpha: i64,
        mut beta: i64,
    ) -> i64 {
        if let Some(value) = self.leaf_value(board, depth) {
            return value;
        }

        let mover = if maximizing { self.me } else { self.opp };
        let mut best = if maximizing { i64::MIN } else { i64::MAX };

        for col in order(board, self.ordering) {
            if board.drop_piece(col, mover).is_err() {
                continue;
            }
            let value = self.alpha_beta(board, depth + 1, !maximizing, alpha, beta);
            let undone = board.undo(col);
            debug_assert!(undone.is_ok());

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }

    /// Plain minimax over the same tree, without pruning.
    #[cfg(test)]
    fn exhaustive(&mut self, board: &mut Board, depth: usize, maximizing: bool) -> i64 {
        if let Some(value) = self.leaf_value(board, depth) {
            return value;
        }

        let mover = if maximizing { self.me } else { self.opp };
        let children: Vec<i64> = order(board, self.ordering)
            .into_iter()
            .map(|col| {
                board.drop_piece(col, mover).unwrap();
                let value = self.exhaustive(board, depth + 1, !maximizing);
                board.undo(col).unwrap();
                value
            })
            .collect();

        if maximizing {
            children.into_iter().max().unwrap()
        } else {
            children.into_iter().min().unwrap()
        }
    }
}
