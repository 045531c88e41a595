use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::ai::heuristic::{Heuristic, WindowHeuristic};
use crate::game::{Board, Player};

use super::{SearchConfig, SearchEngine, SearchOutcome};

/// A node of the best-first frontier: a board reached from the root by
/// `moves`, with its cost (moves so far) and heuristic score.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub board: Board,
    pub moves: Vec<usize>,
    pub cost: i64,
    pub heuristic: i64,
}

impl SearchState {
    pub fn priority(&self) -> i64 {
        self.cost + self.heuristic
    }
}

// Max-heap order: highest `cost + heuristic` pops first. Equal priorities
// pop the lexicographically smaller move sequence first.
impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority()
            .cmp(&other.priority())
            .then_with(|| other.moves.cmp(&self.moves))
    }
}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchState {}

/// Heuristic best-first search. Only the acting player's disks are placed;
/// expansion stops at `best_first_max_moves` moves from the root. The answer
/// is the first move toward the highest-scoring state seen.
pub struct BestFirstSearch {
    config: SearchConfig,
    heuristic: Box<dyn Heuristic>,
}

impl BestFirstSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_heuristic(config, Box::new(WindowHeuristic::default()))
    }

    pub fn with_heuristic(config: SearchConfig, heuristic: Box<dyn Heuristic>) -> Self {
        BestFirstSearch { config, heuristic }
    }
}

impl SearchEngine for BestFirstSearch {
    fn search(&self, board: &Board, player: Player) -> SearchOutcome {
        let max_moves = self.config.best_first_max_moves;
        let mut budget = self.config.budget();
        let mut seen: HashSet<Board> = HashSet::new();
        let mut frontier = BinaryHeap::new();

        let start = SearchState {
            board: board.clone(),
            moves: Vec::new(),
            cost: 0,
            heuristic: self.heuristic.evaluate(board, player),
        };
        let mut best_moves: Vec<usize> = Vec::new();
        let mut best_score = start.heuristic;
        if self.config.dedupe_transpositions {
            seen.insert(start.board.clone());
        }
        frontier.push(start);

        while let Some(current) = frontier.pop() {
            if budget.tick() {
                break;
            }
            if current.moves.len() >= max_moves {
                continue;
            }

            for col in current.board.legal_columns() {
                let mut next = current.board.clone();
                if next.drop_piece(col, player.to_cell()).is_err() {
                    continue;
                }
                if self.config.dedupe_transpositions && !seen.insert(next.clone()) {
                    continue;
                }

                let mut moves = current.moves.clone();
                moves.push(col);
                let heuristic = self.heuristic.evaluate(&next, player);
                if heuristic > best_score {
                    best_score = heuristic;
                    best_moves = moves.clone();
                }
                frontier.push(SearchState {
                    board: next,
                    moves,
                    cost: current.cost + 1,
                    heuristic,
                });
            }
        }

        SearchOutcome {
            column: best_moves.first().copied(),
            score: best_score,
            depth: max_moves,
            nodes: budget.nodes(),
            stopped: budget.is_exhausted(),
        }
    }

    fn name(&self) -> &str {
        "BestFirst"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    fn state(moves: Vec<usize>, cost: i64, heuristic: i64) -> SearchState {
        SearchState {
            board: Board::standard(),
            moves,
            cost,
            heuristic,
        }
    }

    #[test]
    fn highest_priority_pops_first() {
        let mut heap = BinaryHeap::new();
        heap.push(state(vec![0], 1, 10));
        heap.push(state(vec![1], 1, 500));
        heap.push(state(vec![2], 1, -300));
        let order: Vec<Vec<usize>> = std::iter::from_fn(|| heap.pop().map(|s| s.moves)).collect();
        assert_eq!(order, vec![vec![1], vec![0], vec![2]]);
    }

    #[test]
    fn equal_priority_pops_smaller_moves_first() {
        let mut heap = BinaryHeap::new();
        heap.push(state(vec![4], 1, 0));
        heap.push(state(vec![2], 1, 0));
        assert_eq!(heap.pop().unwrap().moves, vec![2]);
    }

    #[test]
    fn extends_own_line() {
        // X has two at the bottom left; extending toward three scores best
        let mut board = Board::standard();
        board.drop_piece(0, Cell::X).unwrap();
        board.drop_piece(1, Cell::X).unwrap();
        board.drop_piece(6, Cell::O).unwrap();
        board.drop_piece(6, Cell::O).unwrap();
        let search = BestFirstSearch::new(SearchConfig::default());
        let outcome = search.search(&board, Player::X);
        let col = outcome.column.expect("improvement exists");
        assert!(board.legal_columns().contains(&col));
        assert!(outcome.score > 1_000, "expected a completed line, got {}", outcome.score);
    }

    #[test]
    fn no_improvement_returns_none() {
        // 1x4 board, X to place into the last cell cannot improve on the root
        let board = Board::from_rows(&["OXO."]).unwrap();
        let search = BestFirstSearch::new(SearchConfig::default());
        let outcome = search.search(&board, Player::X);
        assert_eq!(outcome.column, None);
    }

    #[test]
    fn dedupe_visits_fewer_states() {
        let board = Board::standard();
        let deduped = BestFirstSearch::new(SearchConfig::default()).search(&board, Player::X);
        let plain = BestFirstSearch::new(SearchConfig {
            dedupe_transpositions: false,
            ..SearchConfig::default()
        })
        .search(&board, Player::X);
        assert!(deduped.nodes < plain.nodes);
        // Every state up to four moves deep is popped once without dedupe
        assert_eq!(plain.nodes, 1 + 7 + 49 + 343 + 2401);
    }

    #[test]
    fn node_limit_stops_early() {
        let config = SearchConfig {
            node_limit: Some(5),
            ..SearchConfig::default()
        };
        let outcome = BestFirstSearch::new(config).search(&Board::standard(), Player::O);
        assert!(outcome.stopped);
    }

    #[test]
    fn time_limit_stops_long_expansion() {
        let config = SearchConfig {
            best_first_max_moves: 10,
            time_limit_ms: Some(1),
            ..SearchConfig::default()
        };
        let board = Board::standard();
        let outcome = BestFirstSearch::new(config).search(&board, Player::X);
        assert!(outcome.stopped);
        let col = outcome.column.expect("two-in-a-row beats the empty board");
        assert!(board.legal_columns().contains(&col));
    }
}
