//! Plays agents against each other on confirmed boards.

use tracing::{debug, info};

use crate::ai::Agent;
use crate::error::MatchError;
use crate::game::{GameOutcome, GameState, Player};

/// Result of a single game.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GameRecord {
    pub moves: Vec<usize>,
    pub outcome: GameOutcome,
}

/// Aggregate over a match. Agent A moves first in even-numbered games.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct MatchSummary {
    pub agent_a: String,
    pub agent_b: String,
    pub games: usize,
    pub wins_a: usize,
    pub wins_b: usize,
    pub draws: usize,
    pub avg_game_length: f64,
}

impl MatchSummary {
    pub fn win_rate_a(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins_a as f64 / self.games as f64
        }
    }
}

/// Play one game; `first` plays X.
pub fn play_game(
    first: &mut dyn Agent,
    second: &mut dyn Agent,
    rows: usize,
    cols: usize,
) -> Result<GameRecord, MatchError> {
    let mut state = GameState::with_dimensions(rows, cols);
    let mut moves = Vec::new();

    while !state.is_terminal() {
        let agent: &mut dyn Agent = match state.current_player() {
            Player::X => &mut *first,
            Player::O => &mut *second,
        };
        let action = agent
            .select_action(&state)
            .map_err(|source| MatchError::Agent {
                agent: agent.name().to_string(),
                source,
            })?;
        let legal = state.legal_actions();
        if !legal.contains(&action) {
            return Err(MatchError::IllegalMove {
                agent: agent.name().to_string(),
                column: action,
                legal,
            });
        }
        state.apply_move_mut(action)?;
        moves.push(action);
    }

    let outcome = state.outcome().ok_or(MatchError::MissingOutcome)?;
    debug!(moves = moves.len(), ?outcome, "game finished\n{}", state.board());
    Ok(GameRecord { moves, outcome })
}

/// Play `games` games, alternating which agent moves first.
pub fn play_match(
    a: &mut dyn Agent,
    b: &mut dyn Agent,
    games: usize,
    rows: usize,
    cols: usize,
) -> Result<MatchSummary, MatchError> {
    let mut summary = MatchSummary {
        agent_a: a.name().to_string(),
        agent_b: b.name().to_string(),
        ..MatchSummary::default()
    };
    let mut total_moves = 0;

    for game in 0..games {
        let a_first = game % 2 == 0;
        let record = if a_first {
            play_game(a, b, rows, cols)?
        } else {
            play_game(b, a, rows, cols)?
        };
        total_moves += record.moves.len();

        match record.outcome {
            GameOutcome::Draw => summary.draws += 1,
            GameOutcome::Winner(p) => {
                if (p == Player::X) == a_first {
                    summary.wins_a += 1;
                } else {
                    summary.wins_b += 1;
                }
            }
        }
        summary.games += 1;
    }

    if summary.games > 0 {
        summary.avg_game_length = total_moves as f64 / summary.games as f64;
    }
    info!(
        a = %summary.agent_a,
        b = %summary.agent_b,
        games = summary.games,
        wins_a = summary.wins_a,
        wins_b = summary.wins_b,
        draws = summary.draws,
        "match finished"
    );
    Ok(summary)
}
