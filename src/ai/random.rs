use rand::rngs::StdRng;

use super::agent::Agent;
use super::policy::{random_column, seeded_rng, winning_column};
use crate::error::AgentError;
use crate::game::GameState;

/// Baseline opponent for matches. Plays a random legal column; the greedy
/// variant takes an immediate win first.
pub struct RandomAgent {
    rng: StdRng,
    take_wins: bool,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self::build(None, false)
    }

    pub fn seeded(seed: u64) -> Self {
        Self::build(Some(seed), false)
    }

    pub fn greedy(seed: Option<u64>) -> Self {
        Self::build(seed, true)
    }

    fn build(seed: Option<u64>, take_wins: bool) -> Self {
        RandomAgent {
            rng: seeded_rng(seed),
            take_wins,
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, state: &GameState) -> Result<usize, AgentError> {
        let legal = state.legal_actions();
        if self.take_wins && !legal.is_empty() {
            if let Some(column) = winning_column(state.board(), state.current_player()) {
                return Ok(column);
            }
        }
        random_column(&mut self.rng, &legal).ok_or(AgentError::NoLegalMoves)
    }

    fn name(&self) -> &str {
        if self.take_wins {
            "Greedy"
        } else {
            "Random"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[usize]) -> GameState {
        moves
            .iter()
            .fold(GameState::initial(), |state, &col| state.apply_move(col).unwrap())
    }

    #[test]
    fn never_picks_a_full_column() {
        // Column 3 alternates X/O to the top without a win
        let state = play(&[3, 3, 3, 3, 3, 3]);
        assert!(!state.legal_actions().contains(&3));

        let mut agent = RandomAgent::seeded(7);
        for _ in 0..200 {
            let action = agent.select_action(&state).unwrap();
            assert_ne!(action, 3);
            assert!(state.legal_actions().contains(&action));
        }
    }

    #[test]
    fn only_open_column_is_chosen() {
        let mut state = GameState::with_dimensions(2, 2);
        state = state.apply_move(0).unwrap();
        state = state.apply_move(0).unwrap();
        let mut agent = RandomAgent::seeded(1);
        assert_eq!(agent.select_action(&state).unwrap(), 1);
    }

    #[test]
    fn seeded_agents_replay_the_same_game() {
        let mut a = RandomAgent::seeded(42);
        let mut b = RandomAgent::seeded(42);
        let mut state = play(&[3, 2]);
        while !state.is_terminal() {
            let col = a.select_action(&state).unwrap();
            assert_eq!(b.select_action(&state).unwrap(), col);
            state = state.apply_move(col).unwrap();
        }
        assert!(state.outcome().is_some());
    }

    #[test]
    fn greedy_takes_immediate_win() {
        // X holds three on the bottom row, O stacked on top
        let state = play(&[0, 0, 1, 1, 2, 2]);
        for seed in 0..10 {
            let mut agent = RandomAgent::greedy(Some(seed));
            assert_eq!(agent.select_action(&state).unwrap(), 3);
        }
    }

    #[test]
    fn finished_game_has_no_action() {
        let state = play(&[0, 1, 0, 1, 0, 1, 0]);
        assert!(state.is_terminal());
        let mut agent = RandomAgent::seeded(3);
        assert!(matches!(
            agent.select_action(&state),
            Err(AgentError::NoLegalMoves)
        ));
    }

    #[test]
    fn names_reflect_variant() {
        assert_eq!(RandomAgent::new().name(), "Random");
        assert_eq!(RandomAgent::greedy(None).name(), "Greedy");
    }
}
