use crate::config::AppConfig;
use crate::error::AgentError;
use crate::game::GameState;

use super::policy::{Decision, MoveSelector};

/// Win/loss tally reported back through the harness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct AgentMetrics {
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
    pub total_games: u64,
}

/// Universal interface for all agents that play through [`crate::arena`].
pub trait Agent {
    /// Select a 0-based column given the current game state.
    fn select_action(&mut self, state: &GameState) -> Result<usize, AgentError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// The heuristic engine: tactical checks, then search.
pub struct EngineAgent {
    name: String,
    selector: MoveSelector,
    last_decision: Option<Decision>,
}

impl EngineAgent {
    pub fn new(config: &AppConfig) -> Self {
        let selector = MoveSelector::from_config(config);
        EngineAgent {
            name: format!("Engine({})", selector.engine_name()),
            selector,
            last_decision: None,
        }
    }

    pub fn last_decision(&self) -> Option<Decision> {
        self.last_decision
    }
}

impl Agent for EngineAgent {
    fn select_action(&mut self, state: &GameState) -> Result<usize, AgentError> {
        let decision = self.selector.choose(state.board(), state.current_player())?;
        self.last_decision = Some(decision);
        Ok(decision.column)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::policy::Reason;
    use crate::ai::search::Strategy;

    #[test]
    fn engine_agent_opens_in_center() {
        let mut agent = EngineAgent::new(&AppConfig::default());
        let action = agent.select_action(&GameState::initial()).unwrap();
        assert_eq!(action, 3);
        assert_eq!(agent.last_decision().map(|d| d.reason), Some(Reason::Opening));
    }

    #[test]
    fn engine_agent_name_reflects_strategy() {
        let mut config = AppConfig::default();
        assert_eq!(EngineAgent::new(&config).name(), "Engine(AlphaBeta)");
        config.search.strategy = Strategy::BestFirst;
        assert_eq!(EngineAgent::new(&config).name(), "Engine(BestFirst)");
    }

    #[test]
    fn engine_agent_selects_legal_action_mid_game() {
        let mut agent = EngineAgent::new(&AppConfig::default());
        let mut state = GameState::initial();
        for col in [3, 3, 2, 4, 3, 2] {
            state = state.apply_move(col).unwrap();
        }
        let action = agent.select_action(&state).unwrap();
        assert!(state.legal_actions().contains(&action));
    }

    #[test]
    fn engine_agent_reports_full_board() {
        let mut agent = EngineAgent::new(&AppConfig::default());
        let mut state = GameState::with_dimensions(1, 2);
        state = state.apply_move(0).unwrap();
        state = state.apply_move(1).unwrap();
        assert!(state.legal_actions().is_empty());
        assert!(matches!(
            agent.select_action(&state),
            Err(AgentError::NoLegalMoves)
        ));
        assert_eq!(agent.last_decision(), None);
    }
}
