//! Decision engine: window heuristic, search strategies, the turn policy,
//! and the agents built on them.

mod agent;
pub mod heuristic;
pub mod policy;
mod random;
pub mod search;

pub use agent::{Agent, AgentMetrics, EngineAgent};
pub use heuristic::{Heuristic, ScoreTable, WindowHeuristic};
pub use policy::{Decision, MoveSelector, PolicyConfig, Reason};
pub use random::RandomAgent;
pub use search::{
    AlphaBetaSearch, BestFirstSearch, MoveOrdering, SearchConfig, SearchEngine, SearchOutcome,
    Strategy,
};
