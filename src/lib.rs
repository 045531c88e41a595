//! # Connect Four Engine
//!
//! A bounded-depth Connect Four player. Given a board it picks the column
//! that best serves the side to move: immediate wins and blocks first, then
//! minimax with alpha-beta pruning (or heuristic best-first search) over a
//! weighted four-cell window heuristic.
//!
//! ## Modules
//!
//! - [`game`]: Board model, four-in-a-row windows and win detection, game state
//! - [`ai`]: Heuristic, search engines, move selector, agents
//! - [`harness`]: Game-manager contract: init, choose move, report result
//! - [`arena`]: Plays agents against each other
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
pub mod harness;
