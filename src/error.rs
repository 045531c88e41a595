use std::path::PathBuf;

use crate::game::PlayError;

/// Errors raised when a boundary board cannot be turned into a [`crate::game::Board`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board must have at least one row and one column (got {rows}x{cols})")]
    EmptyDimensions { rows: usize, cols: usize },

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row}: expected {expected} columns, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid symbol {symbol:?} at row {row}, column {col}")]
    InvalidSymbol { row: usize, col: usize, symbol: char },

    #[error("disk at row {row}, column {col} has an empty cell below it")]
    FloatingPiece { row: usize, col: usize },
}

/// Errors surfaced through the agent contract.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("invalid player symbol {0:?} (expected 'X' or 'O')")]
    InvalidSymbol(char),

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),

    #[error("no legal columns: the board is full")]
    NoLegalMoves,
}

/// Errors that can occur while running games between agents.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("{agent} selected illegal column {column} (legal: {legal:?})")]
    IllegalMove {
        agent: String,
        column: usize,
        legal: Vec<usize>,
    },

    #[error("{agent} failed to choose a move: {source}")]
    Agent { agent: String, source: AgentError },

    #[error("game should be terminal but has no outcome")]
    MissingOutcome,

    #[error("move rejected: {0}")]
    Play(#[from] PlayError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
