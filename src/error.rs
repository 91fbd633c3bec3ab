//! Error types for the engine and its protocol front-end.

use thiserror::Error;

/// Malformed protocol input. Raised while tokenizing a command, before
/// anything touches the current position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("missing argument for `{0}`")]
    MissingArgument(&'static str),

    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),

    #[error("position descriptor needs 6 fields, got {0}")]
    FenFieldCount(usize),

    #[error("invalid position descriptor `{0}`")]
    InvalidFen(String),

    #[error("invalid move clock `{0}`")]
    InvalidClock(String),

    #[error("unparseable move `{0}`")]
    InvalidMove(String),

    #[error("invalid depth `{0}`")]
    InvalidDepth(String),
}

/// Errors surfaced by the engine to its callers.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("illegal move `{mv}` in position `{fen}`")]
    IllegalMove { mv: String, fen: String },

    #[error("no legal move in position `{fen}`")]
    NoLegalMove { fen: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
