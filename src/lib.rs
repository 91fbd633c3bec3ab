//! ChessBot - a fixed-depth negamax chess engine.
//!
//! - Rules, move generation and FEN parsing come from the `chess` crate
//! - Material + mobility evaluation
//! - Negamax with alpha-beta pruning and MVV-LVA/check move ordering
//! - UCI protocol, plus a terminal mode for playing against the engine

pub mod config;
pub mod error;
pub mod eval;
pub mod position;
pub mod search;
pub mod terminal;
pub mod types;
pub mod uci;
