//! UCI (Universal Chess Interface) protocol front-end.
//!
//! Only the subset a fixed-depth engine needs is understood: identification,
//! readiness, position setup and `go depth N`. See:
//! http://wbec-ridderkerk.nl/html/UCIProtocol.html

mod parser;
mod handler;

pub use handler::UciHandler;
pub use parser::{parse_command, PositionSource, UciCommand};

use crate::error::ProtocolError;
use crate::types::{Move, Piece, Square};
use std::str::FromStr;

/// UCI engine identification
pub const ENGINE_NAME: &str = "ChessBot";
pub const ENGINE_AUTHOR: &str = "ChessBot developers";

/// Parse a move in compact notation (e.g. "e2e4", "e7e8q").
///
/// Only the syntax is checked here; whether the move is legal depends on
/// the position it is played in.
pub fn parse_move(move_str: &str) -> Result<Move, ProtocolError> {
    let invalid = || ProtocolError::InvalidMove(move_str.to_string());

    if !move_str.is_ascii() || !(4..=5).contains(&move_str.len()) {
        return Err(invalid());
    }

    let from = Square::from_str(&move_str[0..2]).map_err(|_| invalid())?;
    let to = Square::from_str(&move_str[2..4]).map_err(|_| invalid())?;

    let promo = match move_str.as_bytes().get(4) {
        None => None,
        Some(b'q') | Some(b'Q') => Some(Piece::Queen),
        Some(b'r') | Some(b'R') => Some(Piece::Rook),
        Some(b'b') | Some(b'B') => Some(Piece::Bishop),
        Some(b'n') | Some(b'N') => Some(Piece::Knight),
        Some(_) => return Err(invalid()),
    };

    Ok(Move::new(from, to, promo))
}
