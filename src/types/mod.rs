//! Core types for the chess engine.
//!
//! Board and move types come straight from the `chess` crate, which acts as
//! the rules engine. Engine-specific types (Score, Depth, piece values) live
//! here so search and evaluation agree on units.

mod score;
mod depth;

pub use score::{Score, SCORE_INFINITY, SCORE_MATE, SCORE_DRAW};
pub use depth::Depth;

// Re-export chess crate types as canonical types
pub use chess::{
    Board,
    ChessMove as Move,
    Square,
    Piece,
    Color,
    BitBoard,
    File,
    Rank,
    MoveGen,
    BoardStatus,
    ALL_PIECES,
    EMPTY,
};

/// Node count type
pub type NodeCount = u64;

/// Centipawn value type (for piece values, etc.)
pub type Value = i32;

// Piece values in centipawns
pub const PAWN_VALUE: Value = 100;
pub const KNIGHT_VALUE: Value = 320;
pub const BISHOP_VALUE: Value = 330;
pub const ROOK_VALUE: Value = 500;
pub const QUEEN_VALUE: Value = 900;
pub const KING_VALUE: Value = 0;

/// Material value of each piece kind, in centipawns.
///
/// Owned by value by whatever needs it (evaluator, move orderer), so two
/// engines in the same process never share a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceValues {
    values: [Value; 6],
}

impl PieceValues {
    pub const STANDARD: PieceValues = PieceValues {
        values: [
            PAWN_VALUE,
            KNIGHT_VALUE,
            BISHOP_VALUE,
            ROOK_VALUE,
            QUEEN_VALUE,
            KING_VALUE,
        ],
    };

    /// Build a table in `ALL_PIECES` order: pawn, knight, bishop, rook, queen, king.
    pub const fn new(values: [Value; 6]) -> Self {
        Self { values }
    }

    /// Get the material value of a piece in centipawns
    #[inline]
    pub fn of(&self, piece: Piece) -> Value {
        self.values[piece.to_index()]
    }
}

impl Default for PieceValues {
    fn default() -> Self {
        Self::STANDARD
    }
}
