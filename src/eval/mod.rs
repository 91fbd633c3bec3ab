//! Static position evaluation.
//!
//! Material balance plus a small mobility term, with checkmate and drawn
//! positions short-circuited first. Scores are White-relative.

use crate::position::Position;
use crate::types::{Color, PieceValues, Score, Value, ALL_PIECES};

/// Centipawns per legal move for the side to move
const MOBILITY_WEIGHT: Value = 2;

/// Pure evaluation function over a position.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    values: PieceValues,
}

impl Evaluator {
    pub fn new(values: PieceValues) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &PieceValues {
        &self.values
    }

    /// Evaluate the position from White's point of view.
    ///
    /// The mobility term counts the legal moves of whichever side is to
    /// move, so the same placement scores differently with the other side
    /// on move.
    pub fn evaluate(&self, pos: &Position) -> Score {
        if pos.is_checkmate() {
            // The side to move has been mated
            return match pos.side_to_move() {
                Color::White => -Score::mate(),
                Color::Black => Score::mate(),
            };
        }
        if pos.is_stalemate() || pos.is_insufficient_material() || pos.can_claim_draw() {
            return Score::draw();
        }

        let mobility = MOBILITY_WEIGHT * pos.legal_move_count() as Value;
        let mobility = match pos.side_to_move() {
            Color::White => mobility,
            Color::Black => -mobility,
        };

        Score::cp(self.material(pos) + mobility)
    }

    /// Material balance (white's perspective)
    fn material(&self, pos: &Position) -> Value {
        ALL_PIECES
            .iter()
            .map(|&piece| {
                let white = pos.count(Color::White, piece) as Value;
                let black = pos.count(Color::Black, piece) as Value;
                self.values.of(piece) * (white - black)
            })
            .sum()
    }
}
