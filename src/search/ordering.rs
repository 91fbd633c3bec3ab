//! Move ordering heuristics.
//!
//! Alpha-beta only prunes well when strong moves come first, so captures
//! (MVV-LVA) and checks are pulled to the front of the list.

use std::cmp::Reverse;

use crate::position::Position;
use crate::types::{Move, PieceValues};

/// Multiplier on the victim's value, so any capture of a more valuable
/// piece outranks any capture of a cheaper one.
const VICTIM_WEIGHT: i32 = 10;

/// Flat bonus for moves that give check, on top of any capture score
const CHECK_BONUS: i32 = 50;

/// Reorders candidate moves so the most forcing ones are searched first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveOrderer {
    values: PieceValues,
}

impl MoveOrderer {
    pub fn new(values: PieceValues) -> Self {
        Self { values }
    }

    /// Score a move for ordering (higher = search first)
    pub fn score_move(&self, pos: &Position, m: Move) -> i32 {
        let mut score = 0;

        if pos.is_capture(m) {
            if let Some(victim) = pos.captured_piece(m) {
                score += VICTIM_WEIGHT * self.values.of(victim);
            }
            if let Some(attacker) = pos.piece_on(m.get_source()) {
                score -= self.values.of(attacker);
            }
        }

        if pos.gives_check(m) {
            score += CHECK_BONUS;
        }

        score
    }

    /// Return `moves` sorted best-first. Equal scores keep their input order.
    pub fn order(&self, pos: &Position, moves: &[Move]) -> Vec<Move> {
        let mut scored: Vec<(Move, i32)> = moves
            .iter()
            .map(|&m| (m, self.score_move(pos, m)))
            .collect();
        scored.sort_by_key(|&(_, score)| Reverse(score));
        scored.into_iter().map(|(m, _)| m).collect()
    }
}
