//! Fixed-depth negamax with alpha-beta pruning.
//!
//! Every score returned here is relative to the side to move. One position
//! is threaded through the whole tree: each child is entered with `apply`
//! and left with `undo` before its score is even looked at.

use super::SearchEngine;
use crate::position::Position;
use crate::types::{Color, Depth, Move, Score};

/// Static score of a leaf, from the mover's point of view
pub(super) fn leaf_score(engine: &SearchEngine, pos: &Position) -> Score {
    let score = engine.evaluator.evaluate(pos);
    match pos.side_to_move() {
        Color::White => score,
        Color::Black => -score,
    }
}

/// Negamax search of `pos` to `depth` plies inside the `(alpha, beta)` window.
pub(super) fn negamax(
    engine: &mut SearchEngine,
    pos: &mut Position,
    depth: Depth,
    mut alpha: Score,
    beta: Score,
) -> Score {
    engine.inc_nodes();

    if depth.is_exhausted() || pos.is_game_over() {
        return leaf_score(engine, pos);
    }

    let moves = engine.orderer.order(pos, &pos.legal_moves());
    let mut best = Score::neg_infinity();

    for m in moves {
        pos.apply(m);
        let value = -negamax(engine, pos, depth - 1, -beta, -alpha);
        pos.undo();

        best = best.max(value);
        alpha = alpha.max(best);

        // Beta cutoff
        if alpha >= beta {
            break;
        }
    }

    best
}

/// Root driver: scores every move with a full window and keeps the best.
///
/// The root never prunes, so the returned move is the true best at this
/// depth and not merely one that proves a bound. Ties keep the earliest
/// move in search order.
pub(super) fn root(
    engine: &mut SearchEngine,
    pos: &mut Position,
    depth: Depth,
) -> (Option<Move>, Score) {
    engine.inc_nodes();

    let moves = engine.orderer.order(pos, &pos.legal_moves());
    let mut best: Option<(Move, Score)> = None;

    for m in moves {
        pos.apply(m);
        let value = -negamax(engine, pos, depth - 1, Score::neg_infinity(), Score::infinity());
        pos.undo();

        tracing::trace!(mv = %m, score = value.raw(), "root move");

        if best.map_or(true, |(_, best_score)| value > best_score) {
            best = Some((m, value));
        }
    }

    match best {
        Some((m, score)) => (Some(m), score),
        None => (None, leaf_score(engine, pos)),
    }
}
