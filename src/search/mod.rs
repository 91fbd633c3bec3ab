//! Search module for the chess engine.
//!
//! # Architecture
//! - `SearchEngine`: owns the evaluator and move orderer, counts nodes
//! - `negamax`: fixed-depth alpha-beta search and the root driver
//! - `ordering`: capture and check ordering (MVV-LVA)
//!
//! There is no iterative deepening, transposition table, quiescence search
//! or time control: a search runs to its fixed depth and returns.

mod negamax;
mod ordering;

pub use ordering::MoveOrderer;

use crate::error::EngineError;
use crate::eval::Evaluator;
use crate::position::Position;
use crate::types::{Depth, Move, NodeCount, PieceValues, Score};
use std::time::Instant;

/// Search statistics collected during search
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub nodes: NodeCount,
    pub depth: i32,
    pub time_ms: u64,
}

impl SearchStats {
    pub fn nps(&self) -> u64 {
        if self.time_ms > 0 {
            self.nodes * 1000 / self.time_ms
        } else {
            0
        }
    }
}

/// Result of a root search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Chosen move; `None` only when the position has no legal move
    pub best_move: Option<Move>,
    /// Score backing the choice, relative to the side to move
    pub score: Score,
    pub stats: SearchStats,
}

/// Fixed-depth search engine
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    evaluator: Evaluator,
    orderer: MoveOrderer,
    stats: SearchStats,
}

impl SearchEngine {
    pub fn new(values: PieceValues) -> Self {
        Self {
            evaluator: Evaluator::new(values),
            orderer: MoveOrderer::new(values),
            stats: SearchStats::default(),
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn orderer(&self) -> &MoveOrderer {
        &self.orderer
    }

    /// Statistics of the most recent search
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Increment node counter
    #[inline]
    fn inc_nodes(&mut self) {
        self.stats.nodes += 1;
    }

    /// Pick the best move for the side to move, searching `depth` plies.
    ///
    /// `pos` is mutated during the search and restored before returning.
    /// On a position with no legal move the outcome carries no move and the
    /// static score of the position.
    pub fn choose_move(&mut self, pos: &mut Position, depth: Depth) -> SearchOutcome {
        self.stats = SearchStats {
            depth: depth.raw(),
            ..SearchStats::default()
        };
        let start = Instant::now();

        let (best_move, score) = negamax::root(self, pos, depth);

        self.stats.time_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            depth = depth.raw(),
            score = score.raw(),
            nodes = self.stats.nodes,
            time_ms = self.stats.time_ms,
            best_move = ?best_move.map(|m| m.to_string()),
            "search finished"
        );

        SearchOutcome {
            best_move,
            score,
            stats: self.stats.clone(),
        }
    }

    /// Like `choose_move`, but a position without moves is an error.
    pub fn best_move(&mut self, pos: &mut Position, depth: Depth) -> Result<Move, EngineError> {
        self.choose_move(pos, depth)
            .best_move
            .ok_or_else(|| EngineError::NoLegalMove { fen: pos.fen() })
    }

    /// Negamax value of `pos` at `depth` inside `(alpha, beta)`, relative to
    /// the side to move.
    pub fn negamax(&mut self, pos: &mut Position, depth: Depth, alpha: Score, beta: Score) -> Score {
        negamax::negamax(self, pos, depth, alpha, beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uci::parse_move;

    #[test]
    fn test_search_finds_move() {
        let mut pos = Position::startpos();
        let outcome = SearchEngine::default().choose_move(&mut pos, Depth::new(2));
        let m = outcome.best_move.expect("startpos has moves");
        assert!(Position::startpos().is_legal(m));
        assert!(outcome.stats.nodes > 20);
    }

    #[test]
    fn test_search_restores_position() {
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
        let mut pos = Position::from_fen(fen).unwrap();
        SearchEngine::default().choose_move(&mut pos, Depth::new(3));
        assert_eq!(pos.fen(), fen);
        assert_eq!(pos.ply(), 0);
    }

    #[test]
    fn test_single_legal_move() {
        // Black's king can only step to h7
        let fen = "7k/8/8/8/8/8/8/K5R1 b - - 0 1";
        for depth in 1..=4 {
            let mut pos = Position::from_fen(fen).unwrap();
            let m = SearchEngine::default().choose_move(&mut pos, Depth::new(depth)).best_move;
            assert_eq!(m, parse_move("h8h7").ok());
        }
    }

    #[test]
    fn test_mate_in_one_at_depth_one() {
        let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let outcome = SearchEngine::default().choose_move(&mut pos, Depth::ONE);
        assert_eq!(outcome.best_move, parse_move("a1a8").ok());
        assert_eq!(outcome.score, Score::mate());
    }

    #[test]
    fn test_scholars_mate_found() {
        let mut pos = Position::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4")
            .unwrap();
        let m = SearchEngine::default().choose_move(&mut pos, Depth::new(2)).best_move;
        assert_eq!(m, parse_move("h5f7").ok());
    }

    #[test]
    fn test_no_legal_move_returns_none() {
        // Black is checkmated
        let mut pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1").unwrap();
        let mut engine = SearchEngine::default();
        let outcome = engine.choose_move(&mut pos, Depth::new(3));
        assert!(outcome.best_move.is_none());
        assert_eq!(outcome.score, -Score::mate());
        assert!(matches!(
            engine.best_move(&mut pos, Depth::new(3)),
            Err(EngineError::NoLegalMove { .. })
        ));
    }

    #[test]
    fn test_negamax_is_side_relative() {
        // Black to move, a queen down: bad for the mover
        let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").unwrap();
        let score = SearchEngine::default().negamax(&mut pos, Depth::ZERO, Score::neg_infinity(), Score::infinity());
        assert!(score.raw() < -800);
    }

    #[test]
    fn test_takes_hanging_queen() {
        let mut pos = Position::from_fen("4k3/8/8/3q4/4P3/8/8/R3K3 w - - 0 1").unwrap();
        let m = SearchEngine::default().choose_move(&mut pos, Depth::new(2)).best_move;
        assert_eq!(m, parse_move("e4d5").ok());
    }
}
