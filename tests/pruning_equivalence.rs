//! Alpha-beta must return exactly what a full-width negamax returns.

use chessbot::eval::Evaluator;
use chessbot::position::Position;
use chessbot::search::SearchEngine;
use chessbot::types::{Color, Depth, Score};

const REFERENCE_POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
    "4k3/8/8/3q4/4P3/8/8/R3K3 w - - 0 1",
    "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1",
    "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
];

/// Negamax without any pruning, built only on the public evaluator.
fn full_width(evaluator: &Evaluator, pos: &mut Position, depth: i32) -> Score {
    if depth == 0 || pos.is_game_over() {
        let score = evaluator.evaluate(pos);
        return match pos.side_to_move() {
            Color::White => score,
            Color::Black => -score,
        };
    }

    let mut best = Score::neg_infinity();
    for m in pos.legal_moves() {
        pos.apply(m);
        let value = -full_width(evaluator, pos, depth - 1);
        pos.undo();
        best = best.max(value);
    }
    best
}

#[test]
fn pruned_search_matches_full_width() {
    let evaluator = Evaluator::default();
    for fen in REFERENCE_POSITIONS {
        for depth in 1..=3 {
            let mut pos = Position::from_fen(fen).unwrap();
            let before = pos.fen();
            let expected = full_width(&evaluator, &mut pos, depth);

            let mut engine = SearchEngine::default();
            let pruned = engine.negamax(&mut pos, Depth::new(depth), Score::neg_infinity(), Score::infinity());

            assert_eq!(pruned, expected, "{} at depth {}", fen, depth);
            assert_eq!(pos.fen(), before, "position not restored after search");
        }
    }
}

#[test]
fn root_score_matches_full_width() {
    let evaluator = Evaluator::default();
    for fen in REFERENCE_POSITIONS {
        for depth in 1..=2 {
            let mut pos = Position::from_fen(fen).unwrap();
            let expected = full_width(&evaluator, &mut pos, depth);
            let outcome = SearchEngine::default().choose_move(&mut pos, Depth::new(depth));

            assert_eq!(outcome.score, expected, "{} at depth {}", fen, depth);
            let m = outcome.best_move.expect("reference positions all have moves");
            assert!(pos.is_legal(m));
        }
    }
}

#[test]
fn pruning_visits_fewer_nodes() {
    let mut pos = Position::startpos();
    let mut engine = SearchEngine::default();
    engine.choose_move(&mut pos, Depth::new(3));
    // 20 + 400 + 8902 nodes at depths 1..3 without pruning
    assert!(engine.stats().nodes < 1 + 20 + 400 + 8902);
}
