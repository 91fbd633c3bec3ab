//! Human-vs-engine play in a terminal.
//!
//! Prints the board and FEN every turn, reads the human's moves in compact
//! notation, and answers with the engine's choice at the configured depth.

use std::io::{BufRead, Write};
use std::time::Instant;

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::position::{Outcome, Position};
use crate::search::SearchEngine;
use crate::uci::parse_move;

const QUIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

/// Play one game from `position`.
///
/// Returns the outcome once the game is over, or `None` if the human quit
/// or the input ran out first.
pub fn play<R: BufRead, W: Write>(
    config: &EngineConfig,
    mut position: Position,
    mut input: R,
    out: &mut W,
) -> Result<Option<Outcome>, EngineError> {
    let mut engine = SearchEngine::default();

    writeln!(out, "Type moves like e2e4, g1f3. Type 'quit' to exit.")?;
    writeln!(out)?;

    while !position.is_game_over() {
        write!(out, "{}", position)?;
        writeln!(out, "FEN: {}", position.fen())?;
        writeln!(out)?;

        if position.side_to_move() == config.human {
            write!(out, "Your move: ")?;
            out.flush()?;

            let mut buf = Vec::new();
            if input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim();
            if QUIT_WORDS.contains(&line.to_lowercase().as_str()) {
                return Ok(None);
            }

            let played = parse_move(line)
                .map_err(EngineError::from)
                .and_then(|m| position.try_apply(m));
            if let Err(e) = played {
                debug!(error = %e, "rejected human move");
                writeln!(out, "Invalid/illegal move. Try again.")?;
                writeln!(out)?;
            }
        } else {
            let start = Instant::now();
            let m = engine.best_move(&mut position, config.depth)?;
            let secs = start.elapsed().as_secs_f64();
            writeln!(out, "Bot plays: {} (depth {}, {:.2}s)", m, config.depth, secs)?;
            writeln!(out)?;
            position.apply(m);
        }
    }

    write!(out, "{}", position)?;
    let outcome = position.outcome();
    if let Some(o) = outcome {
        writeln!(out)?;
        writeln!(out, "Game over: {} ({})", o.result(), o.termination)?;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Termination;
    use crate::types::{Color, Depth};

    fn config(human: Color) -> EngineConfig {
        EngineConfig {
            human,
            depth: Depth::ONE,
            ..EngineConfig::default()
        }
    }

    fn back_rank() -> Position {
        Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap()
    }

    #[test]
    fn test_quit() {
        let mut out = Vec::new();
        let outcome = play(&config(Color::White), Position::startpos(), "quit\n".as_bytes(), &mut out)
            .unwrap();
        assert!(outcome.is_none());
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let mut out = Vec::new();
        play(&config(Color::White), Position::startpos(), "zz\ne2e5\nexit\n".as_bytes(), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Invalid/illegal move").count(), 2);
        assert_eq!(text.matches("Your move: ").count(), 3);
    }

    #[test]
    fn test_undecodable_input_reprompts() {
        let mut out = Vec::new();
        play(&config(Color::White), Position::startpos(), &b"\xff\xfe\nq\n"[..], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Invalid/illegal move").count(), 1);
    }

    #[test]
    fn test_human_delivers_mate() {
        let mut out = Vec::new();
        let outcome = play(&config(Color::White), back_rank(), "a1a8\n".as_bytes(), &mut out)
            .unwrap()
            .unwrap();
        assert_eq!(outcome.termination, Termination::Checkmate);
        assert_eq!(outcome.result(), "1-0");
    }

    #[test]
    fn test_engine_delivers_mate() {
        let mut out = Vec::new();
        let outcome = play(&config(Color::Black), back_rank(), "".as_bytes(), &mut out)
            .unwrap()
            .unwrap();
        assert_eq!(outcome.winner, Some(Color::White));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Bot plays: a1a8"));
        assert!(text.contains("Game over: 1-0 (checkmate)"));
    }

    #[test]
    fn test_end_of_input() {
        let mut out = Vec::new();
        let outcome = play(&config(Color::White), Position::startpos(), "".as_bytes(), &mut out).unwrap();
        assert!(outcome.is_none());
    }
}
