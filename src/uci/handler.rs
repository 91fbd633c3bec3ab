//! UCI command handler and main loop.

use super::parser::{parse_command, PositionSource, UciCommand};
use super::{ENGINE_AUTHOR, ENGINE_NAME};
use crate::error::EngineError;
use crate::position::Position;
use crate::search::SearchEngine;
use crate::types::{Depth, Move};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// UCI protocol handler
pub struct UciHandler<W: Write> {
    /// Current position
    position: Position,
    /// Search engine
    engine: SearchEngine,
    /// Depth for a bare `go`
    default_depth: Depth,
    /// Protocol output (stdout in the binary)
    out: W,
    /// Should the engine quit
    quit: bool,
}

impl<W: Write> UciHandler<W> {
    pub fn new(out: W) -> Self {
        Self::with_engine(SearchEngine::default(), Depth::DEFAULT, out)
    }

    pub fn with_engine(engine: SearchEngine, default_depth: Depth, out: W) -> Self {
        Self {
            position: Position::startpos(),
            engine,
            default_depth,
            out,
            quit: false,
        }
    }

    /// Current position
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run the UCI main loop until `quit` or end of input.
    ///
    /// Lines that are not valid UTF-8 are decoded lossily and end up as
    /// unknown commands; only a read failure stops the loop early.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<(), EngineError> {
        let mut buf = Vec::new();
        while !self.quit {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            self.handle_input(&line)?;
        }
        Ok(())
    }

    /// Handle a single UCI command line.
    ///
    /// Malformed or illegal input is logged and dropped; only a failure to
    /// write to the output is returned as an error.
    pub fn handle_input(&mut self, input: &str) -> Result<(), EngineError> {
        debug!(input, "received");
        match parse_command(input) {
            Ok(cmd) => self.handle_command(cmd),
            Err(e) => {
                warn!(error = %e, input, "ignoring malformed command");
                Ok(())
            }
        }
    }

    fn handle_command(&mut self, cmd: UciCommand) -> Result<(), EngineError> {
        match cmd {
            UciCommand::Uci => self.cmd_uci(),
            UciCommand::IsReady => self.send("readyok"),
            UciCommand::NewGame => {
                self.position = Position::startpos();
                Ok(())
            }
            UciCommand::Position { source, moves } => {
                self.cmd_position(source, &moves);
                Ok(())
            }
            UciCommand::Go { depth } => self.cmd_go(depth.unwrap_or(self.default_depth)),
            UciCommand::Quit => {
                self.quit = true;
                Ok(())
            }
            UciCommand::Display => self.cmd_display(),
            UciCommand::Unknown(_) => Ok(()),
        }
    }

    /// Send output to GUI
    fn send(&mut self, msg: &str) -> Result<(), EngineError> {
        writeln!(self.out, "{}", msg)?;
        self.out.flush()?;
        Ok(())
    }

    // === UCI Commands ===

    fn cmd_uci(&mut self) -> Result<(), EngineError> {
        self.send(&format!("id name {}", ENGINE_NAME))?;
        self.send(&format!("id author {}", ENGINE_AUTHOR))?;
        self.send("uciok")
    }

    /// Install a new position, or keep the current one if any part of the
    /// command is rejected.
    fn cmd_position(&mut self, source: PositionSource, moves: &[Move]) {
        match build_position(source, moves) {
            Ok(position) => self.position = position,
            Err(e) => warn!(error = %e, fen = %self.position.fen(), "position rejected, keeping previous"),
        }
    }

    fn cmd_go(&mut self, depth: Depth) -> Result<(), EngineError> {
        let outcome = self.engine.choose_move(&mut self.position, depth);
        let stats = &outcome.stats;

        self.send(&format!(
            "info depth {} score {} nodes {} nps {} time {}",
            stats.depth,
            outcome.score,
            stats.nodes,
            stats.nps(),
            stats.time_ms
        ))?;

        // Send best move
        match outcome.best_move {
            Some(m) => self.send(&format!("bestmove {}", m)),
            None => {
                let e = EngineError::NoLegalMove { fen: self.position.fen() };
                warn!(error = %e, "search had nothing to play");
                self.send("bestmove 0000")
            }
        }
    }

    fn cmd_display(&mut self) -> Result<(), EngineError> {
        // Non-standard debug command to display the position
        let fen = self.position.fen();
        let side = self.position.side_to_move();
        self.send(&format!("info string fen {}", fen))?;
        self.send(&format!("info string side to move {:?}", side))
    }
}

/// Build a position from scratch, stopping at the first illegal move.
fn build_position(source: PositionSource, moves: &[Move]) -> Result<Position, EngineError> {
    let mut position = match source {
        PositionSource::StartPos => Position::startpos(),
        PositionSource::Fen(fen) => Position::from_fen(&fen)?,
    };
    for &m in moves {
        position.try_apply(m)?;
    }
    Ok(position)
}
