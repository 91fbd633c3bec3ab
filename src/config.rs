//! Session configuration.

use clap::ValueEnum;

use crate::types::{Color, Depth};

/// How the process talks to the outside world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// UCI protocol on stdin/stdout, for chess GUIs
    #[default]
    Uci,
    /// Play against the engine in the terminal
    Terminal,
}

/// Side the human plays in terminal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Side {
    #[default]
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub mode: Mode,
    /// Search depth used when a `go` command does not name one, and for
    /// every engine move in terminal play
    pub depth: Depth,
    pub human: Color,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Uci,
            depth: Depth::DEFAULT,
            human: Color::White,
        }
    }
}
