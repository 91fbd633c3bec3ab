//! UCI command parser.
//!
//! Turns one input line into a typed command. Argument errors are reported
//! here, before the handler touches any engine state.

use super::parse_move;
use crate::error::ProtocolError;
use crate::types::{Depth, Move};

/// Where a `position` command starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionSource {
    StartPos,
    /// Six-field position descriptor, fields joined by single spaces
    Fen(String),
}

/// Parsed UCI command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    /// "uci" - Initialize UCI mode
    Uci,
    /// "isready" - Synchronization
    IsReady,
    /// "ucinewgame" - New game starting
    NewGame,
    /// "position startpos/fen [moves ...]"
    Position { source: PositionSource, moves: Vec<Move> },
    /// "go [depth N]" - Start searching
    Go { depth: Option<Depth> },
    /// "quit" - Exit the engine
    Quit,
    /// "d" - Debug: display position (non-standard but common)
    Display,
    /// Anything else; ignored by the handler
    Unknown(String),
}

/// Parse a UCI command string into a UciCommand
pub fn parse_command(input: &str) -> Result<UciCommand, ProtocolError> {
    let input = input.trim();
    let mut parts = input.split_whitespace();

    let cmd = match parts.next() {
        Some("uci") => UciCommand::Uci,
        Some("isready") => UciCommand::IsReady,
        Some("ucinewgame") => UciCommand::NewGame,
        Some("position") => parse_position(&mut parts)?,
        Some("go") => parse_go(&mut parts)?,
        Some("quit") => UciCommand::Quit,
        Some("d") => UciCommand::Display,
        _ => UciCommand::Unknown(input.to_string()),
    };
    Ok(cmd)
}

fn parse_position<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<UciCommand, ProtocolError> {
    let source = match parts.next() {
        Some("startpos") => {
            match parts.next() {
                None | Some("moves") => {}
                Some(other) => return Err(ProtocolError::UnexpectedToken(other.to_string())),
            }
            PositionSource::StartPos
        }
        Some("fen") => {
            // Collect descriptor fields up to the "moves" keyword
            let fields: Vec<&str> = parts.by_ref().take_while(|&t| t != "moves").collect();
            if fields.len() != 6 {
                return Err(ProtocolError::FenFieldCount(fields.len()));
            }
            PositionSource::Fen(fields.join(" "))
        }
        Some(other) => return Err(ProtocolError::UnexpectedToken(other.to_string())),
        None => return Err(ProtocolError::MissingArgument("position")),
    };

    let moves = parts.map(parse_move).collect::<Result<Vec<_>, _>>()?;

    Ok(UciCommand::Position { source, moves })
}

fn parse_go<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<UciCommand, ProtocolError> {
    let mut depth: Option<Depth> = None;

    // Time-control tokens and their values fall through and are ignored
    while let Some(token) = parts.next() {
        if token == "depth" {
            let value = parts.next().ok_or(ProtocolError::MissingArgument("depth"))?;
            depth = Some(value.parse()?);
        }
    }

    Ok(UciCommand::Go { depth })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_command("uci"), Ok(UciCommand::Uci));
        assert_eq!(parse_command("  isready  "), Ok(UciCommand::IsReady));
        assert_eq!(parse_command("ucinewgame"), Ok(UciCommand::NewGame));
        assert_eq!(parse_command("quit"), Ok(UciCommand::Quit));
    }

    #[test]
    fn test_unknown_is_not_an_error() {
        assert_eq!(
            parse_command("setoption name Hash value 64"),
            Ok(UciCommand::Unknown("setoption name Hash value 64".to_string()))
        );
        assert_eq!(parse_command(""), Ok(UciCommand::Unknown(String::new())));
    }

    #[test]
    fn test_position_startpos_with_moves() {
        let cmd = parse_command("position startpos moves e2e4 e7e5").unwrap();
        assert_eq!(
            cmd,
            UciCommand::Position {
                source: PositionSource::StartPos,
                moves: vec![parse_move("e2e4").unwrap(), parse_move("e7e5").unwrap()],
            }
        );
    }

    #[test]
    fn test_position_fen() {
        let cmd = parse_command("position fen 8/8/8/8/8/8/8/K6k w - - 0 1 moves a1b1").unwrap();
        match cmd {
            UciCommand::Position { source, moves } => {
                assert_eq!(source, PositionSource::Fen("8/8/8/8/8/8/8/K6k w - - 0 1".to_string()));
                assert_eq!(moves.len(), 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_position_fen_field_count() {
        assert_eq!(
            parse_command("position fen 8/8/8/8/8/8/8/K6k w - -"),
            Err(ProtocolError::FenFieldCount(4))
        );
        assert_eq!(
            parse_command("position fen 8/8/8/8/8/8/8/K6k w - - 0 1 2 moves"),
            Err(ProtocolError::FenFieldCount(7))
        );
    }

    #[test]
    fn test_position_bad_move_token() {
        assert_eq!(
            parse_command("position startpos moves e2e4 zz99"),
            Err(ProtocolError::InvalidMove("zz99".to_string()))
        );
    }

    #[test]
    fn test_position_missing_source() {
        assert_eq!(parse_command("position"), Err(ProtocolError::MissingArgument("position")));
        assert!(matches!(
            parse_command("position somewhere"),
            Err(ProtocolError::UnexpectedToken(_))
        ));
    }

    #[test]
    fn test_go_depth() {
        assert_eq!(parse_command("go depth 6"), Ok(UciCommand::Go { depth: Some(Depth::new(6)) }));
        assert_eq!(parse_command("go"), Ok(UciCommand::Go { depth: None }));
        assert_eq!(
            parse_command("go wtime 60000 btime 60000 depth 2"),
            Ok(UciCommand::Go { depth: Some(Depth::new(2)) })
        );
    }

    #[test]
    fn test_go_bad_depth() {
        assert_eq!(
            parse_command("go depth x"),
            Err(ProtocolError::InvalidDepth("x".to_string()))
        );
        assert_eq!(parse_command("go depth 0"), Err(ProtocolError::InvalidDepth("0".to_string())));
        assert_eq!(parse_command("go depth"), Err(ProtocolError::MissingArgument("depth")));
    }
}
