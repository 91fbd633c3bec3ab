//! Game position with in-place apply/undo.
//!
//! The `chess` crate provides the rules (legal moves, mate and stalemate
//! detection, placement parsing) but is copy-make and does not track move
//! clocks or history. `Position` wraps one board and keeps the extra state
//! needed for draw claims, plus an undo stack so a single instance can be
//! threaded through a whole search.

use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, ProtocolError};
use crate::types::{BitBoard, Board, BoardStatus, Color, File, Move, MoveGen, Piece, Rank, Square, EMPTY};

/// Squares of the same shade as a1.
const DARK_SQUARES: BitBoard = BitBoard(0xAA55_AA55_AA55_AA55);

/// FEN of the standard initial position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Why a game ended without any claim being made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Termination::Checkmate => "checkmate",
            Termination::Stalemate => "stalemate",
            Termination::InsufficientMaterial => "insufficient material",
            Termination::SeventyFiveMoves => "seventy-five move rule",
            Termination::FivefoldRepetition => "fivefold repetition",
        };
        f.write_str(s)
    }
}

/// Final state of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub termination: Termination,
    pub winner: Option<Color>,
}

impl Outcome {
    /// PGN-style result string
    pub fn result(&self) -> &'static str {
        match self.winner {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

#[derive(Clone, Copy)]
struct Undo {
    board: Board,
    mv: Move,
    halfmove_clock: u32,
    fullmove_number: u32,
}

/// A mutable game position.
#[derive(Clone)]
pub struct Position {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    undo_stack: Vec<Undo>,
    /// Hash of every position since the game (or descriptor) started,
    /// current position last.
    hashes: Vec<u64>,
}

impl Position {
    /// The standard initial position
    pub fn startpos() -> Self {
        Self::with_board(Board::default(), 0, 1)
    }

    /// Parse a six-field position descriptor.
    pub fn from_fen(fen: &str) -> Result<Self, ProtocolError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(ProtocolError::FenFieldCount(fields.len()));
        }

        let halfmove_clock = fields[4]
            .parse::<u32>()
            .map_err(|_| ProtocolError::InvalidClock(fields[4].to_string()))?;
        // GUIs sometimes send 0 here; it means the first move
        let fullmove_number = fields[5]
            .parse::<u32>()
            .map_err(|_| ProtocolError::InvalidClock(fields[5].to_string()))?
            .max(1);

        let normalized = fields.join(" ");
        let board = Board::from_str(&normalized)
            .map_err(|_| ProtocolError::InvalidFen(normalized.clone()))?;

        Ok(Self::with_board(board, halfmove_clock, fullmove_number))
    }

    fn with_board(board: Board, halfmove_clock: u32, fullmove_number: u32) -> Self {
        Self {
            board,
            halfmove_clock,
            fullmove_number,
            undo_stack: Vec::new(),
            hashes: vec![board.get_hash()],
        }
    }

    /// Export the position as a six-field descriptor.
    pub fn fen(&self) -> String {
        let board_fen = self.board.to_string();
        let placement: Vec<&str> = board_fen.split_whitespace().take(4).collect();
        format!(
            "{} {} {}",
            placement.join(" "),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// The underlying rules-crate board
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Number of moves applied and not yet undone
    #[inline]
    pub fn ply(&self) -> usize {
        self.undo_stack.len()
    }

    // === Mutation ===

    /// Play `mv` in place. The move must be legal.
    pub fn apply(&mut self, mv: Move) {
        debug_assert!(self.board.legal(mv), "apply called with illegal move {}", mv);

        let zeroing = self.is_zeroing(mv);
        self.undo_stack.push(Undo {
            board: self.board,
            mv,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        });

        if self.board.side_to_move() == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.halfmove_clock = if zeroing { 0 } else { self.halfmove_clock.saturating_add(1) };
        self.board = self.board.make_move_new(mv);
        self.hashes.push(self.board.get_hash());
    }

    /// Play `mv` if it is legal here, otherwise leave the position untouched.
    pub fn try_apply(&mut self, mv: Move) -> Result<(), EngineError> {
        if !self.is_legal(mv) {
            return Err(EngineError::IllegalMove {
                mv: mv.to_string(),
                fen: self.fen(),
            });
        }
        self.apply(mv);
        Ok(())
    }

    /// Reverse the most recent `apply`, returning the move that was taken back.
    pub fn undo(&mut self) -> Option<Move> {
        let undo = self.undo_stack.pop()?;
        self.board = undo.board;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.hashes.pop();
        Some(undo.mv)
    }

    // === Moves ===

    pub fn legal_moves(&self) -> Vec<Move> {
        MoveGen::new_legal(&self.board).collect()
    }

    #[inline]
    pub fn legal_move_count(&self) -> usize {
        MoveGen::new_legal(&self.board).len()
    }

    #[inline]
    pub fn is_legal(&self, mv: Move) -> bool {
        self.board.legal(mv)
    }

    fn is_en_passant(&self, mv: Move) -> bool {
        self.board.piece_on(mv.get_source()) == Some(Piece::Pawn)
            && mv.get_source().get_file() != mv.get_dest().get_file()
            && self.board.piece_on(mv.get_dest()).is_none()
    }

    /// True for captures, en passant included
    pub fn is_capture(&self, mv: Move) -> bool {
        self.board.piece_on(mv.get_dest()).is_some() || self.is_en_passant(mv)
    }

    /// The piece `mv` would remove from the board, if any
    pub fn captured_piece(&self, mv: Move) -> Option<Piece> {
        match self.board.piece_on(mv.get_dest()) {
            Some(victim) => Some(victim),
            None if self.is_en_passant(mv) => Some(Piece::Pawn),
            None => None,
        }
    }

    /// True if playing `mv` leaves the opponent in check
    pub fn gives_check(&self, mv: Move) -> bool {
        *self.board.make_move_new(mv).checkers() != EMPTY
    }

    fn is_zeroing(&self, mv: Move) -> bool {
        self.board.piece_on(mv.get_source()) == Some(Piece::Pawn) || self.is_capture(mv)
    }

    // === Occupancy ===

    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.board.piece_on(sq)
    }

    #[inline]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.board.color_on(sq)
    }

    /// Number of `piece`s of `color` on the board
    pub fn count(&self, color: Color, piece: Piece) -> u32 {
        (self.board.pieces(piece) & self.board.color_combined(color)).popcnt()
    }

    // === Status ===

    #[inline]
    pub fn is_check(&self) -> bool {
        *self.board.checkers() != EMPTY
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.board.status() == BoardStatus::Stalemate
    }

    /// Neither side can possibly deliver mate.
    pub fn is_insufficient_material(&self) -> bool {
        self.has_insufficient_material(Color::White) && self.has_insufficient_material(Color::Black)
    }

    fn has_insufficient_material(&self, color: Color) -> bool {
        let b = &self.board;
        let ours = *b.color_combined(color);
        let theirs = *b.color_combined(!color);
        let pawns = *b.pieces(Piece::Pawn);
        let knights = *b.pieces(Piece::Knight);
        let bishops = *b.pieces(Piece::Bishop);
        let rooks = *b.pieces(Piece::Rook);
        let queens = *b.pieces(Piece::Queen);
        let kings = *b.pieces(Piece::King);

        if ours & (pawns | rooks | queens) != EMPTY {
            return false;
        }

        // A lone knight cannot mate, unless the other side has pieces that
        // could block its own king in.
        if ours & knights != EMPTY {
            return ours.popcnt() <= 2 && theirs & !kings & !queens == EMPTY;
        }

        // Bishops all on one shade, and nothing on the board that could
        // help construct a selfmate.
        if ours & bishops != EMPTY {
            let same_shade =
                bishops & DARK_SQUARES == EMPTY || bishops & !DARK_SQUARES == EMPTY;
            return same_shade && pawns == EMPTY && knights == EMPTY;
        }

        true
    }

    /// Hashes since the last capture or pawn move
    fn reversible_hashes(&self) -> &[u64] {
        let window = (self.halfmove_clock as usize + 1).min(self.hashes.len());
        &self.hashes[self.hashes.len() - window..]
    }

    fn repetitions(&self, hash: u64) -> usize {
        self.reversible_hashes().iter().filter(|&&h| h == hash).count()
    }

    /// Fifty-move rule is claimable now, or by the mover's next move.
    pub fn can_claim_fifty_moves(&self) -> bool {
        if self.halfmove_clock >= 100 {
            return self.legal_move_count() > 0;
        }
        if self.halfmove_clock >= 99 {
            return MoveGen::new_legal(&self.board).any(|mv| !self.is_zeroing(mv));
        }
        false
    }

    /// Threefold repetition is claimable now, or by the mover's next move.
    pub fn can_claim_threefold_repetition(&self) -> bool {
        let current = self.board.get_hash();
        if self.repetitions(current) >= 3 {
            return true;
        }

        let window = self.reversible_hashes();
        let any_repeat = window
            .iter()
            .enumerate()
            .any(|(i, h)| window[i + 1..].contains(h));
        if !any_repeat {
            return false;
        }

        MoveGen::new_legal(&self.board)
            .filter(|&mv| !self.is_zeroing(mv))
            .any(|mv| self.repetitions(self.board.make_move_new(mv).get_hash()) >= 2)
    }

    pub fn can_claim_draw(&self) -> bool {
        self.can_claim_fifty_moves() || self.can_claim_threefold_repetition()
    }

    pub fn is_seventyfive_moves(&self) -> bool {
        self.halfmove_clock >= 150 && self.legal_move_count() > 0
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.repetitions(self.board.get_hash()) >= 5
    }

    /// The game has ended without needing any claim.
    pub fn outcome(&self) -> Option<Outcome> {
        let termination = match self.board.status() {
            BoardStatus::Checkmate => {
                return Some(Outcome {
                    termination: Termination::Checkmate,
                    winner: Some(!self.side_to_move()),
                })
            }
            BoardStatus::Stalemate => Termination::Stalemate,
            BoardStatus::Ongoing if self.is_insufficient_material() => {
                Termination::InsufficientMaterial
            }
            BoardStatus::Ongoing if self.is_seventyfive_moves() => Termination::SeventyFiveMoves,
            BoardStatus::Ongoing if self.is_fivefold_repetition() => {
                Termination::FivefoldRepetition
            }
            BoardStatus::Ongoing => return None,
        };
        Some(Outcome { termination, winner: None })
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.fen())
    }
}

/// Text diagram, rank 8 first, uppercase for White.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            let row: Vec<String> = (0..8)
                .map(|file| {
                    let sq = Square::make_square(Rank::from_index(rank), File::from_index(file));
                    match (self.piece_on(sq), self.color_on(sq)) {
                        (Some(piece), Some(color)) => piece_symbol(piece, color).to_string(),
                        _ => ".".to_string(),
                    }
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

fn piece_symbol(piece: Piece, color: Color) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    match color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}
