pub mod attacks;
pub mod fen;
pub mod grid;
pub mod piece;
pub mod setup;
pub mod square;

use std::fmt;
use crate::error::{HistoryError, MoveError, SetupError};

pub use attacks::AttackSet;
pub use grid::Grid;
pub use piece::{Color, Piece, PieceKind};
pub use square::{Coord, Square};

/// A move is a piece plus its destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece: Piece,
    pub to: Square,
}

impl Move {
    pub fn new(piece: Piece, to: Square) -> Self { Self { piece, to } }
    pub fn from(&self) -> Square { self.piece.square }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.piece.square, self.to)
    }
}

/// Everything `unmake_move` needs to reverse a `make_move` exactly.
#[derive(Clone, Copy, Debug)]
pub struct MoveUndo {
    mv: Move,
    moved: Option<Piece>,
    captured: Option<Piece>,
    white_piece: Option<Square>,
}

/// Legal moves for one side: pieces in row-major order, each with its
/// destinations sorted by (row, col). Pieces without moves are left out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegalMoves {
    entries: Vec<(Piece, Vec<Square>)>,
}

impl LegalMoves {
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn move_count(&self) -> usize { self.entries.iter().map(|(_, t)| t.len()).sum() }

    pub fn iter(&self) -> impl Iterator<Item = (&Piece, &[Square])> {
        self.entries.iter().map(|(p, t)| (p, t.as_slice()))
    }

    /// Flattened (piece, destination) pairs in map order.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.entries.iter().flat_map(|(p, t)| t.iter().map(move |&to| Move::new(*p, to)))
    }

    pub fn for_square(&self, from: Square) -> Option<&[Square]> {
        self.entries.iter().find(|(p, _)| p.square == from).map(|(_, t)| t.as_slice())
    }

    pub fn contains(&self, from: Square, to: Square) -> bool {
        self.for_square(from).map_or(false, |t| t.contains(&to))
    }

    /// True if any piece in the map can land on `sq`.
    pub fn reaches(&self, sq: Square) -> bool { self.entries.iter().any(|(_, t)| t.contains(&sq)) }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    to_move: Color,
    history: Vec<String>,
}

impl Board {
    /// Wraps a grid, recording it as the first history entry. Black moves first
    /// unless told otherwise.
    pub fn from_grid(grid: Grid) -> Self {
        let fen = fen::to_fen(&grid);
        Self { grid, to_move: Color::Black, history: vec![fen] }
    }

    pub fn from_fen(text: &str) -> Result<Self, SetupError> { Ok(Self::from_grid(fen::parse_fen(text)?)) }

    pub fn with_to_move(mut self, color: Color) -> Self { self.to_move = color; self }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn to_move(&self) -> Color { self.to_move }
    pub fn history(&self) -> &[String] { &self.history }

    /// Serialized form of the current grid (the last history entry).
    pub fn current_fen(&self) -> &str { self.history.last().map(String::as_str).unwrap_or_default() }

    pub fn get_piece(&self, row: u8, col: u8) -> Option<Piece> { self.grid.get(Square::new(row, col)) }
    pub fn piece_at(&self, sq: Square) -> Option<Piece> { self.grid.get(sq) }
    pub fn white_king(&self) -> Option<Piece> { self.grid.king(Color::White) }
    pub fn black_king(&self) -> Option<Piece> { self.grid.king(Color::Black) }
    pub fn king(&self, color: Color) -> Option<Piece> { self.grid.king(color) }
    pub fn white_piece(&self) -> Option<Piece> { self.grid.white_piece() }

    /// Applies a move without checking legality: captures, promotes a White pawn
    /// reaching row 0, flips the side to move and records the new position.
    pub fn make_move(&mut self, mv: Move) -> MoveUndo {
        let white_piece = self.grid.white_piece_slot();
        let moved = self.grid.get(mv.from());
        let captured = self.grid.relocate(mv.from(), mv.to);
        if let Some(p) = self.grid.get(mv.to) {
            if p.kind == PieceKind::Pawn && p.color == Color::White && mv.to.row == 0 {
                self.grid.replace(mv.to, Some(Piece::queen(Color::White, mv.to)));
            }
        }
        self.to_move = self.to_move.opponent();
        self.history.push(fen::to_fen(&self.grid));
        MoveUndo { mv, moved, captured, white_piece }
    }

    pub fn unmake_move(&mut self, undo: MoveUndo) {
        self.history.pop();
        self.to_move = self.to_move.opponent();
        let MoveUndo { mv, moved, captured, white_piece } = undo;
        let Some(moved) = moved else { return };
        self.grid.replace(mv.to, captured);
        self.grid.replace(mv.from(), Some(moved));
        if moved.kind == PieceKind::King { self.grid.set_king_slot(moved.color, mv.from()); }
        self.grid.set_white_piece_slot(white_piece);
    }

    /// Checks that the side to move owns a piece on `from` that may go to `to`.
    pub fn validate_move(&self, from: Square, to: Square) -> Result<Move, MoveError> {
        let piece = self.grid.get(from).ok_or(MoveError::NoPiece(from))?;
        if piece.color != self.to_move { return Err(MoveError::WrongColor { square: from, color: piece.color }); }
        if !self.legal_moves_for_piece(&piece).contains(&to) { return Err(MoveError::Illegal { from, to }); }
        Ok(Move::new(piece, to))
    }

    /// Validated move for the side to move; the board is untouched on error.
    pub fn play(&mut self, from: Square, to: Square) -> Result<Move, MoveError> {
        let mv = self.validate_move(from, to)?;
        self.make_move(mv);
        Ok(mv)
    }

    pub fn attacked_squares(&self, by: Color) -> AttackSet { self.grid.attacked_squares(by) }

    pub fn legal_moves_for_piece(&self, piece: &Piece) -> Vec<Square> { self.grid.legal_moves_for_piece(piece) }

    pub fn legal_moves(&self, color: Color) -> LegalMoves {
        let entries = self.grid.pieces_of(color)
            .map(|p| (p, self.grid.legal_moves_for_piece(&p)))
            .filter(|(_, t)| !t.is_empty())
            .collect();
        LegalMoves { entries }
    }

    pub fn is_check(&self, color: Color) -> bool { self.grid.is_check(color) }

    pub fn is_checkmate(&self, color: Color) -> bool { self.is_check(color) && self.legal_moves(color).is_empty() }

    pub fn is_stalemate(&self, color: Color) -> bool { !self.is_check(color) && self.legal_moves(color).is_empty() }

    pub fn to_fen(&self) -> String { fen::to_fen(&self.grid) }

    /// Replaces the grid only; side to move and history are left alone.
    pub fn load_from_fen(&mut self, text: &str) -> Result<(), SetupError> {
        self.grid = fen::parse_fen(text)?;
        Ok(())
    }

    /// Drops the latest position and restores the previous one. The initial
    /// position is never removed.
    pub fn undo_move(&mut self) -> Result<(), HistoryError> {
        if self.history.len() <= 1 { return Err(HistoryError::NothingToUndo); }
        self.history.pop();
        self.restore_last();
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    /// Shows history entry `index` without discarding later entries. The caller
    /// owns the turn bookkeeping and passes the side to move explicitly.
    pub fn seek_history(&mut self, index: usize, to_move: Color) -> Result<(), HistoryError> {
        let len = self.history.len();
        let fen = self.history.get(index).ok_or(HistoryError::OutOfRange { index, len })?;
        self.grid = fen::parse_fen(fen).map_err(|_| HistoryError::OutOfRange { index, len })?;
        self.to_move = to_move;
        Ok(())
    }

    /// Keeps the first `len` history entries (at least one).
    pub fn truncate_history(&mut self, len: usize) { self.history.truncate(len.max(1)); }

    fn restore_last(&mut self) {
        // Entries were produced by to_fen, so they always parse.
        if let Ok(g) = fen::parse_fen(self.current_fen()) { self.grid = g; }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let c = self.get_piece(row, col).map_or('.', |p| p.letter());
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
