use thiserror::Error;
use crate::board::{Color, Square};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("setup must have exactly three lines, got {0}")]
    LineCount(usize),
    #[error("invalid square {0:?}")]
    BadSquare(String),
    #[error("two pieces placed on {0}")]
    Overlap(Square),
    #[error("pawn cannot start on the first or last rank ({0})")]
    PawnOnBackRank(Square),
    #[error("kings may not stand next to each other ({0} and {1})")]
    AdjacentKings(Square, Square),
    #[error("malformed position: {0}")]
    BadFen(String),
    #[error("position has no {0} king")]
    MissingKing(Color),
    #[error("position has more than one king of a color")]
    DuplicateKing,
    #[error("unsupported piece {0:?}")]
    UnsupportedPiece(char),
    #[error("white may have only one piece besides the king, found {0}")]
    TooManyPieces(usize),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece on {0}")]
    NoPiece(Square),
    #[error("piece on {square} belongs to {color}")]
    WrongColor { square: Square, color: Color },
    #[error("illegal move {from}{to}")]
    Illegal { from: Square, to: Square },
    #[error("it is not {0}'s turn")]
    NotYourTurn(Color),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("history index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error("game not set up")]
    NotSetUp,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
