use crate::board::{Board, Move};

/// Returns true if making `mv` puts the opponent in check.
pub fn gives_check(board: &mut Board, mv: Move) -> bool {
    let undo = board.make_move(mv);
    let check = board.is_check(board.to_move());
    board.unmake_move(undo);
    check
}

/// Returns true if making `mv` checkmates the side that must reply.
pub fn is_mate_after_move(board: &mut Board, mv: Move) -> bool {
    let undo = board.make_move(mv);
    let mate = board.is_checkmate(board.to_move());
    board.unmake_move(undo);
    mate
}

/// Returns true if, after `mv`, some legal reply lands on `mv.to`, i.e. the
/// moved piece can be taken at once.
pub fn is_capturable_after_move(board: &mut Board, mv: Move) -> bool {
    let undo = board.make_move(mv);
    let hit = board.legal_moves(board.to_move()).reaches(mv.to);
    board.unmake_move(undo);
    hit
}

/// Number of legal Black king moves once `mv` is played.
pub fn king_mobility_after_move(board: &mut Board, mv: Move) -> usize {
    let undo = board.make_move(mv);
    let n = board.black_king().map_or(0, |bk| board.legal_moves_for_piece(&bk).len());
    board.unmake_move(undo);
    n
}
