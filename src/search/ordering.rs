use std::cmp::Reverse;
use crate::board::{Board, LegalMoves, Move, PieceKind};

pub const CHECK_BONUS: i32 = 100;
pub const QUEEN_APPROACH_BONUS: i32 = 10;

/// Ordering score: checks first, then queen moves closing in on the Black king.
pub fn score_move(board: &mut Board, mv: Move) -> i32 {
    let mut score = 0;
    let undo = board.make_move(mv);
    if board.is_check(board.to_move()) { score += CHECK_BONUS; }
    board.unmake_move(undo);
    if mv.piece.kind == PieceKind::Queen {
        if let Some(bk) = board.black_king() {
            if mv.to.manhattan(bk.square) < mv.from().manhattan(bk.square) { score += QUEEN_APPROACH_BONUS; }
        }
    }
    score
}

/// Flattens `legal` and sorts by descending score. The sort is stable, so equal
/// scores keep map order.
pub fn order_moves(board: &mut Board, legal: &LegalMoves) -> Vec<Move> {
    let mut scored: Vec<(i32, Move)> = legal.moves().map(|m| (score_move(board, m), m)).collect();
    scored.sort_by_key(|&(s, _)| Reverse(s));
    scored.into_iter().map(|(_, m)| m).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Square};

    #[test]
    fn checking_moves_come_first() {
        let mut b = Board::from_fen("4k3/8/8/8/8/8/8/K2Q4").unwrap().with_to_move(Color::White);
        let before = b.clone();
        let legal = b.legal_moves(Color::White);
        let ordered = order_moves(&mut b, &legal);
        assert_eq!(b, before);
        assert_eq!(ordered.len(), legal.move_count());
        let first = ordered[0];
        assert_eq!(first.piece.kind, PieceKind::Queen);
        let mut after = b.clone();
        after.make_move(first);
        assert!(after.is_check(Color::Black));
        // Every checking move precedes every quiet one.
        let checks: Vec<bool> = ordered.iter().map(|&m| { let mut p = b.clone(); p.make_move(m); p.is_check(Color::Black) }).collect();
        let first_quiet = checks.iter().position(|c| !c).unwrap_or(checks.len());
        assert!(checks[first_quiet..].iter().all(|c| !c));
        assert!(ordered.contains(&Move::new(b.piece_at(Square::new(7, 3)).unwrap(), Square::new(6, 4))));
    }
}
