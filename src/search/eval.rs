use crate::board::{Board, Color, PieceKind};

// Mate scoring helpers
pub const MATE_SCORE: i32 = 10_000;
pub const DRAW_SCORE: i32 = 0;

pub const QUEEN_BONUS: i32 = 9_000;
const PAWN_PROGRESSION_MULTIPLIER: i32 = 10;
const KING_DISTANCE_PENALTY: i32 = 5;
const OPPONENT_KING_DISTANCE_BONUS: i32 = 10;
const KING_CONTROL_BONUS: i32 = 50;
const OPPONENT_MOVE_RESTRICTION_PENALTY: i32 = 10;
const FORCE_KING_TO_EDGE_MULTIPLIER: i32 = 20;
const COORDINATED_ATTACK_PENALTY: i32 = 20;
const SHRINKING_BOX_BONUS: i32 = 2;

/// Static score from White's perspective.
pub fn evaluate(board: &Board) -> i32 {
    match board.white_piece().map(|p| p.kind) {
        Some(PieceKind::Queen) => QUEEN_BONUS + eval_kq_vs_k(board),
        None => -MATE_SCORE,
        Some(_) => eval_kp_vs_k(board),
    }
}

fn black_king_mobility(board: &Board) -> i32 {
    board.black_king().map_or(0, |bk| board.legal_moves_for_piece(&bk).len() as i32)
}

pub fn eval_kp_vs_k(board: &Board) -> i32 {
    let (Some(wk), Some(wp), Some(bk)) = (board.king(Color::White), board.white_piece(), board.king(Color::Black)) else { return DRAW_SCORE };
    let (wk, wp, bk) = (wk.square, wp.square, bk.square);
    let mut score = 0;
    let advance = 7 - wp.row as i32;
    score += advance * advance * PAWN_PROGRESSION_MULTIPLIER;
    score -= wk.manhattan(wp) * KING_DISTANCE_PENALTY;
    score += bk.manhattan(wp) * OPPONENT_KING_DISTANCE_BONUS;
    score -= wk.manhattan(bk) * COORDINATED_ATTACK_PENALTY;
    // King in front of the pawn on its file, short of the promotion square.
    if wk.col == wp.col && wk.row >= 1 && wk.row < wp.row { score += KING_CONTROL_BONUS; }
    score -= black_king_mobility(board) * OPPONENT_MOVE_RESTRICTION_PENALTY;
    score
}

pub fn eval_kq_vs_k(board: &Board) -> i32 {
    let (Some(wk), Some(wq), Some(bk)) = (board.king(Color::White), board.white_piece(), board.king(Color::Black)) else { return DRAW_SCORE };
    let (wk, wq, bk) = (wk.square, wq.square, bk.square);
    let mut score = 0;
    // |r - 3.5| + |c - 3.5| in half-squares; the sum of two odd numbers is even.
    let half = (2 * bk.row as i32 - 7).abs() + (2 * bk.col as i32 - 7).abs();
    score += half / 2 * FORCE_KING_TO_EDGE_MULTIPLIER;
    score -= wk.manhattan(bk) * COORDINATED_ATTACK_PENALTY;
    score -= wq.manhattan(bk) * (COORDINATED_ATTACK_PENALTY / 2);
    let box_area = (7 - (wq.row as i32 - bk.row as i32).abs()) * (7 - (wq.col as i32 - bk.col as i32).abs());
    score -= box_area * SHRINKING_BOX_BONUS;
    score -= black_king_mobility(board) * OPPONENT_MOVE_RESTRICTION_PENALTY * 2;
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kp_terms_add_up() {
        // K e1, P e2, k e8: advance 1 -> 10; wk-p 1 -> -5; bk-p 6 -> +60; wk-bk 7 -> -140;
        // no control bonus; black king has 5 moves -> -50.
        let b = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3").unwrap();
        assert_eq!(eval_kp_vs_k(&b), 10 - 5 + 60 - 140 - 50);
    }

    #[test]
    fn king_ahead_of_pawn_earns_control_bonus() {
        let ahead = Board::from_fen("k7/8/8/4K3/8/8/4P3/8").unwrap();
        let beside = Board::from_fen("k7/8/8/3K4/8/8/4P3/8").unwrap();
        let d = eval_kp_vs_k(&ahead) - eval_kp_vs_k(&beside);
        // Ahead: wk-p 3, wk-bk 7. Beside: wk-p 4, wk-bk 6.
        assert_eq!(d, 50 + 5 - 20);
    }

    #[test]
    fn missing_white_piece_is_a_loss_signal() {
        let b = Board::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(evaluate(&b), -MATE_SCORE);
    }

    #[test]
    fn kq_terms_add_up() {
        let b = Board::from_fen("k7/8/1Q6/8/8/8/8/4K3").unwrap();
        // edge: |0-3.5|+|0-3.5| = 7 -> 140; wk-bk 11 -> -220; q-bk 3 -> -30;
        // box (7-2)*(7-1)=30 -> -60; a7, b7 and b8 are all covered by the queen -> 0.
        assert_eq!(evaluate(&b), QUEEN_BONUS + 140 - 220 - 30 - 60);
    }
}
