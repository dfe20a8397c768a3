use kpbot::board::{Board, Color};
use kpbot::perft::{divide, perft};

#[test]
fn perft_kp_small_depths() {
    let mut w = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3").unwrap().with_to_move(Color::White);
    assert_eq!(perft(&mut w, 0), 1);
    assert_eq!(perft(&mut w, 1), 6);
    let mut b = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3").unwrap();
    assert_eq!(perft(&mut b, 1), 5);
}

#[test]
fn perft_mated_side_has_no_moves() {
    let mut b = Board::from_fen("k7/1Q6/2K5/8/8/8/8/8").unwrap();
    assert_eq!(perft(&mut b, 1), 0);
    assert_eq!(perft(&mut b, 3), 0);
}

#[test]
fn divide_sums_to_perft_and_restores_board() {
    let mut b = Board::from_fen("k7/8/2K5/8/8/8/8/1Q6").unwrap().with_to_move(Color::White);
    let before = b.clone();
    let total = perft(&mut b, 3);
    let rows = divide(&mut b, 3);
    assert_eq!(rows.iter().map(|(_, n)| n).sum::<u64>(), total);
    assert_eq!(rows.len(), b.legal_moves(Color::White).move_count());
    assert!(rows.iter().any(|(m, n)| m == "b1b7" && *n == 0));
    assert_eq!(b, before);
}
