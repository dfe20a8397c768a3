use kpbot::board::{Board, Color};
use kpbot::error::SetupError;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn random_positions_round_trip() {
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..100 {
        let b = Board::random(&mut rng);
        let fen = b.to_fen();
        let back = Board::from_fen(&fen).unwrap();
        assert_eq!(back.to_fen(), fen);
        assert_eq!(back.grid(), b.grid());
    }
}

#[test]
fn positions_reached_by_play_round_trip() {
    let mut b = Board::from_fen("8/8/8/8/8/3k4/8/3QK3").unwrap();
    for mv in b.legal_moves(Color::Black).moves().collect::<Vec<_>>() {
        let undo = b.make_move(mv);
        let parsed = Board::from_fen(b.current_fen()).unwrap();
        assert_eq!(parsed.grid(), b.grid());
        b.unmake_move(undo);
    }
}

#[test]
fn counts_are_checked() {
    assert_eq!(Board::from_fen("4k3/8/8/8/8/8/3PP3/4K3").unwrap_err(), SetupError::TooManyPieces(2));
    assert_eq!(Board::from_fen("4k3/8/8/8/8/8/4K3/4K3").unwrap_err(), SetupError::DuplicateKing);
    assert_eq!(Board::from_fen("4k3/8/8/8/8/8/4P3/8").unwrap_err(), SetupError::MissingKing(Color::White));
    assert_eq!(Board::from_fen("4k3/8/8/8/8/8/4q3/4K3").unwrap_err(), SetupError::UnsupportedPiece('q'));
}

#[test]
fn load_from_fen_resets_the_white_piece() {
    let mut b = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3").unwrap();
    assert!(b.white_piece().is_some());
    b.load_from_fen("4k3/8/8/8/8/8/8/4K3").unwrap();
    assert!(b.white_piece().is_none());
    assert_eq!(b.white_king().map(|k| k.square.to_string()), Some("e1".to_string()));
    assert!(b.load_from_fen("not a board").is_err());
    assert_eq!(b.to_fen(), "4k3/8/8/8/8/8/8/4K3");
}
