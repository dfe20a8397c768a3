use kpbot::board::{Board, Square};
use kpbot::engine::Algorithm;
use kpbot::selfplay::{generate_games, play_game, SelfPlayParams, Summary};

fn params(algorithm: Algorithm) -> SelfPlayParams {
    SelfPlayParams { games: 4, max_plies: 12, algorithm, depth: 2, black_depth: 1, seed: 9, threads: 2 }
}

#[test]
fn selfplay_generates_games_deterministically() {
    let p = params(Algorithm::Minimax);
    let g1 = generate_games(&p).unwrap();
    let g2 = generate_games(&p).unwrap();
    assert_eq!(g1.len(), 4);
    assert_eq!(g1, g2);
    assert_eq!(play_game(&p, 2), g1[2]);
}

#[test]
fn recorded_moves_replay_legally() {
    let games = generate_games(&params(Algorithm::Heuristic)).unwrap();
    for g in &games {
        assert!(g.moves.len() <= 12);
        let mut b = Board::from_fen(&g.start_fen).unwrap();
        for m in &g.moves {
            let from = Square::from_algebraic(&m[..2]).unwrap();
            let to = Square::from_algebraic(&m[2..]).unwrap();
            b.play(from, to).unwrap_or_else(|e| panic!("{m} in game {}: {e}", g.seed));
        }
        if g.result.is_none() { assert_eq!(g.moves.len(), 12); }
    }
    let s = Summary::from_records(&games);
    assert_eq!(s.white_wins + s.black_wins + s.draws + s.unfinished, 4);
}
