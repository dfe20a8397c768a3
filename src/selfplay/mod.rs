use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use crate::board::Color;
use crate::engine::{Algorithm, EngineConfig};
use crate::game::{Game, Winner};
use crate::search::alphabeta::Searcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    /// White's engine.
    pub algorithm: Algorithm,
    pub depth: u32,
    /// Depth of the minimax search defending Black.
    pub black_depth: u32,
    pub seed: u64,
    pub threads: usize,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self { games: 100, max_plies: 100, algorithm: Algorithm::Minimax, depth: 3, black_depth: 2, seed: 42, threads: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u64,
    pub start_fen: String,
    pub moves: Vec<String>,
    /// `None` when the ply limit ran out first.
    pub result: Option<Winner>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub games: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    pub draws: usize,
    pub unfinished: usize,
    pub avg_plies: f64,
}

impl Summary {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut s = Summary { games: records.len(), ..Summary::default() };
        for r in records {
            match r.result {
                Some(Winner::White) => s.white_wins += 1,
                Some(Winner::Black) => s.black_wins += 1,
                Some(Winner::Draw) => s.draws += 1,
                None => s.unfinished += 1,
            }
        }
        let plies: usize = records.iter().map(|r| r.moves.len()).sum();
        if !records.is_empty() { s.avg_plies = plies as f64 / records.len() as f64; }
        s
    }
}

/// Seed of game `index`; every game is reproducible on its own.
pub fn game_seed(base: u64, index: usize) -> u64 {
    base ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Plays one game from a random king + pawn position. Black moves first and is
/// defended by a shallow search; White uses the configured engine.
pub fn play_game(params: &SelfPlayParams, index: usize) -> GameRecord {
    let seed = game_seed(params.seed, index);
    let mut rng = SmallRng::seed_from_u64(seed);
    let config = EngineConfig { algorithm: params.algorithm, depth: params.depth, seed: Some(seed) };
    let mut game = Game::random(config, &mut rng);
    let start_fen = game.board().to_fen();
    let mut black = Searcher::new(params.black_depth);
    let mut moves = Vec::new();

    while moves.len() < params.max_plies && game.winner().is_none() {
        let played = match game.board().to_move() {
            Color::Black => {
                let Some(mv) = black.find_best_move(game.board()).bestmove else { break };
                game.player_move(mv.from(), mv.to).ok().map(|_| mv.to_string())
            }
            Color::White => match game.engine_move() {
                Ok(turn) => turn.ai_move.map(|r| format!("{}{}", r.from, r.to)),
                Err(_) => None,
            },
        };
        let Some(m) = played else { break };
        moves.push(m);
    }
    let result = game.winner();
    debug!("game {index}: {start_fen} -> {result:?} after {} plies", moves.len());
    GameRecord { seed, start_fen, moves, result }
}

/// Plays `params.games` independent games on a pool of `params.threads`
/// workers. Output order follows the game index.
pub fn generate_games(params: &SelfPlayParams) -> Result<Vec<GameRecord>, rayon::ThreadPoolBuildError> {
    generate_games_with(params, |_| {})
}

/// Same as `generate_games`, calling `on_done` from the worker as each game ends.
pub fn generate_games_with<F>(params: &SelfPlayParams, on_done: F) -> Result<Vec<GameRecord>, rayon::ThreadPoolBuildError>
where
    F: Fn(&GameRecord) + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new().num_threads(params.threads.max(1)).build()?;
    info!("self-play: {} games, {} depth {}, {} threads", params.games, params.algorithm, params.depth, params.threads.max(1));
    Ok(pool.install(|| {
        (0..params.games).into_par_iter().map(|i| {
            let rec = play_game(params, i);
            on_done(&rec);
            rec
        }).collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_each_outcome() {
        let rec = |result, n| GameRecord { seed: 0, start_fen: String::new(), moves: vec!["e2e3".to_string(); n], result };
        let s = Summary::from_records(&[rec(Some(Winner::White), 4), rec(Some(Winner::Draw), 2), rec(None, 0)]);
        assert_eq!((s.games, s.white_wins, s.draws, s.unfinished, s.black_wins), (3, 1, 1, 1, 0));
        assert!((s.avg_plies - 2.0).abs() < 1e-9);
    }

    #[test]
    fn game_seeds_differ_per_index() {
        assert_ne!(game_seed(7, 0), game_seed(7, 1));
        assert_eq!(game_seed(7, 3), game_seed(7, 3));
    }
}
