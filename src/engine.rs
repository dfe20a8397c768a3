use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::board::{Board, Move};
use crate::search::alphabeta::{mate_in, SearchParams, SearchStats, Searcher, DEFAULT_DEPTH};
use crate::search::heuristic::{DecisionRule, HeuristicSolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Minimax,
    #[value(alias = "greedy")]
    #[serde(alias = "greedy")]
    Heuristic,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Algorithm::Minimax => "minimax", Algorithm::Heuristic => "heuristic" })
    }
}

impl FromStr for Algorithm {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "heuristic" | "greedy" => Ok(Algorithm::Heuristic),
            _ => Err(format!("unknown algorithm {s:?}; use minimax or heuristic")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub algorithm: Algorithm,
    pub depth: u32,
    /// Seed for the heuristic solver's random fallback; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self { Self { algorithm: Algorithm::Minimax, depth: DEFAULT_DEPTH, seed: None } }
}

/// Diagnostics attached to an engine move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Analysis {
    Search(SearchStats),
    Rule { decision_rule: DecisionRule },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineMove {
    pub mv: Move,
    pub score: i32,
    pub analysis: Analysis,
}

/// One of the two decision engines.
#[derive(Debug, Clone)]
pub enum Engine {
    Minimax(Searcher),
    Heuristic(HeuristicSolver),
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Self {
        match config.algorithm {
            Algorithm::Minimax => Engine::Minimax(Searcher::with_params(SearchParams { depth: config.depth, ..SearchParams::default() })),
            Algorithm::Heuristic => Engine::Heuristic(match config.seed {
                Some(s) => HeuristicSolver::with_seed(s),
                None => HeuristicSolver::new(),
            }),
        }
    }

    /// `None` when the side to move has no legal move.
    pub fn find_best_move(&mut self, board: &Board) -> Option<EngineMove> {
        match self {
            Engine::Minimax(s) => {
                let r = s.find_best_move(board);
                r.bestmove.map(|mv| EngineMove { mv, score: r.score, analysis: Analysis::Search(r.stats()) })
            }
            Engine::Heuristic(h) => h.find_best_move(board).map(|r| EngineMove {
                mv: r.mv,
                score: r.score,
                analysis: Analysis::Rule { decision_rule: r.rule },
            }),
        }
    }

    /// Moves to mate implied by `score`; only the search engine reports one.
    pub fn mate_in(&self, score: i32) -> Option<u32> {
        match self {
            Engine::Minimax(s) => mate_in(score, s.depth()),
            Engine::Heuristic(_) => None,
        }
    }
}
