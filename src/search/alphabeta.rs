use std::collections::HashSet;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use crate::board::{Board, Color, Move};
use crate::search::eval::{evaluate, DRAW_SCORE, MATE_SCORE};
use crate::search::ordering::order_moves;

const INF: i32 = i32::MAX;

pub const DEFAULT_DEPTH: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub depth: u32,
    /// Sort moves (checks, then queen approaches) before expanding them.
    pub order_moves: bool,
}

impl Default for SearchParams {
    fn default() -> Self { Self { depth: DEFAULT_DEPTH, order_moves: true } }
}

/// Diagnostics reported with every search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub evaluation: i32,
    pub nodes_visited: u64,
    pub search_depth: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub bestmove: Option<Move>,
    pub score: i32,
    pub nodes: u64,
    pub depth: u32,
}

impl SearchResult {
    pub fn stats(&self) -> SearchStats {
        SearchStats { evaluation: self.score, nodes_visited: self.nodes, search_depth: self.depth }
    }
}

/// Depth-limited minimax with alpha-beta pruning. White maximizes, Black
/// minimizes; a position repeated along the current path scores as a draw.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    params: SearchParams,
    pub(crate) nodes: u64,
}

impl Searcher {
    pub fn new(depth: u32) -> Self { Self::with_params(SearchParams { depth, ..SearchParams::default() }) }

    pub fn with_params(params: SearchParams) -> Self {
        Self { params: SearchParams { depth: params.depth.max(1), ..params }, nodes: 0 }
    }

    pub fn depth(&self) -> u32 { self.params.depth }
    pub fn nodes(&self) -> u64 { self.nodes }

    /// Best move for the side to move. `bestmove` is `None` when that side has no
    /// legal move; the board itself is never modified.
    pub fn find_best_move(&mut self, board: &Board) -> SearchResult {
        self.nodes = 0;
        let depth = self.params.depth;
        let stm = board.to_move();
        let maximizing = stm == Color::White;
        let legal = board.legal_moves(stm);
        if legal.is_empty() {
            return SearchResult { bestmove: None, score: self.eval_terminal(board, maximizing), nodes: 0, depth };
        }

        let mut work = board.clone();
        let moves = if self.params.order_moves { order_moves(&mut work, &legal) } else { legal.moves().collect() };
        let mut history: HashSet<String> = board.history().iter().cloned().collect();

        let mut best: Option<(Move, i32)> = None;
        for mv in moves {
            let undo = work.make_move(mv);
            let child_max = work.to_move() == Color::White;
            let score = self.minimax(&mut work, depth - 1, -INF, INF, child_max, &mut history);
            work.unmake_move(undo);
            debug!("root {} {} -> {}", mv.piece.letter(), mv, score);
            let better = match best {
                None => true,
                Some((_, b)) => if maximizing { score > b } else { score < b },
            };
            if better { best = Some((mv, score)); }
        }
        let (bestmove, score) = match best { Some((m, s)) => (Some(m), s), None => (None, DRAW_SCORE) };
        SearchResult { bestmove, score, nodes: self.nodes, depth }
    }

    /// Minimax value of `board` searched `depth` plies deep. `history` holds the
    /// positions already on this path; it is restored before returning.
    pub fn minimax(&mut self, board: &mut Board, depth: u32, mut alpha: i32, mut beta: i32, maximizing: bool, history: &mut HashSet<String>) -> i32 {
        self.nodes += 1;
        let key = board.current_fen().to_owned();
        if history.contains(&key) {
            trace!("repetition at {key}");
            return DRAW_SCORE;
        }
        let stm = board.to_move();
        let legal = board.legal_moves(stm);
        if legal.is_empty() {
            if board.is_check(stm) { return Self::mate_score(maximizing, depth); }
            return DRAW_SCORE;
        }
        if depth == 0 { return evaluate(board); }

        let moves = if self.params.order_moves { order_moves(board, &legal) } else { legal.moves().collect() };
        history.insert(key.clone());
        let mut best = if maximizing { -INF } else { INF };
        for mv in moves {
            let undo = board.make_move(mv);
            let score = self.minimax(board, depth - 1, alpha, beta, !maximizing, history);
            board.unmake_move(undo);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha { break; }
        }
        history.remove(&key);
        best
    }

    // Mates with more depth left (found sooner) score further from zero.
    fn mate_score(maximizing: bool, depth: u32) -> i32 {
        if maximizing { -MATE_SCORE - depth as i32 } else { MATE_SCORE + depth as i32 }
    }

    fn eval_terminal(&self, board: &Board, maximizing: bool) -> i32 {
        if board.is_check(board.to_move()) { return Self::mate_score(maximizing, self.params.depth); }
        DRAW_SCORE
    }
}

/// Full moves until mate for a White-winning score, if it is one.
pub fn mate_in(score: i32, search_depth: u32) -> Option<u32> {
    if score < MATE_SCORE { return None; }
    let plies = search_depth as i32 - (score - MATE_SCORE) + 1;
    Some(((plies.max(1) + 1) / 2) as u32)
}
