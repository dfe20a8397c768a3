use std::fmt;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Serializer};
use crate::board::{Board, Color, LegalMoves, Move, PieceKind};
use crate::search::safety::{gives_check, is_capturable_after_move, is_mate_after_move, king_mobility_after_move};

/// The rule that produced a heuristic move, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionRule {
    ForcedCheckmate,
    QueenBoxing,
    DefendPawn,
    SafePawnPush,
    SafeCheck,
    RestrictKing,
    Random,
}

impl DecisionRule {
    pub fn label(self) -> &'static str {
        match self {
            DecisionRule::ForcedCheckmate => "Forced Checkmate",
            DecisionRule::QueenBoxing => "Queen Boxing Technique",
            DecisionRule::DefendPawn => "Defend Pawn with King",
            DecisionRule::SafePawnPush => "Safely Advance Pawn",
            DecisionRule::SafeCheck => "Deliver Safe Check",
            DecisionRule::RestrictKing => "Restrict Enemy King",
            DecisionRule::Random => "Fallback to Random Move",
        }
    }

    /// Fixed placeholder evaluation reported for each tier.
    pub fn score(self) -> i32 {
        match self {
            DecisionRule::ForcedCheckmate => 10_000,
            DecisionRule::QueenBoxing => 50,
            DecisionRule::DefendPawn => 20,
            DecisionRule::SafePawnPush => 10,
            DecisionRule::SafeCheck => 5,
            DecisionRule::RestrictKing => 4,
            DecisionRule::Random => 0,
        }
    }
}

impl fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

// Reported by its label in game state and engine replies.
impl Serialize for DecisionRule {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> { s.serialize_str(self.label()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicResult {
    pub mv: Move,
    pub score: i32,
    pub rule: DecisionRule,
}

/// Rule cascade: the first rule that yields a move wins outright.
#[derive(Debug, Clone)]
pub struct HeuristicSolver {
    rng: SmallRng,
}

impl Default for HeuristicSolver {
    fn default() -> Self { Self { rng: SmallRng::from_entropy() } }
}

impl HeuristicSolver {
    pub fn new() -> Self { Self::default() }

    pub fn with_seed(seed: u64) -> Self { Self { rng: SmallRng::seed_from_u64(seed) } }

    pub fn find_best_move(&mut self, board: &Board) -> Option<HeuristicResult> {
        let legal = board.legal_moves(board.to_move());
        if legal.is_empty() { return None; }
        let mut work = board.clone();

        let (mv, rule) = checkmate_move(&mut work, &legal).map(|m| (m, DecisionRule::ForcedCheckmate))
            .or_else(|| queen_boxing_move(board, &legal).map(|m| (m, DecisionRule::QueenBoxing)))
            .or_else(|| pawn_defense_move(board, &legal).map(|m| (m, DecisionRule::DefendPawn)))
            .or_else(|| safe_pawn_push(board, &legal).map(|m| (m, DecisionRule::SafePawnPush)))
            .or_else(|| safe_checking_move(&mut work, &legal).map(|m| (m, DecisionRule::SafeCheck)))
            .or_else(|| king_restriction_move(&mut work, &legal).map(|m| (m, DecisionRule::RestrictKing)))
            .or_else(|| self.random_move(&legal).map(|m| (m, DecisionRule::Random)))?;
        debug!("heuristic: {rule} -> {mv}");
        Some(HeuristicResult { mv, score: rule.score(), rule })
    }

    fn random_move(&mut self, legal: &LegalMoves) -> Option<Move> {
        let pieces: Vec<_> = legal.iter().collect();
        if pieces.is_empty() { return None; }
        let (piece, targets) = pieces[self.rng.gen_range(0..pieces.len())];
        let to = targets[self.rng.gen_range(0..targets.len())];
        Some(Move::new(*piece, to))
    }
}

fn checkmate_move(board: &mut Board, legal: &LegalMoves) -> Option<Move> {
    legal.moves().find(|&m| is_mate_after_move(board, m))
}

// Queen lands a knight's jump away from the Black king.
fn queen_boxing_move(board: &Board, legal: &LegalMoves) -> Option<Move> {
    let queen = board.white_piece().filter(|p| p.kind == PieceKind::Queen)?;
    let bk = board.black_king()?.square;
    legal.for_square(queen.square)?.iter().copied().find(|to| {
        let dr = (to.row as i32 - bk.row as i32).abs();
        let dc = (to.col as i32 - bk.col as i32).abs();
        (dr, dc) == (2, 1) || (dr, dc) == (1, 2)
    }).map(|to| Move::new(queen, to))
}

fn pawn_defense_move(board: &Board, legal: &LegalMoves) -> Option<Move> {
    let pawn = board.white_piece().filter(|p| p.kind == PieceKind::Pawn)?;
    if !board.attacked_squares(Color::Black).contains(pawn.square) { return None; }
    let king = board.white_king()?;
    legal.for_square(king.square)?.iter().copied()
        .find(|to| to.is_adjacent(pawn.square))
        .map(|to| Move::new(king, to))
}

// Pawn move reaching the lowest row among those Black does not attack.
fn safe_pawn_push(board: &Board, legal: &LegalMoves) -> Option<Move> {
    let attacked = board.attacked_squares(Color::Black);
    let mut best: Option<Move> = None;
    for m in legal.moves().filter(|m| m.piece.kind == PieceKind::Pawn) {
        if attacked.contains(m.to) { continue; }
        if best.map_or(true, |b| m.to.row < b.to.row) { best = Some(m); }
    }
    best
}

fn safe_checking_move(board: &mut Board, legal: &LegalMoves) -> Option<Move> {
    legal.moves().find(|&m| gives_check(board, m) && !is_capturable_after_move(board, m))
}

fn king_restriction_move(board: &mut Board, legal: &LegalMoves) -> Option<Move> {
    let mut best: Option<(Move, usize)> = None;
    for m in legal.moves() {
        let n = king_mobility_after_move(board, m);
        if best.map_or(true, |(_, b)| n < b) { best = Some((m, n)); }
    }
    best.map(|(m, _)| m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    fn sq(s: &str) -> Square { Square::from_algebraic(s).unwrap() }

    #[test]
    fn random_fallback_picks_a_legal_move() {
        let b = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3").unwrap();
        let legal = b.legal_moves(Color::Black);
        let mut s = HeuristicSolver::with_seed(3);
        for _ in 0..20 {
            let m = s.random_move(&legal).unwrap();
            assert!(legal.contains(m.from(), m.to));
        }
    }

    #[test]
    fn unattacked_pawn_pushes_as_far_as_possible() {
        let b = Board::from_fen("k7/8/8/8/8/8/4P3/K7").unwrap().with_to_move(Color::White);
        let mut s = HeuristicSolver::with_seed(1);
        let r = s.find_best_move(&b).unwrap();
        assert_eq!(r.rule, DecisionRule::SafePawnPush);
        assert_eq!((r.mv.from(), r.mv.to), (sq("e2"), sq("e4")));
        assert_eq!(r.score, 10);
    }
}
