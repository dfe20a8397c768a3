use super::attacks::AttackSet;
use super::piece::{Color, Piece, PieceKind};
use super::square::Square;

/// Piece placement plus the three tracked slots (both kings and White's single
/// non-king piece). `Copy`, so lookahead can work on a scratch copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: [[Option<Piece>; 8]; 8],
    white_king: Option<Square>,
    white_piece: Option<Square>,
    black_king: Option<Square>,
}

impl Default for Grid {
    fn default() -> Self { Self::empty() }
}

impl Grid {
    pub const fn empty() -> Self {
        Self { cells: [[None; 8]; 8], white_king: None, white_piece: None, black_king: None }
    }

    pub fn get(&self, sq: Square) -> Option<Piece> { self.cells[sq.row as usize][sq.col as usize] }

    fn set(&mut self, sq: Square, p: Option<Piece>) { self.cells[sq.row as usize][sq.col as usize] = p; }

    /// Inserts a piece and points the matching slot at it. A second non-king piece
    /// takes over the White-piece slot.
    pub fn place_piece(&mut self, piece: Piece) {
        self.set(piece.square, Some(piece));
        match (piece.kind, piece.color) {
            (PieceKind::King, Color::White) => self.white_king = Some(piece.square),
            (PieceKind::King, Color::Black) => self.black_king = Some(piece.square),
            _ => self.white_piece = Some(piece.square),
        }
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        match color { Color::White => self.white_king, Color::Black => self.black_king }
    }

    pub fn king(&self, color: Color) -> Option<Piece> { self.king_square(color).and_then(|sq| self.get(sq)) }

    pub fn white_piece(&self) -> Option<Piece> { self.white_piece.and_then(|sq| self.get(sq)) }

    pub(crate) fn white_piece_slot(&self) -> Option<Square> { self.white_piece }

    pub(crate) fn set_white_piece_slot(&mut self, slot: Option<Square>) { self.white_piece = slot; }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.cells.iter().flat_map(|row| row.iter().filter_map(|c| *c))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    /// Moves whatever stands on `from` to `to`, updating slots. A piece landing on
    /// the tracked White piece clears that slot. Returns the displaced occupant.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let Some(piece) = self.get(from) else { return None };
        let captured = self.get(to);
        self.set(from, None);
        if captured.is_some() && self.white_piece == Some(to) { self.white_piece = None; }
        self.set(to, Some(piece.at(to)));
        match (piece.kind, piece.color) {
            (PieceKind::King, Color::White) => self.white_king = Some(to),
            (PieceKind::King, Color::Black) => self.black_king = Some(to),
            _ => if self.white_piece == Some(from) { self.white_piece = Some(to); },
        }
        captured
    }

    /// Replaces the piece on `sq` in place (promotion, unmake).
    pub(crate) fn replace(&mut self, sq: Square, piece: Option<Piece>) { self.set(sq, piece.map(|p| p.at(sq))); }

    pub(crate) fn set_king_slot(&mut self, color: Color, sq: Square) {
        match color { Color::White => self.white_king = Some(sq), Color::Black => self.black_king = Some(sq) }
    }

    pub fn attacked_squares(&self, by: Color) -> AttackSet {
        let mut set = AttackSet::new();
        for p in self.pieces_of(by) { set.extend(p.attacked_squares(self)); }
        set
    }

    pub fn is_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(k) => self.attacked_squares(color.opponent()).contains(k),
            None => false,
        }
    }

    /// Destinations from `piece`'s possible moves that do not leave its own king
    /// attacked. Each candidate runs on a scratch copy, so `self` is never touched.
    pub fn legal_moves_for_piece(&self, piece: &Piece) -> Vec<Square> {
        let mut out: Vec<Square> = piece.possible_moves(self).into_iter().filter(|&to| {
            let mut scratch = *self;
            scratch.relocate(piece.square, to);
            !scratch.is_check(piece.color)
        }).collect();
        out.sort();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square { Square::from_algebraic(s).unwrap() }

    #[test]
    fn relocate_onto_white_piece_clears_slot() {
        let mut g = Grid::empty();
        g.place_piece(Piece::king(Color::White, sq("a1")));
        g.place_piece(Piece::pawn(sq("d4")));
        g.place_piece(Piece::king(Color::Black, sq("e5")));
        let captured = g.relocate(sq("e5"), sq("d4"));
        assert_eq!(captured.map(|p| p.kind), Some(PieceKind::Pawn));
        assert!(g.white_piece().is_none());
        assert_eq!(g.king_square(Color::Black), Some(sq("d4")));
        assert_eq!(g.get(sq("d4")).unwrap().square, sq("d4"));
    }

    #[test]
    fn king_cannot_step_next_to_enemy_king() {
        let mut g = Grid::empty();
        g.place_piece(Piece::king(Color::White, sq("e4")));
        g.place_piece(Piece::king(Color::Black, sq("e6")));
        let bk = g.king(Color::Black).unwrap();
        let legal = g.legal_moves_for_piece(&bk);
        assert!(!legal.contains(&sq("e5")));
        assert!(!legal.contains(&sq("d5")));
        assert!(legal.contains(&sq("e7")));
        assert_eq!(legal.len(), 5);
    }
}
