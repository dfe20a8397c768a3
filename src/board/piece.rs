use std::fmt;
use serde::{Deserialize, Serialize};
use super::grid::Grid;
use super::square::{Coord, Square};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self { Color::White => Color::Black, Color::Black => Color::White }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Color::White => "white", Color::Black => "black" })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    King,
    Pawn,
    Queen,
}

impl PieceKind {
    pub fn letter(self) -> char {
        match self { PieceKind::King => 'k', PieceKind::Pawn => 'p', PieceKind::Queen => 'q' }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::King),
            'p' => Some(PieceKind::Pawn),
            'q' => Some(PieceKind::Queen),
            _ => None,
        }
    }
}

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, -1),
    (0, 1), (1, -1), (1, 0), (1, 1),
];

/// A piece together with the square it stands on. Pieces are values: the grid
/// cell holding a piece always carries that cell's coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Self { Self { kind, color, square } }
    pub fn king(color: Color, square: Square) -> Self { Self::new(PieceKind::King, color, square) }
    pub fn pawn(square: Square) -> Self { Self::new(PieceKind::Pawn, Color::White, square) }
    pub fn queen(color: Color, square: Square) -> Self { Self::new(PieceKind::Queen, color, square) }

    pub fn letter(&self) -> char {
        let c = self.kind.letter();
        if self.color == Color::White { c.to_ascii_uppercase() } else { c }
    }

    pub fn at(mut self, square: Square) -> Self { self.square = square; self }

    /// Pseudo-legal destinations, ignoring whether the owner's king is left in check.
    pub fn possible_moves(&self, grid: &Grid) -> Vec<Square> {
        match self.kind {
            PieceKind::King => self.king_moves(grid),
            PieceKind::Pawn => self.pawn_moves(grid),
            PieceKind::Queen => self.queen_moves(grid),
        }
    }

    /// Squares this piece threatens for check detection. King and pawn offsets are
    /// not clipped to the board (pawn columns are), so the result may hold
    /// off-board coordinates.
    pub fn attacked_squares(&self, grid: &Grid) -> Vec<Coord> {
        match self.kind {
            PieceKind::King => self.king_attacks(),
            PieceKind::Pawn => self.pawn_attacks(),
            PieceKind::Queen => self.queen_attacks(grid),
        }
    }

    fn king_moves(&self, grid: &Grid) -> Vec<Square> {
        DIRECTIONS.iter()
            .filter_map(|&(dr, dc)| self.square.offset(dr, dc))
            .filter(|&sq| grid.get(sq).map_or(true, |p| p.color != self.color))
            .collect()
    }

    fn king_attacks(&self) -> Vec<Coord> {
        let c = self.square.coord();
        DIRECTIONS.iter().map(|&(dr, dc)| Coord::new(c.row + dr as i8, c.col + dc as i8)).collect()
    }

    // Pawns only belong to White and always advance toward row 0.
    fn pawn_moves(&self, grid: &Grid) -> Vec<Square> {
        let mut out = Vec::with_capacity(2);
        if let Some(one) = self.square.offset(-1, 0) {
            if grid.get(one).is_none() {
                out.push(one);
                if self.square.row == 6 {
                    let two = Square::new(4, self.square.col);
                    if grid.get(two).is_none() { out.push(two); }
                }
            }
        }
        out
    }

    fn pawn_attacks(&self) -> Vec<Coord> {
        let row = self.square.row as i8 - 1;
        [self.square.col as i8 - 1, self.square.col as i8 + 1].into_iter()
            .filter(|c| (0..8).contains(c))
            .map(|col| Coord::new(row, col))
            .collect()
    }

    fn queen_moves(&self, grid: &Grid) -> Vec<Square> {
        let mut out = Vec::with_capacity(27);
        for &(dr, dc) in &DIRECTIONS {
            for i in 1..8 {
                let Some(sq) = self.square.offset(i * dr, i * dc) else { break };
                match grid.get(sq) {
                    None => out.push(sq),
                    Some(p) if p.color != self.color => { out.push(sq); break; }
                    Some(_) => break,
                }
            }
        }
        out
    }

    // Rays stop on the first occupied square of either color, inclusive.
    fn queen_attacks(&self, grid: &Grid) -> Vec<Coord> {
        let mut out = Vec::with_capacity(27);
        for &(dr, dc) in &DIRECTIONS {
            for i in 1..8 {
                let Some(sq) = self.square.offset(i * dr, i * dc) else { break };
                out.push(sq.coord());
                if grid.get(sq).is_some() { break; }
            }
        }
        out
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter(), self.square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square { Square::from_algebraic(s).unwrap() }

    #[test]
    fn king_in_corner_attacks_off_board_squares() {
        let k = Piece::king(Color::Black, sq("a8"));
        let attacks = k.attacked_squares(&Grid::empty());
        assert_eq!(attacks.len(), 8);
        assert!(attacks.contains(&Coord::new(-1, -1)));
        assert_eq!(k.possible_moves(&Grid::empty()).len(), 3);
    }

    #[test]
    fn pawn_double_step_needs_both_squares_empty() {
        let mut g = Grid::empty();
        let p = Piece::pawn(sq("e2"));
        g.place_piece(p);
        assert_eq!(p.possible_moves(&g), vec![sq("e3"), sq("e4")]);
        g.place_piece(Piece::king(Color::Black, sq("e4")));
        assert_eq!(p.possible_moves(&g), vec![sq("e3")]);
        g.place_piece(Piece::king(Color::Black, sq("e3")));
        assert!(p.possible_moves(&g).is_empty());
    }

    #[test]
    fn pawn_attack_row_is_not_clipped() {
        let p = Piece::pawn(sq("a8"));
        let a = p.attacked_squares(&Grid::empty());
        assert_eq!(a, vec![Coord::new(-1, 1)]);
    }

    #[test]
    fn queen_attack_ray_includes_friendly_blocker() {
        let mut g = Grid::empty();
        let q = Piece::queen(Color::White, sq("d1"));
        g.place_piece(q);
        g.place_piece(Piece::king(Color::White, sq("d3")));
        let moves = q.possible_moves(&g);
        let attacks = q.attacked_squares(&g);
        assert!(!moves.contains(&sq("d3")));
        assert!(attacks.contains(&sq("d3").coord()));
        assert!(!attacks.contains(&sq("d4").coord()));
    }
}
