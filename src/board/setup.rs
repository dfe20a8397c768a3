use log::debug;
use rand::Rng;
use super::grid::Grid;
use super::piece::{Color, Piece};
use super::square::Square;
use super::Board;
use crate::error::SetupError;

impl Board {
    /// King + pawn vs king from three algebraic squares.
    pub fn from_positions(white_king: &str, white_pawn: &str, black_king: &str) -> Result<Self, SetupError> {
        let wk = Square::from_algebraic(white_king)?;
        let wp = Square::from_algebraic(white_pawn)?;
        let bk = Square::from_algebraic(black_king)?;
        if wk == wp || wp == bk { return Err(SetupError::Overlap(wp)); }
        if wk == bk { return Err(SetupError::Overlap(wk)); }
        if wp.row == 0 || wp.row == 7 { return Err(SetupError::PawnOnBackRank(wp)); }
        if wk.is_adjacent(bk) { return Err(SetupError::AdjacentKings(wk, bk)); }
        Ok(Self::from_grid(kpk_grid(wk, wp, bk)))
    }

    /// Three lines: White king, White pawn, Black king.
    pub fn from_text(text: &str) -> Result<Self, SetupError> {
        let lines: Vec<&str> = text.trim().lines().map(str::trim).collect();
        if lines.len() != 3 { return Err(SetupError::LineCount(lines.len())); }
        Self::from_positions(lines[0], lines[1], lines[2])
    }

    /// Random king + pawn vs king: kings never adjacent, the pawn off the first
    /// and last ranks and off both kings.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut tries = 0u32;
        loop {
            tries += 1;
            let wk = rng.gen_range(0..64u8);
            let mut bk = rng.gen_range(0..63u8);
            if bk >= wk { bk += 1; }
            let wk = Square::new(wk / 8, wk % 8);
            let bk = Square::new(bk / 8, bk % 8);
            let wp = Square::new(rng.gen_range(1..=6), rng.gen_range(0..8));
            if wk.is_adjacent(bk) || wp == wk || wp == bk { continue; }
            debug!("random setup after {tries} draws: K{wk} P{wp} k{bk}");
            return Self::from_grid(kpk_grid(wk, wp, bk));
        }
    }
}

fn kpk_grid(wk: Square, wp: Square, bk: Square) -> Grid {
    let mut g = Grid::empty();
    g.place_piece(Piece::king(Color::White, wk));
    g.place_piece(Piece::pawn(wp));
    g.place_piece(Piece::king(Color::Black, bk));
    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn text_setup_reports_offending_input() {
        assert_eq!(Board::from_text("e1\ne2").unwrap_err(), SetupError::LineCount(2));
        assert_eq!(Board::from_text("e1\nz2\ne8").unwrap_err(), SetupError::BadSquare("z2".into()));
        assert_eq!(Board::from_text("e1\ne8\nc8").unwrap_err(), SetupError::PawnOnBackRank(Square::new(0, 4)));
        let b = Board::from_text("e1\ne2\ne8\n").unwrap();
        assert_eq!(b.to_fen(), "4k3/8/8/8/8/8/4P3/4K3");
        assert_eq!(b.history().len(), 1);
    }

    #[test]
    fn random_positions_respect_constraints() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let b = Board::random(&mut rng);
            let wk = b.white_king().unwrap().square;
            let bk = b.black_king().unwrap().square;
            let wp = b.white_piece().unwrap().square;
            assert!(!wk.is_adjacent(bk));
            assert!((1..=6).contains(&wp.row));
            assert_ne!(wp, wk);
            assert_ne!(wp, bk);
        }
    }
}
