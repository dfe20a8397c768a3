// Grid-only FEN: eight '/'-separated ranks, rank 8 first. No side to move,
// castling, or counters.
use super::grid::Grid;
use super::piece::{Color, Piece, PieceKind};
use super::square::Square;
use crate::error::SetupError;

pub fn to_fen(grid: &Grid) -> String {
    let mut fen = String::with_capacity(24);
    for row in 0..8u8 {
        let mut empty = 0;
        for col in 0..8u8 {
            match grid.get(Square::new(row, col)) {
                Some(p) => {
                    if empty > 0 { fen.push(char::from(b'0' + empty)); empty = 0; }
                    fen.push(p.letter());
                }
                None => empty += 1,
            }
        }
        if empty > 0 { fen.push(char::from(b'0' + empty)); }
        if row < 7 { fen.push('/'); }
    }
    fen
}

/// Parses a grid and checks it holds exactly one king per side, at most one
/// White non-king piece and no Black non-king pieces.
pub fn parse_fen(fen: &str) -> Result<Grid, SetupError> {
    let text = fen.trim();
    let ranks: Vec<&str> = text.split('/').collect();
    if ranks.len() != 8 { return Err(SetupError::BadFen(format!("expected 8 ranks, got {} in {text:?}", ranks.len()))); }
    let mut grid = Grid::empty();
    let (mut white_kings, mut black_kings, mut white_pieces) = (0, 0, 0);
    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0usize;
        for ch in rank.chars() {
            if let Some(d) = ch.to_digit(10) {
                col += d as usize;
                continue;
            }
            let kind = PieceKind::from_letter(ch).ok_or_else(|| SetupError::BadFen(format!("unknown piece {ch:?} in {text:?}")))?;
            if col >= 8 { return Err(SetupError::BadFen(format!("rank {} overflows in {text:?}", 8 - row))); }
            let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };
            match (kind, color) {
                (PieceKind::King, Color::White) => white_kings += 1,
                (PieceKind::King, Color::Black) => black_kings += 1,
                (_, Color::White) => white_pieces += 1,
                (_, Color::Black) => return Err(SetupError::UnsupportedPiece(ch)),
            }
            grid.place_piece(Piece::new(kind, color, Square::new(row as u8, col as u8)));
            col += 1;
        }
        if col != 8 { return Err(SetupError::BadFen(format!("rank {} has width {col} in {text:?}", 8 - row))); }
    }
    match (white_kings, black_kings) {
        (0, _) => return Err(SetupError::MissingKing(Color::White)),
        (_, 0) => return Err(SetupError::MissingKing(Color::Black)),
        (1, 1) => {}
        _ => return Err(SetupError::DuplicateKing),
    }
    if white_pieces > 1 { return Err(SetupError::TooManyPieces(white_pieces)); }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_run_lengths_and_case() {
        let mut g = Grid::empty();
        g.place_piece(Piece::king(Color::Black, Square::new(0, 4)));
        g.place_piece(Piece::pawn(Square::new(6, 4)));
        g.place_piece(Piece::king(Color::White, Square::new(7, 4)));
        assert_eq!(to_fen(&g), "4k3/8/8/8/8/8/4P3/4K3");
    }

    #[test]
    fn rejects_malformed_text() {
        assert!(matches!(parse_fen("8/8/8"), Err(SetupError::BadFen(_))));
        assert!(matches!(parse_fen("4k3/8/8/8/8/8/4P3/4K2"), Err(SetupError::BadFen(_))));
        assert!(matches!(parse_fen("4k3/8/8/8/8/8/4X3/4K3"), Err(SetupError::BadFen(_))));
        assert!(matches!(parse_fen("8/8/8/8/8/8/4P3/4K3"), Err(SetupError::MissingKing(Color::Black))));
        assert!(matches!(parse_fen("4k3/8/8/8/8/8/4p3/4K3"), Err(SetupError::UnsupportedPiece('p'))));
    }
}
