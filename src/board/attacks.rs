use super::square::{Coord, Square};

/// Union of attacked coordinates for one side.
///
/// On-board squares live in a 64-bit mask. King and pawn attack generation does
/// not filter rows or columns that fall off the board, so those coordinates are
/// kept as-is in `off_board`; no king can stand there, which makes them inert for
/// check detection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttackSet {
    mask: u64,
    off_board: Vec<Coord>,
}

impl AttackSet {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, c: Coord) {
        match c.square() {
            Some(sq) => self.mask |= 1u64 << sq.index(),
            None => { if !self.off_board.contains(&c) { self.off_board.push(c); } }
        }
    }

    pub fn extend<I: IntoIterator<Item = Coord>>(&mut self, it: I) {
        for c in it { self.insert(c); }
    }

    pub fn contains(&self, sq: Square) -> bool { self.mask & (1u64 << sq.index()) != 0 }

    pub fn contains_coord(&self, c: Coord) -> bool {
        match c.square() {
            Some(sq) => self.contains(sq),
            None => self.off_board.contains(&c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_off_board_coordinates_once() {
        let mut a = AttackSet::new();
        a.insert(Coord::new(-1, 3));
        a.insert(Coord::new(-1, 3));
        a.insert(Coord::new(2, 3));
        assert_eq!((a.mask.count_ones(), a.off_board.len()), (1, 1));
        assert!(a.contains(Square::new(2, 3)));
        assert!(a.contains_coord(Coord::new(-1, 3)));
        assert!(!a.contains_coord(Coord::new(8, 3)));
    }
}
