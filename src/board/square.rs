use std::fmt;
use serde::{Serialize, Serializer};
use crate::error::SetupError;

/// An on-board square. Row 0 is rank 8, row 7 is rank 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Self { row, col }
    }

    /// Checked constructor for signed coordinates.
    pub fn try_new(row: i32, col: i32) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) { Some(Self { row: row as u8, col: col as u8 }) } else { None }
    }

    pub fn from_algebraic(s: &str) -> Result<Self, SetupError> {
        let t = s.trim();
        let b = t.as_bytes();
        if b.len() != 2 { return Err(SetupError::BadSquare(s.to_string())); }
        let f = b[0].to_ascii_lowercase();
        let r = b[1];
        if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
            return Err(SetupError::BadSquare(s.to_string()));
        }
        Ok(Self { row: 8 - (r - b'0'), col: f - b'a' })
    }

    /// A move written as "e2e4" or "e2 e4".
    pub fn parse_pair(text: &str) -> Result<(Self, Self), SetupError> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        let (from, to) = match parts.as_slice() {
            [one] if one.len() == 4 && one.is_char_boundary(2) => (&one[..2], &one[2..]),
            [from, to] => (*from, *to),
            _ => return Err(SetupError::BadSquare(text.trim().to_string())),
        };
        Ok((Self::from_algebraic(from)?, Self::from_algebraic(to)?))
    }

    pub fn index(self) -> usize { self.row as usize * 8 + self.col as usize }

    pub fn coord(self) -> Coord { Coord { row: self.row as i8, col: self.col as i8 } }

    pub fn offset(self, dr: i32, dc: i32) -> Option<Self> {
        Self::try_new(self.row as i32 + dr, self.col as i32 + dc)
    }

    pub fn manhattan(self, other: Square) -> i32 {
        (self.row as i32 - other.row as i32).abs() + (self.col as i32 - other.col as i32).abs()
    }

    /// True when the squares touch (or coincide).
    pub fn is_adjacent(self, other: Square) -> bool {
        (self.row as i32 - other.row as i32).abs() <= 1 && (self.col as i32 - other.col as i32).abs() <= 1
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, 8 - self.row)
    }
}

// Serialized as [row, col], the shape the game state reports legal moves in.
impl Serialize for Square {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        [self.row, self.col].serialize(s)
    }
}

/// A signed coordinate that may lie off the board. Only attack generation produces these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self { Self { row, col } }

    pub fn square(self) -> Option<Square> { Square::try_new(self.row as i32, self.col as i32) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic_maps_rank_eight_to_row_zero() {
        assert_eq!(Square::from_algebraic("a8").unwrap(), Square::new(0, 0));
        assert_eq!(Square::from_algebraic("h1").unwrap(), Square::new(7, 7));
        assert_eq!(Square::from_algebraic("e2").unwrap(), Square::new(6, 4));
        assert_eq!(Square::new(6, 4).to_string(), "e2");
    }

    #[test]
    fn move_pairs_read_joined_or_split() {
        let want = (Square::new(6, 4), Square::new(4, 4));
        assert_eq!(Square::parse_pair("e2e4").unwrap(), want);
        assert_eq!(Square::parse_pair(" e2  e4 ").unwrap(), want);
        assert_eq!(Square::parse_pair("e2e4e6"), Err(SetupError::BadSquare("e2e4e6".into())));
        assert_eq!(Square::parse_pair("aé1"), Err(SetupError::BadSquare("aé1".into())));
        assert_eq!(Square::parse_pair("e2 e9"), Err(SetupError::BadSquare("e9".into())));
        assert!(Square::parse_pair("").is_err());
    }

    #[test]
    fn rejects_bad_algebraic() {
        for s in ["", "i1", "a9", "a0", "e22", "44"] {
            assert!(Square::from_algebraic(s).is_err(), "accepted {s:?}");
        }
    }
}
