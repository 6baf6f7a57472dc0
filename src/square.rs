use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A board coordinate. `file` runs left to right, `rank` top to bottom, so
/// (0, 0) is a8 and (7, 7) is h1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "(u8, u8)", try_from = "(u8, u8)")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Returns `None` when either coordinate is outside 0..=7.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// Row-major index in 0..64. Panics on out-of-range input.
    #[inline(always)]
    pub const fn from_index(idx: u8) -> Self {
        assert!(idx < 64, "square index out of range");
        Square {
            file: idx % 8,
            rank: idx / 8,
        }
    }

    #[inline(always)]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline(always)]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline(always)]
    pub const fn index(self) -> u8 {
        self.rank * 8 + self.file
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square::from_index)
    }
}

impl TryFrom<u8> for Square {
    type Error = u8;

    fn try_from(idx: u8) -> Result<Self, Self::Error> {
        if idx < 64 {
            Ok(Square::from_index(idx))
        } else {
            Err(idx)
        }
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = String;

    fn try_from((file, rank): (u8, u8)) -> Result<Self, Self::Error> {
        Square::new(file, rank).ok_or_else(|| format!("square ({}, {}) is off the board", file, rank))
    }
}

impl From<Square> for (u8, u8) {
    fn from(sq: Square) -> Self {
        (sq.file, sq.rank)
    }
}

impl FromStr for Square {
    type Err = String;

    /// Parse algebraic notation such as `e2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            &[f @ b'a'..=b'h', r @ b'1'..=b'8'] => Ok(Square {
                file: f - b'a',
                rank: b'8' - r,
            }),
            _ => Err(format!("invalid square: {:?}", s)),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file) as char;
        let rank = (b'8' - self.rank) as char;
        write!(f, "{}{}", file, rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_name_algebraically() {
        assert_eq!(Square::from_index(0).to_string(), "a8");
        assert_eq!(Square::from_index(7).to_string(), "h8");
        assert_eq!(Square::from_index(56).to_string(), "a1");
        assert_eq!(Square::from_index(63).to_string(), "h1");
    }

    #[test]
    fn rejects_off_board() {
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
        assert_eq!(Square::try_from(64u8), Err(64));
        assert_eq!(Square::new(4, 6).map(Square::index), Some(52));
    }

    #[test]
    fn parses_algebraic() {
        assert_eq!("e2".parse::<Square>(), Ok(Square::new(4, 6).unwrap()));
        assert_eq!("a8".parse::<Square>(), Ok(Square::from_index(0)));
        assert!("i1".parse::<Square>().is_err());
        assert!("e9".parse::<Square>().is_err());
        assert!("e22".parse::<Square>().is_err());
    }

    #[test]
    fn serde_goes_through_range_check() {
        let e2 = Square::new(4, 6).unwrap();
        let bytes = bincode::serialize(&e2).unwrap();
        assert_eq!(bincode::deserialize::<(u8, u8)>(&bytes).unwrap(), (4, 6));
        assert_eq!(bincode::deserialize::<Square>(&bytes).unwrap(), e2);

        for off in [(9u8, 9u8), (8, 0), (0, 8)] {
            let bytes = bincode::serialize(&off).unwrap();
            assert!(bincode::deserialize::<Square>(&bytes).is_err(), "{:?} accepted", off);
        }
    }
}
