// src/board/castle_bits.rs

use super::Color;
use serde::{Deserialize, Serialize};

/// Underlying bit type for castling rights.
pub type CastleBits = u8;

// Bit order follows the wire order of the encoded state string.
pub const CASTLE_BQ: CastleBits = 0b0001;
pub const CASTLE_BK: CastleBits = 0b0010;
pub const CASTLE_WQ: CastleBits = 0b0100;
pub const CASTLE_WK: CastleBits = 0b1000;

pub const CASTLE_ALL: CastleBits = CASTLE_BQ | CASTLE_BK | CASTLE_WQ | CASTLE_WK;

/// Flags in the order they appear on the wire.
pub const WIRE_ORDER: [CastleBits; 4] = [CASTLE_BQ, CASTLE_BK, CASTLE_WQ, CASTLE_WK];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    QueenSide,
    KingSide,
}

/// Per-color, per-side castling permissions.
///
/// Rights only ever shrink through [`CastlingRights::revoke`]; granting them
/// back requires a reset or a full snapshot replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "CastleBits", into = "CastleBits")]
pub struct CastlingRights(CastleBits);

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights(CASTLE_ALL);
    pub const NONE: CastlingRights = CastlingRights(0);

    #[inline(always)]
    pub const fn flag(color: Color, side: CastleSide) -> CastleBits {
        match (color, side) {
            (Color::Black, CastleSide::QueenSide) => CASTLE_BQ,
            (Color::Black, CastleSide::KingSide) => CASTLE_BK,
            (Color::White, CastleSide::QueenSide) => CASTLE_WQ,
            (Color::White, CastleSide::KingSide) => CASTLE_WK,
        }
    }

    /// Build from raw bits; bits above the four flags are dropped.
    #[inline]
    pub const fn from_bits(bits: CastleBits) -> Self {
        CastlingRights(bits & CASTLE_ALL)
    }

    #[inline(always)]
    pub const fn bits(self) -> CastleBits {
        self.0
    }

    #[inline(always)]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    #[inline]
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Drop both sides for one color (e.g. after its king moved).
    #[inline]
    pub fn revoke_color(&mut self, color: Color) {
        self.revoke(color, CastleSide::QueenSide);
        self.revoke(color, CastleSide::KingSide);
    }
}

impl From<CastleBits> for CastlingRights {
    fn from(bits: CastleBits) -> Self {
        CastlingRights::from_bits(bits)
    }
}

impl From<CastlingRights> for CastleBits {
    fn from(rights: CastlingRights) -> Self {
        rights.0
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn castle_bits_single_and_disjoint() {
        assert_eq!(CASTLE_WK.count_ones(), 1);
        assert_eq!(CASTLE_WQ.count_ones(), 1);
        assert_eq!(CASTLE_BK.count_ones(), 1);
        assert_eq!(CASTLE_BQ.count_ones(), 1);
        assert_eq!(CASTLE_ALL.count_ones(), 4);
    }

    #[test]
    fn revoke_is_monotonic() {
        let mut rights = CastlingRights::default();
        rights.revoke(Color::White, CastleSide::KingSide);
        assert!(!rights.has(Color::White, CastleSide::KingSide));
        assert!(rights.has(Color::White, CastleSide::QueenSide));

        // revoking twice is a no-op, never a toggle
        rights.revoke(Color::White, CastleSide::KingSide);
        assert!(!rights.has(Color::White, CastleSide::KingSide));

        rights.revoke_color(Color::Black);
        assert_eq!(rights.bits(), CASTLE_WQ);
    }

    #[test]
    fn from_bits_masks_high_bits() {
        assert_eq!(CastlingRights::from_bits(0xFF), CastlingRights::ALL);
    }

    #[test]
    fn serde_masks_high_bits() {
        let bytes = bincode::serialize(&0xF0u8).unwrap();
        let rights: CastlingRights = bincode::deserialize(&bytes).unwrap();
        assert_eq!(rights, CastlingRights::NONE);

        let bytes = bincode::serialize(&(0xF0u8 | CASTLE_WK)).unwrap();
        let rights: CastlingRights = bincode::deserialize(&bytes).unwrap();
        assert_eq!(rights.bits(), CASTLE_WK);

        let bytes = bincode::serialize(&CastlingRights::ALL).unwrap();
        assert_eq!(bincode::deserialize::<u8>(&bytes).unwrap(), CASTLE_ALL);
    }
}
