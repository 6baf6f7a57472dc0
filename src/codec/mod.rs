//! Fixed-width text encoding of a [`BoardState`], the only format the move
//! oracle understands.
//!
//! Layout (byte offsets):
//!
//! | range     | content                                                   |
//! |-----------|-----------------------------------------------------------|
//! | `0..64`   | cells, row-major from a8; `.` empty, lowercase = Black    |
//! | `64..68`  | castling `t`/`f`: Black Q, Black K, White Q, White K      |
//! | `68`      | en-passant: `f`, or the target file as `0`..=`7`          |
//! | `69`      | side to move: `b` or `w`                                  |

mod glyph_tables;

use crate::board::{BoardState, CastlingRights, Color, Piece, WIRE_ORDER};
use crate::error::{ParseError, ParseReason};
use crate::square::Square;
use arrayvec::ArrayString;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use tracing::trace;

use glyph_tables::{PC_TO_CHAR, glyph_to_piece, pc_index};

pub const ENCODED_LEN: usize = 70;

const CASTLE_OFFSET: usize = 64;
const EN_PASSANT_OFFSET: usize = 68;
const TURN_OFFSET: usize = 69;

/// Encoding of [`BoardState::new`].
pub const START_POSITION: &str =
    "rnbqkbnrpppppppp................................PPPPPPPPRNBQKBNRttttfw";

/// An encoded board, always exactly [`ENCODED_LEN`] ASCII bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedState(ArrayString<ENCODED_LEN>);

impl EncodedState {
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for EncodedState {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for EncodedState {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EncodedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for EncodedState {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Serialize a board into its 70-character wire form.
pub fn encode(board: &BoardState) -> EncodedState {
    let mut out = ArrayString::<ENCODED_LEN>::new();

    for cell in board.cells() {
        out.push(match cell {
            Some(p) => PC_TO_CHAR[pc_index(p.kind, p.color)],
            None => '.',
        });
    }

    let rights = board.castling().bits();
    for flag in WIRE_ORDER {
        out.push(if rights & flag != 0 { 't' } else { 'f' });
    }

    out.push(match board.en_passant() {
        Some(file) => (b'0' + file) as char,
        None => 'f',
    });

    out.push(match board.turn() {
        Color::Black => 'b',
        Color::White => 'w',
    });

    debug_assert_eq!(out.len(), ENCODED_LEN);
    trace!(target: "codec", encoded = %out, "encoded board");
    EncodedState(out)
}

/// Parse a 70-character wire string.
///
/// Slots are checked in order and the error names the first byte that does
/// not belong to its slot's alphabet; a string that is valid as far as it
/// goes but has the wrong length fails at `min(len, 70)`.
pub fn decode(s: &str) -> Result<BoardState, ParseError> {
    let bytes = s.as_bytes();
    let at = |index: usize| -> Result<u8, ParseError> {
        bytes.get(index).copied().ok_or(ParseError {
            index,
            reason: ParseReason::Length(bytes.len()),
        })
    };
    let fail = |index: usize, reason: fn(char) -> ParseReason| ParseError {
        index,
        reason: reason(s.get(index..).and_then(|r| r.chars().next()).unwrap_or('\0')),
    };

    let mut cells: [Option<Piece>; 64] = [None; 64];
    for (idx, cell) in cells.iter_mut().enumerate() {
        let b = at(idx)?;
        if b == b'.' {
            continue;
        }
        let (kind, color) = glyph_to_piece(b).ok_or_else(|| fail(idx, ParseReason::Piece))?;
        *cell = Some(Piece::new(color, kind, Square::from_index(idx as u8)));
    }

    let mut rights = 0;
    for (i, flag) in WIRE_ORDER.into_iter().enumerate() {
        let idx = CASTLE_OFFSET + i;
        match at(idx)? {
            b't' => rights |= flag,
            b'f' => {}
            _ => return Err(fail(idx, ParseReason::Castling)),
        }
    }

    let en_passant = match at(EN_PASSANT_OFFSET)? {
        b'f' => None,
        d @ b'0'..=b'7' => Some(d - b'0'),
        _ => return Err(fail(EN_PASSANT_OFFSET, ParseReason::EnPassant)),
    };

    let turn = match at(TURN_OFFSET)? {
        b'b' => Color::Black,
        b'w' => Color::White,
        _ => return Err(fail(TURN_OFFSET, ParseReason::Turn)),
    };

    if bytes.len() > ENCODED_LEN {
        return Err(ParseError {
            index: ENCODED_LEN,
            reason: ParseReason::Length(bytes.len()),
        });
    }

    trace!(target: "codec", encoded = s, "decoded board");
    Ok(BoardState::from_parts(
        cells,
        CastlingRights::from_bits(rights),
        en_passant,
        turn,
    ))
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", encode(self))
    }
}

impl FromStr for BoardState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

// Boards travel through serde as their wire string.
impl Serialize for BoardState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(encode(self).as_str())
    }
}

impl<'de> Deserialize<'de> for BoardState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CastleSide, PieceKind};

    #[test]
    fn start_position_literal() {
        assert_eq!(encode(&BoardState::new()), START_POSITION);
        assert_eq!(decode(START_POSITION).unwrap(), BoardState::new());
    }

    #[test]
    fn en_passant_digit_occupies_single_slot() {
        let s = "rnbqkbnrpppp.ppp............p...................PPPPPPPPRNBQKBNRtttt4w";
        let b = decode(s).unwrap();
        assert_eq!(b.en_passant(), Some(4));
        assert_eq!(b.turn(), Color::White);
        assert_eq!(encode(&b), s);
    }

    #[test]
    fn castling_flags_follow_wire_order() {
        let s = "rnbqkbnrpppppppp................................PPPPPPPPRNBQKBNRftfffb";
        let b = decode(s).unwrap();
        let c = b.castling();
        assert!(!c.has(Color::Black, CastleSide::QueenSide));
        assert!(c.has(Color::Black, CastleSide::KingSide));
        assert!(!c.has(Color::White, CastleSide::QueenSide));
        assert!(!c.has(Color::White, CastleSide::KingSide));
        assert_eq!(b.turn(), Color::Black);
    }

    #[test]
    fn lowercase_is_black() {
        let b = decode(START_POSITION).unwrap();
        let a8 = b.piece_at(Square::from_index(0)).unwrap();
        assert_eq!((a8.color, a8.kind), (Color::Black, PieceKind::Rook));
        let h1 = b.piece_at(Square::from_index(63)).unwrap();
        assert_eq!((h1.color, h1.kind), (Color::White, PieceKind::Rook));
    }

    #[test]
    fn rejects_unknown_piece_letter() {
        let mut s = START_POSITION.to_string();
        s.replace_range(10..11, "x");
        let err = decode(&s).unwrap_err();
        assert_eq!(err.index, 10);
        assert_eq!(err.reason, ParseReason::Piece('x'));
    }

    #[test]
    fn rejects_bad_slots() {
        let bad_castle = START_POSITION.replace("ttttfw", "ttxtfw");
        assert_eq!(decode(&bad_castle).unwrap_err().index, 66);

        let bad_ep = START_POSITION.replace("ttttfw", "tttt8w");
        let err = decode(&bad_ep).unwrap_err();
        assert_eq!((err.index, err.reason), (68, ParseReason::EnPassant('8')));

        let bad_turn = START_POSITION.replace("ttttfw", "ttttfW");
        let err = decode(&bad_turn).unwrap_err();
        assert_eq!((err.index, err.reason), (69, ParseReason::Turn('W')));
    }

    #[test]
    fn wrong_length_reports_first_missing_or_extra_byte() {
        let short = &START_POSITION[..69];
        let err = decode(short).unwrap_err();
        assert_eq!((err.index, err.reason), (69, ParseReason::Length(69)));

        let long = format!("{}w", START_POSITION);
        let err = decode(&long).unwrap_err();
        assert_eq!((err.index, err.reason), (70, ParseReason::Length(71)));

        assert_eq!(decode("").unwrap_err().index, 0);
    }

    #[test]
    fn bad_symbol_before_truncation_wins() {
        let err = decode("rnbq?").unwrap_err();
        assert_eq!((err.index, err.reason), (4, ParseReason::Piece('?')));
    }

    #[test]
    fn non_ascii_is_reported_as_char() {
        let s = START_POSITION.replacen('.', "é", 1);
        let err = decode(&s).unwrap_err();
        assert_eq!((err.index, err.reason), (16, ParseReason::Piece('é')));
    }

    #[test]
    fn display_and_from_str_use_wire_form() {
        let b: BoardState = START_POSITION.parse().unwrap();
        assert_eq!(b.to_string(), START_POSITION);
    }
}
