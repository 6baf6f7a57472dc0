use crate::square::Square;
use thiserror::Error;

/// Why a byte of an encoded state string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseReason {
    /// The string is not exactly 70 bytes long; carries the actual length.
    #[error("expected 70 characters, got {0}")]
    Length(usize),
    /// A board cell holds something other than `.` or a piece letter.
    #[error("unknown piece symbol {0:?}")]
    Piece(char),
    /// A castling slot holds something other than `t` / `f`.
    #[error("castling flag must be 't' or 'f', got {0:?}")]
    Castling(char),
    /// The en-passant slot holds something other than `f` or `0`..=`7`.
    #[error("en-passant slot must be 'f' or a file digit, got {0:?}")]
    EnPassant(char),
    /// The turn slot holds something other than `b` / `w`.
    #[error("turn must be 'b' or 'w', got {0:?}")]
    Turn(char),
}

/// Malformed encoded state string. `index` names the first offending byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("parse error at index {index}: {reason}")]
pub struct ParseError {
    pub index: usize,
    pub reason: ParseReason,
}

/// Structural violation detected while replacing a board wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidState {
    #[error("grid must have 64 cells, got {0}")]
    GridSize(usize),
    #[error("piece in cell {cell} claims position {claimed}")]
    PositionMismatch { cell: Square, claimed: Square },
    #[error("en-passant file {0} is off the board")]
    EnPassantFile(u8),
}

/// Failure reported by a move oracle call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("move oracle unavailable")]
    Unavailable,
    #[error("move oracle rejected the request: {0}")]
    Rejected(String),
}

/// Rejected pixel size for one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("cell size must be a positive finite number of pixels, got {0}")]
pub struct InvalidCellSize(pub f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_message_names_index_and_reason() {
        let err = ParseError {
            index: 10,
            reason: ParseReason::Piece('x'),
        };
        assert_eq!(err.to_string(), "parse error at index 10: unknown piece symbol 'x'");

        let err = ParseError {
            index: 69,
            reason: ParseReason::Length(69),
        };
        assert_eq!(err.to_string(), "parse error at index 69: expected 70 characters, got 69");
        assert_eq!(
            ParseReason::Turn('q').to_string(),
            "turn must be 'b' or 'w', got 'q'"
        );
    }
}
