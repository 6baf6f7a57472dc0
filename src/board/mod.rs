use crate::error::InvalidState;
use crate::square::Square;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod castle_bits;
pub use castle_bits::*;

/// Which side is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    Black,
    White,
}

/// Kind of a chess piece, independent of color and square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// A piece bound to the cell it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    position: Square,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind, position: Square) -> Self {
        Piece {
            color,
            kind,
            position,
        }
    }

    #[inline(always)]
    pub const fn position(&self) -> Square {
        self.position
    }
}

// ———————— Starting layout ————————
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

static START: Lazy<BoardState> = Lazy::new(|| {
    let mut cells = [None; 64];
    for file in 0..8u8 {
        let mut put = |rank: u8, color: Color, kind: PieceKind| {
            let sq = Square::from_index(rank * 8 + file);
            cells[sq.index() as usize] = Some(Piece::new(color, kind, sq));
        };
        put(0, Color::Black, BACK_RANK[file as usize]);
        put(1, Color::Black, PieceKind::Pawn);
        put(6, Color::White, PieceKind::Pawn);
        put(7, Color::White, BACK_RANK[file as usize]);
    }
    BoardState {
        cells,
        castling: CastlingRights::ALL,
        en_passant: None,
        turn: Color::White,
    }
});

/// The in-memory board: 64 cells in row-major order (rank 0 = top),
/// castling rights, en-passant file and side to move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    cells: [Option<Piece>; 64],
    castling: CastlingRights,
    en_passant: Option<u8>,
    turn: Color,
}

impl BoardState {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        START.clone()
    }

    /// Restore the standard starting position.
    pub fn reset(&mut self) {
        self.clone_from(&START);
        debug!(target: "board", "reset to starting position");
    }

    /// Replace the whole board. `grid` is row-major and must hold 64 cells;
    /// each piece must sit on the cell named by its own position.
    /// The board is left untouched on error.
    pub fn apply_external_snapshot(
        &mut self,
        grid: &[Option<Piece>],
        castling: CastlingRights,
        en_passant: Option<u8>,
        turn: Color,
    ) -> Result<(), InvalidState> {
        if grid.len() != 64 {
            return Err(InvalidState::GridSize(grid.len()));
        }
        if let Some(file) = en_passant.filter(|&f| f > 7) {
            return Err(InvalidState::EnPassantFile(file));
        }
        let mut cells = [None; 64];
        for (idx, slot) in grid.iter().enumerate() {
            if let Some(piece) = slot {
                let cell = Square::from_index(idx as u8);
                if piece.position != cell {
                    return Err(InvalidState::PositionMismatch {
                        cell,
                        claimed: piece.position,
                    });
                }
            }
            cells[idx] = *slot;
        }

        self.cells = cells;
        self.castling = castling;
        self.en_passant = en_passant;
        self.turn = turn;
        debug!(target: "board", ?turn, ?en_passant, "applied external snapshot");
        Ok(())
    }

    /// Assemble a board from parts already known to satisfy the invariants.
    pub(crate) fn from_parts(
        cells: [Option<Piece>; 64],
        castling: CastlingRights,
        en_passant: Option<u8>,
        turn: Color,
    ) -> Self {
        debug_assert!(en_passant.is_none_or(|f| f < 8));
        debug_assert!(
            cells
                .iter()
                .enumerate()
                .all(|(i, c)| c.is_none_or(|p| p.position.index() as usize == i))
        );
        BoardState {
            cells,
            castling,
            en_passant,
            turn,
        }
    }

    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index() as usize]
    }

    /// Row-major view of all 64 cells.
    #[inline(always)]
    pub fn cells(&self) -> &[Option<Piece>; 64] {
        &self.cells
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.cells.iter().flatten().copied()
    }

    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline(always)]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline(always)]
    pub fn en_passant(&self) -> Option<u8> {
        self.en_passant
    }
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

/// The standard starting position.
impl Default for BoardState {
    fn default() -> Self {
        BoardState::new()
    }
}

#[cfg(test)]
mod tests;
