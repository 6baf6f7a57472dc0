// src/codec/glyph_tables.rs
// O(1) glyph ↔ (kind,color) maps.

use crate::board::{Color, PieceKind};

pub(super) const CHAR_TO_PC: [Option<(PieceKind, Color)>; 128] = {
    let mut table: [Option<(PieceKind, Color)>; 128] = [None; 128];

    // Uppercase = White
    table['P' as usize] = Some((PieceKind::Pawn, Color::White));
    table['R' as usize] = Some((PieceKind::Rook, Color::White));
    table['N' as usize] = Some((PieceKind::Knight, Color::White));
    table['B' as usize] = Some((PieceKind::Bishop, Color::White));
    table['Q' as usize] = Some((PieceKind::Queen, Color::White));
    table['K' as usize] = Some((PieceKind::King, Color::White));

    // Lowercase = Black
    table['p' as usize] = Some((PieceKind::Pawn, Color::Black));
    table['r' as usize] = Some((PieceKind::Rook, Color::Black));
    table['n' as usize] = Some((PieceKind::Knight, Color::Black));
    table['b' as usize] = Some((PieceKind::Bishop, Color::Black));
    table['q' as usize] = Some((PieceKind::Queen, Color::Black));
    table['k' as usize] = Some((PieceKind::King, Color::Black));

    table
};

#[inline]
pub(super) const fn pc_index(kind: PieceKind, color: Color) -> usize {
    (color as usize) * 6 + (kind as usize)
}

pub(super) const PC_TO_CHAR: [char; 12] = {
    let mut t = ['\0'; 12];
    // Black
    t[pc_index(PieceKind::Pawn, Color::Black)] = 'p';
    t[pc_index(PieceKind::Rook, Color::Black)] = 'r';
    t[pc_index(PieceKind::Knight, Color::Black)] = 'n';
    t[pc_index(PieceKind::Bishop, Color::Black)] = 'b';
    t[pc_index(PieceKind::Queen, Color::Black)] = 'q';
    t[pc_index(PieceKind::King, Color::Black)] = 'k';
    // White
    t[pc_index(PieceKind::Pawn, Color::White)] = 'P';
    t[pc_index(PieceKind::Rook, Color::White)] = 'R';
    t[pc_index(PieceKind::Knight, Color::White)] = 'N';
    t[pc_index(PieceKind::Bishop, Color::White)] = 'B';
    t[pc_index(PieceKind::Queen, Color::White)] = 'Q';
    t[pc_index(PieceKind::King, Color::White)] = 'K';
    t
};

#[inline]
pub(super) fn glyph_to_piece(b: u8) -> Option<(PieceKind, Color)> {
    CHAR_TO_PC.get(b as usize).copied().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_agree_on_all_twelve_glyphs() {
        assert_eq!(Color::Black as u8, 0);
        assert_eq!(Color::White as u8, 1);

        const GLYPHS: [char; 12] = ['p', 'r', 'n', 'b', 'q', 'k', 'P', 'R', 'N', 'B', 'Q', 'K'];
        for &g in &GLYPHS {
            let (kind, color) = CHAR_TO_PC[g as usize].expect("glyph missing from CHAR_TO_PC");
            assert_eq!(PC_TO_CHAR[pc_index(kind, color)], g, "pc→char mismatch for {}", g);
        }
        assert_eq!(CHAR_TO_PC.iter().flatten().count(), 12);
    }

    #[test]
    fn non_ascii_bytes_map_to_nothing() {
        assert_eq!(glyph_to_piece(b'.'), None);
        assert_eq!(glyph_to_piece(0xE2), None);
    }
}
