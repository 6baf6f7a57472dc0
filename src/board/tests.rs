use super::*;

fn sq(file: u8, rank: u8) -> Square {
    Square::new(file, rank).expect("on board")
}

#[test]
fn new_board_has_standard_layout() {
    let b = BoardState::new();
    assert_eq!(b.pieces().count(), 32);
    assert_eq!(b.turn(), Color::White);
    assert_eq!(b.castling(), CastlingRights::ALL);
    assert_eq!(b.en_passant(), None);

    let e1 = b.piece_at(sq(4, 7)).expect("white king");
    assert_eq!((e1.color, e1.kind), (Color::White, PieceKind::King));
    let d8 = b.piece_at(sq(3, 0)).expect("black queen");
    assert_eq!((d8.color, d8.kind), (Color::Black, PieceKind::Queen));
    assert!(b.piece_at(sq(4, 4)).is_none());
}

#[test]
fn every_piece_sits_on_its_cell() {
    let b = BoardState::new();
    for (idx, cell) in b.cells().iter().enumerate() {
        if let Some(p) = cell {
            assert_eq!(p.position().index() as usize, idx);
        }
    }
}

#[test]
fn reset_restores_start_after_snapshot() {
    let mut b = BoardState::new();
    let grid = [None; 64];
    b.apply_external_snapshot(&grid, CastlingRights::NONE, Some(3), Color::Black)
        .expect("empty grid is valid");
    assert_eq!(b.pieces().count(), 0);

    b.reset();
    assert_eq!(b, BoardState::new());
}

#[test]
fn snapshot_rejects_wrong_grid_size() {
    let mut b = BoardState::new();
    let before = b.clone();
    let grid = vec![None; 63];
    let err = b
        .apply_external_snapshot(&grid, CastlingRights::ALL, None, Color::White)
        .unwrap_err();
    assert_eq!(err, InvalidState::GridSize(63));
    assert_eq!(b, before);
}

#[test]
fn snapshot_rejects_detached_piece() {
    let mut b = BoardState::new();
    let before = b.clone();
    let mut grid = [None; 64];
    // a knight stored in cell 0 but claiming to be on c3
    grid[0] = Some(Piece::new(Color::White, PieceKind::Knight, sq(2, 5)));
    let err = b
        .apply_external_snapshot(&grid, CastlingRights::ALL, None, Color::White)
        .unwrap_err();
    assert_eq!(
        err,
        InvalidState::PositionMismatch {
            cell: sq(0, 0),
            claimed: sq(2, 5)
        }
    );
    assert_eq!(b, before);
}

#[test]
fn snapshot_rejects_off_board_en_passant() {
    let mut b = BoardState::new();
    let grid = *BoardState::new().cells();
    let err = b
        .apply_external_snapshot(&grid, CastlingRights::ALL, Some(8), Color::White)
        .unwrap_err();
    assert_eq!(err, InvalidState::EnPassantFile(8));
}

#[test]
fn color_negation() {
    assert_eq!(!Color::White, Color::Black);
    assert_eq!(Color::Black.opposite(), Color::White);
}
