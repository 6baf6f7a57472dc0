use crate::board::{BoardState, Color, PieceKind};
use crate::interaction::Point;
use crate::square::Square;
use std::fmt::Write;

/// Presentation side of the board. Implementations only read the board;
/// nothing flows back into it.
pub trait RenderAdapter {
    /// Draw the whole board. Must be idempotent; resizes call it again.
    fn render(&mut self, board: &BoardState, cell_size: f64);

    /// Bring the piece on `square` to the top of the visual stack.
    fn raise(&mut self, _square: Square) {}

    /// Show the piece picked up from `origin` with its top-left corner at `top_left`.
    fn float(&mut self, _origin: Square, _top_left: Point) {}

    /// Put the piece picked up from `origin` down on `target`.
    fn settle(&mut self, _origin: Square, _target: Square) {}
}

/// Renders nothing. Useful for hosts that draw from snapshots on their own.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl RenderAdapter for NullView {
    fn render(&mut self, _board: &BoardState, _cell_size: f64) {}
}

/// Terminal diagram of the board, seen from one side.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    perspective: Color,
    frame: String,
    last_event: Option<String>,
}

impl TextRenderer {
    pub fn new(perspective: Color) -> Self {
        TextRenderer {
            perspective,
            frame: String::new(),
            last_event: None,
        }
    }

    pub fn perspective(&self) -> Color {
        self.perspective
    }

    pub fn set_perspective(&mut self, perspective: Color) {
        self.perspective = perspective;
    }

    /// The most recently rendered diagram.
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// Description of the last raise/float/settle call, if any.
    pub fn last_event(&self) -> Option<&str> {
        self.last_event.as_deref()
    }

    fn glyph(color: Color, kind: PieceKind) -> char {
        match (color, kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        TextRenderer::new(Color::White)
    }
}

impl RenderAdapter for TextRenderer {
    fn render(&mut self, board: &BoardState, _cell_size: f64) {
        let flipped = self.perspective == Color::Black;
        let mut out = String::with_capacity(512);

        out.push_str("  ");
        let files: Vec<char> = (b'a'..=b'h').map(char::from).collect();
        let header: Vec<String> = if flipped {
            files.iter().rev().map(char::to_string).collect()
        } else {
            files.iter().map(char::to_string).collect()
        };
        out.push_str(&header.join(" "));
        out.push('\n');

        for row in 0..8u8 {
            let rank = if flipped { 7 - row } else { row };
            // writing into a String cannot fail
            let _ = write!(out, "{}|", 8 - rank);
            for col in 0..8u8 {
                let file = if flipped { 7 - col } else { col };
                let sq = Square::from_index(rank * 8 + file);
                match board.piece_at(sq) {
                    Some(p) => out.push(Self::glyph(p.color, p.kind)),
                    None => out.push(if (file + rank) % 2 == 1 { '·' } else { '•' }),
                }
                out.push(' ');
            }
            out.push('\n');
        }

        self.frame = out;
    }

    fn raise(&mut self, square: Square) {
        self.last_event = Some(format!("picked up {}", square));
    }

    fn float(&mut self, origin: Square, top_left: Point) {
        self.last_event = Some(format!("{} floating at ({:.1}, {:.1})", origin, top_left.x, top_left.y));
    }

    fn settle(&mut self, origin: Square, target: Square) {
        self.last_event = Some(if origin == target {
            format!("{} back in place", origin)
        } else {
            format!("{} dropped on {}", origin, target)
        });
    }
}
