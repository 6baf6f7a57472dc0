//! Pointer-driven drag state machine.
//!
//! A gesture is `pointer_down`, any number of `pointer_move`s, then
//! `pointer_up` (or `cancel`). Only one piece can be in flight because the
//! drag lives in a single field of the controller; the board itself is
//! never mutated here.

use crate::board::{BoardState, Piece};
use crate::codec::{EncodedState, encode};
use crate::error::{InvalidCellSize, OracleError};
use crate::oracle::MoveOracle;
use crate::render::RenderAdapter;
use crate::square::Square;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_CELL_SIZE: f64 = 64.0;

/// Monotonically increasing id of one pointer gesture.
pub type GestureId = u64;

/// Pixel position in the board's coordinate space (origin at the top-left
/// corner of a8).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Snap a free-floating top-left pixel position to the nearest cell.
///
/// Total: every input, including NaN and infinities, lands on the board.
pub fn snap(top_left: Point, cell_size: f64) -> Square {
    // `as u8` maps NaN to 0
    let axis = |v: f64| (v / cell_size + 0.5).floor().clamp(0.0, 7.0) as u8;
    Square::from_index(axis(top_left.y) * 8 + axis(top_left.x))
}

/// Per-piece drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceState {
    Idle,
    Dragging,
}

/// A piece currently held under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub gesture: GestureId,
    pub piece: Piece,
    pub origin: Square,
    /// Top-left corner of the floating piece image.
    pub floating: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Drag),
}

/// Result of releasing a dragged piece.
#[derive(Debug, Clone, PartialEq)]
pub struct DropOutcome {
    pub gesture: GestureId,
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    /// Board the legality query was issued against.
    pub encoded: EncodedState,
    /// Opaque oracle reply for the legal actions from `from`.
    pub reply: Result<String, OracleError>,
}

impl DropOutcome {
    /// Released on the square it was picked up from.
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    state: DragState,
    cell_size: f64,
    last_gesture: GestureId,
}

impl InteractionController {
    pub fn new(cell_size: f64) -> Result<Self, InvalidCellSize> {
        check_cell_size(cell_size)?;
        Ok(InteractionController {
            state: DragState::Idle,
            cell_size,
            last_gesture: 0,
        })
    }

    #[inline]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Id of the most recent gesture, 0 before the first one.
    #[inline]
    pub fn last_gesture(&self) -> GestureId {
        self.last_gesture
    }

    /// Square of the piece being dragged, if any.
    pub fn selection(&self) -> Option<Square> {
        match self.state {
            DragState::Dragging(drag) => Some(drag.origin),
            DragState::Idle => None,
        }
    }

    pub fn piece_state(&self, square: Square) -> PieceState {
        if self.selection() == Some(square) {
            PieceState::Dragging
        } else {
            PieceState::Idle
        }
    }

    /// Change the cell size after a resize. The board is untouched.
    pub fn set_cell_size(&mut self, cell_size: f64) -> Result<(), InvalidCellSize> {
        check_cell_size(cell_size)?;
        self.cell_size = cell_size;
        debug!(target: "interaction", cell_size, "cell size changed");
        Ok(())
    }

    /// Pick up the piece on `square`. Returns the new gesture id, or `None`
    /// when the square is empty or another piece is already in flight.
    pub fn pointer_down<R: RenderAdapter + ?Sized>(
        &mut self,
        board: &BoardState,
        square: Square,
        pointer: Point,
        view: &mut R,
    ) -> Option<GestureId> {
        if let DragState::Dragging(drag) = self.state {
            debug!(target: "interaction", held = %drag.origin, %square, "pointer down ignored: drag in progress");
            return None;
        }
        let piece = board.piece_at(square)?;

        self.last_gesture += 1;
        let gesture = self.last_gesture;
        self.state = DragState::Dragging(Drag {
            gesture,
            piece,
            origin: square,
            floating: self.centered(pointer),
        });
        view.raise(square);
        debug!(target: "interaction", gesture, %square, "drag started");
        Some(gesture)
    }

    /// Follow the pointer. Purely visual; returns the new top-left corner.
    pub fn pointer_move<R: RenderAdapter + ?Sized>(
        &mut self,
        pointer: Point,
        view: &mut R,
    ) -> Option<Point> {
        let floating = self.centered(pointer);
        match &mut self.state {
            DragState::Dragging(drag) => {
                drag.floating = floating;
                view.float(drag.origin, floating);
                Some(floating)
            }
            DragState::Idle => None,
        }
    }

    /// Release the dragged piece: snap it, then ask the oracle for the legal
    /// actions from its origin. If the oracle fails the piece goes back to
    /// where it came from.
    pub fn pointer_up<O, R>(
        &mut self,
        board: &BoardState,
        oracle: &O,
        view: &mut R,
    ) -> Option<DropOutcome>
    where
        O: MoveOracle + ?Sized,
        R: RenderAdapter + ?Sized,
    {
        let DragState::Dragging(drag) = std::mem::take(&mut self.state) else {
            return None;
        };
        let to = snap(drag.floating, self.cell_size);
        let encoded = encode(board);
        let reply = oracle.legal_actions(&encoded);

        match &reply {
            Ok(_) => view.settle(drag.origin, to),
            Err(err) => {
                warn!(target: "interaction", gesture = drag.gesture, %err, "legality query failed");
                view.settle(drag.origin, drag.origin);
            }
        }
        debug!(target: "interaction", gesture = drag.gesture, from = %drag.origin, %to, "drag released");

        Some(DropOutcome {
            gesture: drag.gesture,
            piece: drag.piece,
            from: drag.origin,
            to,
            encoded,
            reply,
        })
    }

    /// Abandon the current drag without querying the oracle. Returns the
    /// square the piece went back to.
    pub fn cancel<R: RenderAdapter + ?Sized>(&mut self, view: &mut R) -> Option<Square> {
        let DragState::Dragging(drag) = std::mem::take(&mut self.state) else {
            return None;
        };
        view.settle(drag.origin, drag.origin);
        debug!(target: "interaction", gesture = drag.gesture, "drag cancelled");
        Some(drag.origin)
    }

    /// Gate a reply that arrives after the fact. Replies for anything but
    /// the latest gesture are stale and dropped.
    pub fn accept<T>(&self, gesture: GestureId, reply: T) -> Option<T> {
        if gesture == self.last_gesture {
            Some(reply)
        } else {
            warn!(target: "interaction", gesture, latest = self.last_gesture, "discarding stale oracle reply");
            None
        }
    }

    fn centered(&self, pointer: Point) -> Point {
        let half = self.cell_size / 2.0;
        Point::new(pointer.x - half, pointer.y - half)
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        InteractionController {
            state: DragState::Idle,
            cell_size: DEFAULT_CELL_SIZE,
            last_gesture: 0,
        }
    }
}

fn check_cell_size(cell_size: f64) -> Result<(), InvalidCellSize> {
    if cell_size.is_finite() && cell_size > 0.0 {
        Ok(())
    } else {
        Err(InvalidCellSize(cell_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_rounds_to_nearest_cell() {
        assert_eq!(snap(Point::new(0.0, 0.0), 10.0), Square::from_index(0));
        assert_eq!(snap(Point::new(4.9, 4.9), 10.0), Square::from_index(0));
        assert_eq!(snap(Point::new(5.0, 0.0), 10.0), Square::from_index(1));
        assert_eq!(snap(Point::new(40.0, 60.0), 10.0), Square::new(4, 6).unwrap());
    }

    #[test]
    fn snap_clamps_far_outside_positions() {
        assert_eq!(snap(Point::new(-500.0, -1.0), 10.0), Square::from_index(0));
        assert_eq!(snap(Point::new(1e9, 1e9), 10.0), Square::from_index(63));
        assert_eq!(snap(Point::new(f64::INFINITY, f64::NEG_INFINITY), 10.0), Square::from_index(7));
        assert_eq!(snap(Point::new(f64::NAN, f64::NAN), 10.0), Square::from_index(0));
    }

    #[test]
    fn rejects_degenerate_cell_sizes() {
        assert!(InteractionController::new(0.0).is_err());
        assert!(InteractionController::new(-3.0).is_err());
        assert!(InteractionController::new(f64::NAN).is_err());
        let mut c = InteractionController::default();
        assert_eq!(c.set_cell_size(f64::INFINITY), Err(InvalidCellSize(f64::INFINITY)));
        assert_eq!(c.cell_size(), DEFAULT_CELL_SIZE);
    }

    #[test]
    fn accept_is_gated_on_latest_gesture() {
        let c = InteractionController::default();
        assert_eq!(c.accept(0, "reply"), Some("reply"));
        assert_eq!(c.accept(1, "reply"), None);
    }
}
