use crate::board::BoardState;
use crate::codec::{EncodedState, decode, encode};
use crate::error::{InvalidCellSize, OracleError, ParseError};
use crate::interaction::{DropOutcome, GestureId, InteractionController, Point};
use crate::oracle::MoveOracle;
use crate::render::RenderAdapter;
use crate::square::Square;
use tracing::info;

/// One board, its drag controller, the oracle it talks to and the view it
/// draws on. The session is the only owner of the board.
pub struct Session<O, R> {
    board: BoardState,
    controller: InteractionController,
    oracle: O,
    view: R,
}

impl<O: MoveOracle, R: RenderAdapter> Session<O, R> {
    /// Start from the standard position and draw it.
    pub fn new(oracle: O, view: R, cell_size: f64) -> Result<Self, InvalidCellSize> {
        let mut session = Session {
            board: BoardState::new(),
            controller: InteractionController::new(cell_size)?,
            oracle,
            view,
        };
        session.redraw();
        Ok(session)
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn view(&self) -> &R {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut R {
        &mut self.view
    }

    pub fn encoded(&self) -> EncodedState {
        encode(&self.board)
    }

    /// Back to the starting position. Any drag in flight is dropped.
    pub fn reset(&mut self) {
        self.controller.cancel(&mut self.view);
        self.board.reset();
        self.redraw();
    }

    /// Replace the board with a decoded wire string. On error the current
    /// board stays as it was.
    pub fn load(&mut self, encoded: &str) -> Result<(), ParseError> {
        let board = decode(encoded)?;
        self.controller.cancel(&mut self.view);
        self.board = board;
        info!(target: "board", %encoded, "loaded board");
        self.redraw();
        Ok(())
    }

    /// New cell size after the surface was resized. Redraws in full.
    pub fn resize(&mut self, cell_size: f64) -> Result<(), InvalidCellSize> {
        self.controller.set_cell_size(cell_size)?;
        self.redraw();
        Ok(())
    }

    pub fn redraw(&mut self) {
        self.view.render(&self.board, self.controller.cell_size());
    }

    pub fn pointer_down(&mut self, square: Square, pointer: Point) -> Option<GestureId> {
        self.controller
            .pointer_down(&self.board, square, pointer, &mut self.view)
    }

    pub fn pointer_move(&mut self, pointer: Point) -> Option<Point> {
        self.controller.pointer_move(pointer, &mut self.view)
    }

    pub fn pointer_up(&mut self) -> Option<DropOutcome> {
        self.controller
            .pointer_up(&self.board, &self.oracle, &mut self.view)
    }

    pub fn cancel(&mut self) -> Option<Square> {
        self.controller.cancel(&mut self.view)
    }

    /// See [`InteractionController::accept`].
    pub fn accept<T>(&self, gesture: GestureId, reply: T) -> Option<T> {
        self.controller.accept(gesture, reply)
    }

    pub fn best_move(&self) -> Result<String, OracleError> {
        self.oracle.best_move(&self.encoded())
    }

    pub fn derived_state(&self) -> Result<String, OracleError> {
        self.oracle.state(&self.encoded())
    }
}
