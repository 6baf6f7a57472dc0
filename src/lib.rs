pub mod board;
pub mod codec;
pub mod error;
pub mod interaction;
#[cfg(feature = "cli")]
pub mod logger;
pub mod oracle;
pub mod render;
pub mod session;
pub mod square;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use board::{BoardState, CastleSide, CastlingRights, Color, Piece, PieceKind};
pub use codec::{ENCODED_LEN, EncodedState, START_POSITION, decode, encode};
pub use error::{InvalidCellSize, InvalidState, OracleError, ParseError, ParseReason};
pub use interaction::{DropOutcome, GestureId, InteractionController, Point, snap};
pub use oracle::MoveOracle;
pub use render::RenderAdapter;
pub use session::Session;
pub use square::Square;
