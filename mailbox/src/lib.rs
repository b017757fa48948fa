pub use mailbox_types::*;

/// The padded `10x12` board of pieces, with parsing from and rendering to board descriptions.
pub mod board;
/// Errors produced while reading a board description.
pub mod error;
/// Tracks which color is to move, translating between White's orientation and the frame of the side to move.
///
/// You probably want to look here.
pub mod game;
/// Enumeration of pseudo-legal moves for the side to move.
pub mod movegen;
/// A move as a pair of squares.
pub mod moves;
/// Utility function for performance testing.
pub mod perft;
/// A board plus everything else needed to play it from the perspective of the side to move.
pub mod position;
/// Piece-square tables: the material and positional value of every piece on every cell.
pub mod psqt;

pub use board::*;
pub use error::*;
pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use position::*;
pub use psqt::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::board::*;
    pub use crate::error::*;
    pub use crate::game::*;
    pub use crate::movegen::*;
    pub use crate::moves::*;
    pub use crate::perft::*;
    pub use crate::position::*;
    pub use crate::psqt::*;
    pub use mailbox_types::prelude::*;
}
