/// Enums for piece kinds, colors, sides, and the occupant of a board cell.
pub mod piece;
/// Coordinates on the padded `10x12` board.
pub mod square;
/// Misc constants: board geometry, direction deltas, and well-known descriptions.
pub mod utils;

pub use piece::*;
pub use square::*;
pub use utils::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::piece::*;
    pub use crate::square::*;
    pub use crate::utils::*;
}
