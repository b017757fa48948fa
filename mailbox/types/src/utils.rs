use super::Square;

/// Number of cells in the padded board: `(2 + 8 + 2)` rows of `(1 + 8 + 1)` columns.
///
/// Two sentinel rows above and below the playing area are enough to stop a Knight,
/// and a single sentinel column on each side is enough because the last cell of one
/// row sits next to the first cell of the following row.
pub const BOARD_LEN: usize = 120;

/// Number of cells in one row of the padded board.
pub const ROW_LEN: usize = 10;

/// Board description for the starting position of chess.
pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

/// A popular position for debugging move generation, reduced to its board and turn.
pub const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w";

/// <https://www.chessprogramming.org/Chess_Position#cite_note-4>
///
/// Only a capacity hint: pseudo-legal move lists of arbitrary descriptions may be longer.
pub const MAX_NUM_MOVES: usize = 218;

/// One row up the board, toward the opponent.
pub const NORTH: i8 = -(ROW_LEN as i8);
/// One column toward the h-file.
pub const EAST: i8 = 1;
/// One row down the board, toward our own back rank.
pub const SOUTH: i8 = ROW_LEN as i8;
/// One column toward the a-file.
pub const WEST: i8 = -1;

/// Deltas for the movement of a Pawn: single push, double push, and both captures.
pub const PAWN_DELTAS: [i8; 4] = [NORTH, NORTH + NORTH, NORTH + WEST, NORTH + EAST];

/// Deltas for the movement of the Knight.
pub const KNIGHT_DELTAS: [i8; 8] = [
    NORTH + NORTH + EAST,
    NORTH + NORTH + WEST,
    EAST + EAST + NORTH,
    EAST + EAST + SOUTH,
    SOUTH + SOUTH + EAST,
    SOUTH + SOUTH + WEST,
    WEST + WEST + SOUTH,
    WEST + WEST + NORTH,
];

/// Deltas for the movement of the Bishop.
pub const BISHOP_DELTAS: [i8; 4] = [NORTH + EAST, NORTH + WEST, SOUTH + EAST, SOUTH + WEST];

/// Deltas for the movement of the Rook.
pub const ROOK_DELTAS: [i8; 4] = [NORTH, EAST, SOUTH, WEST];

/// Deltas for the movement of the Queen and the King.
pub const QUEEN_DELTAS: [i8; 8] = [
    /* Rook */
    NORTH,
    EAST,
    SOUTH,
    WEST,
    /* Bishop */
    NORTH + EAST,
    NORTH + WEST,
    SOUTH + EAST,
    SOUTH + WEST,
];

/// Where the King of the side to move starts in White's frame.
pub const WHITE_KING_HOME: Square = Square::E1;

/// Where Black's King starts, seen from White's frame.
pub const BLACK_KING_HOME: Square = Square::E8;
