use super::{
    Move, Piece, PieceKind, Position, Side, Square, Wing, BLACK_KING_HOME, EAST, MAX_NUM_MOVES,
    NORTH, WEST, WHITE_KING_HOME,
};

/// Cells our King may castle from: White's home, and Black's home as Black sees it.
const KING_HOMES: [Square; 2] = [WHITE_KING_HOME, BLACK_KING_HOME.mirrored()];

/// A list of moves, in the order they were generated.
///
/// Starts with room for [`MAX_NUM_MOVES`] and grows past it for unusual boards.
pub type MoveList = Vec<Move>;

impl Position {
    /// Enumerates every pseudo-legal move for the side to move.
    ///
    /// Squares are visited in ascending index order (a8 first) and each piece's directions in a fixed order,
    /// so the list is deterministic. Moves that leave our King in check are included. Pawn diagonals are included
    /// even onto empty squares; [`Position::is_playable`] tells the real captures apart.
    ///
    /// # Example
    /// ```
    /// # use mailbox::Position;
    /// let pos = Position::default();
    /// assert_eq!(pos.enumerate_moves().len(), 34);
    /// assert_eq!(pos.playable_moves().len(), 20);
    /// ```
    pub fn enumerate_moves(&self) -> MoveList {
        let mut moves = MoveList::with_capacity(MAX_NUM_MOVES);

        for (from, piece) in self.board().all_for(Side::Ours) {
            let Piece::Ours(kind) = piece else {
                continue;
            };

            for &delta in kind.deltas() {
                let mut to = from.offset(delta);

                loop {
                    let target = self.board()[to];

                    // Stay on the board and off our own pieces
                    if target.is_off_board() || target.is_ours() {
                        break;
                    }

                    if kind == PieceKind::Pawn && !self.pawn_may_advance(from, delta, target) {
                        break;
                    }

                    moves.push(Move::new(from, to));

                    // Non-sliders take one step, and sliders stop once they capture
                    if !kind.is_slider() || target.is_theirs() {
                        break;
                    }

                    if let Some(castle) = self.castle_from_slide(from, delta, to) {
                        moves.push(castle);
                    }

                    to = to.offset(delta);
                }
            }
        }

        moves
    }

    /// Whether a Pawn on `from` may step by `delta` onto a cell holding `target`.
    ///
    /// Pushes need an empty target. The double push also needs the Pawn on its home rank and the cell it
    /// passes over empty. Diagonals are always allowed here.
    fn pawn_may_advance(&self, from: Square, delta: i8, target: Piece) -> bool {
        if delta == NORTH {
            target.is_empty()
        } else if delta == NORTH + NORTH {
            target.is_empty()
                && from.is_pawn_home_rank()
                && self.board()[from.offset(NORTH)].is_empty()
        } else {
            true
        }
    }

    /// Castling, detected from the Rook's side of the board.
    ///
    /// A Rook on its corner that slides toward the King onto the empty cell `reached`, and finds our King on the
    /// very next cell, has confirmed every cell between them is empty. The King then jumps two cells toward the
    /// Rook, landing on the far side of `reached`. Requires the matching castling right and the King on its home
    /// cell of either frame (e1 for White, d1 for Black). Whether the King is in or passes through check is not
    /// considered.
    fn castle_from_slide(&self, rook: Square, delta: i8, reached: Square) -> Option<Move> {
        let (wing, toward_king) = match rook {
            Square::A1 => (Wing::West, EAST),
            Square::H1 => (Wing::East, WEST),
            _ => return None,
        };

        if delta != toward_king
            || !self.board()[rook].is_ours_of(PieceKind::Rook)
            || !self.castling_rights().has(Side::Ours, wing)
        {
            return None;
        }

        let king = reached.offset(toward_king);
        if !self.board()[king].is_ours_of(PieceKind::King) || !KING_HOMES.contains(&king) {
            return None;
        }

        Some(Move::new(king, reached.offset(-toward_king)))
    }

    /// Whether `mv` does something a real game allows.
    ///
    /// Every enumerated move is playable except a Pawn diagonal onto an empty cell that is neither the en passant
    /// square nor next to the king-passant square.
    pub fn is_playable(&self, mv: Move) -> bool {
        let (from, to) = mv.parts();
        let delta = from.delta_to(to);
        let diagonal = delta == NORTH + WEST || delta == NORTH + EAST;

        let pawn = self.board()[from].is_ours_of(PieceKind::Pawn);

        if !diagonal || !pawn || !self.board()[to].is_empty() {
            return true;
        }

        Some(to) == self.ep_square()
            || self
                .king_passant()
                .is_some_and(|passant| to.distance(passant) < 2)
    }

    /// All enumerated moves that pass [`Position::is_playable`], in the same order.
    pub fn playable_moves(&self) -> MoveList {
        let mut moves = self.enumerate_moves();
        moves.retain(|&mv| self.is_playable(mv));
        moves
    }
}
