use std::{fmt, str::FromStr};

use log::{debug, trace};

use super::{
    board::parse_description, psq, Board, BoardError, Color, Move, Piece, PieceKind, Side, Square,
    BLACK_KING_HOME, NORTH, SOUTH, STARTPOS, WHITE_KING_HOME,
};

/// One of the two castling directions, named by the side of the board the King moves toward.
///
/// Wings are relative to the current frame: after the board is flipped, the opponent's
/// a8 rook sits in the east corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Wing {
    /// Toward the a-file.
    West,
    /// Toward the h-file.
    East,
}

impl Wing {
    /// Number of wings.
    pub const COUNT: usize = 2;

    /// An array of both wings, starting with West.
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::West, Self::East]
    }

    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The corner our Rook must start on to castle toward this wing.
    pub const fn rook_home(&self) -> Square {
        match self {
            Self::West => Square::A1,
            Self::East => Square::H1,
        }
    }

    /// The wing a King moves toward when travelling from `from` to `to` along a rank.
    pub fn toward(from: Square, to: Square) -> Self {
        if to < from {
            Self::West
        } else {
            Self::East
        }
    }
}

/// Castling permissions for both sides, indexed by [`Side`] and then by [`Wing`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights([[bool; Wing::COUNT]; Side::COUNT]);

impl CastlingRights {
    /// No castling rights for anyone.
    pub const fn new() -> Self {
        Self([[false; Wing::COUNT]; Side::COUNT])
    }

    /// Every castling right for both sides.
    pub const fn all() -> Self {
        Self([[true; Wing::COUNT]; Side::COUNT])
    }

    /// Whether `side` may still castle toward `wing`.
    pub const fn has(&self, side: Side, wing: Wing) -> bool {
        self.0[side.index()][wing.index()]
    }

    /// Whether `side` may still castle toward either wing.
    pub const fn can_castle(&self, side: Side) -> bool {
        self.has(side, Wing::West) || self.has(side, Wing::East)
    }

    pub fn grant(&mut self, side: Side, wing: Wing) {
        self.0[side.index()][wing.index()] = true;
    }

    pub fn revoke(&mut self, side: Side, wing: Wing) {
        self.0[side.index()][wing.index()] = false;
    }

    pub fn revoke_all(&mut self, side: Side) {
        self.0[side.index()] = [false; Wing::COUNT];
    }

    /// Swaps the rights of both sides, as happens when the board is flipped.
    pub const fn mirrored(self) -> Self {
        Self([self.0[1], self.0[0]])
    }
}

impl fmt::Display for CastlingRights {
    /// Uppercase letters for our rights, lowercase for theirs, or `-` if nobody can castle.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rights = String::with_capacity(4);
        for side in Side::all() {
            for wing in Wing::all() {
                if self.has(side, wing) {
                    let c = match wing {
                        Wing::West => 'W',
                        Wing::East => 'E',
                    };
                    rights.push(match side {
                        Side::Ours => c,
                        Side::Theirs => c.to_ascii_lowercase(),
                    });
                }
            }
        }

        if rights.is_empty() {
            rights.push('-');
        }

        write!(f, "{rights}")
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Represents the full state of a game, always from the perspective of the side to move.
///
/// "Ours" always means the side to move. Every call to [`Position::apply_move`] ends by flipping the
/// board, so the opponent becomes "ours" in the returned [`Position`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// All pieces and their locations, in the current frame.
    board: Board,

    /// Running evaluation of `board` from our perspective.
    score: i32,

    /// Who can still castle, and toward which wing.
    castling_rights: CastlingRights,

    /// The square a Pawn of theirs just passed over with a double push, if any.
    ep_square: Option<Square>,

    /// The square their King just passed over while castling, if any.
    king_passant: Option<Square>,
}

impl Position {
    /// Creates a new, empty [`Position`] with only the sentinel border.
    pub const fn new() -> Self {
        Self {
            board: Board::new(),
            score: 0,
            castling_rights: CastlingRights::new(),
            ep_square: None,
            king_passant: None,
        }
    }

    /// Creates a [`Position`] from a board that is already in the frame of the side to move.
    ///
    /// Nobody has castling rights and there is no en passant square. The score is the full evaluation of `board`.
    pub fn from_board(board: Board) -> Self {
        let score = board.evaluate();
        Self {
            board,
            score,
            ..Self::new()
        }
    }

    /// Creates a new [`Position`] from a board description and an optional side-to-move marker.
    ///
    /// Castling rights are inferred from where the Kings and Rooks stand. If Black is to move, the whole
    /// position is mirrored so that Black becomes "ours".
    ///
    /// # Example
    /// ```
    /// # use mailbox::{Position, Side, Wing};
    /// let pos = Position::from_description("r3k2r/8/8/8/8/8/8/R3K2R w").unwrap();
    /// assert!(pos.castling_rights().has(Side::Ours, Wing::West));
    /// assert!(pos.castling_rights().has(Side::Theirs, Wing::East));
    /// ```
    pub fn from_description(description: &str) -> Result<Self, BoardError> {
        let (board, side_to_move) = parse_description(description)?;
        Ok(Self::from_absolute(board, side_to_move))
    }

    /// Builds the [`Position`] for a board written in White's orientation, then flips it if Black is to move.
    pub(crate) fn from_absolute(board: Board, side_to_move: Color) -> Self {
        let castling_rights = infer_castling_rights(&board);
        let pos = Self::from_board(board).with_castling_rights(castling_rights);

        debug!(
            "Loaded position with {} to move: score {}, castling {}",
            side_to_move.name(),
            pos.score,
            pos.castling_rights
        );

        match side_to_move {
            Color::White => pos,
            Color::Black => pos.mirrored(),
        }
    }

    /// Replaces the castling rights of this [`Position`].
    ///
    /// Castling still needs our King and Rook on their home cells, whatever the rights say.
    pub fn with_castling_rights(mut self, castling_rights: CastlingRights) -> Self {
        self.castling_rights = castling_rights;
        self
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The running evaluation of this position, from our perspective.
    pub const fn score(&self) -> i32 {
        self.score
    }

    pub const fn castling_rights(&self) -> &CastlingRights {
        &self.castling_rights
    }

    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    pub const fn king_passant(&self) -> Option<Square> {
        self.king_passant
    }

    /// Computes the full evaluation of the board from scratch.
    ///
    /// After any move that does not land next to the king-passant square, this agrees with [`Position::score`].
    pub fn evaluate(&self) -> i32 {
        self.board.evaluate()
    }

    /// Returns this [`Position`] as the opponent sees it.
    ///
    /// The board is rotated, the score negated, both sides' castling rights swapped, and
    /// the en passant and king-passant squares mirrored.
    pub fn mirrored(&self) -> Self {
        Self {
            board: self.board.mirrored(),
            score: -self.score,
            castling_rights: self.castling_rights.mirrored(),
            ep_square: self.ep_square.map(Square::mirrored),
            king_passant: self.king_passant.map(Square::mirrored),
        }
    }

    /// Change in our score if `mv` were applied, before the board is flipped.
    ///
    /// `mv` is expected to come from [`Position::enumerate_moves`]. Any other move yields an
    /// unspecified value, or `0` if there is no piece on its source square.
    pub fn score_delta(&self, mv: Move) -> i32 {
        let (from, to) = mv.parts();
        let Some(kind) = self.board[from].kind() else {
            return 0;
        };

        let mut score = psq(kind, to) - psq(kind, from);

        // Captures gain whatever the piece was worth to them
        if let Piece::Theirs(captured) = self.board[to] {
            score += psq(captured, to.mirrored());
        }

        // Landing on or next to the square their King castled through captures the King
        if self
            .king_passant
            .is_some_and(|passant| to.distance(passant) < 2)
        {
            score += psq(PieceKind::King, to.mirrored());
        }

        match kind {
            PieceKind::King if from.distance(to) == 2 => {
                let rook_home = Wing::toward(from, to).rook_home();
                score += psq(PieceKind::Rook, from.midpoint(to)) - psq(PieceKind::Rook, rook_home);
            }
            PieceKind::Pawn => {
                if to.is_last_rank() {
                    score += psq(PieceKind::Queen, to) - psq(PieceKind::Pawn, to);
                }
                if Some(to) == self.ep_square {
                    score += psq(PieceKind::Pawn, to.offset(SOUTH).mirrored());
                }
            }
            _ => {}
        }

        score
    }

    /// Applies `mv` and returns the resulting [`Position`], flipped so the opponent is now "ours".
    ///
    /// `mv` is trusted to come from [`Position::enumerate_moves`]; nothing is validated.
    ///
    /// # Example
    /// ```
    /// # use mailbox::{Move, Piece, PieceKind, Position, Square};
    /// let pos = Position::default();
    /// let next = pos.apply_move(Move::new(Square::E2, Square::E4));
    ///
    /// // The pawn is now theirs, seen from the other side of the board
    /// assert_eq!(next.board()[Square::D5], Piece::Theirs(PieceKind::Pawn));
    /// assert_eq!(next.ep_square(), Some(Square::D6));
    /// ```
    pub fn apply_move(&self, mv: Move) -> Self {
        let (from, to) = mv.parts();
        let piece = self.board[from];
        let delta = self.score_delta(mv);
        trace!("Applying {mv:?} with {piece} for a score delta of {delta}");

        let mut next = self.clone();
        next.ep_square = None;
        next.king_passant = None;
        next.score += delta;

        next.board.place(to, piece);
        next.board.clear(from);

        // Moving a rook off its corner, or capturing on theirs, forfeits that wing
        if from == Square::A1 {
            next.castling_rights.revoke(Side::Ours, Wing::West);
        }
        if from == Square::H1 {
            next.castling_rights.revoke(Side::Ours, Wing::East);
        }
        if to == Square::A8 {
            next.castling_rights.revoke(Side::Theirs, Wing::East);
        }
        if to == Square::H8 {
            next.castling_rights.revoke(Side::Theirs, Wing::West);
        }

        match piece {
            Piece::Ours(PieceKind::King) => {
                next.castling_rights.revoke_all(Side::Ours);

                if from.distance(to) == 2 {
                    let crossed = from.midpoint(to);
                    next.board.clear(Wing::toward(from, to).rook_home());
                    next.board.place(crossed, Piece::Ours(PieceKind::Rook));
                    next.king_passant = Some(crossed);
                }
            }
            Piece::Ours(PieceKind::Pawn) => {
                if to.is_last_rank() {
                    next.board.place(to, Piece::Ours(PieceKind::Queen));
                }
                if from.delta_to(to) == NORTH + NORTH {
                    next.ep_square = Some(from.offset(NORTH));
                }
                if Some(to) == self.ep_square {
                    next.board.clear(to.offset(SOUTH));
                }
            }
            _ => {}
        }

        next.mirrored()
    }

    /// A board description of the current frame. Since "ours" is always uppercase, the marker is always `w`.
    pub fn to_description(&self) -> String {
        format!("{} w", self.board.to_placements())
    }
}

/// Castling rights implied by a board written in White's orientation.
///
/// A side may castle toward a wing if its King and that wing's Rook are both on their starting squares.
/// Black's rights are stored under the wing they will occupy once the board is flipped.
fn infer_castling_rights(board: &Board) -> CastlingRights {
    let mut rights = CastlingRights::new();

    if board[WHITE_KING_HOME].is_ours_of(PieceKind::King) {
        if board[Square::A1].is_ours_of(PieceKind::Rook) {
            rights.grant(Side::Ours, Wing::West);
        }
        if board[Square::H1].is_ours_of(PieceKind::Rook) {
            rights.grant(Side::Ours, Wing::East);
        }
    }

    if board[BLACK_KING_HOME] == Piece::Theirs(PieceKind::King) {
        if board[Square::A8] == Piece::Theirs(PieceKind::Rook) {
            rights.grant(Side::Theirs, Wing::East);
        }
        if board[Square::H8] == Piece::Theirs(PieceKind::Rook) {
            rights.grant(Side::Theirs, Wing::West);
        }
    }

    rights
}

impl FromStr for Position {
    type Err = BoardError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_description(s)
    }
}

impl Default for Position {
    fn default() -> Self {
        // Safe unwrap because the description for startpos is always valid
        Self::from_description(STARTPOS).unwrap()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_description())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ep = self
            .ep_square
            .map(|square| square.to_string())
            .unwrap_or_else(|| String::from("-"));
        let kp = self
            .king_passant
            .map(|square| square.to_string())
            .unwrap_or_else(|| String::from("-"));

        write!(
            f,
            "{}\n\nScore: {}\nCastling: {}\nEn passant: {ep}\nKing passant: {kp}",
            self.board, self.score, self.castling_rights
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_rights() {
        let pos = Position::default();
        assert_eq!(*pos.castling_rights(), CastlingRights::all());
        assert_eq!(pos.ep_square(), None);
        assert_eq!(pos.king_passant(), None);
        assert_eq!(pos.score(), pos.evaluate());
    }

    #[test]
    fn test_rights_need_king_and_rook() {
        // White king moved, black h8 rook missing
        let pos = Position::from_description("r3k3/8/8/8/8/8/8/R4K1R w").unwrap();
        let rights = pos.castling_rights();
        assert!(!rights.can_castle(Side::Ours));
        assert!(rights.has(Side::Theirs, Wing::East));
        assert!(!rights.has(Side::Theirs, Wing::West));
    }

    #[test]
    fn test_black_to_move_swaps_rights() {
        let pos = Position::from_description("r3k3/8/8/8/8/8/8/4K2R b").unwrap();
        let rights = pos.castling_rights();

        // Black's a8 rook stands on h1 once flipped
        assert!(rights.has(Side::Ours, Wing::East));
        assert!(!rights.has(Side::Ours, Wing::West));
        assert_eq!(pos.board()[Square::H1], Piece::Ours(PieceKind::Rook));

        // White's h1 rook stands on a8 once flipped, which is their east corner
        assert!(rights.has(Side::Theirs, Wing::East));
        assert!(!rights.has(Side::Theirs, Wing::West));
        assert_eq!(pos.board()[Square::A8], Piece::Theirs(PieceKind::Rook));
    }

    #[test]
    fn test_mirror_is_an_involution() {
        let pos = Position::default().apply_move(Move::new(Square::E2, Square::E4));
        assert_eq!(pos.mirrored().mirrored(), pos);
        assert_eq!(pos.mirrored().score(), -pos.score());
    }

    #[test]
    fn test_double_push_sets_ep() {
        let pos = Position::default();
        let mv = Move::new(Square::E2, Square::E4);
        let next = pos.apply_move(mv);

        assert_eq!(next.ep_square(), Some(Square::E3.mirrored()));
        assert_eq!(next.board()[Square::E4.mirrored()], Piece::Theirs(PieceKind::Pawn));
        assert!(next.board()[Square::E2.mirrored()].is_empty());
        assert_eq!(next.score(), -(pos.score() + pos.score_delta(mv)));
    }

    #[test]
    fn test_single_push_has_no_ep() {
        let next = Position::default().apply_move(Move::new(Square::E2, Square::E3));
        assert_eq!(next.ep_square(), None);
    }

    #[test]
    fn test_rook_move_revokes_wing() {
        let pos = Position::from_description("r3k2r/8/8/8/8/8/8/R3K2R w").unwrap();
        let next = pos.apply_move(Move::new(Square::H1, Square::H4)).mirrored();
        assert!(next.castling_rights().has(Side::Ours, Wing::West));
        assert!(!next.castling_rights().has(Side::Ours, Wing::East));
    }

    #[test]
    fn test_capture_on_corner_revokes_their_wing() {
        let pos = Position::from_description("r3k2r/8/8/8/8/8/8/R3K2R w").unwrap();
        let next = pos.apply_move(Move::new(Square::H1, Square::H8)).mirrored();
        assert!(!next.castling_rights().has(Side::Theirs, Wing::West));
        assert!(next.castling_rights().has(Side::Theirs, Wing::East));
    }

    #[test]
    fn test_castling_moves_rook_and_sets_king_passant() {
        let pos = Position::from_description("r3k2r/8/8/8/8/8/8/R3K2R w").unwrap();
        let mv = Move::new(Square::E1, Square::G1);
        let next = pos.apply_move(mv);
        let ours = next.mirrored();

        assert!(ours.board()[Square::H1].is_empty());
        assert!(ours.board()[Square::E1].is_empty());
        assert_eq!(ours.board()[Square::G1], Piece::Ours(PieceKind::King));
        assert_eq!(ours.board()[Square::F1], Piece::Ours(PieceKind::Rook));
        assert!(!ours.castling_rights().can_castle(Side::Ours));
        assert_eq!(next.king_passant(), Some(Square::F1.mirrored()));

        // King and rook are both accounted for in the incremental score
        assert_eq!(next.score(), next.evaluate());
    }

    #[test]
    fn test_promotion_to_queen() {
        let pos = Position::from_description("8/4P3/8/8/8/8/8/k6K w").unwrap();
        let mv = Move::new(Square::E7, Square::E8);
        let next = pos.apply_move(mv);

        assert_eq!(next.board()[Square::E8.mirrored()], Piece::Theirs(PieceKind::Queen));
        assert_eq!(next.score(), next.evaluate());
        assert_eq!(
            pos.score_delta(mv),
            psq(PieceKind::Queen, Square::E8) - psq(PieceKind::Pawn, Square::E7)
        );
    }

    #[test]
    fn test_en_passant_removes_pawn() {
        // After black plays d7d5, white's e5 pawn may take on d6
        let pos = Position::from_description("4k3/3p4/8/4P3/8/8/8/4K3 b").unwrap();
        let pos = pos.apply_move(Move::new(Square::D7, Square::D5).mirrored());
        assert_eq!(pos.ep_square(), Some(Square::D6));

        let mv = Move::new(Square::E5, Square::D6);
        let next = pos.apply_move(mv).mirrored();
        assert_eq!(next.board()[Square::D6], Piece::Ours(PieceKind::Pawn));
        assert!(next.board()[Square::D5].is_empty());
        assert_eq!(next.score(), next.evaluate());
    }

    #[test]
    fn test_capture_score() {
        let pos = Position::from_description("4k3/8/8/3p4/4N3/8/8/4K3 w").unwrap();
        let mv = Move::new(Square::E4, Square::D5);
        let expected = psq(PieceKind::Knight, Square::D5) - psq(PieceKind::Knight, Square::E4)
            + psq(PieceKind::Pawn, Square::D5.mirrored());

        assert_eq!(pos.score_delta(mv), expected);
        assert_eq!(pos.apply_move(mv).score(), -(pos.score() + expected));
    }

    #[test]
    fn test_king_passant_capture_scores_the_king() {
        let pos = Position::from_description("4k3/8/8/8/8/8/3p4/4K2R w").unwrap();
        let castled = pos.apply_move(Move::new(Square::E1, Square::G1));
        assert_eq!(castled.king_passant(), Some(Square::F1.mirrored()));

        // Black's d2 pawn promotes on e1, the square the King just left
        let mv = Move::new(Square::D2.mirrored(), Square::E1.mirrored());
        let (from, to) = mv.parts();
        assert!(castled.board()[to].is_empty());

        let king = psq(PieceKind::King, to.mirrored());
        assert_eq!(king, 60_006);

        let promotion = psq(PieceKind::Queen, to) - psq(PieceKind::Pawn, from);
        assert_eq!(castled.score_delta(mv), promotion + king);
    }

    #[test]
    fn test_knight_development_score() {
        let pos = Position::from_description("4k3/8/8/8/8/8/8/1N2K3 w").unwrap();
        assert_eq!(pos.score_delta(Move::new(Square::B1, Square::D2)), 23);
    }

    #[test]
    fn test_description_of_frame() {
        let pos = Position::default().apply_move(Move::new(Square::E2, Square::E4));
        assert_eq!(
            pos.to_description(),
            "rnbkqbnr/ppp1pppp/8/3p4/8/8/PPPPPPPP/RNBKQBNR w"
        );
    }
}
