use std::{fmt, ops::Index};

use arrayvec::ArrayString;
use log::warn;

use super::{psq, BoardError, Color, Piece, Side, Square, BOARD_LEN, ROW_LEN, STARTPOS};

/// Represents all pieces and their locations on the padded `10x12` board.
///
/// Has no knowledge of castling rights, en passant, or whose turn it is. If you need those, see [`crate::Position`].
///
/// The border cells always hold [`Piece::OffBoard`]; the `8x8` interior holds only empty cells or real pieces.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board([Piece; BOARD_LEN]);

impl Board {
    /// Creates a new [`Board`] with an empty interior surrounded by the sentinel border.
    ///
    /// # Example
    /// ```
    /// # use mailbox::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_placements(), "8/8/8/8/8/8/8/8");
    /// ```
    pub const fn new() -> Self {
        let mut cells = [Piece::OffBoard; BOARD_LEN];

        let mut i = 0;
        while i < BOARD_LEN {
            if Square::from_index_unchecked(i as u8).is_playable() {
                cells[i] = Piece::Empty;
            }
            i += 1;
        }

        Self(cells)
    }

    /// Constructs a [`Board`] from the piece-placement part of a board description, exactly as written.
    ///
    /// Uppercase letters become our pieces and lowercase letters become theirs. Nothing is flipped.
    ///
    /// # Example
    /// ```
    /// # use mailbox::{Board, Piece, PieceKind, Square};
    /// let board = Board::from_placements("4k3/8/8/8/8/8/8/4K3").unwrap();
    /// assert_eq!(board[Square::E1], Piece::Ours(PieceKind::King));
    /// assert_eq!(board[Square::E8], Piece::Theirs(PieceKind::King));
    /// ```
    pub fn from_placements(placements: &str) -> Result<Self, BoardError> {
        let rows = placements.split('/').collect::<Vec<_>>();
        if rows.len() != 8 {
            return Err(BoardError::MalformedDescription {
                details: format!("expected 8 rows, found {}", rows.len()),
            });
        }

        let mut board = Self::new();

        // The first row of a description is rank 8
        for (row, placements) in rows.into_iter().enumerate() {
            let rank = 7 - row as u8;
            let mut file = 0;

            for c in placements.chars() {
                if let Some(empty) = c.to_digit(10).filter(|n| (1..=8).contains(n)) {
                    if file + empty as usize > 8 {
                        return Err(BoardError::InvalidPieceSymbol { val: c, row: row + 1 });
                    }
                    file += empty as usize;
                } else if let Ok(piece) = Piece::from_uci(c) {
                    // Keep counting past the h-file so the error reports the full length
                    if file < 8 {
                        board.place(Square::new(file as u8, rank), piece);
                    }
                    file += 1;
                } else {
                    return Err(BoardError::InvalidPieceSymbol { val: c, row: row + 1 });
                }
            }

            if file != 8 {
                return Err(BoardError::InvalidRowLength {
                    row: row + 1,
                    len: file,
                });
            }
        }

        Ok(board)
    }

    /// Constructs a [`Board`] from a board description with an optional side-to-move marker.
    ///
    /// If Black is to move, the board is mirrored so that Black's pieces become ours.
    ///
    /// # Example
    /// ```
    /// # use mailbox::{Board, Piece, PieceKind, Square};
    /// let board = Board::from_description("4k3/8/8/8/8/8/8/4K3 b").unwrap();
    /// assert_eq!(board[Square::D1], Piece::Ours(PieceKind::King));
    /// assert_eq!(board[Square::D8], Piece::Theirs(PieceKind::King));
    /// ```
    pub fn from_description(description: &str) -> Result<Self, BoardError> {
        let (board, side_to_move) = parse_description(description)?;

        Ok(match side_to_move {
            Color::White => board,
            Color::Black => board.mirrored(),
        })
    }

    /// Returns this [`Board`] as the opponent sees it.
    ///
    /// Every cell moves to its mirrored index and every piece changes side.
    pub fn mirrored(&self) -> Self {
        let mut cells = [Piece::OffBoard; BOARD_LEN];

        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = self.0[BOARD_LEN - 1 - i].mirrored();
        }

        Self(cells)
    }

    /// Fetches the occupant of the provided [`Square`].
    pub const fn piece_at(&self, square: Square) -> Piece {
        self.0[square.index()]
    }

    /// Places the provided [`Piece`] at the supplied [`Square`], replacing any occupant.
    pub(crate) fn place(&mut self, square: Square, piece: Piece) {
        debug_assert!(square.is_playable(), "Cannot place {piece} on the border at {square:?}");
        self.0[square] = piece;
    }

    /// Clears the supplied [`Square`] of any piece.
    pub(crate) fn clear(&mut self, square: Square) {
        self.place(square, Piece::Empty);
    }

    /// Returns an iterator over all pieces on this board along with their locations, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter()
            .map(|square| (square, self.piece_at(square)))
            .filter(|(_, piece)| piece.side().is_some())
    }

    /// Returns an iterator over all of the pieces of `side` on this board along with their locations.
    pub fn all_for(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, piece)| piece.side() == Some(side))
    }

    /// Computes the full static evaluation of this board from our perspective.
    ///
    /// Our pieces count their table value on their square. Their pieces count their table value on the
    /// mirrored square, which is where they would stand if the board were flipped.
    pub fn evaluate(&self) -> i32 {
        self.iter()
            .map(|(square, piece)| match piece {
                Piece::Ours(kind) => psq(kind, square),
                Piece::Theirs(kind) => -psq(kind, square.mirrored()),
                Piece::Empty | Piece::OffBoard => 0,
            })
            .sum()
    }

    /// Renders the `8x8` interior as 64 characters, row-major from a8 to h1, using `.` for empty squares.
    ///
    /// # Example
    /// ```
    /// # use mailbox::Board;
    /// let board = Board::from_placements("4k3/8/8/8/8/8/8/4K3").unwrap();
    /// let text = board.render();
    /// assert_eq!(text.len(), 64);
    /// assert_eq!(&text[0..8], "....k...");
    /// assert_eq!(&text[56..64], "....K...");
    /// ```
    pub fn render(&self) -> ArrayString<64> {
        let mut text = ArrayString::new();

        for square in Square::iter() {
            text.push(self.piece_at(square).char());
        }

        text
    }

    /// Generates the piece-placement part of a board description for this [`Board`].
    pub fn to_placements(&self) -> String {
        let mut placements = String::with_capacity(71);

        for row in 2..10 {
            let mut empty_spaces = 0;
            for column in 1..9 {
                let piece = self.0[row * ROW_LEN + column];
                if piece.is_empty() {
                    empty_spaces += 1;
                    continue;
                }

                if empty_spaces != 0 {
                    placements += &empty_spaces.to_string();
                    empty_spaces = 0;
                }
                placements.push(piece.char());
            }

            if empty_spaces != 0 {
                placements += &empty_spaces.to_string();
            }
            if row != 9 {
                placements.push('/');
            }
        }

        placements
    }
}

/// Splits a board description into its board, exactly as written, and the color to move.
///
/// A missing side-to-move marker means White. Fields past the marker are ignored.
pub(crate) fn parse_description(description: &str) -> Result<(Board, Color), BoardError> {
    let mut fields = description.split_ascii_whitespace();

    let placements = fields
        .next()
        .ok_or_else(|| BoardError::MalformedDescription {
            details: String::from("missing piece placements"),
        })?;
    let board = Board::from_placements(placements)?;

    let side_to_move = match fields.next() {
        None => Color::White,
        Some(marker) => marker
            .parse::<Color>()
            .map_err(|err| BoardError::MalformedDescription {
                details: err.to_string(),
            })?,
    };

    let rest = fields.collect::<Vec<_>>();
    if !rest.is_empty() {
        warn!("Ignoring trailing board description fields {rest:?}");
    }

    Ok((board, side_to_move))
}

impl Index<Square> for Board {
    type Output = Piece;
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index]
    }
}

impl Default for Board {
    fn default() -> Self {
        // Safe unwrap because the description for startpos is always valid
        Self::from_description(STARTPOS).unwrap()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Allocate just enough capacity
        let mut board = String::with_capacity(198);

        for (i, square) in Square::iter().enumerate() {
            if i % 8 == 0 {
                board.push(square.rank_char());
                board += "| ";
            }

            board.push(self.piece_at(square).char());
            board.push(' ');

            if i % 8 == 7 {
                board += "\n";
            }
        }
        board += " +";
        board += &"--".repeat(8);
        board += "\n   ";
        for file in 'a'..='h' {
            board.push(file);
            board.push(' ');
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{self}", self.to_placements())
    }
}
