use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use super::{BISHOP_DELTAS, KNIGHT_DELTAS, PAWN_DELTAS, QUEEN_DELTAS, ROOK_DELTAS};

/// Represents the absolute color of a player.
///
/// Move generation never looks at this: the board is always seen from the side to move.
/// It only matters when translating to and from a human-facing orientation.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Returns this [`Color`]'s opposite / inverse / enemy.
    ///
    /// # Example
    /// ```
    /// # use mailbox_types::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Creates a [`Color`] from a `char` naming the side to move.
    ///
    /// # Example
    /// ```
    /// # use mailbox_types::Color;
    /// let white = Color::from_uci('w');
    /// assert!(white.is_ok());
    /// assert_eq!(white.unwrap(), Color::White);
    ///
    /// assert!(Color::from_uci('x').is_err());
    /// assert!(Color::from_uci('W').is_err());
    /// ```
    pub fn from_uci(color: char) -> Result<Self> {
        match color {
            'w' => Ok(Self::White),
            'b' => Ok(Self::Black),
            _ => bail!("Color must be either 'w' or 'b'. Found {color:?}"),
        }
    }

    /// Converts this [`Color`] to the `char` naming it as the side to move.
    pub const fn to_uci(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

/// Which side of the current frame a piece belongs to.
///
/// The side to move is always [`Side::Ours`]. Uppercase letters are ours, lowercase are theirs.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Side {
    #[default]
    Ours,
    Theirs,
}

impl Side {
    /// Number of side variants.
    pub const COUNT: usize = 2;

    /// Both sides, starting with ours.
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::Ours, Self::Theirs]
    }

    /// Returns this [`Side`] as a `usize`, `0` for ours and `1` for theirs.
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Uppercase is ours, lowercase is theirs.
    pub const fn from_case(c: char) -> Self {
        if c.is_ascii_lowercase() {
            Self::Theirs
        } else {
            Self::Ours
        }
    }

    /// Fetches a human-readable name for this [`Side`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ours => "ours",
            Self::Theirs => "theirs",
        }
    }
}

/// Represents the kind (or "class") that a chess piece can be.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// An array of all 6 [`PieceKind`]s.
    ///
    /// In the order: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// An iterator over all [`PieceKind`]s, starting with Pawn.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::all().into_iter()
    }

    /// Returns this [`PieceKind`] as a `usize`.
    ///
    /// Useful for indexing into lists. Will always be `[0,5]`.
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Material value of this [`PieceKind`].
    ///
    /// The King must outweigh every other piece a side could ever own combined.
    ///
    /// # Example
    /// ```
    /// # use mailbox_types::PieceKind;
    /// assert_eq!(PieceKind::Pawn.value(), 100);
    /// assert_eq!(PieceKind::King.value(), 60_000);
    /// ```
    pub const fn value(&self) -> i32 {
        match self {
            Self::Pawn => 100,
            Self::Knight => 280,
            Self::Bishop => 320,
            Self::Rook => 479,
            Self::Queen => 929,
            Self::King => 60_000,
        }
    }

    /// Directions this [`PieceKind`] moves in, as deltas over the padded board.
    pub const fn deltas(&self) -> &'static [i8] {
        match self {
            Self::Pawn => &PAWN_DELTAS,
            Self::Knight => &KNIGHT_DELTAS,
            Self::Bishop => &BISHOP_DELTAS,
            Self::Rook => &ROOK_DELTAS,
            Self::Queen | Self::King => &QUEEN_DELTAS,
        }
    }

    /// Returns `true` if this [`PieceKind`] keeps moving along a direction until blocked (Rook, Bishop, Queen).
    pub const fn is_slider(&self) -> bool {
        matches!(self, Self::Bishop | Self::Rook | Self::Queen)
    }

    /// Creates a new [`PieceKind`] from a character, ignoring case.
    ///
    /// # Example
    /// ```
    /// # use mailbox_types::PieceKind;
    /// let queen = PieceKind::from_uci('Q');
    /// assert!(queen.is_ok());
    /// assert_eq!(queen.unwrap(), PieceKind::Queen);
    /// ```
    pub fn from_uci(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind:?}."),
        }
    }

    /// Converts this [`PieceKind`] to a lowercase character.
    pub const fn to_uci(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

/// The occupant of a single cell of the padded board.
///
/// Exactly one value exists per (side, kind) pair, plus the two non-pieces.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Piece {
    /// A playable square with nothing on it.
    #[default]
    Empty,

    /// A sentinel cell of the border around the playing area.
    OffBoard,

    /// A piece belonging to the side to move.
    Ours(PieceKind),

    /// A piece belonging to the opponent.
    Theirs(PieceKind),
}

impl Piece {
    /// Creates a new [`Piece`] from the given [`Side`] and [`PieceKind`].
    ///
    /// # Example
    /// ```
    /// # use mailbox_types::{Piece, PieceKind, Side};
    /// let knight = Piece::new(Side::Theirs, PieceKind::Knight);
    /// assert_eq!(knight.to_string(), "n");
    /// ```
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        match side {
            Side::Ours => Self::Ours(kind),
            Side::Theirs => Self::Theirs(kind),
        }
    }

    /// Fetches the [`Side`] of this [`Piece`], if it is a piece at all.
    pub const fn side(&self) -> Option<Side> {
        match self {
            Self::Ours(_) => Some(Side::Ours),
            Self::Theirs(_) => Some(Side::Theirs),
            Self::Empty | Self::OffBoard => None,
        }
    }

    /// Fetches the [`PieceKind`] of this [`Piece`], if it is a piece at all.
    pub const fn kind(&self) -> Option<PieceKind> {
        match self {
            Self::Ours(kind) | Self::Theirs(kind) => Some(*kind),
            Self::Empty | Self::OffBoard => None,
        }
    }

    /// Returns `true` if this cell is empty and playable.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` if this cell is part of the sentinel border.
    pub const fn is_off_board(&self) -> bool {
        matches!(self, Self::OffBoard)
    }

    /// Returns `true` if this is one of our pieces.
    pub const fn is_ours(&self) -> bool {
        matches!(self, Self::Ours(_))
    }

    /// Returns `true` if this is one of their pieces.
    pub const fn is_theirs(&self) -> bool {
        matches!(self, Self::Theirs(_))
    }

    /// Returns `true` if this is one of our pieces of the given kind.
    pub fn is_ours_of(&self, kind: PieceKind) -> bool {
        *self == Self::Ours(kind)
    }

    /// Material value of this occupant; `0` for empty and sentinel cells.
    ///
    /// # Example
    /// ```
    /// # use mailbox_types::{Piece, PieceKind};
    /// assert_eq!(Piece::Ours(PieceKind::Rook).value(), 479);
    /// assert_eq!(Piece::Empty.value(), 0);
    /// assert_eq!(Piece::OffBoard.value(), 0);
    /// ```
    pub const fn value(&self) -> i32 {
        match self.kind() {
            Some(kind) => kind.value(),
            None => 0,
        }
    }

    /// Swaps the side of this [`Piece`]. Empty and sentinel cells are unchanged.
    ///
    /// # Example
    /// ```
    /// # use mailbox_types::{Piece, PieceKind};
    /// let king = Piece::Ours(PieceKind::King);
    /// assert_eq!(king.mirrored(), Piece::Theirs(PieceKind::King));
    /// assert_eq!(king.mirrored().mirrored(), king);
    /// assert_eq!(Piece::OffBoard.mirrored(), Piece::OffBoard);
    /// ```
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Ours(kind) => Self::Theirs(kind),
            Self::Theirs(kind) => Self::Ours(kind),
            Self::Empty | Self::OffBoard => self,
        }
    }

    /// Creates a new [`Piece`] from a piece letter. Uppercase is ours, lowercase is theirs.
    ///
    /// # Example
    /// ```
    /// # use mailbox_types::{Piece, PieceKind};
    /// let ours = Piece::from_uci('N').unwrap();
    /// assert_eq!(ours, Piece::Ours(PieceKind::Knight));
    /// assert!(Piece::from_uci('x').is_err());
    /// ```
    pub fn from_uci(piece: char) -> Result<Self> {
        let kind = PieceKind::from_uci(piece)?;
        Ok(Self::new(Side::from_case(piece), kind))
    }

    /// Converts this [`Piece`] into a character.
    ///
    /// Empty squares are `'.'` and the sentinel border is `' '`.
    pub const fn to_uci(&self) -> char {
        match self {
            Self::Empty => '.',
            Self::OffBoard => ' ',
            Self::Ours(kind) => kind.to_uci().to_ascii_uppercase(),
            Self::Theirs(kind) => kind.to_uci(),
        }
    }

    /// Alias for [`Piece::to_uci`].
    pub const fn char(&self) -> char {
        self.to_uci()
    }
}

macro_rules! impl_common_traits {
    ($type:ty) => {
        impl FromStr for $type {
            type Err = anyhow::Error;
            /// Does the same as [`Self::from_uci`], but only if `s` is one character in length.
            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_uci(c),
                    _ => bail!("Invalid str for {}: Must be a str of len 1. Got {s:?}", stringify!($type)),
                }
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_uci())
            }
        }
    };
}

impl_common_traits!(Piece);
impl_common_traits!(PieceKind);
impl_common_traits!(Color);

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_uci())
    }
}

impl fmt::Debug for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_unique() {
        let mut seen = Vec::new();
        for side in Side::all() {
            for kind in PieceKind::iter() {
                let c = Piece::new(side, kind).to_uci();
                assert!(!seen.contains(&c), "{c} encoded twice");
                assert_eq!(Piece::from_uci(c).unwrap(), Piece::new(side, kind));
                seen.push(c);
            }
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn test_mirror_swaps_sides() {
        for kind in PieceKind::iter() {
            let ours = Piece::Ours(kind);
            assert!(ours.mirrored().is_theirs());
            assert_eq!(ours.mirrored().kind(), Some(kind));
        }
        assert_eq!(Piece::Empty.mirrored(), Piece::Empty);
    }

    #[test]
    fn test_non_piece_letters() {
        assert!(Piece::from_uci('.').is_err());
        assert!(Piece::from_uci('1').is_err());
        assert!(Piece::from_str("Qq").is_err());
        assert_eq!(Piece::from_str("q").unwrap(), Piece::Theirs(PieceKind::Queen));
    }

    #[test]
    fn test_slide_directions() {
        assert_eq!(PieceKind::Pawn.deltas().len(), 4);
        assert_eq!(PieceKind::Knight.deltas().len(), 8);
        assert_eq!(PieceKind::King.deltas(), PieceKind::Queen.deltas());
        assert!(PieceKind::Queen.is_slider());
        assert!(!PieceKind::King.is_slider());
    }
}
