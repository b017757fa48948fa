use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Result};
use arrayvec::ArrayString;

use super::{BOARD_LEN, ROW_LEN};

/// File characters, indexed by column of the padded board.
const FILE_CHARS: &[u8; ROW_LEN] = b" abcdefgh ";

/// Rank characters, indexed by row of the padded board.
const RANK_CHARS: &[u8; BOARD_LEN / ROW_LEN] = b"  87654321  ";

/// Represents a single cell of the padded `10x12` board.
///
/// Internally this is the cell's index into a row-major array of [`BOARD_LEN`] cells:
/// ```text
///       0   1   2   3   4   5   6   7   8   9
///      10  11  12  13  14  15  16  17  18  19
///      20 [a8  b8  c8  d8  e8  f8  g8  h8] 29
///      ..
///      90 [a1  b1  c1  d1  e1  f1  g1  h1] 99
///     100 101 102 103 104 105 106 107 108 109
///     110 111 112 113 114 115 116 117 118 119
/// ```
///
/// Only rows `2..=9` and columns `1..=8` are playable. Everything else is the sentinel border.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    pub const A1: Self = Self::new(0, 0);
    pub const A2: Self = Self::new(0, 1);
    pub const A3: Self = Self::new(0, 2);
    pub const A4: Self = Self::new(0, 3);
    pub const A5: Self = Self::new(0, 4);
    pub const A6: Self = Self::new(0, 5);
    pub const A7: Self = Self::new(0, 6);
    pub const A8: Self = Self::new(0, 7);

    pub const B1: Self = Self::new(1, 0);
    pub const B2: Self = Self::new(1, 1);
    pub const B3: Self = Self::new(1, 2);
    pub const B4: Self = Self::new(1, 3);
    pub const B5: Self = Self::new(1, 4);
    pub const B6: Self = Self::new(1, 5);
    pub const B7: Self = Self::new(1, 6);
    pub const B8: Self = Self::new(1, 7);

    pub const C1: Self = Self::new(2, 0);
    pub const C2: Self = Self::new(2, 1);
    pub const C3: Self = Self::new(2, 2);
    pub const C4: Self = Self::new(2, 3);
    pub const C5: Self = Self::new(2, 4);
    pub const C6: Self = Self::new(2, 5);
    pub const C7: Self = Self::new(2, 6);
    pub const C8: Self = Self::new(2, 7);

    pub const D1: Self = Self::new(3, 0);
    pub const D2: Self = Self::new(3, 1);
    pub const D3: Self = Self::new(3, 2);
    pub const D4: Self = Self::new(3, 3);
    pub const D5: Self = Self::new(3, 4);
    pub const D6: Self = Self::new(3, 5);
    pub const D7: Self = Self::new(3, 6);
    pub const D8: Self = Self::new(3, 7);

    pub const E1: Self = Self::new(4, 0);
    pub const E2: Self = Self::new(4, 1);
    pub const E3: Self = Self::new(4, 2);
    pub const E4: Self = Self::new(4, 3);
    pub const E5: Self = Self::new(4, 4);
    pub const E6: Self = Self::new(4, 5);
    pub const E7: Self = Self::new(4, 6);
    pub const E8: Self = Self::new(4, 7);

    pub const F1: Self = Self::new(5, 0);
    pub const F2: Self = Self::new(5, 1);
    pub const F3: Self = Self::new(5, 2);
    pub const F4: Self = Self::new(5, 3);
    pub const F5: Self = Self::new(5, 4);
    pub const F6: Self = Self::new(5, 5);
    pub const F7: Self = Self::new(5, 6);
    pub const F8: Self = Self::new(5, 7);

    pub const G1: Self = Self::new(6, 0);
    pub const G2: Self = Self::new(6, 1);
    pub const G3: Self = Self::new(6, 2);
    pub const G4: Self = Self::new(6, 3);
    pub const G5: Self = Self::new(6, 4);
    pub const G6: Self = Self::new(6, 5);
    pub const G7: Self = Self::new(6, 6);
    pub const G8: Self = Self::new(6, 7);

    pub const H1: Self = Self::new(7, 0);
    pub const H2: Self = Self::new(7, 1);
    pub const H3: Self = Self::new(7, 2);
    pub const H4: Self = Self::new(7, 3);
    pub const H5: Self = Self::new(7, 4);
    pub const H6: Self = Self::new(7, 5);
    pub const H7: Self = Self::new(7, 6);
    pub const H8: Self = Self::new(7, 7);

    /// Number of playable squares.
    pub const COUNT: usize = 64;

    /// Creates a new [`Square`] from a zero-based file (`a = 0`) and rank (`1 = 0`).
    ///
    /// # Example
    /// ```
    /// # use mailbox_types::Square;
    /// let e4 = Square::new(4, 3);
    /// assert_eq!(e4.to_string(), "e4");
    /// assert_eq!(e4.index(), 65);
    /// ```
    pub const fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8, "File and rank must be between [0,7]");
        Self((9 - rank) * ROW_LEN as u8 + file + 1)
    }

    /// Creates a new [`Square`] from an index into the padded board.
    ///
    /// The provided `index` must be `[0, 119]` or else an error is returned.
    ///
    /// # Example
    /// ```
    /// # use mailbox_types::Square;
    /// let a1 = Square::from_index(91);
    /// assert!(a1.is_ok());
    /// assert_eq!(a1.unwrap(), Square::A1);
    ///
    /// let err = Square::from_index(120);
    /// assert!(err.is_err());
    /// ```
    pub fn from_index(index: usize) -> Result<Self> {
        if index >= BOARD_LEN {
            bail!("Invalid index for Square: Index must be between [0,{BOARD_LEN}). Got {index}");
        }

        Ok(Self(index as u8))
    }

    /// Creates a new [`Square`] from an index, ignoring safety checks.
    pub const fn from_index_unchecked(index: u8) -> Self {
        debug_assert!((index as usize) < BOARD_LEN, "Index must be less than 120");
        Self(index)
    }

    /// An iterator over all playable squares, in index order (a8 first, h1 last).
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..BOARD_LEN as u8).map(Self).filter(Self::is_playable)
    }

    /// Returns this [`Square`] as a `usize`, for indexing into lists of [`BOARD_LEN`] elements.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the inner index of this [`Square`].
    pub const fn inner(&self) -> u8 {
        self.0
    }

    /// Row of the padded board, `[0, 11]`.
    pub const fn row(&self) -> u8 {
        self.0 / ROW_LEN as u8
    }

    /// Column of the padded board, `[0, 9]`.
    pub const fn column(&self) -> u8 {
        self.0 % ROW_LEN as u8
    }

    /// Returns `true` if this [`Square`] lies within the `8x8` playing area.
    ///
    /// # Example
    /// ```
    /// # use mailbox_types::Square;
    /// assert!(Square::A8.is_playable());
    /// assert!(Square::H1.is_playable());
    /// assert!(!Square::from_index_unchecked(20).is_playable());
    /// assert!(!Square::from_index_unchecked(99).is_playable());
    /// ```
    pub const fn is_playable(&self) -> bool {
        let row = self.row();
        let column = self.column();
        row >= 2 && row <= 9 && column >= 1 && column <= 8
    }

    /// Returns `true` if this [`Square`] is on the farthest rank (rank 8 of the current frame).
    pub const fn is_last_rank(&self) -> bool {
        self.0 >= Self::A8.0 && self.0 <= Self::H8.0
    }

    /// Returns `true` if this [`Square`] is on rank 2 of the current frame, where Pawns start.
    pub const fn is_pawn_home_rank(&self) -> bool {
        self.0 >= Self::A2.0 && self.0 <= Self::H2.0
    }

    /// Maps this [`Square`] onto the board as the opponent sees it.
    ///
    /// This rotates the board by 180 degrees in a single subtraction: ranks and files are both reversed.
    ///
    /// # Example
    /// ```
    /// # use mailbox_types::Square;
    /// assert_eq!(Square::A1.mirrored(), Square::H8);
    /// assert_eq!(Square::E2.mirrored(), Square::D7);
    /// assert_eq!(Square::E2.mirrored().mirrored(), Square::E2);
    /// ```
    pub const fn mirrored(self) -> Self {
        Self(BOARD_LEN as u8 - 1 - self.0)
    }

    /// Steps `delta` cells across the padded board.
    ///
    /// Starting from a playable square, any single delta of the piece movement tables lands within the board.
    pub const fn offset(self, delta: i8) -> Self {
        let index = self.0 as i16 + delta as i16;
        debug_assert!(index >= 0 && index < BOARD_LEN as i16, "Offset left the padded board");
        Self(index as u8)
    }

    /// Signed number of cells from `self` to `other`.
    pub const fn delta_to(self, other: Self) -> i8 {
        (other.0 as i16 - self.0 as i16) as i8
    }

    /// Absolute number of cells between `self` and `other`.
    pub const fn distance(self, other: Self) -> u8 {
        self.0.abs_diff(other.0)
    }

    /// The cell halfway between `self` and `other`.
    pub const fn midpoint(self, other: Self) -> Self {
        Self((self.0 + other.0) / 2)
    }

    /// File character, `'a'` through `'h'`, or a space on the border.
    pub const fn file_char(&self) -> char {
        FILE_CHARS[self.column() as usize] as char
    }

    /// Rank character, `'1'` through `'8'`, or a space on the border.
    pub const fn rank_char(&self) -> char {
        RANK_CHARS[self.row() as usize] as char
    }

    /// Creates a [`Square`] from a string, according to the [Universal Chess Interface](https://en.wikipedia.org//wiki/Universal_Chess_Interface) notation.
    ///
    /// # Example
    /// ```
    /// # use mailbox_types::Square;
    /// let e4 = Square::from_uci("e4");
    /// assert!(e4.is_ok());
    /// assert_eq!(e4.unwrap(), Square::E4);
    ///
    /// assert!(Square::from_uci("i1").is_err());
    /// assert!(Square::from_uci("e9").is_err());
    /// assert!(Square::from_uci("E4").is_err());
    /// ```
    pub fn from_uci(square: &str) -> Result<Self> {
        let bytes = square.as_bytes();
        if bytes.len() != 2 {
            bail!("Invalid Square string: String must contain exactly 2 characters. Got {square:?}")
        }

        let file = bytes[0];
        if !(b'a'..=b'h').contains(&file) {
            bail!("Invalid char for File: Must be between [a, h]. Got {:?}", file as char);
        }

        let rank = bytes[1];
        if !(b'1'..=b'8').contains(&rank) {
            bail!("Invalid char for Rank: Must be between [1, 8]. Got {:?}", rank as char);
        }

        Ok(Self::new(file - b'a', rank - b'1'))
    }

    /// Converts this [`Square`] to its two-character file-rank text.
    pub fn to_uci(&self) -> ArrayString<2> {
        let mut uci = ArrayString::new();
        uci.push(self.file_char());
        uci.push(self.rank_char());
        uci
    }
}

impl<T> Index<Square> for [T; BOARD_LEN] {
    type Output = T;
    /// [`Square`] can be used to index into a list of [`BOARD_LEN`] elements.
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; BOARD_LEN] {
    /// [`Square`] can be used to mutably index into a list of [`BOARD_LEN`] elements.
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_uci())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to_uci(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EAST, NORTH, WEST};

    #[test]
    fn test_corners() {
        assert_eq!(Square::A1.index(), 91);
        assert_eq!(Square::H1.index(), 98);
        assert_eq!(Square::A8.index(), 21);
        assert_eq!(Square::H8.index(), 28);

        assert_eq!(Square::A1.to_string(), "a1");
        assert_eq!(Square::H8.to_string(), "h8");
    }

    #[test]
    fn test_parsing() {
        for square in Square::iter() {
            let text = square.to_string();
            assert_eq!(Square::from_uci(&text).unwrap(), square);
        }

        assert!(Square::from_uci("a").is_err());
        assert!(Square::from_uci("1").is_err());
        assert!(Square::from_uci("").is_err());
        assert!(Square::from_uci("a0").is_err());
        assert!(Square::from_uci("a1a").is_err());
        assert!(Square::from_uci("A1").is_err());
    }

    #[test]
    fn test_mirror_is_an_involution() {
        for index in 0..BOARD_LEN {
            let square = Square::from_index(index).unwrap();
            assert_eq!(square.mirrored().mirrored(), square);
        }
    }

    #[test]
    fn test_mirror_keeps_playable_squares_playable() {
        for square in Square::iter() {
            assert!(square.mirrored().is_playable(), "{square:?}");
        }
        assert_eq!(Square::iter().count(), Square::COUNT);
    }

    #[test]
    fn test_offsets() {
        assert_eq!(Square::E2.offset(NORTH), Square::E3);
        assert_eq!(Square::E2.offset(EAST), Square::F2);
        assert_eq!(Square::E2.delta_to(Square::E4), -20);
        assert_eq!(Square::E1.midpoint(Square::G1), Square::F1);
        assert_eq!(Square::E1.distance(Square::C1), 2);
        assert!(!Square::A1.offset(WEST).is_playable());
        assert!(!Square::H8.offset(EAST).is_playable());
    }
}
