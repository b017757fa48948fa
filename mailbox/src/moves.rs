use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};
use arrayvec::ArrayString;

use super::Square;

/// Represents a move made on the board, as the pair of cells it travels between.
///
/// A [`Move`] carries no flags: castling, en passant, and promotion are all
/// recognized from the board when the move is applied.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Creates a new [`Move`] from the given [`Square`]s.
    ///
    /// # Example
    /// ```
    /// # use mailbox::{Move, Square};
    /// let e2e4 = Move::new(Square::E2, Square::E4);
    /// assert_eq!(e2e4.to_string(), "e2e4");
    /// ```
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Fetches the source (or "from") part of this [`Move`].
    pub const fn from(&self) -> Square {
        self.from
    }

    /// Fetches the destination (or "to") part of this [`Move`].
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Fetches the parts of this [`Move`] in a tuple of `(from, to)`.
    pub const fn parts(&self) -> (Square, Square) {
        (self.from, self.to)
    }

    /// The same move as the opponent sees it, once the board has been flipped.
    ///
    /// # Example
    /// ```
    /// # use mailbox::{Move, Square};
    /// let e7e5 = Move::new(Square::E7, Square::E5);
    /// assert_eq!(e7e5.mirrored(), Move::new(Square::D2, Square::D4));
    /// ```
    pub const fn mirrored(self) -> Self {
        Self::new(self.from.mirrored(), self.to.mirrored())
    }

    /// Creates a [`Move`] from a string, according to the [Universal Chess Interface](https://en.wikipedia.org//wiki/Universal_Chess_Interface) notation.
    ///
    /// There is no promotion suffix: Pawns always promote to a Queen.
    ///
    /// # Example
    /// ```
    /// # use mailbox::{Move, Square};
    /// let e2e4 = Move::from_uci("e2e4").unwrap();
    /// assert_eq!(e2e4.parts(), (Square::E2, Square::E4));
    ///
    /// assert!(Move::from_uci("e2e4q").is_err());
    /// assert!(Move::from_uci("e2").is_err());
    /// ```
    pub fn from_uci(uci: &str) -> Result<Self> {
        if uci.len() != 4 || !uci.is_ascii() {
            bail!("Invalid move string: Move must be two concatenated squares. Got {uci:?}");
        }

        let from = Square::from_uci(&uci[0..2]).context(format!("Invalid source in {uci:?}"))?;
        let to = Square::from_uci(&uci[2..4]).context(format!("Invalid destination in {uci:?}"))?;

        Ok(Self::new(from, to))
    }

    /// Converts this [`Move`] to its four-character text, such as `e2e4`.
    pub fn to_uci(&self) -> ArrayString<4> {
        let mut uci = ArrayString::new();
        uci.push_str(&self.from.to_uci());
        uci.push_str(&self.to.to_uci());
        uci
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} -> {})", self.to_uci(), self.from.inner(), self.to.inner())
    }
}
