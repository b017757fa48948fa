use std::{error::Error, fmt};

/// Errors produced while parsing a board description.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum BoardError {
    /// Wrong number of rows, or an unrecognized side-to-move marker.
    MalformedDescription { details: String },

    /// A row character that is neither a piece letter nor a digit `1..=8`,
    /// or a digit run that overflows past the h-file.
    InvalidPieceSymbol { val: char, row: usize },

    /// A row that does not span exactly eight files once expanded.
    InvalidRowLength { row: usize, len: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedDescription { details } => {
                write!(f, "malformed board description: {details}")
            }
            Self::InvalidPieceSymbol { val, row } => write!(
                f,
                "pieces must be [p | n | b | r | q | k], uppercase equivalent, or a digit [1, 8]. found {val:?} in row {row}"
            ),
            Self::InvalidRowLength { row, len } => {
                write!(f, "row {row} must span 8 files. found {len}")
            }
        }
    }
}

impl Error for BoardError {
    //
}
