use std::{fmt, str::FromStr};

use anyhow::{bail, Result};
use log::debug;

use super::{board::parse_description, Board, Color, Move, MoveList, Position};

/// A [`Position`] paired with the absolute color to move and the moves played so far.
///
/// [`Position`] only knows about "ours" and "theirs". [`Game`] remembers which of White or Black that is, and translates
/// moves and boards between White's orientation and the frame of the side to move.
#[derive(Clone, PartialEq, Eq)]
pub struct Game {
    position: Position,
    side_to_move: Color,
    history: Vec<Move>,
}

impl Game {
    /// Creates a new [`Game`] from the provided board description.
    ///
    /// # Example
    /// ```
    /// # use mailbox::{Color, Game};
    /// let game = Game::from_description("4k3/8/8/8/8/8/8/4K3 b").unwrap();
    /// assert_eq!(game.side_to_move(), Color::Black);
    /// ```
    pub fn from_description(description: &str) -> Result<Self> {
        let (board, side_to_move) = parse_description(description)?;

        Ok(Self {
            position: Position::from_absolute(board, side_to_move),
            side_to_move,
            history: Vec::new(),
        })
    }

    /// The position, in the frame of the side to move.
    pub const fn position(&self) -> &Position {
        &self.position
    }

    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Every move played so far, in White's orientation.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The board in White's orientation, with White's pieces as [`crate::Side::Ours`].
    pub fn board(&self) -> Board {
        match self.side_to_move {
            Color::White => self.position.board().clone(),
            Color::Black => self.position.board().mirrored(),
        }
    }

    /// The score from White's point of view.
    pub fn score(&self) -> i32 {
        match self.side_to_move {
            Color::White => self.position.score(),
            Color::Black => -self.position.score(),
        }
    }

    /// Converts a move written in White's orientation into the frame of the side to move.
    ///
    /// The conversion is its own inverse, so this also converts frame moves back to White's orientation.
    pub const fn to_frame(&self, mv: Move) -> Move {
        match self.side_to_move {
            Color::White => mv,
            Color::Black => mv.mirrored(),
        }
    }

    /// Parses move text written in White's orientation, like `e7e5` for Black's king pawn.
    ///
    /// The returned [`Move`] is in the frame of the side to move.
    pub fn parse_move(&self, uci: &str) -> Result<Move> {
        Ok(self.to_frame(Move::from_uci(uci)?))
    }

    /// All playable moves for the side to move, in White's orientation.
    pub fn moves(&self) -> MoveList {
        self.position
            .playable_moves()
            .into_iter()
            .map(|mv| self.to_frame(mv))
            .collect()
    }

    /// Plays the move written as `uci` in White's orientation.
    ///
    /// Fails if the text is malformed or the move is not playable here.
    ///
    /// # Example
    /// ```
    /// # use mailbox::{Color, Game};
    /// let mut game = Game::default();
    /// game.make_move("e2e4").unwrap();
    /// game.make_move("e7e5").unwrap();
    /// assert_eq!(game.side_to_move(), Color::White);
    ///
    /// assert!(game.make_move("e4e5").is_err());
    /// ```
    pub fn make_move(&mut self, uci: &str) -> Result<()> {
        let mv = self.parse_move(uci)?;

        if !self.position.enumerate_moves().contains(&mv) || !self.position.is_playable(mv) {
            bail!(
                "Illegal move {uci:?} for {} in position {}",
                self.side_to_move.name(),
                self.to_description()
            );
        }

        debug!("{} plays {uci}", self.side_to_move.name());
        self.position = self.position.apply_move(mv);
        self.history.push(self.to_frame(mv));
        self.side_to_move = self.side_to_move.opponent();

        Ok(())
    }

    /// Plays a whitespace-separated sequence of moves, stopping at the first one that fails.
    pub fn make_moves(&mut self, moves: &str) -> Result<()> {
        for uci in moves.split_ascii_whitespace() {
            self.make_move(uci)?;
        }
        Ok(())
    }

    /// A board description in White's orientation, followed by the color to move.
    pub fn to_description(&self) -> String {
        format!("{} {}", self.board().to_placements(), self.side_to_move)
    }
}

impl FromStr for Game {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_description(s)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self {
            position: Position::default(),
            side_to_move: Color::White,
            history: Vec::new(),
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{} to move", self.board(), self.side_to_move.name())
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let history = self
            .history
            .iter()
            .map(|mv| mv.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{:?}\n\n{}\nMoves: {history}", self.position, self.to_description())
    }
}
