use std::{
    fmt,
    ops::{Add, AddAssign},
    time::Instant,
};

use super::{Game, Move, Piece, PieceKind, Position};

/// A result from [`perft_full`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerftResult {
    /// Depth searched
    depth: usize,

    /// Number of game states reachable.
    nodes: u64,

    /// Number of captures possible, en passant and King captures included.
    captures: u64,

    /// Number of times en passant can be performed.
    eps: u64,

    /// Number of times castling can occur.
    castles: u64,

    /// Number of times a pawn can be promoted.
    promotions: u64,
}

impl PerftResult {
    pub const fn depth(&self) -> usize {
        self.depth
    }

    pub const fn nodes(&self) -> u64 {
        self.nodes
    }

    pub const fn captures(&self) -> u64 {
        self.captures
    }

    pub const fn eps(&self) -> u64 {
        self.eps
    }

    pub const fn castles(&self) -> u64 {
        self.castles
    }

    pub const fn promotions(&self) -> u64 {
        self.promotions
    }

    /// Counts `mv` as one leaf node, recording what kind of move it is.
    fn tally(&mut self, position: &Position, mv: Move) {
        let (from, to) = mv.parts();
        let piece = position.board()[from];
        let ep = piece.is_ours_of(PieceKind::Pawn) && Some(to) == position.ep_square();
        let king_capture = position
            .king_passant()
            .is_some_and(|passant| to.distance(passant) < 2);

        self.nodes += 1;
        self.captures += (position.board()[to].is_theirs() || ep || king_capture) as u64;
        self.eps += ep as u64;
        self.castles += (piece == Piece::Ours(PieceKind::King) && from.distance(to) == 2) as u64;
        self.promotions += (piece.is_ours_of(PieceKind::Pawn) && to.is_last_rank()) as u64;
    }
}

impl Add for PerftResult {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            depth: self.depth.max(rhs.depth),
            nodes: self.nodes + rhs.nodes,
            captures: self.captures + rhs.captures,
            eps: self.eps + rhs.eps,
            castles: self.castles + rhs.castles,
            promotions: self.promotions + rhs.promotions,
        }
    }
}

impl AddAssign for PerftResult {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl fmt::Display for PerftResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = ["Depth", "Nodes", "Capt.", "E.p.", "Cast.", "Promo."];
        let values = [
            self.depth as u64,
            self.nodes,
            self.captures,
            self.eps,
            self.castles,
            self.promotions,
        ];

        let widths = headers
            .iter()
            .zip(values)
            .map(|(header, val)| header.len().max(val.to_string().len()))
            .collect::<Vec<_>>();

        let mut header_line = String::from("|");
        let mut value_line = String::from("|");
        for ((header, val), width) in headers.iter().zip(values).zip(widths) {
            header_line += &format!(" {header:>width$} |");
            value_line += &format!(" {val:>width$} |");
        }

        let divider = "-".repeat(header_line.len());
        write!(f, "{header_line}\n{divider}\n{value_line}")
    }
}

/// Perform a perft at the specified depth, collecting only data about the number of possible states (nodes).
///
/// Only playable moves are followed. Moves that leave a King en prise are not pruned.
pub fn perft(position: &Position, depth: usize) -> u64 {
    // Recursion limit; return 1, since we're fathoming this node.
    if depth == 0 {
        return 1;
    }

    let moves = position.playable_moves();

    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| perft(&position.apply_move(mv), depth - 1))
        .sum()
}

/// Perform a perft at the specified depth, collecting data on captures, castling, promotions, etc.
///
/// The move counters describe the moves made on the last ply.
pub fn perft_full(position: &Position, depth: usize) -> PerftResult {
    let mut res = PerftResult {
        depth,
        ..Default::default()
    };

    if depth == 0 {
        res.nodes = 1;
        return res;
    }

    for mv in position.playable_moves() {
        if depth == 1 {
            res.tally(position, mv);
        } else {
            res += perft_full(&position.apply_move(mv), depth - 1);
        }
    }

    res
}

/// Counts the nodes reached after each playable move of `game`, with the moves in White's orientation.
pub fn splitperft(game: &Game, depth: usize) -> Vec<(Move, u64)> {
    let position = game.position();

    position
        .playable_moves()
        .into_iter()
        .map(|mv| {
            let nodes = perft(&position.apply_move(mv), depth.saturating_sub(1));
            (game.to_frame(mv), nodes)
        })
        .collect()
}

/// Prints a perft at the specified depth.
///
/// If the generic parameter `SPLIT` is `true`, this will perform a `splitperft`,
/// printing all moves at the first level (`depth`) followed by how many nodes
/// were reached after each of those moves.
///
/// If the generic parameter `PRETTY` is `true`, additional info will be printed.
pub fn print_perft<const PRETTY: bool, const SPLIT: bool>(game: &Game, depth: usize) {
    if PRETTY {
        println!("Computing PERFT({depth}) of the following position:\n{game}\n");
    }

    let now = Instant::now();
    let total_nodes = if SPLIT && depth > 0 {
        let mut total_nodes = 0;
        for (mv, nodes) in splitperft(game, depth) {
            println!("{mv:>8} {nodes:>width$}", width = depth * 2 + 1);
            total_nodes += nodes;
        }
        println!(); // Empty line between last splitperft and total_nodes
        total_nodes
    } else {
        perft(game.position(), depth)
    };
    let elapsed = now.elapsed();

    if PRETTY {
        // Math
        let nps = total_nodes as f32 / elapsed.as_secs_f32();
        let m_nps = nps / 1_000_000.0;

        println!("Elapsed Time:          {elapsed:.1?}");
        println!("Total Nodes:           {total_nodes}");
        println!("Nodes / Sec:           {nps:.0}");
        println!("M Nodes / Sec:         {m_nps:.1}");
    } else {
        println!("{total_nodes}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_counts() {
        let pos = Position::default();
        assert_eq!(perft(&pos, 0), 1);
        assert_eq!(perft(&pos, 1), 20);
        assert_eq!(perft(&pos, 2), 400);
        assert_eq!(perft(&pos, 3), 8_902);
    }

    #[test]
    fn test_full_matches_plain() {
        let pos = Position::default();
        let res = perft_full(&pos, 3);
        assert_eq!(res.nodes(), perft(&pos, 3));
        assert_eq!(res.depth(), 3);
        assert_eq!(res.captures(), 34);
        assert_eq!(res.eps(), 0);
        assert_eq!(res.castles(), 0);
    }

    #[test]
    fn test_split_sums_to_total() {
        let game = Game::default();
        let split = splitperft(&game, 3);
        assert_eq!(split.len(), 20);
        assert_eq!(split.iter().map(|(_, nodes)| nodes).sum::<u64>(), 8_902);
    }

    #[test]
    fn test_castles_are_counted() {
        let pos = Position::from_description("r3k2r/8/8/8/8/8/8/R3K2R w").unwrap();
        assert_eq!(perft_full(&pos, 1).castles(), 2);
    }
}
