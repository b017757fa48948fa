use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::info;
use mailbox::{Game, Move, PieceKind, STARTPOS};

/// Lists the moves available in a position, along with how each one changes the score.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Board description to start from
    #[arg(default_value = STARTPOS)]
    description: String,

    /// Whitespace-separated moves to play first, in White's orientation
    #[arg(short, long)]
    moves: Option<String>,

    /// Also list Pawn diagonals that have nothing to capture
    #[arg(short, long)]
    all: bool,

    /// Order moves by score delta, best first, instead of generation order
    #[arg(short, long)]
    sort: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut game = Game::from_description(&args.description)?;
    if let Some(moves) = &args.moves {
        game.make_moves(moves)?;
    }
    info!("Listing moves for {}", game.to_description());

    let position = game.position();
    let mut moves = if args.all {
        position.enumerate_moves()
    } else {
        position.playable_moves()
    };

    if args.sort {
        moves.sort_by_key(|&mv| std::cmp::Reverse(position.score_delta(mv)));
    }

    println!("{game}\n");
    for &mv in &moves {
        println!("{}", describe(&game, mv));
    }
    println!("\n{} moves", moves.len());

    Ok(())
}

/// One line of output for the frame move `mv`: its absolute text, its score delta, and what kind of move it is.
fn describe(game: &Game, mv: Move) -> String {
    let position = game.position();
    let (from, to) = mv.parts();
    let piece = position.board()[from];
    let delta = position.score_delta(mv);

    let text = format!("{:<6}{delta:>+7}", game.to_frame(mv).to_string());

    if !position.is_playable(mv) {
        format!("{}", text.dimmed())
    } else if position.board()[to].is_theirs()
        || (Some(to) == position.ep_square() && piece.is_ours_of(PieceKind::Pawn))
    {
        format!("{}  {}", text.red(), "capture".red())
    } else if piece.is_ours_of(PieceKind::King) && from.distance(to) == 2 {
        format!("{}  {}", text.cyan(), "castle".cyan())
    } else if piece.is_ours_of(PieceKind::Pawn) && to.is_last_rank() {
        format!("{}  {}", text.green(), "promotion".green())
    } else {
        text
    }
}
