use clap::Parser;
use mailbox::{print_perft, Game};

/// This script exists exclusively to be used with the [perftree](https://github.com/agausmann/perftree) program for debugging.
#[derive(Parser, Debug)]
struct Args {
    /// Depth of the split perft
    depth: usize,

    /// Board description of the root position
    description: String,

    /// Whitespace-separated moves to play from the root first
    moves: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut game = Game::from_description(&args.description)?;
    // Apply moves, if any were provided
    if let Some(moves) = &args.moves {
        game.make_moves(moves)?;
    }

    // Perform a splitperft
    print_perft::<false, true>(&game, args.depth);

    Ok(())
}
