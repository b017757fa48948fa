use std::{sync::mpsc, time::Instant};

use anyhow::{bail, Result};
use clap::Parser;
use log::{debug, info};
use mailbox::{perft, Game, STARTPOS};
use threadpool::ThreadPool;

/// Benchmarks perft, splitting the root moves across a pool of threads.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Board description to search from
    #[arg(default_value = STARTPOS)]
    description: String,

    /// Depth to search to
    #[arg(short, long, default_value_t = 4)]
    depth: usize,

    /// Number of worker threads. Defaults to the number of logical CPUs.
    #[arg(short, long)]
    threads: Option<usize>,

    /// Whitespace-separated moves to play first, in White's orientation
    #[arg(short, long)]
    moves: Option<String>,

    /// Compare the total against this many nodes, failing if they differ
    #[arg(short, long)]
    expected: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut game = Game::from_description(&args.description)?;
    if let Some(moves) = &args.moves {
        game.make_moves(moves)?;
    }

    if args.depth == 0 {
        bail!("Depth must be at least 1");
    }

    let threads = args.threads.unwrap_or_else(num_cpus::get).max(1);
    let pool = ThreadPool::new(threads);
    info!("Running perft({}) on {threads} threads", args.depth);

    let now = Instant::now();
    let (sender, receiver) = mpsc::channel();
    let root_moves = game.position().playable_moves();
    let num_jobs = root_moves.len();

    for mv in root_moves {
        let child = game.position().apply_move(mv);
        let absolute = game.to_frame(mv);
        let depth = args.depth - 1;
        let sender = sender.clone();

        pool.execute(move || {
            let nodes = perft(&child, depth);
            debug!("{absolute} finished with {nodes} nodes");
            // The receiver outlives every job
            let _ = sender.send((absolute, nodes));
        });
    }
    drop(sender);

    let mut results = receiver.iter().take(num_jobs).collect::<Vec<_>>();
    results.sort();
    let elapsed = now.elapsed();

    let total_nodes = results.iter().map(|(_, nodes)| nodes).sum::<u64>();

    for (mv, nodes) in &results {
        println!("{mv:>8} {nodes:>width$}", width = args.depth * 2 + 1);
    }

    // Math
    let nps = total_nodes as f32 / elapsed.as_secs_f32();
    let m_nps = nps / 1_000_000.0;

    println!();
    println!("Elapsed Time:          {elapsed:.1?}");
    println!("Total Nodes:           {total_nodes}");
    println!("Nodes / Sec:           {nps:.0}");
    println!("M Nodes / Sec:         {m_nps:.1}");

    if let Some(expected) = args.expected {
        if expected != total_nodes {
            bail!(
                "Perft({}, {:?}) failed\nExpected: {expected}\nGot     : {total_nodes}",
                args.depth,
                game.to_description()
            );
        }
    }

    Ok(())
}
