use clap::Parser;
use kpbot::board::{Board, Color};
use kpbot::perft::{divide, perft};
use rayon::prelude::*;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Move-generation node counter for kpbot positions")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// FEN board field
    #[arg(value_name = "FEN", default_value = "4k3/8/8/8/8/8/4P3/4K3")]
    fen: String,
    /// Side to move
    #[arg(long, default_value = "black")]
    side: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Print per-move counts
    #[arg(long, default_value_t = false)]
    divide: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let side = match args.side.to_ascii_lowercase().as_str() {
        "w" | "white" => Color::White,
        "b" | "black" => Color::Black,
        other => anyhow::bail!("Invalid side {other:?}: use 'white' or 'black'"),
    };
    let base = Board::from_fen(&args.fen)?.with_to_move(side);
    let depth = args.depth;

    if args.divide {
        let mut b = base.clone();
        let rows = divide(&mut b, depth);
        for (mv, n) in &rows { println!("{mv}: {n}"); }
        println!("\nmoves: {} nodes: {}", rows.len(), rows.iter().map(|(_, n)| n).sum::<u64>());
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 || depth == 0 {
            perft(&mut base.clone(), depth)
        } else {
            let root: Vec<_> = base.legal_moves(side).moves().collect();
            root.par_iter().map(|&mv| {
                let mut b = base.clone();
                b.make_move(mv);
                perft(&mut b, depth - 1)
            }).sum()
        };
        (nodes, t0.elapsed().as_secs_f64())
    });
    println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON));
    Ok(())
}
