use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use kpbot::engine::Algorithm;
use kpbot::selfplay::{generate_games_with, SelfPlayParams, Summary};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kpbot-selfplay", about = "Play engine-vs-engine games from random KP vs K positions")]
struct Args {
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, default_value_t = 100)]
    max_plies: usize,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long, default_value_t = 3)]
    depth: u32,
    #[arg(long, default_value_t = 2)]
    black_depth: u32,
    #[arg(long, value_enum, default_value_t = Algorithm::Minimax)]
    algorithm: Algorithm,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Write every game record plus the summary as JSON
    #[arg(long)]
    json_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let params = SelfPlayParams {
        games: a.games,
        max_plies: a.max_plies,
        algorithm: a.algorithm,
        depth: a.depth,
        black_depth: a.black_depth,
        seed: a.seed,
        threads: a.threads,
    };
    eprintln!("Generating {} games (engine={}, depth={}, black_depth={}, threads={})", a.games, a.algorithm, a.depth, a.black_depth, a.threads);
    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games [{elapsed_precise}]")?);
    let games = generate_games_with(&params, |_| pb.inc(1))?;
    pb.finish_and_clear();

    let summary = Summary::from_records(&games);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    if let Some(path) = a.json_out {
        let doc = serde_json::json!({ "params": params, "summary": summary, "games": games });
        std::fs::write(&path, serde_json::to_string_pretty(&doc)?)?;
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}
