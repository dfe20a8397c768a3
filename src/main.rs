use anyhow::Result;
use clap::Parser;
use kpbot::board::{Color, Square};
use kpbot::engine::{Algorithm, EngineConfig};
use kpbot::game::{Game, Playback, Winner};
use kpbot::shell::Shell;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Black against the KP/KQ vs K endgame engine", long_about = None)]
struct Args {
    /// Search depth in plies (minimax only)
    #[arg(long, default_value_t = 5)]
    depth: u32,

    /// Engine playing White
    #[arg(long, value_enum, default_value_t = Algorithm::Minimax)]
    algorithm: Algorithm,

    /// Seed for random setups and the heuristic fallback
    #[arg(long)]
    seed: Option<u64>,

    /// Starting position as a FEN board field
    #[arg(long, conflicts_with_all = ["setup", "file"])]
    fen: Option<String>,

    /// White king, White pawn and Black king squares, e.g. --setup e1 e2 e8
    #[arg(long, num_args = 3, value_names = ["WK", "WP", "BK"], conflicts_with = "file")]
    setup: Option<Vec<String>>,

    /// Setup file: three lines with the White king, White pawn and Black king
    #[arg(long)]
    file: Option<PathBuf>,

    /// Start from a random king + pawn position (the default with no setup)
    #[arg(long, conflicts_with_all = ["fen", "setup", "file"])]
    random: bool,

    /// Speak the JSON line protocol on stdin/stdout instead of playing
    #[arg(long)]
    shell: bool,

    /// Print search statistics for every engine move
    #[arg(long)]
    verbose: bool,
}

fn build_game(args: &Args, config: EngineConfig) -> Result<Game> {
    let game = if args.random {
        random_game(args.seed, config)
    } else if let Some(fen) = &args.fen {
        Game::from_fen(fen, config)?
    } else if let Some(sq) = &args.setup {
        Game::from_positions(&sq[0], &sq[1], &sq[2], config)?
    } else if let Some(path) = &args.file {
        Game::from_file(path, config)?
    } else {
        random_game(args.seed, config)
    };
    Ok(game)
}

fn random_game(seed: Option<u64>, config: EngineConfig) -> Game {
    let mut rng = match seed { Some(s) => SmallRng::seed_from_u64(s), None => SmallRng::from_entropy() };
    Game::random(config, &mut rng)
}

fn announce(winner: Winner) {
    match winner {
        Winner::White => println!("\nCheckmate! White wins!"),
        Winner::Black => println!("\nCheckmate! Black wins!"),
        Winner::Draw => println!("\nGame is a draw!"),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = EngineConfig { algorithm: args.algorithm, depth: args.depth.max(1), seed: args.seed };

    if args.shell {
        Shell::new(config).run_loop()?;
        return Ok(());
    }

    let mut game = build_game(&args, config)?;
    println!("Engine: {} (depth {})", config.algorithm, config.depth);

    loop {
        let board = game.board();
        println!("\n{}'s turn", if board.to_move() == Color::White { "White" } else { "Black" });
        println!("{board}");

        if let Some(w) = game.winner() {
            announce(w);
            break;
        }

        if board.to_move() == Color::White {
            if args.verbose { println!("Thinking..."); }
            let turn = game.engine_move()?;
            let Some(reply) = turn.ai_move else {
                println!("No legal moves available!");
                break;
            };
            println!("Computer plays: {}{}", reply.from, reply.to);
            if let Some(n) = reply.mate_in { println!("Mate in {n}"); }
            if args.verbose {
                println!("eval {} elapsed {:.1} ms analysis {}", reply.evaluation, reply.thinking_time_ms, serde_json::to_string(&reply.analysis)?);
            }
            continue;
        }

        print!("Enter your move (e.g., e7e6), or undo/redo/first/last/quit: ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 { break; }
        let input = input.trim();
        if input.is_empty() { continue; }
        if input == "quit" { break; }
        if let Ok(cmd) = input.parse::<Playback>() {
            game.playback(cmd)?;
            continue;
        }
        match Square::parse_pair(input) {
            Ok((from, to)) => {
                if let Err(e) = game.player_move(from, to) { println!("Illegal move! ({e})"); }
            }
            Err(e) => println!("Invalid move format! Use format like 'e7e6' ({e})"),
        }
    }

    Ok(())
}
