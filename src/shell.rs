use std::io::{self, BufRead, Write};
use log::warn;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::json;
use crate::board::Square;
use crate::engine::{Algorithm, EngineConfig};
use crate::error::{GameError, SetupError};
use crate::game::{Game, Playback};

/// Outcome of a single shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json(String),
    Text(String),
    Nothing,
    Quit,
}

/// Line protocol driving a `Game`: one command per line, one JSON object back.
pub struct Shell {
    game: Option<Game>,
    config: EngineConfig,
    rng: SmallRng,
}

impl Shell {
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed { Some(s) => SmallRng::seed_from_u64(s), None => SmallRng::from_entropy() };
        Self { game: None, config, rng }
    }

    fn game_mut(&mut self) -> Result<&mut Game, GameError> { self.game.as_mut().ok_or(GameError::NotSetUp) }

    fn install(&mut self, game: Game) -> String {
        let out = to_json(&game.state());
        self.game = Some(game);
        out
    }

    fn cmd_setup(&mut self, args: &[&str]) -> Result<String, GameError> {
        let [wk, wp, bk] = args else { return Err(SetupError::LineCount(args.len()).into()) };
        let game = Game::from_positions(wk, wp, bk, self.config)?;
        Ok(self.install(game))
    }

    fn cmd_move(&mut self, args: &[&str]) -> Result<String, GameError> {
        let (from, to) = Square::parse_pair(&args.join(" "))?;
        let state = self.game_mut()?.player_move(from, to)?;
        Ok(to_json(&state))
    }

    fn cmd_config(&mut self, args: &[&str]) -> Result<String, String> {
        match args {
            ["depth", n] => self.config.depth = n.parse::<u32>().map_err(|e| e.to_string())?.max(1),
            ["algorithm", name] => self.config.algorithm = name.parse::<Algorithm>()?,
            ["seed", n] => {
                let s = n.parse::<u64>().map_err(|e| e.to_string())?;
                self.config.seed = Some(s);
                self.rng = SmallRng::seed_from_u64(s);
            }
            _ => return Err(format!("bad config command {:?}", args.join(" "))),
        }
        Ok(to_json(&self.config))
    }

    fn dispatch(&mut self, cmd: &str, args: &[&str]) -> Result<Reply, GameError> {
        let json = match cmd {
            "setup" => self.cmd_setup(args)?,
            "setupfile" => {
                let game = Game::from_file(args.join(" "), self.config)?;
                self.install(game)
            }
            "fen" => {
                let game = Game::from_fen(&args.join(" "), self.config)?;
                self.install(game)
            }
            "random" => {
                let game = Game::random(self.config, &mut self.rng);
                self.install(game)
            }
            "move" => self.cmd_move(args)?,
            "go" => to_json(&self.game_mut()?.engine_move()?),
            "state" => to_json(&self.game_mut()?.state()),
            "board" => return Ok(Reply::Text(self.game_mut()?.board().to_string())),
            "config" => match self.cmd_config(args) {
                Ok(s) => s,
                Err(e) => error_json(&e),
            },
            "quit" => return Ok(Reply::Quit),
            other => match other.parse::<Playback>() {
                Ok(p) => to_json(&self.game_mut()?.playback(p)?),
                Err(_) => error_json(&format!("unknown command {other:?}")),
            },
        };
        Ok(Reply::Json(json))
    }

    pub fn handle_line(&mut self, line: &str) -> Reply {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((cmd, args)) = tokens.split_first() else { return Reply::Nothing };
        match self.dispatch(cmd, args) {
            Ok(r) => r,
            Err(e) => {
                warn!("{cmd}: {e}");
                Reply::Json(error_json(&e.to_string()))
            }
        }
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            match self.handle_line(line.trim()) {
                Reply::Json(s) | Reply::Text(s) => { writeln!(out, "{s}")?; out.flush()?; }
                Reply::Nothing => continue,
                Reply::Quit => break,
            }
        }
        Ok(())
    }

    pub fn run_loop(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run(stdin.lock(), stdout.lock())
    }
}

fn to_json<T: Serialize>(v: &T) -> String {
    serde_json::to_string(v).unwrap_or_else(|e| error_json(&e.to_string()))
}

fn error_json(msg: &str) -> String { json!({ "error": msg }).to_string() }
