use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::board::{Board, Color, Move, Square};
use crate::engine::{Analysis, Engine, EngineConfig};
use crate::error::{GameError, MoveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    White,
    Black,
    Draw,
}

/// Replay navigation over the recorded positions, one full move at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Playback {
    Undo,
    Redo,
    First,
    Last,
}

impl FromStr for Playback {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undo" => Ok(Playback::Undo),
            "redo" => Ok(Playback::Redo),
            "first" => Ok(Playback::First),
            "last" => Ok(Playback::Last),
            _ => Err(format!("unknown playback command {s:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board_fen: String,
    pub turn: Color,
    /// "row,col" of each movable piece to its destinations as [row, col].
    pub legal_moves: BTreeMap<String, Vec<Square>>,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub winner: Option<Winner>,
    pub history_count: usize,
    pub current_move_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineReply {
    pub from: String,
    pub to: String,
    pub evaluation: i32,
    pub mate_in: Option<u32>,
    pub analysis: Analysis,
    pub thinking_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineTurn {
    #[serde(flatten)]
    pub state: GameState,
    pub ai_move: Option<EngineReply>,
}

/// A human (Black) versus engine (White) session. Black moves first. The
/// replay index is tracked here, not in the board.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    engine: Engine,
    current_move_index: usize,
}

impl Game {
    pub fn new(board: Board, config: EngineConfig) -> Self {
        info!("new game {} ({} depth {})", board.to_fen(), config.algorithm, config.depth);
        Self { board: board.with_to_move(Color::Black), engine: Engine::new(&config), current_move_index: 0 }
    }

    pub fn from_positions(white_king: &str, white_pawn: &str, black_king: &str, config: EngineConfig) -> Result<Self, GameError> {
        Ok(Self::new(Board::from_positions(white_king, white_pawn, black_king)?, config))
    }

    pub fn from_text(text: &str, config: EngineConfig) -> Result<Self, GameError> {
        Ok(Self::new(Board::from_text(text)?, config))
    }

    pub fn from_file<P: AsRef<Path>>(path: P, config: EngineConfig) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_text(&text, config)
    }

    pub fn from_fen(fen: &str, config: EngineConfig) -> Result<Self, GameError> {
        Ok(Self::new(Board::from_fen(fen)?, config))
    }

    pub fn random<R: Rng>(config: EngineConfig, rng: &mut R) -> Self { Self::new(Board::random(rng), config) }

    pub fn board(&self) -> &Board { &self.board }

    pub fn state(&self) -> GameState {
        let b = &self.board;
        let stm = b.to_move();
        let legal_moves = b.legal_moves(stm).iter()
            .map(|(p, t)| (format!("{},{}", p.square.row, p.square.col), t.to_vec()))
            .collect();
        GameState {
            board_fen: b.to_fen(),
            turn: stm,
            legal_moves,
            is_check: b.is_check(stm),
            is_checkmate: b.is_checkmate(stm),
            is_stalemate: b.is_stalemate(stm),
            winner: self.winner(),
            history_count: b.history().len(),
            current_move_index: self.current_move_index,
        }
    }

    pub fn winner(&self) -> Option<Winner> {
        let b = &self.board;
        if b.white_piece().is_none() { return Some(Winner::Draw); }
        if b.is_checkmate(Color::White) { return Some(Winner::Black); }
        if b.is_checkmate(Color::Black) { return Some(Winner::White); }
        if b.is_stalemate(b.to_move()) { return Some(Winner::Draw); }
        None
    }

    /// Human move for Black. Any positions past the replay index are dropped.
    pub fn player_move(&mut self, from: Square, to: Square) -> Result<GameState, GameError> {
        if self.board.to_move() != Color::Black { return Err(MoveError::NotYourTurn(Color::Black).into()); }
        let mv = self.board.validate_move(from, to)?;
        self.board.truncate_history(self.current_move_index + 1);
        self.board.make_move(mv);
        self.current_move_index += 1;
        Ok(self.state())
    }

    /// Engine move for White. Reports no move (and leaves the board alone) when
    /// White has none.
    pub fn engine_move(&mut self) -> Result<EngineTurn, GameError> {
        if self.board.to_move() != Color::White { return Err(MoveError::NotYourTurn(Color::White).into()); }
        self.board.truncate_history(self.current_move_index + 1);
        let t0 = Instant::now();
        let Some(found) = self.engine.find_best_move(&self.board) else {
            return Ok(EngineTurn { state: self.state(), ai_move: None });
        };
        let Move { piece, to } = found.mv;
        self.board.make_move(found.mv);
        self.current_move_index += 1;
        let thinking_time_ms = t0.elapsed().as_secs_f64() * 1000.0;
        let mate_in = self.engine.mate_in(found.score);
        info!("engine plays {}{} eval {} ({:.1} ms)", piece.square, to, found.score, thinking_time_ms);
        let reply = EngineReply {
            from: piece.square.to_string(),
            to: to.to_string(),
            evaluation: found.score,
            mate_in,
            analysis: found.analysis,
            thinking_time_ms,
        };
        Ok(EngineTurn { state: self.state(), ai_move: Some(reply) })
    }

    /// Moves the replay cursor. Even indices are Black to move.
    pub fn playback(&mut self, cmd: Playback) -> Result<GameState, GameError> {
        let len = self.board.history().len();
        let idx = self.current_move_index;
        self.current_move_index = match cmd {
            Playback::Undo if idx > 0 => idx.saturating_sub(2),
            Playback::Redo if idx + 2 < len => idx + 2,
            Playback::First => 0,
            Playback::Last => len - 1,
            _ => idx,
        };
        let to_move = if self.current_move_index % 2 == 0 { Color::Black } else { Color::White };
        self.board.seek_history(self.current_move_index, to_move)?;
        Ok(self.state())
    }
}
