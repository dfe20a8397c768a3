// Endgame engine: KP vs K and KQ vs K, alpha-beta search and a rule-based solver
pub mod board;
pub mod engine;
pub mod error;
pub mod game;
pub mod perft;
pub mod search;
pub mod selfplay;
pub mod shell;

pub use board::{Board, Color, Move, Piece, PieceKind, Square};
pub use engine::{Algorithm, Engine, EngineConfig};
pub use game::Game;
