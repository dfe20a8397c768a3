pub mod alphabeta;
pub mod eval;
pub mod heuristic;
pub mod ordering;
pub mod safety;
