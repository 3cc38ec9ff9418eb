//! Move selection for an automated chess player.
//!
//! The engine picks a move for the side to move given the current position
//! and its legal moves. It asks an opening book first, and otherwise runs a
//! fixed-depth negamax search with alpha-beta pruning over a transposition
//! table, scoring leaves with a material and piece-square evaluator. Board
//! rules come from whatever implements [`game_repr::GameState`];
//! [`game_repr::ChessBoard`] provides one on top of the `chess` crate.

pub mod agent;
pub mod config;
pub mod error;
pub mod game_repr;

pub use agent::ai::{find_best_move, NegamaxPlayer, OpeningBook, SearchResult, TranspositionTable};
pub use config::{Difficulty, EngineConfig};
pub use error::{BookError, EngineError, EngineResult};
pub use game_repr::{ChessBoard, Color, GameState, Move};
