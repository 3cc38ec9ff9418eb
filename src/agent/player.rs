//! Player trait and associated types for chess game agents.
//!
//! A player is anything that can be asked for a move in a position: the
//! negamax engine, a random mover, a scripted replay. Construction is left to
//! each implementation since they need very different inputs.
//!
//! `get_move()` is synchronous. The engine blocks for the length of its
//! fixed-depth search and the game driver simply waits for the result.

use crate::game_repr::{Color, GameState, Move};

/// Result of a completed chess game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// Black was checkmated, resigned or forfeited
    WhiteWins,
    /// White was checkmated, resigned or forfeited
    BlackWins,
    /// Stalemate
    Draw,
    /// The ply limit ran out first
    Unfinished,
}

impl GameResult {
    /// Create a GameResult from the winning color
    pub fn from_winner(winner: Color) -> Self {
        match winner {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw | GameResult::Unfinished => None,
        }
    }
}

/// Trait for entities that can provide chess moves.
///
/// Only `get_move()` must be implemented.
pub trait Player<S: GameState + ?Sized> {
    /// Request the next move for the side to move in `state`.
    ///
    /// Implementations may apply and undo moves while thinking but must leave
    /// `state` as they found it.
    ///
    /// # Return Value
    ///
    /// - `Some(Move)`: a move from `state.legal_moves()`
    /// - `None`: the player cannot or will not move (no legal moves, resignation)
    fn get_move(&mut self, state: &mut S) -> Option<Move>;

    /// Notify this player that the opponent made a move.
    fn opponent_moved(&mut self, _mv: Move) {
        // Default: do nothing
    }

    /// Notify this player that the game has ended.
    fn game_ended(&mut self, _result: GameResult) {
        // Default: do nothing
    }

    /// Get the display name of this player.
    fn name(&self) -> &str {
        "Player"
    }
}
