//! The position collaborator contract.
//!
//! The search core never generates moves or enforces rules itself. It reads
//! the board through [`GameState`], asks it for the legal move set, and walks
//! the tree with strictly paired [`GameState::apply`] / [`GameState::undo`]
//! calls.

use super::{Color, Move, MoveList, Piece, Square};
use crate::agent::ai::transposition_table::compute_hash;

pub trait GameState {
    /// Piece on `square`, or `None` if it is empty.
    fn piece_at(&self, square: Square) -> Option<Piece>;

    fn side_to_move(&self) -> Color;

    /// Legal moves for the side to move.
    fn legal_moves(&self) -> MoveList;

    /// Plays a move taken from [`GameState::legal_moves`].
    fn apply(&mut self, mv: Move);

    /// Reverts the most recent [`GameState::apply`].
    fn undo(&mut self);

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    /// FEN castling token (`KQkq`, `Kq`, ...), `None` if not tracked.
    fn castling_rights(&self) -> Option<String> {
        None
    }

    /// Square a pawn may capture onto en passant.
    fn en_passant_target(&self) -> Option<Square> {
        None
    }

    fn halfmove_clock(&self) -> Option<u32> {
        None
    }

    fn fullmove_number(&self) -> Option<u32> {
        None
    }

    /// Collaborator-provided canonical encoding. When present the encoder
    /// returns it verbatim instead of building its own.
    fn position_encoding(&self) -> Option<String> {
        None
    }

    /// 64-bit identity used to key the transposition table. Defaults to a
    /// from-scratch Zobrist hash of the board; collaborators that maintain an
    /// incremental hash should return it here.
    fn position_hash(&self) -> u64 {
        compute_hash(self)
    }
}
