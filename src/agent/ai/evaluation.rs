// Static position evaluation
// Returns a score in pawns from White's point of view (positive = good for White)

use crate::game_repr::{Color, GameState, Piece, Square, Type};
use super::piece_square_tables::get_pst_value;

/// Score of a mated position. Mate is scored at this fixed magnitude
/// regardless of how many plies away it is.
pub const CHECKMATE_SCORE: f64 = 1000.0;
pub const STALEMATE_SCORE: f64 = 0.0;

// Material values in pawns. The king is counted too; both sides always have
// one so it only shifts the magnitude.
const KING_VALUE: f64 = 200.0;
const QUEEN_VALUE: f64 = 9.0;
const ROOK_VALUE: f64 = 5.0;
const BISHOP_VALUE: f64 = 3.3;
const KNIGHT_VALUE: f64 = 3.2;
const PAWN_VALUE: f64 = 1.0;

const PAWN_ADVANCE_BONUS: f64 = 0.08;
const ROOK_OPEN_FILE_BONUS: f64 = 0.45;
const CENTRALIZATION_WEIGHT: f64 = 0.06;
const BOARD_CENTER: f64 = 3.5;

/// Evaluate `state` from White's perspective.
///
/// Terminal positions short-circuit: a mated side scores ±[`CHECKMATE_SCORE`],
/// stalemate scores exactly [`STALEMATE_SCORE`]. Otherwise every piece
/// contributes material, its piece-square value and the small positional
/// bonuses below, added for White and subtracted for Black.
pub fn evaluate<S: GameState + ?Sized>(state: &S) -> f64 {
    if state.is_checkmate() {
        return match state.side_to_move() {
            Color::White => -CHECKMATE_SCORE,
            Color::Black => CHECKMATE_SCORE,
        };
    }
    if state.is_stalemate() {
        return STALEMATE_SCORE;
    }

    let mut score = 0.0;
    for square in Square::all() {
        if let Some(piece) = state.piece_at(square) {
            let value = piece_value(state, piece, square);
            match piece.color {
                Color::White => score += value,
                Color::Black => score -= value,
            }
        }
    }
    score
}

/// Unsigned contribution of one piece.
pub(crate) fn piece_value<S: GameState + ?Sized>(state: &S, piece: Piece, square: Square) -> f64 {
    material_value(piece.piece_type)
        + get_pst_value(piece, square)
        + pawn_advancement_bonus(piece, square)
        + rook_open_file_bonus(state, piece, square)
        + centralization_bonus(piece.piece_type, square)
}

pub fn material_value(piece_type: Type) -> f64 {
    match piece_type {
        Type::King => KING_VALUE,
        Type::Queen => QUEEN_VALUE,
        Type::Rook => ROOK_VALUE,
        Type::Bishop => BISHOP_VALUE,
        Type::Knight => KNIGHT_VALUE,
        Type::Pawn => PAWN_VALUE,
    }
}

/// 0.08 per rank a pawn has moved past its starting rank.
pub(crate) fn pawn_advancement_bonus(piece: Piece, square: Square) -> f64 {
    if piece.piece_type != Type::Pawn {
        return 0.0;
    }
    let row = square.row() as f64;
    let advanced = match piece.color {
        Color::White => 6.0 - row,
        Color::Black => row - 1.0,
    };
    advanced.max(0.0) * PAWN_ADVANCE_BONUS
}

/// Rook on a file with no pawn of either colour.
pub(crate) fn rook_open_file_bonus<S: GameState + ?Sized>(state: &S, piece: Piece, square: Square) -> f64 {
    if piece.piece_type != Type::Rook {
        return 0.0;
    }
    let col = square.col() as u8;
    let pawn_on_file = (0..8u8).any(|row| {
        matches!(
            state.piece_at(Square::new(row, col)),
            Some(Piece { piece_type: Type::Pawn, .. })
        )
    });
    if pawn_on_file {
        0.0
    } else {
        ROOK_OPEN_FILE_BONUS
    }
}

/// Knights, bishops, queens and kings gain 0.06 per unit of Manhattan
/// distance closer to the centre than 3.5, and lose it beyond that.
pub(crate) fn centralization_bonus(piece_type: Type, square: Square) -> f64 {
    if !matches!(piece_type, Type::Knight | Type::Bishop | Type::Queen | Type::King) {
        return 0.0;
    }
    let dist = (square.row() as f64 - BOARD_CENTER).abs() + (square.col() as f64 - BOARD_CENTER).abs();
    (BOARD_CENTER - dist) * CENTRALIZATION_WEIGHT
}
