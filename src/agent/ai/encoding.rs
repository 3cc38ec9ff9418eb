// Position encoding
//
// Builds a FEN-like key: placement rank by rank from rank 8 with empty runs
// collapsed into digits, then side to move, castling token, en-passant
// target, halfmove clock and fullmove number. Missing details fall back to
// `-`, `-`, `0`, `1`, so positions that differ only in untracked rights
// share a key.

use crate::game_repr::{Color, GameState, Square};
use std::fmt::Write;

/// Canonical encoding of `state`.
///
/// If the collaborator supplies its own encoding it is returned unchanged.
pub fn encode<S: GameState + ?Sized>(state: &S) -> String {
    if let Some(encoding) = state.position_encoding() {
        return encoding;
    }

    let mut out = placement(state);

    let side = match state.side_to_move() {
        Color::White => 'w',
        Color::Black => 'b',
    };

    let castling = state
        .castling_rights()
        .filter(|rights| !rights.is_empty())
        .unwrap_or_else(|| "-".to_string());

    let en_passant = state
        .en_passant_target()
        .map(|sq| sq.to_string())
        .unwrap_or_else(|| "-".to_string());

    let halfmove = state.halfmove_clock().unwrap_or(0);
    let fullmove = state.fullmove_number().unwrap_or(1);

    // writing to a String cannot fail
    let _ = write!(out, " {side} {castling} {en_passant} {halfmove} {fullmove}");
    out
}

/// Piece placement field only.
pub fn placement<S: GameState + ?Sized>(state: &S) -> String {
    let mut out = String::with_capacity(64);
    for row in 0..8u8 {
        if row > 0 {
            out.push('/');
        }
        let mut empty = 0u8;
        for col in 0..8u8 {
            match state.piece_at(Square::new(row, col)) {
                Some(piece) => {
                    if empty > 0 {
                        out.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    out.push(piece.to_fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push((b'0' + empty) as char);
        }
    }
    out
}
