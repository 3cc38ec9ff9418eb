// Piece-square tables for positional evaluation
// Values in pawns, added on top of material
// Indexed [row][col] with row 0 = rank 8, so White's home rank is the last row
// Each colour has its own table; they are not required to mirror each other

use crate::game_repr::{Color, Piece, Square, Type};

type Table = [[f64; 8]; 8];

// Pawns - push toward promotion, keep the d/e pawns moving
pub const WHITE_PAWN_TABLE: Table = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],         // Rank 8
    [5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0],         // Rank 7 (near promotion)
    [1.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 1.0],         // Rank 6
    [0.5, 0.5, 1.0, 2.5, 2.5, 1.0, 0.5, 0.5],         // Rank 5
    [0.0, 0.0, 0.0, 2.0, 2.0, 0.0, 0.0, 0.0],         // Rank 4
    [0.5, -0.5, -1.0, 0.0, 0.0, -1.0, -0.5, 0.5],     // Rank 3
    [0.5, 1.0, 1.0, -2.0, -2.0, 1.0, 1.0, 0.5],       // Rank 2
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],         // Rank 1
];

pub const BLACK_PAWN_TABLE: Table = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],         // Rank 8
    [0.5, 1.0, 1.0, -2.0, -2.0, 1.0, 1.0, 0.5],       // Rank 7
    [0.5, -0.5, -1.0, 0.0, 0.0, -1.0, -0.5, 0.5],     // Rank 6
    [0.0, 0.0, 0.0, 2.0, 2.0, 0.0, 0.0, 0.0],         // Rank 5
    [0.5, 0.5, 1.0, 2.5, 2.5, 1.0, 0.5, 0.5],         // Rank 4
    [1.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 1.0],         // Rank 3
    [5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0],         // Rank 2 (near promotion)
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],         // Rank 1
];

// Knights - strongly prefer the centre; White's h-file squares on ranks 3
// and 5 are heavily penalised while g3/g5 are rewarded
pub const WHITE_KNIGHT_TABLE: Table = [
    [-5.0, -4.0, -3.0, -3.0, -3.0, -3.0, -4.0, -5.0],
    [-4.0, -2.0, 0.0, 0.0, 0.0, 0.0, -2.0, -4.0],
    [-3.0, 0.0, 1.0, 1.5, 1.5, 1.0, 0.0, -3.0],
    [-3.0, 0.5, 1.5, 2.0, 2.0, 1.5, 5.0, -30.0],
    [-3.0, 0.0, 1.5, 2.0, 2.0, 1.5, 0.0, -3.0],
    [-3.0, 0.5, 1.0, 1.5, 1.5, 1.0, 5.0, -30.0],
    [-4.0, -2.0, 0.0, 0.5, 0.5, 0.0, -2.0, -4.0],
    [-5.0, -4.0, -3.0, -3.0, -3.0, -3.0, -4.0, -5.0],
];

pub const BLACK_KNIGHT_TABLE: Table = [
    [-5.0, -4.0, -3.0, -3.0, -3.0, -3.0, -4.0, -5.0],
    [0.0, -2.0, 0.0, 0.5, 0.5, 0.0, -2.0, -4.0],
    [-3.0, 0.5, 1.0, 1.5, 1.5, 1.0, 0.5, -3.0],
    [-3.0, 0.0, 1.5, 2.0, 2.0, 1.5, 0.0, -3.0],
    [-3.0, 0.5, 1.5, 2.0, 2.0, 1.5, 0.5, -3.0],
    [-3.0, 0.0, 1.0, 1.5, 1.5, 1.0, 0.0, -3.0],
    [-4.0, -2.0, 0.0, 0.0, 0.0, 0.0, -2.0, -4.0],
    [-5.0, -4.0, -3.0, -3.0, -3.0, -3.0, -4.0, -5.0],
];

// Bishops - centre and long diagonals
pub const WHITE_BISHOP_TABLE: Table = [
    [-2.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -2.0],
    [-1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0],
    [-1.0, 0.0, 0.5, 1.0, 1.0, 0.5, 0.0, -1.0],
    [-1.0, 0.5, 0.5, 1.0, 1.0, 0.5, 0.5, -1.0],
    [-1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, -1.0],
    [-1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, -1.0],
    [-1.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.5, -1.0],
    [-2.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -2.0],
];

pub const BLACK_BISHOP_TABLE: Table = [
    [-2.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -2.0],
    [-1.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.5, -1.0],
    [-1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, -1.0],
    [-1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, -1.0],
    [-1.0, 0.5, 0.5, 1.0, 1.0, 0.5, 0.5, -1.0],
    [-1.0, 0.0, 0.5, 1.0, 1.0, 0.5, 0.0, -1.0],
    [-1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0],
    [-2.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -2.0],
];

// Rooks - seventh rank and central files
pub const WHITE_ROOK_TABLE: Table = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5],         // Rank 7 bonus
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [0.0, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0, 0.0],
];

pub const BLACK_ROOK_TABLE: Table = [
    [0.0, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0, 0.0],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5],         // Rank 2 bonus
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
];

// Queens - mild central preference
pub const WHITE_QUEEN_TABLE: Table = [
    [-2.0, -1.0, -1.0, -0.5, -0.5, -1.0, -1.0, -2.0],
    [-1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0],
    [-1.0, 0.0, 0.5, 0.5, 0.5, 0.5, 0.0, -1.0],
    [-0.5, 0.0, 0.5, 0.5, 0.5, 0.5, 0.0, -0.5],
    [0.0, 0.0, 0.5, 0.5, 0.5, 0.5, 0.0, -0.5],
    [-1.0, 0.5, 0.5, 0.5, 0.5, 0.5, 0.0, -1.0],
    [-1.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0, -1.0],
    [-2.0, -1.0, -1.0, -0.5, -0.5, -1.0, -1.0, -2.0],
];

pub const BLACK_QUEEN_TABLE: Table = [
    [-2.0, -1.0, -1.0, -0.5, -0.5, -1.0, -1.0, -2.0],
    [-1.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0, -1.0],
    [-1.0, 0.5, 0.5, 0.5, 0.5, 0.5, 0.0, -1.0],
    [0.0, 0.0, 0.5, 0.5, 0.5, 0.5, 0.0, -0.5],
    [-0.5, 0.0, 0.5, 0.5, 0.5, 0.5, 0.0, -0.5],
    [-1.0, 0.0, 0.5, 0.5, 0.5, 0.5, 0.0, -1.0],
    [-1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0],
    [-2.0, -1.0, -1.0, -0.5, -0.5, -1.0, -1.0, -2.0],
];

// Kings - middlegame shelter behind the pawns on the home rank
pub const WHITE_KING_TABLE: Table = [
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-2.0, -3.0, -3.0, -4.0, -4.0, -3.0, -3.0, -2.0],
    [-1.0, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0, -1.0],
    [2.0, 2.0, 0.0, 0.0, 0.0, 0.0, 2.0, 2.0],
    [2.0, 3.0, 1.0, 0.0, 0.0, 1.0, 3.0, 2.0],         // Rank 1 (castled)
];

pub const BLACK_KING_TABLE: Table = [
    [2.0, 3.0, 1.0, 0.0, 0.0, 1.0, 3.0, 2.0],         // Rank 8 (castled)
    [2.0, 2.0, 0.0, 0.0, 0.0, 0.0, 2.0, 2.0],
    [-1.0, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0, -1.0],
    [-2.0, -3.0, -3.0, -4.0, -4.0, -3.0, -3.0, -2.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
];

fn table_for(piece: Piece) -> &'static Table {
    match (piece.color, piece.piece_type) {
        (Color::White, Type::Pawn) => &WHITE_PAWN_TABLE,
        (Color::White, Type::Knight) => &WHITE_KNIGHT_TABLE,
        (Color::White, Type::Bishop) => &WHITE_BISHOP_TABLE,
        (Color::White, Type::Rook) => &WHITE_ROOK_TABLE,
        (Color::White, Type::Queen) => &WHITE_QUEEN_TABLE,
        (Color::White, Type::King) => &WHITE_KING_TABLE,
        (Color::Black, Type::Pawn) => &BLACK_PAWN_TABLE,
        (Color::Black, Type::Knight) => &BLACK_KNIGHT_TABLE,
        (Color::Black, Type::Bishop) => &BLACK_BISHOP_TABLE,
        (Color::Black, Type::Rook) => &BLACK_ROOK_TABLE,
        (Color::Black, Type::Queen) => &BLACK_QUEEN_TABLE,
        (Color::Black, Type::King) => &BLACK_KING_TABLE,
    }
}

/// Positional value of `piece` standing on `square`, unsigned.
pub fn get_pst_value(piece: Piece, square: Square) -> f64 {
    table_for(piece)[square.row()][square.col()]
}
