// Compact move notation
//
// `e2e4`, `e7e8q`: source file and rank, destination file and rank, then an
// optional promotion letter. Files a-h map to columns 0-7 and ranks 1-8 to
// rows 7-0. Anything that does not parse is a plain miss.

use crate::game_repr::{Move, Square, Type};

/// Parses compact notation into a candidate move.
pub fn parse_notation(notation: &str) -> Option<Move> {
    let chars: Vec<char> = notation.chars().collect();
    if chars.len() != 4 && chars.len() != 5 {
        return None;
    }

    let from = Square::from_file_rank(chars[0], chars[1])?;
    let to = Square::from_file_rank(chars[2], chars[3])?;

    match chars.get(4) {
        None => Some(Move::new(from, to)),
        Some(&c) => match Type::from_char(c)? {
            promotion @ (Type::Queen | Type::Rook | Type::Bishop | Type::Knight) => {
                Some(Move::with_promotion(from, to, promotion))
            }
            _ => None,
        },
    }
}

/// Finds the legal move that `notation` names.
///
/// A move with the exact promotion piece wins; otherwise the first legal move
/// with the same squares is returned. The result is always an element of
/// `legal_moves`, never a freshly built move.
pub fn resolve_notation(notation: &str, legal_moves: &[Move]) -> Option<Move> {
    let candidate = parse_notation(notation)?;

    if candidate.promotion.is_some() {
        if let Some(exact) = legal_moves.iter().find(|mv| mv.same_promotion(&candidate)) {
            return Some(*exact);
        }
    }

    legal_moves.iter().find(|mv| **mv == candidate).copied()
}
