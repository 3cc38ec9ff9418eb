//! [`GameState`] backed by the `chess` crate.
//!
//! Rules, legal move generation and mate detection all come from `chess`;
//! this type only converts coordinates and keeps the undo stack and the move
//! clocks the crate does not track.

use super::{Color, GameState, Move, MoveList, Piece, Square, Type};
use crate::error::{EngineError, EngineResult};
use chess::{Board, BoardStatus, ChessMove, File, MoveGen, Rank};
use std::str::FromStr;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
}

#[derive(Debug, Clone)]
pub struct ChessBoard {
    current: Snapshot,
    history: Vec<Snapshot>,
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self {
            current: Snapshot {
                board: Board::default(),
                halfmove_clock: 0,
                fullmove_number: 1,
            },
            history: Vec::new(),
        }
    }
}

impl ChessBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a 4- or 6-field FEN. Missing clocks default to `0 1`.
    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(EngineError::InvalidFen {
                fen: fen.to_string(),
                reason: format!("expected at least 4 fields, found {}", fields.len()),
            });
        }

        let halfmove_clock = parse_clock(fen, fields.get(4), 0)?;
        let fullmove_number = parse_clock(fen, fields.get(5), 1)?;

        let full = format!("{} {} {}", fields[..4].join(" "), halfmove_clock, fullmove_number);
        let board = Board::from_str(&full).map_err(|e| EngineError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{e:?}"),
        })?;

        Ok(Self {
            current: Snapshot {
                board,
                halfmove_clock,
                fullmove_number,
            },
            history: Vec::new(),
        })
    }

    /// The underlying `chess` board.
    pub fn board(&self) -> &Board {
        &self.current.board
    }

    /// Number of moves applied and not yet undone.
    pub fn ply(&self) -> usize {
        self.history.len()
    }
}

fn parse_clock(fen: &str, field: Option<&&str>, default: u32) -> EngineResult<u32> {
    match field {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| EngineError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("bad move counter '{raw}'"),
        }),
    }
}

fn to_chess_square(square: Square) -> chess::Square {
    chess::Square::make_square(Rank::from_index(7 - square.row()), File::from_index(square.col()))
}

fn from_chess_square(square: chess::Square) -> Square {
    Square::new(
        (7 - square.get_rank().to_index()) as u8,
        square.get_file().to_index() as u8,
    )
}

fn to_chess_piece(piece_type: Type) -> chess::Piece {
    match piece_type {
        Type::King => chess::Piece::King,
        Type::Queen => chess::Piece::Queen,
        Type::Rook => chess::Piece::Rook,
        Type::Bishop => chess::Piece::Bishop,
        Type::Knight => chess::Piece::Knight,
        Type::Pawn => chess::Piece::Pawn,
    }
}

fn from_chess_piece(piece: chess::Piece) -> Type {
    match piece {
        chess::Piece::King => Type::King,
        chess::Piece::Queen => Type::Queen,
        chess::Piece::Rook => Type::Rook,
        chess::Piece::Bishop => Type::Bishop,
        chess::Piece::Knight => Type::Knight,
        chess::Piece::Pawn => Type::Pawn,
    }
}

fn from_chess_color(color: chess::Color) -> Color {
    match color {
        chess::Color::White => Color::White,
        chess::Color::Black => Color::Black,
    }
}

fn from_chess_move(mv: ChessMove) -> Move {
    Move {
        from: from_chess_square(mv.get_source()),
        to: from_chess_square(mv.get_dest()),
        promotion: mv.get_promotion().map(from_chess_piece),
    }
}

impl GameState for ChessBoard {
    fn piece_at(&self, square: Square) -> Option<Piece> {
        let sq = to_chess_square(square);
        let board = &self.current.board;
        let piece_type = board.piece_on(sq)?;
        let color = board.color_on(sq)?;
        Some(Piece::new(from_chess_color(color), from_chess_piece(piece_type)))
    }

    fn side_to_move(&self) -> Color {
        from_chess_color(self.current.board.side_to_move())
    }

    fn legal_moves(&self) -> MoveList {
        MoveGen::new_legal(&self.current.board)
            .map(from_chess_move)
            .collect()
    }

    fn apply(&mut self, mv: Move) {
        let board = self.current.board;
        let chess_move = ChessMove::new(
            to_chess_square(mv.from),
            to_chess_square(mv.to),
            mv.promotion.map(to_chess_piece),
        );
        debug_assert!(board.legal(chess_move), "illegal move {mv} applied");

        let source = chess_move.get_source();
        let is_pawn_move = board.piece_on(source) == Some(chess::Piece::Pawn);
        let is_capture = board.piece_on(chess_move.get_dest()).is_some();

        let halfmove_clock = if is_pawn_move || is_capture {
            0
        } else {
            self.current.halfmove_clock + 1
        };
        let fullmove_number = match board.side_to_move() {
            chess::Color::Black => self.current.fullmove_number + 1,
            chess::Color::White => self.current.fullmove_number,
        };

        self.history.push(self.current);
        self.current = Snapshot {
            board: board.make_move_new(chess_move),
            halfmove_clock,
            fullmove_number,
        };
    }

    fn undo(&mut self) {
        match self.history.pop() {
            Some(previous) => self.current = previous,
            None => log::warn!("undo() called with an empty move stack"),
        }
    }

    fn is_checkmate(&self) -> bool {
        self.current.board.status() == BoardStatus::Checkmate
    }

    fn is_stalemate(&self) -> bool {
        self.current.board.status() == BoardStatus::Stalemate
    }

    fn castling_rights(&self) -> Option<String> {
        let board = &self.current.board;
        let mut rights = String::new();
        let white = board.castle_rights(chess::Color::White);
        let black = board.castle_rights(chess::Color::Black);
        if white.has_kingside() {
            rights.push('K');
        }
        if white.has_queenside() {
            rights.push('Q');
        }
        if black.has_kingside() {
            rights.push('k');
        }
        if black.has_queenside() {
            rights.push('q');
        }
        if rights.is_empty() {
            rights.push('-');
        }
        Some(rights)
    }

    fn en_passant_target(&self) -> Option<Square> {
        // `chess` reports the square of the pawn that just double-pushed
        let pawn = from_chess_square(self.current.board.en_passant()?);
        let row = match self.side_to_move() {
            Color::White => pawn.row() - 1,
            Color::Black => pawn.row() + 1,
        };
        Square::try_new(row as u8, pawn.col() as u8)
    }

    fn halfmove_clock(&self) -> Option<u32> {
        Some(self.current.halfmove_clock)
    }

    fn fullmove_number(&self) -> Option<u32> {
        Some(self.current.fullmove_number)
    }

    fn position_hash(&self) -> u64 {
        self.current.board.get_hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        let mut chars = name.chars();
        Square::from_file_rank(chars.next().unwrap(), chars.next().unwrap()).unwrap()
    }

    #[test]
    fn test_starting_position_has_twenty_moves() {
        let board = ChessBoard::new();
        assert_eq!(board.legal_moves().len(), 20);
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(
            board.piece_at(sq("e1")),
            Some(Piece::new(Color::White, Type::King))
        );
        assert_eq!(
            board.piece_at(sq("d8")),
            Some(Piece::new(Color::Black, Type::Queen))
        );
        assert_eq!(board.piece_at(sq("e4")), None);
    }

    #[test]
    fn test_apply_and_undo_restore_state() {
        let mut board = ChessBoard::new();
        let hash = board.position_hash();
        board.apply(Move::new(sq("e2"), sq("e4")));
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.ply(), 1);
        assert_ne!(board.position_hash(), hash);
        board.undo();
        assert_eq!(board.position_hash(), hash);
        assert_eq!(board.ply(), 0);
    }

    #[test]
    fn test_move_clocks() {
        let mut board = ChessBoard::new();
        board.apply(Move::new(sq("g1"), sq("f3")));
        assert_eq!(board.halfmove_clock(), Some(1));
        assert_eq!(board.fullmove_number(), Some(1));
        board.apply(Move::new(sq("e7"), sq("e5")));
        assert_eq!(board.halfmove_clock(), Some(0));
        assert_eq!(board.fullmove_number(), Some(2));
    }

    #[test]
    fn test_castling_rights_token() {
        let board = ChessBoard::new();
        assert_eq!(board.castling_rights().as_deref(), Some("KQkq"));
        let bare = ChessBoard::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(bare.castling_rights().as_deref(), Some("-"));
    }

    #[test]
    fn test_en_passant_target_when_capture_possible() {
        // black pawn on d4 can take e3 after e2-e4
        let mut board =
            ChessBoard::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1").unwrap();
        board.apply(Move::new(sq("e2"), sq("e4")));
        assert_eq!(board.en_passant_target(), Some(sq("e3")));
    }

    #[test]
    fn test_terminal_flags() {
        let mated = ChessBoard::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        assert!(mated.is_checkmate());
        assert!(!mated.is_stalemate());

        let stalemate = ChessBoard::from_fen("7k/8/6Q1/8/8/8/8/K7 b - - 0 1").unwrap();
        assert!(stalemate.is_stalemate());
        assert!(!stalemate.is_checkmate());
    }

    #[test]
    fn test_invalid_fen_is_reported() {
        assert!(matches!(
            ChessBoard::from_fen("not a fen"),
            Err(EngineError::InvalidFen { .. })
        ));
        assert!(matches!(
            ChessBoard::from_fen("8/8/8/8/8/8/8/8 w - - x 1"),
            Err(EngineError::InvalidFen { .. })
        ));
    }

    #[test]
    fn test_promotion_moves_are_distinct_by_piece() {
        let board = ChessBoard::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        let promotions: Vec<Move> = board
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.promotion.is_some())
            .collect();
        assert_eq!(promotions.len(), 4);
    }
}
