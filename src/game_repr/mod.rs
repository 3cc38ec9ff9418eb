mod moves;
mod piece;
mod position;
pub mod chess_board;

pub use chess_board::{ChessBoard, STARTING_FEN};
pub use moves::*;
pub use piece::*;
pub use position::*;
