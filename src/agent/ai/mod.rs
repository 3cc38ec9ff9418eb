// AI Agent - Negamax with Alpha-Beta Pruning
//
// A move request consults the opening book first and otherwise runs one
// fixed-depth negamax search with alpha-beta pruning, backed by a
// transposition table and a static evaluator.
//
// Key features:
// - Opening book keyed by FEN-style position encoding
// - Transposition table keyed by Zobrist hash, bounded with a pluggable
//   replacement policy
// - Material + piece-square evaluation with small positional bonuses
// - Random root ordering, optional parallel root split

pub mod encoding;
pub mod evaluation;
pub mod negamax;
pub mod negamax_player;
pub mod notation;
pub mod opening_book;
pub mod piece_square_tables;
pub mod search;
pub mod transposition_table;


pub use encoding::encode;
pub use evaluation::{evaluate, CHECKMATE_SCORE, STALEMATE_SCORE};
pub use negamax::{negamax, SearchStats};
pub use negamax_player::NegamaxPlayer;
pub use notation::resolve_notation;
pub use opening_book::{BookSource, OpeningBook};
pub use search::{find_best_move, find_best_move_parallel, SearchResult};
pub use transposition_table::{ReplacementPolicy, TranspositionTable};
