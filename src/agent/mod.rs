pub mod player;
pub use player::*;

pub mod random_player;
pub use random_player::RandomPlayer;

pub mod self_play;
pub use self_play::{play_game, GameRecord, Termination};

pub mod ai;
pub use ai::{NegamaxPlayer, SearchResult, TranspositionTable};
