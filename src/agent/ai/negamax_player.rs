//! NegamaxPlayer - fixed-depth negamax player with an opening book
//!
//! The player owns the state a move request needs across a game: the
//! transposition table (kept between requests so earlier searches keep
//! paying off), the random source for the root shuffle and a handle to the
//! opening book. The book is shared; by default it is the process-wide book
//! selected by [`EngineConfig::book`].
//!
//! # Examples
//!
//! ```
//! use chess_ai::agent::ai::NegamaxPlayer;
//! use chess_ai::config::{Difficulty, EngineConfig};
//! use chess_ai::game_repr::{ChessBoard, GameState};
//!
//! let config = EngineConfig::from_difficulty(Difficulty::Easy).with_seed(1);
//! let mut ai = NegamaxPlayer::new(config);
//! let mut board = ChessBoard::new();
//! let moves = board.legal_moves();
//! let mv = ai.find_best_move(&mut board, &moves);
//! assert!(mv.is_some());
//! ```

use crate::agent::player::{GameResult, Player};
use crate::config::{Difficulty, EngineConfig};
use crate::error::EngineResult;
use crate::game_repr::{GameState, Move};
use super::opening_book::OpeningBook;
use super::search::{find_best_move, find_best_move_parallel, SearchResult};
use super::transposition_table::TranspositionTable;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

pub struct NegamaxPlayer {
    config: EngineConfig,
    book: Arc<OpeningBook>,
    tt: TranspositionTable,
    rng: StdRng,
    name: String,
    /// Outcome of the most recent move request
    last_result: Option<SearchResult>,
}

impl NegamaxPlayer {
    /// Player using the process-wide opening book.
    ///
    /// The first player created in a process picks the global book from its
    /// configuration; later players share whatever book was chosen then.
    pub fn new(config: EngineConfig) -> Self {
        if !OpeningBook::init_global(&config.book) {
            log::debug!("Opening book already loaded, ignoring {:?}", config.book);
        }
        let book = OpeningBook::global();
        Self::with_book(config, book)
    }

    /// Player with its own opening book.
    pub fn with_book(config: EngineConfig, book: Arc<OpeningBook>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let name = format!("AI (depth {})", config.depth);
        Self {
            tt: TranspositionTable::from_config(&config),
            config,
            book,
            rng,
            name,
            last_result: None,
        }
    }

    /// Player named after a difficulty level, e.g. "AI (Hard)".
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        let mut player = Self::new(EngineConfig::from_difficulty(difficulty));
        player.name = format!("AI ({})", difficulty.name());
        player
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn depth(&self) -> u8 {
        self.config.depth
    }

    /// Changes the search depth for later requests.
    pub fn set_depth(&mut self, depth: u32) -> EngineResult<()> {
        self.config = self.config.clone().with_depth(depth)?;
        if self.name.starts_with("AI (depth ") {
            self.name = format!("AI (depth {})", self.config.depth);
        }
        Ok(())
    }

    pub fn book(&self) -> &OpeningBook {
        &self.book
    }

    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Forgets every cached search result.
    pub fn clear_table(&mut self) {
        self.tt.clear();
    }

    pub fn last_result(&self) -> Option<&SearchResult> {
        self.last_result.as_ref()
    }

    /// Picks a move for the side to move in `state` from `legal_moves`.
    ///
    /// Returns `None` only when `legal_moves` is empty. `state` is restored
    /// before returning.
    pub fn find_best_move<S>(&mut self, state: &mut S, legal_moves: &[Move]) -> Option<Move>
    where
        S: GameState + Clone + Sync,
    {
        let result = if self.config.parallel_root {
            find_best_move_parallel(
                &*state,
                legal_moves,
                self.config.depth,
                &self.book,
                &self.config,
                &mut self.rng,
            )
        } else {
            find_best_move(
                state,
                legal_moves,
                self.config.depth,
                &self.book,
                &mut self.tt,
                &mut self.rng,
            )
        };

        let best_move = result.best_move;
        self.last_result = Some(result);
        best_move
    }
}

impl<S> Player<S> for NegamaxPlayer
where
    S: GameState + Clone + Sync,
{
    fn get_move(&mut self, state: &mut S) -> Option<Move> {
        let legal_moves = state.legal_moves();
        self.find_best_move(state, &legal_moves)
    }

    fn game_ended(&mut self, result: GameResult) {
        log::debug!(
            "[{}] game over ({:?}), table held {} entries, hit rate {:.1}%",
            self.name,
            result,
            self.tt.size(),
            self.tt.hit_rate() * 100.0
        );
        self.tt.clear();
    }

    fn name(&self) -> &str {
        NegamaxPlayer::name(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ai::opening_book::BookSource;
    use crate::game_repr::ChessBoard;

    fn config(depth: u32) -> EngineConfig {
        EngineConfig::new(depth)
            .unwrap()
            .with_book(BookSource::Empty)
            .with_seed(11)
    }

    #[test]
    fn test_finds_mate_in_one() {
        let mut ai = NegamaxPlayer::with_book(config(2), Arc::new(OpeningBook::empty()));
        let mut board = ChessBoard::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
        let mv = Player::get_move(&mut ai, &mut board).unwrap();
        assert_eq!(mv.to_string(), "a1a8");
        assert_eq!(ai.last_result().unwrap().score, 1000.0);
    }

    #[test]
    fn test_table_persists_between_requests() {
        let mut ai = NegamaxPlayer::with_book(config(2), Arc::new(OpeningBook::empty()));
        let mut board = ChessBoard::new();
        let moves = board.legal_moves();
        ai.find_best_move(&mut board, &moves);
        let stored = ai.transposition_table().size();
        assert!(stored > 0);

        ai.clear_table();
        assert_eq!(ai.transposition_table().size(), 0);
    }

    #[test]
    fn test_book_move_is_used() {
        let mut book = OpeningBook::empty();
        book.insert(crate::game_repr::STARTING_FEN, "b1c3");
        let mut ai = NegamaxPlayer::with_book(config(3), Arc::new(book));
        let mut board = ChessBoard::new();
        let moves = board.legal_moves();
        let mv = ai.find_best_move(&mut board, &moves).unwrap();
        assert_eq!(mv.to_string(), "b1c3");
        assert!(ai.last_result().unwrap().from_book);
    }

    #[test]
    fn test_set_depth() {
        let mut ai = NegamaxPlayer::with_book(config(2), Arc::new(OpeningBook::empty()));
        assert_eq!(ai.name(), "AI (depth 2)");
        ai.set_depth(3).unwrap();
        assert_eq!(ai.depth(), 3);
        assert_eq!(Player::<ChessBoard>::name(&ai), "AI (depth 3)");
        assert!(ai.set_depth(0).is_err());
        assert_eq!(ai.depth(), 3);
    }

    #[test]
    fn test_parallel_matches_sequential_score() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let mut board = ChessBoard::from_fen(fen).unwrap();
        let moves = board.legal_moves();

        let mut sequential = NegamaxPlayer::with_book(config(3), Arc::new(OpeningBook::empty()));
        sequential.find_best_move(&mut board, &moves);

        let mut parallel_config = config(3);
        parallel_config.parallel_root = true;
        let mut parallel = NegamaxPlayer::with_book(parallel_config, Arc::new(OpeningBook::empty()));
        parallel.find_best_move(&mut board, &moves);

        let a = sequential.last_result().unwrap().score;
        let b = parallel.last_result().unwrap().score;
        assert!((a - b).abs() < 1e-9, "sequential {a} vs parallel {b}");
    }
}
