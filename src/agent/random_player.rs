use crate::agent::player::Player;
use crate::game_repr::{GameState, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Plays a uniformly random legal move.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Any one of `legal_moves`, or `None` if there are none.
    pub fn choose(&mut self, legal_moves: &[Move]) -> Option<Move> {
        legal_moves.choose(&mut self.rng).copied()
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState + ?Sized> Player<S> for RandomPlayer {
    fn get_move(&mut self, state: &mut S) -> Option<Move> {
        let legal_moves = state.legal_moves();
        self.choose(&legal_moves)
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_repr::ChessBoard;

    #[test]
    fn test_random_moves_are_legal() {
        let mut player = RandomPlayer::seeded(3);
        let mut board = ChessBoard::new();
        for _ in 0..20 {
            let legal = board.legal_moves();
            let Some(mv) = player.get_move(&mut board) else {
                break;
            };
            assert!(legal.iter().any(|m| m.same_promotion(&mv)));
            board.apply(mv);
        }
    }

    #[test]
    fn test_no_moves_no_choice() {
        let mut player = RandomPlayer::seeded(3);
        assert_eq!(player.choose(&[]), None);
    }
}
