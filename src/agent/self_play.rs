//! Drives a game between two players on a shared position.

use crate::agent::player::{GameResult, Player};
use crate::game_repr::{Color, GameState, Move};

/// How a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Checkmate,
    Stalemate,
    /// A player returned no move
    Resignation,
    /// A player returned a move that was not legal; it loses
    IllegalMove(Move),
    PlyLimit,
}

#[derive(Debug, Clone)]
pub struct GameRecord {
    pub moves: Vec<Move>,
    pub result: GameResult,
    pub termination: Termination,
}

impl GameRecord {
    pub fn plies(&self) -> usize {
        self.moves.len()
    }
}

/// Play from `state` until checkmate, stalemate, a player gives up or
/// `max_plies` moves have been made. `state` is left at the final position.
pub fn play_game<S, W, B>(white: &mut W, black: &mut B, state: &mut S, max_plies: usize) -> GameRecord
where
    S: GameState + ?Sized,
    W: Player<S> + ?Sized,
    B: Player<S> + ?Sized,
{
    let mut moves = Vec::new();

    let (result, termination) = loop {
        let to_move = state.side_to_move();

        if state.is_checkmate() {
            break (GameResult::from_winner(to_move.opposite()), Termination::Checkmate);
        }
        if state.is_stalemate() {
            break (GameResult::Draw, Termination::Stalemate);
        }
        if moves.len() >= max_plies {
            break (GameResult::Unfinished, Termination::PlyLimit);
        }

        let mv = match to_move {
            Color::White => white.get_move(state),
            Color::Black => black.get_move(state),
        };

        let Some(mv) = mv else {
            log::info!("{:?} resigned after {} plies", to_move, moves.len());
            break (GameResult::from_winner(to_move.opposite()), Termination::Resignation);
        };

        let legal = state.legal_moves().iter().any(|m| m.same_promotion(&mv));
        if !legal {
            log::warn!("{:?} played illegal move {} after {} plies", to_move, mv, moves.len());
            break (GameResult::from_winner(to_move.opposite()), Termination::IllegalMove(mv));
        }

        log::debug!("ply {}: {:?} plays {}", moves.len() + 1, to_move, mv);
        state.apply(mv);
        moves.push(mv);

        match to_move {
            Color::White => black.opponent_moved(mv),
            Color::Black => white.opponent_moved(mv),
        }
    };

    log::info!(
        "Game over after {} plies: {:?} ({:?})",
        moves.len(),
        result,
        termination
    );
    white.game_ended(result);
    black.game_ended(result);

    GameRecord {
        moves,
        result,
        termination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ai::notation::{parse_notation, resolve_notation};
    use crate::agent::random_player::RandomPlayer;
    use crate::game_repr::ChessBoard;

    /// Plays a fixed list of moves, then resigns.
    struct Scripted(Vec<&'static str>);

    impl Player<ChessBoard> for Scripted {
        fn get_move(&mut self, state: &mut ChessBoard) -> Option<Move> {
            if self.0.is_empty() {
                return None;
            }
            let notation = self.0.remove(0);
            resolve_notation(notation, &state.legal_moves()).or_else(|| parse_notation(notation))
        }
    }

    #[test]
    fn test_fools_mate() {
        let mut white = Scripted(vec!["f2f3", "g2g4"]);
        let mut black = Scripted(vec!["e7e5", "d8h4"]);
        let mut board = ChessBoard::new();
        let record = play_game(&mut white, &mut black, &mut board, 100);
        assert_eq!(record.result, GameResult::BlackWins);
        assert_eq!(record.termination, Termination::Checkmate);
        assert_eq!(record.plies(), 4);
    }

    #[test]
    fn test_resignation() {
        let mut white = Scripted(vec!["e2e4"]);
        let mut black = Scripted(vec![]);
        let mut board = ChessBoard::new();
        let record = play_game(&mut white, &mut black, &mut board, 100);
        assert_eq!(record.result, GameResult::WhiteWins);
        assert_eq!(record.termination, Termination::Resignation);
        assert_eq!(record.plies(), 1);
    }

    #[test]
    fn test_illegal_move_forfeits() {
        let mut white = Scripted(vec!["e2e5"]);
        let mut black = Scripted(vec![]);
        let mut board = ChessBoard::new();
        let record = play_game(&mut white, &mut black, &mut board, 100);
        assert_eq!(record.result, GameResult::BlackWins);
        assert!(matches!(record.termination, Termination::IllegalMove(_)));
        assert_eq!(record.plies(), 0);
    }

    #[test]
    fn test_ply_limit() {
        let mut white = RandomPlayer::seeded(1);
        let mut black = RandomPlayer::seeded(2);
        let mut board = ChessBoard::new();
        let record = play_game(&mut white, &mut black, &mut board, 6);
        assert!(record.plies() <= 6);
        if record.plies() == 6 {
            assert_eq!(record.result, GameResult::Unfinished);
        }
    }
}
