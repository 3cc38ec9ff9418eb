// Whole games between the engine and other players

use chess_ai::agent::ai::{BookSource, NegamaxPlayer, OpeningBook};
use chess_ai::agent::{play_game, GameResult, Player, RandomPlayer, Termination};
use chess_ai::config::EngineConfig;
use chess_ai::game_repr::{ChessBoard, GameState};
use std::sync::Arc;
use std::time::Instant;

fn engine(depth: u32, seed: u64) -> NegamaxPlayer {
    let config = EngineConfig::new(depth)
        .unwrap()
        .with_book(BookSource::Empty)
        .with_seed(seed);
    NegamaxPlayer::with_book(config, Arc::new(OpeningBook::empty()))
}

/// Replays `moves` from the start, checking each against the legal set.
fn assert_all_legal(moves: &[chess_ai::Move]) {
    let mut board = ChessBoard::new();
    for (ply, mv) in moves.iter().enumerate() {
        let legal = board.legal_moves();
        assert!(
            legal.iter().any(|m| m.same_promotion(mv)),
            "ply {}: {} is not legal",
            ply + 1,
            mv
        );
        board.apply(*mv);
    }
}

#[test]
fn test_engine_makes_legal_moves() {
    let mut ai = engine(2, 1);
    let mut board = ChessBoard::new();

    for _ in 0..10 {
        let legal_moves = board.legal_moves();
        if legal_moves.is_empty() {
            break;
        }
        let mv = ai.get_move(&mut board);
        assert!(mv.is_some(), "engine should return a move when legal moves exist");
        let chosen = mv.unwrap();
        assert!(legal_moves.contains(&chosen), "engine chose illegal move: {}", chosen);
        board.apply(chosen);
    }
}

#[test]
fn test_engine_vs_random() {
    for game in 0..3 {
        let mut ai = engine(2, game);
        let mut random = RandomPlayer::seeded(100 + game);
        let mut board = ChessBoard::new();

        let start = Instant::now();
        let record = play_game(&mut ai, &mut random, &mut board, 120);
        println!(
            "game {}: {:?} ({:?}) in {} plies, {:.2}s",
            game,
            record.result,
            record.termination,
            record.plies(),
            start.elapsed().as_secs_f64()
        );

        assert!(!matches!(record.termination, Termination::IllegalMove(_)));
        assert_all_legal(&record.moves);
        assert_ne!(record.result, GameResult::BlackWins, "random mover beat the engine");
    }
}

#[test]
fn test_engine_self_play_from_book() {
    let config = EngineConfig::new(1).unwrap().with_seed(4);
    let book = Arc::new(OpeningBook::load_or_empty(&BookSource::Embedded));
    let mut white = NegamaxPlayer::with_book(config.clone(), book.clone());
    let mut black = NegamaxPlayer::with_book(config, book);
    let mut board = ChessBoard::new();

    let record = play_game(&mut white, &mut black, &mut board, 16);
    assert_all_legal(&record.moves);
    assert_eq!(record.moves[0].to_string(), "e2e4");
    assert_eq!(record.moves[1].to_string(), "e7e5");
    assert_eq!(board.ply(), record.plies());
}

#[test]
fn test_engine_takes_free_material_for_black() {
    // the h1 rook is undefended and on the queen's file
    let mut ai = engine(2, 7);
    let mut board = ChessBoard::from_fen("4k2q/8/8/8/8/8/8/3K3R b - - 0 1").unwrap();
    let mv = ai.get_move(&mut board).unwrap();
    assert_eq!(mv.to_string(), "h8h1");
}
