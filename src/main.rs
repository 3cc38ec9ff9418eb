use anyhow::{bail, Context};
use chess_ai::agent::ai::{BookSource, NegamaxPlayer};
use chess_ai::agent::{play_game, Player};
use chess_ai::config::EngineConfig;
use chess_ai::game_repr::{ChessBoard, GameState, STARTING_FEN};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chess_ai")]
#[command(about = "Pick a chess move with a fixed-depth negamax search")]
struct Args {
    /// FEN of the position to search (default: starting position)
    #[arg(short, long)]
    fen: Option<String>,

    /// Search depth in plies (default: CHESS_AI_DEPTH or 4)
    #[arg(short, long)]
    depth: Option<u32>,

    /// Opening book JSON file
    #[arg(short, long, conflicts_with = "no_book")]
    book: Option<PathBuf>,

    /// Search every move, never consult a book
    #[arg(long)]
    no_book: bool,

    /// Seed for the root move shuffle
    #[arg(short, long)]
    seed: Option<u64>,

    /// Split the root moves across threads
    #[arg(short, long)]
    parallel: bool,

    /// Play the engine against itself from the position
    #[arg(long)]
    self_play: bool,

    /// Ply limit for --self-play
    #[arg(long, default_value_t = 200)]
    max_plies: usize,

    /// Log every search
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format_timestamp_millis()
    .init();

    let mut config = EngineConfig::from_env().context("invalid CHESS_AI_* environment")?;
    if let Some(depth) = args.depth {
        config = config.with_depth(depth)?;
    }
    if let Some(path) = args.book {
        config = config.with_book(BookSource::File(path));
    } else if args.no_book {
        config = config.with_book(BookSource::Empty);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.parallel_root = args.parallel;

    let fen = args.fen.as_deref().unwrap_or(STARTING_FEN);
    let mut board = ChessBoard::from_fen(fen)?;

    if args.self_play {
        let mut white = NegamaxPlayer::new(config.clone()).with_name("White");
        let mut black = NegamaxPlayer::new(config).with_name("Black");
        let record = play_game(&mut white, &mut black, &mut board, args.max_plies);

        let moves: Vec<String> = record.moves.iter().map(|mv| mv.to_string()).collect();
        println!("moves {}", moves.join(" "));
        println!("result {:?} ({:?}) after {} plies", record.result, record.termination, record.plies());
        return Ok(());
    }

    let legal_moves = board.legal_moves();
    if legal_moves.is_empty() {
        bail!("no legal moves in {}", fen);
    }

    let mut engine = NegamaxPlayer::new(config);
    let best_move = engine.get_move(&mut board);
    let Some(result) = engine.last_result() else {
        bail!("search produced no result");
    };

    match best_move {
        Some(mv) if result.from_book => println!("bestmove {} (book)", mv),
        Some(mv) => println!(
            "bestmove {} score {:.2} depth {} nodes {} time {}ms",
            mv, result.score, result.depth, result.stats.nodes, result.time_ms
        ),
        None => bail!("no move found"),
    }
    Ok(())
}
