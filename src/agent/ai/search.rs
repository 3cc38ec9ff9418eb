// Root search
//
// A move request first looks the position up in the opening book. A book
// reply that resolves to a legal move is returned without searching. On a
// miss the root moves are shuffled (ties between equal scores are broken at
// random) and searched once to the fixed depth with the full
// (-CHECKMATE, +CHECKMATE) window.

use crate::config::EngineConfig;
use crate::game_repr::{GameState, Move};
use super::encoding::encode;
use super::evaluation::evaluate;
use super::negamax::{negamax, search_moves, SearchStats, MAX_SCORE, MIN_SCORE};
use super::notation::resolve_notation;
use super::opening_book::OpeningBook;
use super::transposition_table::{NodeType, TranspositionTable, TranspositionTableEntry};
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use std::time::Instant;

/// Result of a move request
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Score from the mover's perspective; 0 for book moves
    pub score: f64,
    pub depth: u8,
    pub stats: SearchStats,
    pub time_ms: u64,
    pub from_book: bool,
}

impl SearchResult {
    fn from_book(mv: Move, start_time: &Instant) -> Self {
        Self {
            best_move: Some(mv),
            from_book: true,
            time_ms: start_time.elapsed().as_millis() as u64,
            ..Default::default()
        }
    }
}

/// Book reply for the current position, if any resolves to a legal move.
pub fn book_move<S: GameState + ?Sized>(
    state: &S,
    legal_moves: &[Move],
    book: &OpeningBook,
) -> Option<Move> {
    if book.is_empty() {
        return None;
    }
    let encoding = encode(state);
    let notation = book.lookup(&encoding)?;
    match resolve_notation(notation, legal_moves) {
        Some(mv) => {
            log::info!("Book move {} ({})", mv, notation);
            Some(mv)
        }
        None => {
            log::debug!("Book reply {:?} not playable in {}, searching", notation, encoding);
            None
        }
    }
}

/// Searches `moves` at the root in the order given.
///
/// The root never takes a cutoff from the table, so a move is always chosen
/// when `moves` is non-empty. Its result is stored for later requests.
pub fn search_root<S: GameState + ?Sized>(
    state: &mut S,
    moves: &[Move],
    depth: u8,
    tt: &mut TranspositionTable,
    stats: &mut SearchStats,
) -> (f64, Option<Move>) {
    stats.nodes += 1;
    let color = state.side_to_move();

    if moves.is_empty() {
        stats.leaf_evaluations += 1;
        return (evaluate(state) * color.sign(), None);
    }

    let (score, best_move) = search_moves(state, moves, depth, MIN_SCORE, MAX_SCORE, color, tt, stats);

    tt.store(TranspositionTableEntry {
        hash: state.position_hash(),
        depth,
        score,
        best_move,
        node_type: NodeType::classify(score, MIN_SCORE, MAX_SCORE),
    });

    (score, best_move)
}

/// Picks a move for the side to move in `state`.
///
/// # Arguments
/// * `state` - Current position; restored before returning
/// * `legal_moves` - Legal moves in `state`
/// * `depth` - Fixed search depth (at least 1 is searched)
/// * `book` - Opening book consulted before searching
/// * `tt` - Transposition table, kept by the caller across requests
/// * `rng` - Source of the root shuffle
pub fn find_best_move<S, R>(
    state: &mut S,
    legal_moves: &[Move],
    depth: u8,
    book: &OpeningBook,
    tt: &mut TranspositionTable,
    rng: &mut R,
) -> SearchResult
where
    S: GameState + ?Sized,
    R: Rng + ?Sized,
{
    let start_time = Instant::now();

    if let Some(mv) = book_move(state, legal_moves, book) {
        return SearchResult::from_book(mv, &start_time);
    }

    // Ensure we search at least depth 1
    let depth = depth.max(1);

    let mut moves = legal_moves.to_vec();
    moves.shuffle(rng);

    let mut stats = SearchStats::default();
    let (score, best_move) = search_root(state, &moves, depth, tt, &mut stats);

    let result = SearchResult {
        best_move,
        score,
        depth,
        stats,
        time_ms: start_time.elapsed().as_millis() as u64,
        from_book: false,
    };
    log_search_info(&result);
    log::trace!(
        "TT: {} entries, hit rate {:.1}%, {} cutoffs",
        tt.size(),
        tt.hit_rate() * 100.0,
        tt.cutoffs
    );
    result
}

/// Parallel root split: every root move is searched on its own worker with a
/// full window and a private transposition table.
///
/// The best score matches the sequential search. Among equal scores the
/// earliest move in shuffled order wins, so the chosen move may differ.
pub fn find_best_move_parallel<S, R>(
    state: &S,
    legal_moves: &[Move],
    depth: u8,
    book: &OpeningBook,
    config: &EngineConfig,
    rng: &mut R,
) -> SearchResult
where
    S: GameState + Clone + Sync,
    R: Rng + ?Sized,
{
    let start_time = Instant::now();

    if let Some(mv) = book_move(state, legal_moves, book) {
        return SearchResult::from_book(mv, &start_time);
    }

    let depth = depth.max(1);
    let color = state.side_to_move();

    if legal_moves.is_empty() {
        return SearchResult {
            score: evaluate(state) * color.sign(),
            depth,
            stats: SearchStats {
                nodes: 1,
                leaf_evaluations: 1,
                ..Default::default()
            },
            time_ms: start_time.elapsed().as_millis() as u64,
            ..Default::default()
        };
    }

    let mut moves = legal_moves.to_vec();
    moves.shuffle(rng);

    let scored: Vec<(f64, SearchStats)> = moves
        .par_iter()
        .map(|&mv| {
            let mut child = state.clone();
            let mut tt = TranspositionTable::from_config(config);
            let mut stats = SearchStats::default();
            child.apply(mv);
            let child_moves = child.legal_moves();
            let score = -negamax(
                &mut child,
                child_moves,
                depth - 1,
                MIN_SCORE,
                MAX_SCORE,
                color.opposite(),
                &mut tt,
                &mut stats,
            );
            (score, stats)
        })
        .collect();

    let mut stats = SearchStats {
        nodes: 1,
        ..Default::default()
    };
    let mut best_score = f64::NEG_INFINITY;
    let mut best_move = None;
    for (&mv, (score, worker_stats)) in moves.iter().zip(&scored) {
        stats.merge(worker_stats);
        if *score > best_score {
            best_score = *score;
            best_move = Some(mv);
        }
    }

    let result = SearchResult {
        best_move,
        score: best_score,
        depth,
        stats,
        time_ms: start_time.elapsed().as_millis() as u64,
        from_book: false,
    };
    log_search_info(&result);
    result
}

fn log_search_info(result: &SearchResult) {
    let nps = if result.time_ms > 0 {
        (result.stats.nodes as f64 / result.time_ms as f64 * 1000.0) as u64
    } else {
        result.stats.nodes
    };

    log::debug!(
        "depth {} score {:.2} nodes {} leaves {} tt cutoffs {} beta cutoffs {} time {}ms nps {} move {}",
        result.depth,
        result.score,
        result.stats.nodes,
        result.stats.leaf_evaluations,
        result.stats.tt_cutoffs,
        result.stats.beta_cutoffs,
        result.time_ms,
        nps,
        result
            .best_move
            .map(|mv| mv.to_string())
            .unwrap_or_else(|| "none".to_string())
    );
}
