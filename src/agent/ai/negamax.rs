// Negamax Search with Alpha-Beta Pruning
//
// Negamax relies on value(node) = -value(child): every score is relative to
// the side to move, so one function serves both players. Leaves convert the
// White-relative static evaluation by the mover's sign.
//
// Every node consults the transposition table first. Interior nodes search
// the table's suggested move first, then the rest in the order given. Alpha
// rises with the best score seen; once alpha >= beta the remaining moves
// cannot change what the parent will accept and are skipped. Every apply is
// undone before the node returns.

use crate::game_repr::{Color, GameState, Move, MoveList};
use super::evaluation::{evaluate, CHECKMATE_SCORE};
use super::transposition_table::{NodeType, ProbeResult, TranspositionTable, TranspositionTableEntry};

/// Lower edge of the root search window.
pub const MIN_SCORE: f64 = -CHECKMATE_SCORE;

/// Upper edge of the root search window.
pub const MAX_SCORE: f64 = CHECKMATE_SCORE;

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Calls into the recursive search
    pub nodes: u64,
    /// Static evaluations at depth 0 or at terminal nodes
    pub leaf_evaluations: u64,
    /// Nodes settled by the transposition table
    pub tt_cutoffs: u64,
    /// Nodes that stopped early because alpha reached beta
    pub beta_cutoffs: u64,
}

impl SearchStats {
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.leaf_evaluations += other.leaf_evaluations;
        self.tt_cutoffs += other.tt_cutoffs;
        self.beta_cutoffs += other.beta_cutoffs;
    }
}

/// Recursive negamax step.
///
/// # Arguments
///
/// * `state` - Position after the moves leading here (applied and undone in place)
/// * `legal_moves` - Legal moves for the side to move at this node
/// * `depth` - Remaining plies; 0 evaluates statically
/// * `alpha` / `beta` - Search window
/// * `color` - Side to move; its sign is the negamax side multiplier
///
/// # Returns
///
/// Score from the perspective of `color`.
#[allow(clippy::too_many_arguments)]
pub fn negamax<S: GameState + ?Sized>(
    state: &mut S,
    mut legal_moves: MoveList,
    depth: u8,
    alpha: f64,
    beta: f64,
    color: Color,
    tt: &mut TranspositionTable,
    stats: &mut SearchStats,
) -> f64 {
    stats.nodes += 1;

    let hash = state.position_hash();
    let (original_alpha, original_beta) = (alpha, beta);

    let (alpha, beta, hash_move) = match tt.probe(hash, depth, alpha, beta) {
        ProbeResult::Cutoff(score) => {
            stats.tt_cutoffs += 1;
            return score;
        }
        ProbeResult::Continue {
            alpha,
            beta,
            hash_move,
        } => (alpha, beta, hash_move),
    };

    if depth == 0 {
        stats.leaf_evaluations += 1;
        return evaluate(state) * color.sign();
    }

    if legal_moves.is_empty() {
        // mate or stalemate below the horizon
        stats.leaf_evaluations += 1;
        let score = evaluate(state) * color.sign();
        tt.store(TranspositionTableEntry {
            hash,
            depth,
            score,
            best_move: None,
            node_type: NodeType::Exact,
        });
        return score;
    }

    if let Some(hash_move) = hash_move {
        if let Some(pos) = legal_moves.iter().position(|mv| *mv == hash_move) {
            let mv = legal_moves.remove(pos);
            legal_moves.insert(0, mv);
        }
    }

    let (best_score, best_move) =
        search_moves(state, &legal_moves, depth, alpha, beta, color, tt, stats);

    tt.store(TranspositionTableEntry {
        hash,
        depth,
        score: best_score,
        best_move,
        node_type: NodeType::classify(best_score, original_alpha, original_beta),
    });

    best_score
}

/// Searches `moves` in order below a node and returns the best score with
/// the move that produced it.
///
/// The running maximum starts below every reachable score, so a non-empty
/// move list always yields a move.
#[allow(clippy::too_many_arguments)]
pub(crate) fn search_moves<S: GameState + ?Sized>(
    state: &mut S,
    moves: &[Move],
    depth: u8,
    mut alpha: f64,
    beta: f64,
    color: Color,
    tt: &mut TranspositionTable,
    stats: &mut SearchStats,
) -> (f64, Option<Move>) {
    let mut best_score = f64::NEG_INFINITY;
    let mut best_move = None;

    for &mv in moves {
        state.apply(mv);
        let child_moves = state.legal_moves();
        let score = -negamax(
            state,
            child_moves,
            depth - 1,
            -beta,
            -alpha,
            color.opposite(),
            tt,
            stats,
        );
        state.undo();

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }

        if best_score > alpha {
            alpha = best_score;
        }
        if alpha >= beta {
            stats.beta_cutoffs += 1;
            break;
        }
    }

    (best_score, best_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_repr::ChessBoard;

    fn search(fen: &str, depth: u8, tt: &mut TranspositionTable) -> (f64, SearchStats) {
        let mut pos = ChessBoard::from_fen(fen).unwrap();
        let moves = pos.legal_moves();
        let color = pos.side_to_move();
        let mut stats = SearchStats::default();
        let score = negamax(&mut pos, moves, depth, MIN_SCORE, MAX_SCORE, color, tt, &mut stats);
        (score, stats)
    }

    #[test]
    fn test_depth_zero_is_mover_relative_evaluation() {
        let fen = "4k3/8/8/3q4/8/8/8/4K3 w - - 0 1";
        let pos = ChessBoard::from_fen(fen).unwrap();
        let static_eval = evaluate(&pos);
        let (score, stats) = search(fen, 0, &mut TranspositionTable::disabled());
        assert_eq!(score, static_eval);
        assert!(score < -8.0, "White is down a queen: {score}");
        assert_eq!(stats.nodes, 1);

        let black_fen = "4k3/8/8/3q4/8/8/8/4K3 b - - 0 1";
        let (score, _) = search(black_fen, 0, &mut TranspositionTable::disabled());
        assert!(score > 8.0, "Black is up a queen: {score}");
    }

    #[test]
    fn test_mated_side_scores_minus_checkmate() {
        // fool's mate, White to move and mated
        let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
        let (score, _) = search(fen, 2, &mut TranspositionTable::unbounded());
        assert_eq!(score, -CHECKMATE_SCORE);
    }

    #[test]
    fn test_stalemate_scores_zero() {
        let fen = "7k/8/6Q1/8/8/8/8/K7 b - - 0 1";
        let (score, _) = search(fen, 2, &mut TranspositionTable::unbounded());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_finds_back_rank_mate() {
        let fen = "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1";
        for depth in 1..=3 {
            let (score, _) = search(fen, depth, &mut TranspositionTable::unbounded());
            assert_eq!(score, CHECKMATE_SCORE, "depth {depth}");
        }
    }

    #[test]
    fn test_pruning_skips_work() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let (_, stats) = search(fen, 3, &mut TranspositionTable::disabled());
        assert!(stats.beta_cutoffs > 0);
    }

    #[test]
    fn test_second_search_hits_table() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let mut tt = TranspositionTable::unbounded();
        let (first, first_stats) = search(fen, 2, &mut tt);
        assert!(tt.size() > 0);

        let (second, second_stats) = search(fen, 2, &mut tt);
        assert_eq!(first, second);
        assert_eq!(second_stats.nodes, 1, "root entry should settle the search");
        assert!(second_stats.nodes < first_stats.nodes);
    }

    #[test]
    fn test_stats_merge() {
        let mut total = SearchStats::default();
        let part = SearchStats {
            nodes: 3,
            leaf_evaluations: 2,
            tt_cutoffs: 1,
            beta_cutoffs: 1,
        };
        total.merge(&part);
        total.merge(&part);
        assert_eq!(total.nodes, 6);
        assert_eq!(total.beta_cutoffs, 2);
    }
}
