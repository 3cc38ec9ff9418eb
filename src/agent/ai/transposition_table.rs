use crate::game_repr::{Color, GameState, Move, Square, Type};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Zobrist hashing constants for chess positions
///
/// One random 64-bit number per piece/colour/square, per castling right,
/// per en-passant file and for Black to move. A position's hash is the XOR of
/// the numbers for every feature present.
pub struct ZobristKeys {
    /// [piece_type][color][square]
    pub pieces: [[[u64; 64]; 2]; 6],
    /// K, Q, k, q
    pub castling: [u64; 4],
    /// [file] of the en-passant target
    pub en_passant: [u64; 8],
    /// Toggled when Black is to move
    pub side_to_move: u64,
}

impl ZobristKeys {
    /// Keys come from a fixed seed so hashes are stable across runs.
    fn generate() -> Self {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x517cc1b727220a95);

        let mut pieces = [[[0u64; 64]; 2]; 6];
        for piece_type in &mut pieces {
            for color in piece_type {
                for square in color {
                    *square = rng.gen();
                }
            }
        }

        let mut castling = [0u64; 4];
        for castle in &mut castling {
            *castle = rng.gen();
        }

        let mut en_passant = [0u64; 8];
        for ep in &mut en_passant {
            *ep = rng.gen();
        }

        Self {
            pieces,
            castling,
            en_passant,
            side_to_move: rng.gen(),
        }
    }

    #[inline]
    fn piece_index(piece_type: Type) -> usize {
        match piece_type {
            Type::Pawn => 0,
            Type::Knight => 1,
            Type::Bishop => 2,
            Type::Rook => 3,
            Type::Queen => 4,
            Type::King => 5,
        }
    }

    #[inline]
    fn color_index(color: Color) -> usize {
        match color {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::generate);

/// From-scratch Zobrist hash of any [`GameState`].
///
/// Used when the collaborator has no incremental hash of its own. Covers
/// placement, castling rights, en-passant file and side to move. Move clocks
/// are not hashed.
pub fn compute_hash<S: GameState + ?Sized>(state: &S) -> u64 {
    let mut hash = 0u64;

    for square in Square::all() {
        if let Some(piece) = state.piece_at(square) {
            let piece_idx = ZobristKeys::piece_index(piece.piece_type);
            let color_idx = ZobristKeys::color_index(piece.color);
            hash ^= ZOBRIST.pieces[piece_idx][color_idx][square.index()];
        }
    }

    if let Some(rights) = state.castling_rights() {
        for c in rights.chars() {
            let idx = match c {
                'K' => 0,
                'Q' => 1,
                'k' => 2,
                'q' => 3,
                _ => continue,
            };
            hash ^= ZOBRIST.castling[idx];
        }
    }

    if let Some(target) = state.en_passant_target() {
        hash ^= ZOBRIST.en_passant[target.col()];
    }

    if state.side_to_move() == Color::Black {
        hash ^= ZOBRIST.side_to_move;
    }

    hash
}

/// Node type for transposition table entries
///
/// - Exact: the score is the node's value
/// - LowerBound: a beta cutoff happened, the value is at least the score
/// - UpperBound: every move failed low, the value is at most the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Exact,
    LowerBound,
    UpperBound,
}

impl NodeType {
    /// Bound type of a finished node searched with window (`alpha`, `beta`).
    pub fn classify(score: f64, alpha: f64, beta: f64) -> Self {
        if score <= alpha {
            NodeType::UpperBound
        } else if score >= beta {
            NodeType::LowerBound
        } else {
            NodeType::Exact
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TranspositionTableEntry {
    /// Full hash, checked on probe so slot collisions read as misses
    pub hash: u64,
    /// Remaining depth the score was computed at
    pub depth: u8,
    /// Score relative to the side to move at this node
    pub score: f64,
    pub best_move: Option<Move>,
    pub node_type: NodeType,
}

/// Outcome of [`TranspositionTable::probe`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeResult {
    /// The stored result settles the node
    Cutoff(f64),
    /// Keep searching with a possibly narrowed window
    Continue {
        alpha: f64,
        beta: f64,
        hash_move: Option<Move>,
    },
}

/// What to do when a store lands on an occupied slot.
///
/// Never changes search results, only which cutoffs are available later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplacementPolicy {
    /// Newest result always wins
    AlwaysReplace,
    /// Keep a deeper occupant; the same position may always be refreshed
    #[default]
    DepthPreferred,
}

impl ReplacementPolicy {
    fn should_replace(&self, existing: &TranspositionTableEntry, incoming: &TranspositionTableEntry) -> bool {
        match self {
            ReplacementPolicy::AlwaysReplace => true,
            ReplacementPolicy::DepthPreferred => {
                existing.hash == incoming.hash || incoming.depth >= existing.depth
            }
        }
    }
}

/// Cache of earlier search results keyed by position hash.
///
/// Bounded tables map a hash to `hash % capacity` slots; unbounded tables key
/// directly by hash and grow for the life of the table. Slots are allocated
/// lazily either way.
pub struct TranspositionTable {
    table: HashMap<u64, TranspositionTableEntry>,
    capacity: Option<usize>,
    policy: ReplacementPolicy,
    enabled: bool,
    /// Statistics: probes that found the position
    pub hits: u64,
    /// Statistics: probes that did not
    pub misses: u64,
    /// Statistics: probes that settled the node outright
    pub cutoffs: u64,
}

impl TranspositionTable {
    /// Bounded table with the given slot count.
    pub fn with_capacity(capacity: usize, policy: ReplacementPolicy) -> Self {
        Self::build(Some(capacity.max(1)), policy, true)
    }

    /// Table with no capacity bound; every store overwrites.
    pub fn unbounded() -> Self {
        Self::build(None, ReplacementPolicy::AlwaysReplace, true)
    }

    /// Table that never stores and never hits.
    pub fn disabled() -> Self {
        Self::build(Some(1), ReplacementPolicy::AlwaysReplace, false)
    }

    /// Table matching an engine configuration.
    pub fn from_config(config: &crate::config::EngineConfig) -> Self {
        if !config.use_transposition_table {
            return Self::disabled();
        }
        match config.tt_capacity {
            Some(capacity) => Self::with_capacity(capacity, config.replacement),
            None => Self::build(None, config.replacement, true),
        }
    }

    fn build(capacity: Option<usize>, policy: ReplacementPolicy, enabled: bool) -> Self {
        Self {
            table: HashMap::with_capacity(capacity.unwrap_or(0).min(100_000)),
            capacity,
            policy,
            enabled,
            hits: 0,
            misses: 0,
            cutoffs: 0,
        }
    }

    #[inline]
    fn slot(&self, hash: u64) -> u64 {
        match self.capacity {
            Some(capacity) => hash % capacity as u64,
            None => hash,
        }
    }

    /// Raw lookup of the entry for `hash`.
    pub fn get(&self, hash: u64) -> Option<&TranspositionTableEntry> {
        if !self.enabled {
            return None;
        }
        self.table
            .get(&self.slot(hash))
            .filter(|entry| entry.hash == hash)
    }

    /// Consults the table for a node at remaining `depth` with window
    /// (`alpha`, `beta`).
    ///
    /// Entries computed shallower than `depth` cannot answer the query but
    /// still offer their best move for ordering.
    pub fn probe(&mut self, hash: u64, depth: u8, mut alpha: f64, mut beta: f64) -> ProbeResult {
        let entry = match self.get(hash) {
            Some(entry) => *entry,
            None => {
                self.misses += 1;
                return ProbeResult::Continue {
                    alpha,
                    beta,
                    hash_move: None,
                };
            }
        };
        self.hits += 1;

        if entry.depth >= depth {
            match entry.node_type {
                NodeType::Exact => {
                    self.cutoffs += 1;
                    return ProbeResult::Cutoff(entry.score);
                }
                NodeType::LowerBound => alpha = alpha.max(entry.score),
                NodeType::UpperBound => beta = beta.min(entry.score),
            }
            if alpha >= beta {
                self.cutoffs += 1;
                return ProbeResult::Cutoff(entry.score);
            }
        }

        ProbeResult::Continue {
            alpha,
            beta,
            hash_move: entry.best_move,
        }
    }

    /// Records a finished node, subject to the replacement policy.
    pub fn store(&mut self, entry: TranspositionTableEntry) {
        if !self.enabled {
            return;
        }
        let slot = self.slot(entry.hash);
        if let Some(existing) = self.table.get(&slot) {
            if !self.policy.should_replace(existing, &entry) {
                return;
            }
        }
        self.table.insert(slot, entry);
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.misses = 0;
        self.cutoffs = 0;
    }

    pub fn size(&self) -> usize {
        self.table.len()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::from_config(&crate::config::EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_repr::{ChessBoard, STARTING_FEN};

    fn entry(hash: u64, depth: u8, score: f64, node_type: NodeType) -> TranspositionTableEntry {
        TranspositionTableEntry {
            hash,
            depth,
            score,
            best_move: Some(Move::new(Square::new(6, 4), Square::new(4, 4))),
            node_type,
        }
    }

    #[test]
    fn test_zobrist_hash_is_stable() {
        let pos = ChessBoard::new();
        let hash1 = compute_hash(&pos);
        let hash2 = compute_hash(&pos);
        assert_eq!(hash1, hash2);
        assert_ne!(hash1, 0);
    }

    #[test]
    fn test_zobrist_hash_side_to_move() {
        let white = ChessBoard::from_fen(STARTING_FEN).unwrap();
        let black = ChessBoard::from_fen(&STARTING_FEN.replace(" w ", " b ")).unwrap();
        assert_eq!(compute_hash(&white) ^ compute_hash(&black), ZOBRIST.side_to_move);
    }

    #[test]
    fn test_zobrist_hash_ignores_clocks() {
        let early = ChessBoard::from_fen(STARTING_FEN).unwrap();
        let late = ChessBoard::from_fen(&STARTING_FEN.replace(" 0 1", " 9 30")).unwrap();
        assert_eq!(compute_hash(&early), compute_hash(&late));
    }

    #[test]
    fn test_exact_entry_cuts_off() {
        let mut table = TranspositionTable::unbounded();
        table.store(entry(7, 3, 1.5, NodeType::Exact));
        assert_eq!(table.probe(7, 3, -10.0, 10.0), ProbeResult::Cutoff(1.5));
        assert_eq!(table.probe(7, 2, -10.0, 10.0), ProbeResult::Cutoff(1.5));
        assert_eq!(table.cutoffs, 2);
    }

    #[test]
    fn test_shallow_entry_only_offers_move() {
        let mut table = TranspositionTable::unbounded();
        table.store(entry(7, 1, 1.5, NodeType::Exact));
        match table.probe(7, 3, -10.0, 10.0) {
            ProbeResult::Continue { alpha, beta, hash_move } => {
                assert_eq!((alpha, beta), (-10.0, 10.0));
                assert_eq!(hash_move.unwrap().to_string(), "e2e4");
            }
            other => panic!("expected no cutoff, got {other:?}"),
        }
    }

    #[test]
    fn test_lower_bound_raises_alpha() {
        let mut table = TranspositionTable::unbounded();
        table.store(entry(7, 2, 2.0, NodeType::LowerBound));
        match table.probe(7, 2, -10.0, 10.0) {
            ProbeResult::Continue { alpha, beta, .. } => assert_eq!((alpha, beta), (2.0, 10.0)),
            other => panic!("expected no cutoff, got {other:?}"),
        }
        // value at least 2.0 against beta 1.0 fails high
        assert_eq!(table.probe(7, 2, -10.0, 1.0), ProbeResult::Cutoff(2.0));
    }

    #[test]
    fn test_upper_bound_lowers_beta() {
        let mut table = TranspositionTable::unbounded();
        table.store(entry(7, 2, -2.0, NodeType::UpperBound));
        match table.probe(7, 2, -10.0, 10.0) {
            ProbeResult::Continue { alpha, beta, .. } => assert_eq!((alpha, beta), (-10.0, -2.0)),
            other => panic!("expected no cutoff, got {other:?}"),
        }
        assert_eq!(table.probe(7, 2, -1.0, 10.0), ProbeResult::Cutoff(-2.0));
    }

    #[test]
    fn test_classify() {
        assert_eq!(NodeType::classify(-1.0, -1.0, 1.0), NodeType::UpperBound);
        assert_eq!(NodeType::classify(1.0, -1.0, 1.0), NodeType::LowerBound);
        assert_eq!(NodeType::classify(0.0, -1.0, 1.0), NodeType::Exact);
    }

    #[test]
    fn test_bounded_collision_is_a_miss() {
        let mut table = TranspositionTable::with_capacity(4, ReplacementPolicy::AlwaysReplace);
        table.store(entry(1, 3, 1.0, NodeType::Exact));
        // 5 % 4 == 1 lands on the same slot
        assert!(table.get(5).is_none());
        table.store(entry(5, 1, 2.0, NodeType::Exact));
        assert!(table.get(1).is_none());
        assert_eq!(table.get(5).unwrap().score, 2.0);
        assert_eq!(table.size(), 1);
    }

    #[test]
    fn test_depth_preferred_keeps_deeper_entry() {
        let mut table = TranspositionTable::with_capacity(4, ReplacementPolicy::DepthPreferred);
        table.store(entry(1, 3, 1.0, NodeType::Exact));
        table.store(entry(5, 1, 2.0, NodeType::Exact));
        assert_eq!(table.get(1).unwrap().score, 1.0);

        // the same position is always refreshed
        table.store(entry(1, 1, 3.0, NodeType::LowerBound));
        assert_eq!(table.get(1).unwrap().score, 3.0);

        table.store(entry(5, 2, 4.0, NodeType::Exact));
        assert_eq!(table.get(5).unwrap().score, 4.0);
    }

    #[test]
    fn test_disabled_table_never_hits() {
        let mut table = TranspositionTable::disabled();
        table.store(entry(7, 5, 1.0, NodeType::Exact));
        assert_eq!(table.size(), 0);
        assert!(matches!(table.probe(7, 1, -1.0, 1.0), ProbeResult::Continue { .. }));
        assert!(!table.is_enabled());
    }

    #[test]
    fn test_clear_and_hit_rate() {
        let mut table = TranspositionTable::unbounded();
        table.store(entry(123, 5, 1.0, NodeType::Exact));
        table.probe(123, 1, -1.0, 1.0);
        table.probe(456, 1, -1.0, 1.0);
        assert_eq!(table.hit_rate(), 0.5);

        table.clear();
        assert_eq!(table.size(), 0);
        assert_eq!(table.hits, 0);
        assert_eq!(table.misses, 0);
    }
}
