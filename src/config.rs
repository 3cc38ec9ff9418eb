//! Engine configuration.
//!
//! Search depth is the only knob that changes playing strength. The other
//! fields control how the transposition table is sized, whether the root is
//! split across threads, where the opening book comes from, and how the root
//! shuffle is seeded.

use crate::agent::ai::opening_book::BookSource;
use crate::agent::ai::transposition_table::ReplacementPolicy;
use crate::error::{EngineError, EngineResult};
use std::path::PathBuf;

/// Depth used when nothing else is configured.
pub const DEFAULT_DEPTH: u8 = 4;

/// Default number of transposition table slots.
pub const DEFAULT_TT_CAPACITY: usize = 1 << 20;

pub const DEPTH_ENV: &str = "CHESS_AI_DEPTH";
pub const BOOK_ENV: &str = "CHESS_AI_BOOK";
pub const TT_CAPACITY_ENV: &str = "CHESS_AI_TT_CAPACITY";
pub const SEED_ENV: &str = "CHESS_AI_SEED";

/// Preset search depths.
///
/// Search time grows roughly exponentially with depth, so each step up is
/// noticeably slower than the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    /// Depth 2
    Easy,
    /// Depth 3
    Medium,
    /// Depth 4
    #[default]
    Hard,
    /// Depth 5
    Expert,
}

impl Difficulty {
    pub fn depth(&self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
            Difficulty::Expert => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Fixed search depth in plies, at least 1
    pub depth: u8,
    /// Slots in the transposition table; `None` grows without bound
    pub tt_capacity: Option<usize>,
    pub replacement: ReplacementPolicy,
    pub use_transposition_table: bool,
    /// Search root moves on the rayon pool, one table per worker
    pub parallel_root: bool,
    pub book: BookSource,
    /// Seed for the root move shuffle; entropy when `None`
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            tt_capacity: Some(DEFAULT_TT_CAPACITY),
            replacement: ReplacementPolicy::DepthPreferred,
            use_transposition_table: true,
            parallel_root: false,
            book: BookSource::Embedded,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Default configuration at the given depth.
    pub fn new(depth: u32) -> EngineResult<Self> {
        let depth = validate_depth(depth)?;
        Ok(Self {
            depth,
            ..Self::default()
        })
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            depth: difficulty.depth(),
            ..Self::default()
        }
    }

    /// Default configuration overlaid with `CHESS_AI_*` environment variables.
    pub fn from_env() -> EngineResult<Self> {
        Self::default().with_overrides(|var| std::env::var(var).ok())
    }

    /// Applies overrides from an arbitrary key lookup. Kept separate from
    /// [`EngineConfig::from_env`] so tests need not touch the process
    /// environment.
    pub fn with_overrides<F>(mut self, lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(DEPTH_ENV) {
            let depth = raw.trim().parse::<u32>().map_err(|_| EngineError::InvalidEnv {
                var: DEPTH_ENV,
                value: raw.clone(),
            })?;
            self.depth = validate_depth(depth)?;
        }

        if let Some(raw) = lookup(BOOK_ENV) {
            match raw.trim() {
                "" => {}
                "none" => self.book = BookSource::Empty,
                "embedded" => self.book = BookSource::Embedded,
                path => self.book = BookSource::File(PathBuf::from(path)),
            }
        }

        if let Some(raw) = lookup(TT_CAPACITY_ENV) {
            self.tt_capacity = match raw.trim() {
                "0" | "unbounded" => None,
                value => Some(value.parse().map_err(|_| EngineError::InvalidEnv {
                    var: TT_CAPACITY_ENV,
                    value: raw.clone(),
                })?),
            };
        }

        if let Some(raw) = lookup(SEED_ENV) {
            self.seed = Some(raw.trim().parse().map_err(|_| EngineError::InvalidEnv {
                var: SEED_ENV,
                value: raw.clone(),
            })?);
        }

        Ok(self)
    }

    pub fn with_depth(mut self, depth: u32) -> EngineResult<Self> {
        self.depth = validate_depth(depth)?;
        Ok(self)
    }

    pub fn with_book(mut self, book: BookSource) -> Self {
        self.book = book;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn validate_depth(depth: u32) -> EngineResult<u8> {
    match u8::try_from(depth) {
        Ok(d) if d >= 1 => Ok(d),
        _ => Err(EngineError::InvalidDepth(depth)),
    }
}
