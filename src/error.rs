//! Error types for the engine.
//!
//! The search itself never fails; these cover configuration, FEN input and
//! explicit opening book loads.

/// Errors raised while loading an opening book resource.
#[derive(thiserror::Error, Debug)]
pub enum BookError {
    /// The book file could not be read
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The book contents are not a JSON object of string to string
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("search depth must be at least 1, got {0}")]
    InvalidDepth(u32),

    /// An environment override could not be parsed
    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error(transparent)]
    Book(#[from] BookError),
}

pub type EngineResult<T> = Result<T, EngineError>;
