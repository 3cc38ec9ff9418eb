//! Opening book: position encoding to compact move notation.
//!
//! The book is read once and never mutated afterwards. Every load failure
//! (missing file, unreadable JSON, wrong value types) degrades to an empty
//! book with a warning; a missing book only means the engine searches from
//! the first move.
//!
//! Keys are cut down to the first four FEN fields (placement, side to move,
//! castling, en passant) both when loading and when looking up, so move
//! clocks never cause a miss.

use crate::error::BookError;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

static EMBEDDED_BOOK: &str = include_str!("../../../data/openings.json");

static GLOBAL_BOOK: OnceCell<Arc<OpeningBook>> = OnceCell::new();

/// Where to load a book from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BookSource {
    /// The main-line book compiled into the binary
    #[default]
    Embedded,
    /// A JSON object of `{ "<fen>": "<move>" }` on disk
    File(PathBuf),
    /// No book at all
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    entries: HashMap<String, String>,
}

impl OpeningBook {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a JSON object mapping encodings to move notation.
    pub fn from_json_str(json: &str) -> Result<Self, BookError> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(raw.into_iter().collect())
    }

    pub fn from_path(path: &Path) -> Result<Self, BookError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Loads `source`, substituting an empty book on any failure.
    pub fn load_or_empty(source: &BookSource) -> Self {
        let loaded = match source {
            BookSource::Empty => return Self::empty(),
            BookSource::Embedded => Self::from_json_str(EMBEDDED_BOOK),
            BookSource::File(path) => Self::from_path(path),
        };

        match loaded {
            Ok(book) => {
                log::debug!("Loaded opening book from {:?}: {} positions", source, book.len());
                book
            }
            Err(e) => {
                log::warn!("Opening book {:?} unavailable ({}), continuing without it", source, e);
                Self::empty()
            }
        }
    }

    /// The process-wide book. Loads the embedded book on first use unless
    /// [`OpeningBook::init_global`] ran earlier.
    pub fn global() -> Arc<OpeningBook> {
        GLOBAL_BOOK
            .get_or_init(|| Arc::new(Self::load_or_empty(&BookSource::Embedded)))
            .clone()
    }

    /// Chooses the process-wide book. Returns `false` if it was already set,
    /// in which case the existing book is kept.
    pub fn init_global(source: &BookSource) -> bool {
        let mut initialised = false;
        GLOBAL_BOOK.get_or_init(|| {
            initialised = true;
            Arc::new(Self::load_or_empty(source))
        });
        initialised
    }

    pub fn insert(&mut self, encoding: &str, notation: &str) {
        self.entries.insert(book_key(encoding), notation.to_string());
    }

    pub fn lookup(&self, encoding: &str) -> Option<&str> {
        self.entries.get(&book_key(encoding)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for OpeningBook {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut book = Self::empty();
        for (encoding, notation) in iter {
            book.insert(&encoding, &notation);
        }
        book
    }
}

/// Placement, side, castling and en-passant fields of an encoding.
pub fn book_key(encoding: &str) -> String {
    encoding.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}
