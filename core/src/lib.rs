//! In-memory inverted index over a delimited token corpus.
//!
//! The corpus is a flat stream of whitespace separated tokens. Documents are
//! separated by [`DELIMITER`] and the token following a delimiter, minus its
//! trailing punctuation character, is the document title. Building an index
//! records, for every word, the titles of the documents it occurs in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

pub mod builder;
pub mod chain_index;
pub mod error;
pub mod hash_index;
pub mod occurrence;
pub mod tokenizer;
pub mod verify;

pub use builder::{build_from_path, build_from_reader, build_from_tokens, StreamingIndexBuilder};
pub use chain_index::ChainIndex;
pub use error::{IndexError, Result};
pub use hash_index::{GrowableHashIndex, IndexStats};
pub use occurrence::OccurrenceList;

/// Reserved token marking a document boundary.
pub const DELIMITER: &str = "---END.OF.DOCUMENT---";

/// Starting bucket count of a [`GrowableHashIndex`] built with the default config.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1_000;

/// Document title, shared by every occurrence entry that refers to the document.
pub type Title = Arc<str>;

/// How a word's occurrence list rejects a repeated title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// Compare against the most recent title only.
    #[default]
    Adjacent,
    /// Compare against every title already in the list.
    FullList,
}

impl FromStr for DedupPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "adjacent" => Ok(DedupPolicy::Adjacent),
            "full_list" | "full-list" => Ok(DedupPolicy::FullList),
            other => Err(format!("unknown dedup policy '{other}' (expected adjacent or full-list)")),
        }
    }
}

impl fmt::Display for DedupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DedupPolicy::Adjacent => f.write_str("adjacent"),
            DedupPolicy::FullList => f.write_str("full-list"),
        }
    }
}

/// Knobs shared by every index backend and the streaming builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub initial_capacity: usize,
    pub delimiter: String,
    pub dedup: DedupPolicy,
    /// Insert title tokens as words of their own document.
    pub index_titles: bool,
    /// Insert the delimiter token as a literal word.
    pub index_delimiter: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            delimiter: DELIMITER.to_string(),
            dedup: DedupPolicy::default(),
            index_titles: true,
            index_delimiter: true,
        }
    }
}

impl IndexConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| IndexError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = serde_json::from_str(&raw)?;
        Ok(cfg)
    }
}

/// Capability shared by the production hash index and the baseline backends.
pub trait SearchIndex {
    /// Record that `word` occurred in the document titled `title`.
    fn insert(&mut self, word: &str, title: &Title);

    /// Occurrence list for `word`, most recently inserted title first.
    fn search(&self, word: &str) -> Option<&OccurrenceList>;

    /// Every distinct word with its occurrence list, in no particular order.
    fn distinct_words(&self) -> Box<dyn Iterator<Item = (&str, &OccurrenceList)> + '_>;

    /// Number of distinct words.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Titles for `word` as owned strings; empty when the word was never seen.
    fn search_titles(&self, word: &str) -> Vec<String> {
        self.search(word)
            .map(|list| list.iter().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
