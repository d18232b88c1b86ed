use crate::occurrence::OccurrenceList;
use crate::{DedupPolicy, IndexConfig, SearchIndex, Title};

/// Baseline backend: a single unhashed chain of words scanned linearly.
///
/// Every lookup is O(distinct words). It exists to cross-check the hash
/// index on small corpora.
#[derive(Default)]
pub struct ChainIndex {
    words: Vec<(Box<str>, OccurrenceList)>,
    dedup: DedupPolicy,
}

impl ChainIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &IndexConfig) -> Self {
        Self { words: Vec::new(), dedup: config.dedup }
    }

    fn position(&self, word: &str) -> Option<usize> {
        self.words.iter().position(|(w, _)| &**w == word)
    }
}

impl SearchIndex for ChainIndex {
    fn insert(&mut self, word: &str, title: &Title) {
        match self.position(word) {
            Some(i) => {
                self.words[i].1.record(title, self.dedup);
            }
            None => self.words.push((word.into(), OccurrenceList::with_title(title))),
        }
    }

    fn search(&self, word: &str) -> Option<&OccurrenceList> {
        self.position(word).map(|i| &self.words[i].1)
    }

    fn distinct_words(&self) -> Box<dyn Iterator<Item = (&str, &OccurrenceList)> + '_> {
        Box::new(self.words.iter().rev().map(|(w, list)| (&**w, list)))
    }

    fn len(&self) -> usize {
        self.words.len()
    }
}
