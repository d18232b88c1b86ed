//! Separate-chaining hash table from word to [`OccurrenceList`].
//!
//! Word entries live in an arena and chains link them by arena index, so a
//! rehash relinks the existing entries into a fresh bucket array without
//! moving or copying any of them. The table doubles whenever the number of
//! distinct words reaches the bucket count.

use crate::occurrence::OccurrenceList;
use crate::{DedupPolicy, IndexConfig, SearchIndex, Title, DEFAULT_INITIAL_CAPACITY};
use rustc_hash::FxHasher;
use serde::Serialize;
use std::hash::{Hash, Hasher};
use tracing::debug;

type EntryId = usize;

struct WordEntry {
    word: Box<str>,
    occurrences: OccurrenceList,
    next: Option<EntryId>,
}

/// Bucket for `word` in a table of `capacity` buckets.
///
/// The raw hash is read as a signed value, so the reduction keeps the result
/// in `[0, capacity)` whatever its sign.
pub fn bucket_index(word: &str, capacity: usize) -> usize {
    let mut hasher = FxHasher::default();
    word.hash(&mut hasher);
    let h = hasher.finish() as i64;
    let n = capacity.max(1) as i64;
    (((h % n) + n) % n) as usize
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub capacity: usize,
    pub distinct_words: usize,
    /// Buckets holding at least one word.
    pub occupied_buckets: usize,
    /// Words sharing a bucket with an earlier word.
    pub collisions: usize,
    pub longest_chain: usize,
    pub total_occurrences: usize,
    pub rehashes: usize,
    pub load_factor: f64,
}

pub struct GrowableHashIndex {
    buckets: Vec<Option<EntryId>>,
    entries: Vec<WordEntry>,
    dedup: DedupPolicy,
    rehashes: usize,
}

impl Default for GrowableHashIndex {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }
}

impl GrowableHashIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty table with `capacity` buckets (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: vec![None; capacity.max(1)],
            entries: Vec::new(),
            dedup: DedupPolicy::default(),
            rehashes: 0,
        }
    }

    pub fn with_config(config: &IndexConfig) -> Self {
        let mut index = Self::with_capacity(config.initial_capacity);
        index.dedup = config.dedup;
        index
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn rehash_count(&self) -> usize {
        self.rehashes
    }

    pub fn dedup_policy(&self) -> DedupPolicy {
        self.dedup
    }

    fn chain(&self, head: Option<EntryId>) -> Chain<'_> {
        Chain { entries: &self.entries, next: head }
    }

    fn find(&self, word: &str) -> Option<&WordEntry> {
        let slot = bucket_index(word, self.capacity());
        self.chain(self.buckets[slot]).find(|e| &*e.word == word)
    }

    /// Double the bucket array and relink every entry under the new capacity.
    fn rehash(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity * 2;
        let mut buckets: Vec<Option<EntryId>> = vec![None; new_capacity];
        for head in std::mem::take(&mut self.buckets) {
            let mut cur = head;
            while let Some(id) = cur {
                let entry = &mut self.entries[id];
                cur = entry.next;
                let slot = bucket_index(&entry.word, new_capacity);
                entry.next = buckets[slot];
                buckets[slot] = Some(id);
            }
        }
        self.buckets = buckets;
        self.rehashes += 1;
        debug!(old_capacity, new_capacity, distinct_words = self.entries.len(), "rehashed index");
    }

    /// Length of every bucket's chain, in bucket order.
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.buckets.iter().map(|head| self.chain(*head).count()).collect()
    }

    pub fn stats(&self) -> IndexStats {
        let lengths = self.chain_lengths();
        let occupied_buckets = lengths.iter().filter(|&&l| l > 0).count();
        let distinct_words = self.entries.len();
        IndexStats {
            capacity: self.capacity(),
            distinct_words,
            occupied_buckets,
            collisions: distinct_words - occupied_buckets,
            longest_chain: lengths.into_iter().max().unwrap_or(0),
            total_occurrences: self.entries.iter().map(|e| e.occurrences.len()).sum(),
            rehashes: self.rehashes,
            load_factor: distinct_words as f64 / self.capacity() as f64,
        }
    }
}

impl SearchIndex for GrowableHashIndex {
    fn insert(&mut self, word: &str, title: &Title) {
        let slot = bucket_index(word, self.capacity());
        let mut cur = self.buckets[slot];
        while let Some(id) = cur {
            let entry = &mut self.entries[id];
            if &*entry.word == word {
                entry.occurrences.record(title, self.dedup);
                return;
            }
            cur = entry.next;
        }

        let id = self.entries.len();
        self.entries.push(WordEntry {
            word: word.into(),
            occurrences: OccurrenceList::with_title(title),
            next: self.buckets[slot],
        });
        self.buckets[slot] = Some(id);

        if self.entries.len() >= self.capacity() {
            self.rehash();
        }
    }

    fn search(&self, word: &str) -> Option<&OccurrenceList> {
        self.find(word).map(|e| &e.occurrences)
    }

    fn distinct_words(&self) -> Box<dyn Iterator<Item = (&str, &OccurrenceList)> + '_> {
        Box::new(
            self.buckets
                .iter()
                .flat_map(move |head| self.chain(*head))
                .map(|e| (&*e.word, &e.occurrences)),
        )
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

struct Chain<'a> {
    entries: &'a [WordEntry],
    next: Option<EntryId>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a WordEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = &self.entries[self.next?];
        self.next = entry.next;
        Some(entry)
    }
}
