//! Cross-check two index backends built from the same corpus.

use crate::SearchIndex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    WordCountDiffers { left: usize, right: usize },
    /// Word present in one backend only. `in_left` tells which.
    MissingWord { word: String, in_left: bool },
    OccurrenceDiffers { word: String, left: Vec<String>, right: Vec<String> },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::WordCountDiffers { left, right } => {
                write!(f, "left has {left} distinct words, right has {right}")
            }
            Mismatch::MissingWord { word, in_left } => {
                let (has, lacks) = if *in_left { ("left", "right") } else { ("right", "left") };
                write!(f, "word {word:?} is in {has} but not in {lacks}")
            }
            Mismatch::OccurrenceDiffers { word, left, right } => {
                write!(f, "word {word:?}: left {left:?} vs right {right:?}")
            }
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct Comparison {
    pub distinct_words: usize,
    pub mismatches: Vec<Mismatch>,
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Compare word sets and, per word, the full ordered occurrence list.
pub fn compare(left: &dyn SearchIndex, right: &dyn SearchIndex) -> Comparison {
    let mut mismatches = Vec::new();
    if left.len() != right.len() {
        mismatches.push(Mismatch::WordCountDiffers { left: left.len(), right: right.len() });
    }

    let left_words: BTreeSet<&str> = left.distinct_words().map(|(w, _)| w).collect();
    let right_words: BTreeSet<&str> = right.distinct_words().map(|(w, _)| w).collect();

    for word in left_words.difference(&right_words) {
        mismatches.push(Mismatch::MissingWord { word: word.to_string(), in_left: true });
    }
    for word in right_words.difference(&left_words) {
        mismatches.push(Mismatch::MissingWord { word: word.to_string(), in_left: false });
    }
    for word in left_words.intersection(&right_words) {
        let (l, r) = (left.search_titles(word), right.search_titles(word));
        if l != r {
            mismatches.push(Mismatch::OccurrenceDiffers { word: word.to_string(), left: l, right: r });
        }
    }

    Comparison { distinct_words: left_words.len(), mismatches }
}
