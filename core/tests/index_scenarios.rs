use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;
use wikisearch_core::verify::compare;
use wikisearch_core::{
    build_from_path, build_from_reader, build_from_tokens, ChainIndex, GrowableHashIndex, IndexConfig, IndexError,
    SearchIndex, StreamingIndexBuilder, DELIMITER,
};

const CORPUS: &str = "Doc1. fox. runs.
---END.OF.DOCUMENT---
Doc2. fox.
---END.OF.DOCUMENT---
";

fn snapshot(index: &dyn SearchIndex) -> HashMap<String, Vec<String>> {
    index.distinct_words().map(|(w, list)| (w.to_string(), list.to_vec())).collect()
}

#[test]
fn two_document_scenario() {
    let tokens = ["Doc1.", "fox.", "runs.", DELIMITER, "Doc2.", "fox.", DELIMITER];
    let index = build_from_tokens(tokens, &IndexConfig::default()).unwrap();

    assert_eq!(index.search_titles("fox."), vec!["Doc2", "Doc1"]);
    assert_eq!(index.search_titles("runs."), vec!["Doc1"]);
    assert!(index.search("missing").is_none());
    // The delimiter is an ordinary key.
    assert_eq!(index.search_titles(DELIMITER), vec!["Doc2", "Doc1"]);
}

#[test]
fn reader_and_token_builds_agree() {
    let cfg = IndexConfig::default();
    let from_reader = build_from_reader(CORPUS.as_bytes(), &cfg).unwrap();
    let tokens: Vec<&str> = CORPUS.split_whitespace().collect();
    let from_tokens = build_from_tokens(tokens, &cfg).unwrap();
    assert_eq!(snapshot(&from_reader), snapshot(&from_tokens));
}

#[test]
fn building_twice_gives_identical_results() {
    let cfg = IndexConfig { initial_capacity: 2, ..IndexConfig::default() };
    let a = build_from_reader(CORPUS.as_bytes(), &cfg).unwrap();
    let b = build_from_reader(CORPUS.as_bytes(), &cfg).unwrap();
    assert_eq!(snapshot(&a), snapshot(&b));
    for word in CORPUS.split_whitespace() {
        assert_eq!(a.search(word), b.search(word));
    }
}

#[test]
fn one_entry_per_title_change() {
    // "w" appears in A twice in a row, then B, then A again.
    let tokens = ["A.", "w", "w", "x", "w", DELIMITER, "B.", "w", DELIMITER, "A.", "w", "w"];
    let index = build_from_tokens(tokens, &IndexConfig::default()).unwrap();
    assert_eq!(index.search_titles("w"), vec!["A", "B", "A"]);
    assert_eq!(index.search_titles("x"), vec!["A"]);
}

#[test]
fn distinct_count_matches_distinct_words() {
    let text: String = (0..5_000).map(|i| format!("t{} ", i % 1_777)).collect();
    let cfg = IndexConfig { initial_capacity: 1, ..IndexConfig::default() };
    let index = build_from_reader(format!("Title. {text}").as_bytes(), &cfg).unwrap();
    // 1777 distinct t-words plus the title token.
    assert_eq!(index.len(), 1_778);
    assert!(index.len() < index.capacity());
    assert_eq!(index.stats().distinct_words, 1_778);
}

#[test]
fn hash_and_chain_backends_agree() {
    let mut corpus = String::new();
    for d in 0..20 {
        corpus.push_str(&format!("Article{d}. "));
        for w in 0..50 {
            corpus.push_str(&format!("w{} ", (w * (d + 1)) % 37));
        }
        corpus.push_str(DELIMITER);
        corpus.push('\n');
    }
    let cfg = IndexConfig { initial_capacity: 8, ..IndexConfig::default() };
    let hashed = StreamingIndexBuilder::new(GrowableHashIndex::with_config(&cfg), &cfg)
        .build_reader(corpus.as_bytes())
        .unwrap();
    let chained = StreamingIndexBuilder::new(ChainIndex::with_config(&cfg), &cfg)
        .build_reader(corpus.as_bytes())
        .unwrap();

    assert!(hashed.rehash_count() > 0);
    let cmp = compare(&hashed, &chained);
    assert!(cmp.is_match(), "{:?}", cmp.mismatches);
    assert_eq!(cmp.distinct_words, hashed.len());
}

#[test]
fn builds_from_a_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.txt");
    fs::write(&path, CORPUS).unwrap();

    let index = build_from_path(&path, &IndexConfig::default()).unwrap();
    assert_eq!(index.search_titles("fox."), vec!["Doc2", "Doc1"]);
}

#[test]
fn missing_source_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("does-not-exist.txt");

    let err = build_from_path(&path, &IndexConfig::default()).err().unwrap();
    assert!(err.is_source_unavailable());
    match err {
        IndexError::SourceUnavailable { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }

    // Caller falls back to an empty index.
    let index = GrowableHashIndex::new();
    assert!(index.is_empty());
    assert!(index.search("fox.").is_none());
}

#[test]
fn config_file_drives_the_build() {
    let dir = tempdir().unwrap();
    let cfg_path = dir.path().join("index.json");
    fs::write(&cfg_path, r#"{"initial_capacity": 2, "index_delimiter": false, "dedup": "full_list"}"#).unwrap();

    let cfg = IndexConfig::load(&cfg_path).unwrap();
    let tokens = ["A.", "w", DELIMITER, "B.", "w", DELIMITER, "A.", "w"];
    let index = build_from_tokens(tokens, &cfg).unwrap();
    assert!(index.search(DELIMITER).is_none());
    assert_eq!(index.search_titles("w"), vec!["B", "A"]);
}

#[test]
fn bad_config_file_is_an_error() {
    let dir = tempdir().unwrap();
    let cfg_path = dir.path().join("index.json");
    fs::write(&cfg_path, "{ not json").unwrap();
    assert!(matches!(IndexConfig::load(&cfg_path), Err(IndexError::Config(_))));
}
