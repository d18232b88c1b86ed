use lazy_static::lazy_static;
use regex::Regex;
use std::io::{self, BufRead, Lines};
use std::vec;

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"\S+").expect("valid regex");
}

/// Split text into whitespace separated tokens. No case folding or
/// punctuation stripping is applied.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Tokens of a line-oriented reader, read one line at a time.
pub struct Tokens<R> {
    lines: Lines<R>,
    pending: vec::IntoIter<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines(), pending: Vec::new().into_iter() }
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(tok) = self.pending.next() {
                return Some(Ok(tok));
            }
            match self.lines.next()? {
                Ok(line) => self.pending = tokenize(&line).into_iter(),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
