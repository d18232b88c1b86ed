use crate::error::{IndexError, Result};
use crate::hash_index::GrowableHashIndex;
use crate::tokenizer::Tokens;
use crate::{IndexConfig, SearchIndex, Title};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Title carried by the token after a delimiter: the token minus its last
/// character. `None` when nothing would remain.
pub fn title_from_token(token: &str) -> Option<&str> {
    let mut chars = token.chars();
    chars.next_back()?;
    let title = chars.as_str();
    (!title.is_empty()).then_some(title)
}

/// Single pass over a token stream that feeds `(word, current title)` pairs
/// into a [`SearchIndex`].
///
/// The stream behaves as if preceded by a delimiter, so its first token is
/// the first document's title.
pub struct StreamingIndexBuilder<I> {
    index: I,
    delimiter: String,
    index_titles: bool,
    index_delimiter: bool,
    title: Title,
    after_delimiter: bool,
    tokens: usize,
    documents: usize,
}

impl<I: SearchIndex> StreamingIndexBuilder<I> {
    pub fn new(index: I, config: &IndexConfig) -> Self {
        Self {
            index,
            delimiter: config.delimiter.clone(),
            index_titles: config.index_titles,
            index_delimiter: config.index_delimiter,
            title: Title::from(""),
            after_delimiter: true,
            tokens: 0,
            documents: 0,
        }
    }

    pub fn current_title(&self) -> &str {
        &self.title
    }

    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Consume one token.
    pub fn push(&mut self, token: &str) -> Result<()> {
        let position = self.tokens;
        self.tokens += 1;

        let is_title = self.after_delimiter;
        if is_title {
            let title = title_from_token(token).ok_or_else(|| IndexError::MalformedTitle {
                position,
                token: token.to_string(),
            })?;
            self.title = Title::from(title);
            self.documents += 1;
        }
        self.after_delimiter = token == self.delimiter;

        let skip = (is_title && !self.index_titles) || (self.after_delimiter && !self.index_delimiter);
        if !skip {
            self.index.insert(token, &self.title);
        }
        Ok(())
    }

    pub fn finish(self) -> I {
        info!(
            tokens = self.tokens,
            documents = self.documents,
            distinct_words = self.index.len(),
            "index build complete"
        );
        self.index
    }

    pub fn build<S, T>(mut self, tokens: T) -> Result<I>
    where
        S: AsRef<str>,
        T: IntoIterator<Item = S>,
    {
        for tok in tokens {
            self.push(tok.as_ref())?;
        }
        Ok(self.finish())
    }

    pub fn build_reader<R: BufRead>(mut self, reader: R) -> Result<I> {
        for tok in Tokens::new(reader) {
            self.push(&tok?)?;
        }
        Ok(self.finish())
    }

    pub fn build_path<P: AsRef<Path>>(self, path: P) -> Result<I> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| IndexError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        self.build_reader(BufReader::new(file))
    }
}

pub fn build_from_tokens<S, T>(tokens: T, config: &IndexConfig) -> Result<GrowableHashIndex>
where
    S: AsRef<str>,
    T: IntoIterator<Item = S>,
{
    StreamingIndexBuilder::new(GrowableHashIndex::with_config(config), config).build(tokens)
}

pub fn build_from_reader<R: BufRead>(reader: R, config: &IndexConfig) -> Result<GrowableHashIndex> {
    StreamingIndexBuilder::new(GrowableHashIndex::with_config(config), config).build_reader(reader)
}

/// Build a hash index from the corpus file at `path`.
///
/// A file that cannot be opened is reported as
/// [`IndexError::SourceUnavailable`]; the caller decides whether to carry on
/// with an empty index.
pub fn build_from_path<P: AsRef<Path>>(path: P, config: &IndexConfig) -> Result<GrowableHashIndex> {
    StreamingIndexBuilder::new(GrowableHashIndex::with_config(config), config).build_path(path)
}
