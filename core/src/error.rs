use std::path::PathBuf;
use thiserror::Error;

/// Failures while building an index from a token source.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("cannot open source {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    #[error("malformed title token {token:?} at position {position}")]
    MalformedTitle { position: usize, token: String },

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;

impl IndexError {
    /// The source could not be opened; callers may continue with an empty index.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, IndexError::SourceUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_unavailable_names_the_path() {
        let err = IndexError::SourceUnavailable {
            path: PathBuf::from("/nope/corpus.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.is_source_unavailable());
        assert!(err.to_string().contains("/nope/corpus.txt"));
    }

    #[test]
    fn malformed_title_is_not_source_unavailable() {
        let err = IndexError::MalformedTitle { position: 3, token: ".".into() };
        assert!(!err.is_source_unavailable());
        assert_eq!(err.to_string(), "malformed title token \".\" at position 3");
    }
}
