use std::path::PathBuf;

/// Main library error type.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("cannot open shard {path:?}: {source}")]
    ShardOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed shard, {records} records need {expected} bytes but only {len} are available")]
    MalformedShard {
        len: usize,
        expected: usize,
        records: usize,
    },

    #[error("image factory built an image with {got} pixels, expected {expected}")]
    ImageSize { expected: usize, got: usize },

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Layout file parse error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Adding path information to an error.
    #[error("path: {path:?} {inner}")]
    WithPath {
        inner: Box<Self>,
        path: std::path::PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn with_path<P: AsRef<std::path::Path>>(self, p: P) -> Self {
        Self::WithPath {
            inner: Box::new(self),
            path: p.as_ref().to_path_buf(),
        }
    }

    /// Returns true when the error comes from a shard file that could not be opened, these
    /// are skipped when assembling a dataset.
    pub fn is_shard_open(&self) -> bool {
        match self {
            Self::ShardOpen { .. } => true,
            Self::WithPath { inner, .. } => inner.is_shard_open(),
            _ => false,
        }
    }
}
