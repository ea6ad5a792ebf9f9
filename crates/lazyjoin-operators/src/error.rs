use std::convert::Infallible;
use std::fmt;

use thiserror::Error;

/// Which input of a binary join an error or element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

#[derive(Debug, Error)]
pub enum JoinError {
    /// A key-extraction function failed; the traversal is aborted.
    #[error("{side} key function failed: {source}")]
    KeyFunction {
        side: Side,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// A single-pass join sequence was traversed a second time.
    #[error("join sequence misuse: {0}")]
    Misuse(String),

    /// Malformed construction arguments, reported when the traversal starts.
    #[error("invalid join construction: {0}")]
    Construction(String),

    #[error("indexed side exceeds max_index_rows ({limit})")]
    IndexCapacity { limit: usize },
}

impl From<Infallible> for JoinError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

impl From<lazyjoin_core::Error> for JoinError {
    fn from(e: lazyjoin_core::Error) -> Self {
        JoinError::Construction(e.to_string())
    }
}
