use serde::{Deserialize, Serialize};

/// One output row of a join: the join key plus the left and right elements.
///
/// Inner joins always carry both sides. Outer joins leave the unmatched side
/// as `None`; absence is never encoded as a data value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JoinResult<K, L, R> {
    key: K,
    left: Option<L>,
    right: Option<R>,
}

impl<K, L, R> JoinResult<K, L, R> {
    pub(crate) fn new(key: K, left: Option<L>, right: Option<R>) -> Self {
        debug_assert!(left.is_some() || right.is_some());
        Self { key, left, right }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn left(&self) -> Option<&L> {
        self.left.as_ref()
    }

    pub fn right(&self) -> Option<&R> {
        self.right.as_ref()
    }

    /// Both sides present.
    pub fn is_matched(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    pub fn into_parts(self) -> (K, Option<L>, Option<R>) {
        (self.key, self.left, self.right)
    }
}
