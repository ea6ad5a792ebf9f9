//! Pull-based hash joins over arbitrary key functions.
//!
//! ```
//! use lazyjoin_core::join_type::JoinType;
//! use lazyjoin_operators::join::join;
//!
//! let rows = join(vec![1, 2, 4, 5], |x| *x, vec![1, 2, 3, 4], |x| *x, JoinType::Left)
//!     .collect_results()
//!     .unwrap();
//! assert_eq!(rows.len(), 4);
//! assert_eq!(rows[3].right(), None);
//! ```
//!
//! One side is indexed eagerly on the first pull (the right side, or the
//! left side for right joins); the other side is streamed. Results come out in
//! driving-side order, each driving row's matches in indexed-side order, and
//! (full joins) never-matched indexed rows last, in indexed-side order.

pub mod engine;
pub mod hash;
pub mod index;
pub mod key;
pub mod result;
pub mod sequence;

use std::hash::Hash;

use lazyjoin_core::join_type::JoinType;

pub use engine::JoinStats;
pub use hash::HashJoin;
pub use index::HashIndex;
pub use key::{Fallible, KeyFn, Pure};
pub use result::JoinResult;
pub use sequence::{JoinIter, JoinSequence};

/// Join sequence built from infallible key functions.
pub type PureJoin<K, L, R, LI, RI, LF, RF> = JoinSequence<K, L, R, LI, RI, Pure<LF>, Pure<RF>>;

/// Lazily join `left` and `right` on the keys produced by `left_key` and
/// `right_key`.
pub fn join<K, L, R, LI, RI, LF, RF>(
    left: LI,
    left_key: LF,
    right: RI,
    right_key: RF,
    join_type: JoinType,
) -> PureJoin<K, L, R, LI::IntoIter, RI::IntoIter, LF, RF>
where
    K: Hash + Eq + Clone,
    L: Clone,
    R: Clone,
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    LF: FnMut(&L) -> K,
    RF: FnMut(&R) -> K,
{
    JoinSequence::new(
        left.into_iter(),
        Pure(left_key),
        right.into_iter(),
        Pure(right_key),
        join_type,
    )
}

/// Like [`join`], for key functions that can fail. The first failure is
/// yielded as [`crate::JoinError::KeyFunction`] and ends the traversal.
pub fn try_join<K, L, R, E1, E2, LI, RI, LF, RF>(
    left: LI,
    left_key: LF,
    right: RI,
    right_key: RF,
    join_type: JoinType,
) -> JoinSequence<K, L, R, LI::IntoIter, RI::IntoIter, Fallible<LF>, Fallible<RF>>
where
    K: Hash + Eq + Clone,
    L: Clone,
    R: Clone,
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    LF: FnMut(&L) -> Result<K, E1>,
    RF: FnMut(&R) -> Result<K, E2>,
    E1: std::error::Error + Send + Sync + 'static,
    E2: std::error::Error + Send + Sync + 'static,
{
    JoinSequence::new(
        left.into_iter(),
        Fallible(left_key),
        right.into_iter(),
        Fallible(right_key),
        join_type,
    )
}

pub fn inner_join<K, L, R, LI, RI, LF, RF>(
    left: LI,
    left_key: LF,
    right: RI,
    right_key: RF,
) -> PureJoin<K, L, R, LI::IntoIter, RI::IntoIter, LF, RF>
where
    K: Hash + Eq + Clone,
    L: Clone,
    R: Clone,
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    LF: FnMut(&L) -> K,
    RF: FnMut(&R) -> K,
{
    join(left, left_key, right, right_key, JoinType::Inner)
}

pub fn left_join<K, L, R, LI, RI, LF, RF>(
    left: LI,
    left_key: LF,
    right: RI,
    right_key: RF,
) -> PureJoin<K, L, R, LI::IntoIter, RI::IntoIter, LF, RF>
where
    K: Hash + Eq + Clone,
    L: Clone,
    R: Clone,
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    LF: FnMut(&L) -> K,
    RF: FnMut(&R) -> K,
{
    join(left, left_key, right, right_key, JoinType::Left)
}

pub fn right_join<K, L, R, LI, RI, LF, RF>(
    left: LI,
    left_key: LF,
    right: RI,
    right_key: RF,
) -> PureJoin<K, L, R, LI::IntoIter, RI::IntoIter, LF, RF>
where
    K: Hash + Eq + Clone,
    L: Clone,
    R: Clone,
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    LF: FnMut(&L) -> K,
    RF: FnMut(&R) -> K,
{
    join(left, left_key, right, right_key, JoinType::Right)
}

pub fn full_join<K, L, R, LI, RI, LF, RF>(
    left: LI,
    left_key: LF,
    right: RI,
    right_key: RF,
) -> PureJoin<K, L, R, LI::IntoIter, RI::IntoIter, LF, RF>
where
    K: Hash + Eq + Clone,
    L: Clone,
    R: Clone,
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    LF: FnMut(&L) -> K,
    RF: FnMut(&R) -> K,
{
    join(left, left_key, right, right_key, JoinType::Full)
}
