//! Join result sequence: the single-pass, lazily started face of the engine.

use std::hash::Hash;
use std::marker::PhantomData;

use lazyjoin_core::config::JoinConfig;
use lazyjoin_core::join_type::JoinType;

use crate::error::{JoinError, Side};
use crate::join::engine::{JoinStats, Phase, Probe, ProbeRow};
use crate::join::key::KeyFn;
use crate::join::result::JoinResult;

struct JoinParts<LI, RI, LF, RF> {
    left: LI,
    left_key: LF,
    right: RI,
    right_key: RF,
}

/// A lazy join of two sequences.
///
/// Creating the sequence reads nothing. The index is built on the first pull
/// of its traversal, and the sequence can be traversed exactly once: call
/// [`JoinSequence::traverse`] (or iterate it by value).
pub struct JoinSequence<K, L, R, LI, RI, LF, RF> {
    join_type: JoinType,
    config: JoinConfig,
    parts: Option<JoinParts<LI, RI, LF, RF>>,
    _marker: PhantomData<fn() -> (K, L, R)>,
}

impl<K, L, R, LI, RI, LF, RF> JoinSequence<K, L, R, LI, RI, LF, RF>
where
    K: Hash + Eq + Clone,
    L: Clone,
    R: Clone,
    LI: Iterator<Item = L>,
    RI: Iterator<Item = R>,
    LF: KeyFn<L, Key = K>,
    RF: KeyFn<R, Key = K>,
{
    pub fn new(left: LI, left_key: LF, right: RI, right_key: RF, join_type: JoinType) -> Self {
        Self {
            join_type,
            config: JoinConfig::default(),
            parts: Some(JoinParts {
                left,
                left_key,
                right,
                right_key,
            }),
            _marker: PhantomData,
        }
    }

    pub fn with_config(mut self, config: JoinConfig) -> Self {
        self.config = config;
        self
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn config(&self) -> &JoinConfig {
        &self.config
    }

    /// True once the traversal has been handed out.
    pub fn is_consumed(&self) -> bool {
        self.parts.is_none()
    }

    /// Open the one traversal of this sequence.
    ///
    /// Fails with [`JoinError::Construction`] for an invalid config and with
    /// [`JoinError::Misuse`] when the traversal was already taken.
    pub fn traverse(&mut self) -> Result<JoinIter<K, L, R, LI, RI, LF, RF>, JoinError> {
        self.config.validate()?;
        let parts = self.parts.take().ok_or_else(|| {
            JoinError::Misuse("join sequence is single-pass and was already traversed".into())
        })?;
        Ok(JoinIter::start(self.join_type, &self.config, parts))
    }

    /// Drain the whole join, stopping at the first error.
    pub fn collect_results(self) -> Result<Vec<JoinResult<K, L, R>>, JoinError> {
        self.into_iter().collect()
    }
}

impl<K, L, R, LI, RI, LF, RF> IntoIterator for JoinSequence<K, L, R, LI, RI, LF, RF>
where
    K: Hash + Eq + Clone,
    L: Clone,
    R: Clone,
    LI: Iterator<Item = L>,
    RI: Iterator<Item = R>,
    LF: KeyFn<L, Key = K>,
    RF: KeyFn<R, Key = K>,
{
    type Item = Result<JoinResult<K, L, R>, JoinError>;
    type IntoIter = JoinIter<K, L, R, LI, RI, LF, RF>;

    /// Construction errors surface on the first pull.
    fn into_iter(mut self) -> Self::IntoIter {
        match self.traverse() {
            Ok(iter) => iter,
            Err(err) => JoinIter {
                state: Traversal::Failed(Some(err)),
            },
        }
    }
}

enum Traversal<K, L, R, LI, RI, LF, RF> {
    LeftDriven(Probe<K, L, R, LI, RI, LF, RF>),
    RightDriven(Probe<K, R, L, RI, LI, RF, LF>),
    Failed(Option<JoinError>),
}

/// The traversal of a [`JoinSequence`]: yields one `JoinResult` per pull.
///
/// After an error or exhaustion every further pull returns `None`.
pub struct JoinIter<K, L, R, LI, RI, LF, RF> {
    state: Traversal<K, L, R, LI, RI, LF, RF>,
}

impl<K, L, R, LI, RI, LF, RF> JoinIter<K, L, R, LI, RI, LF, RF>
where
    K: Hash + Eq + Clone,
    L: Clone,
    R: Clone,
    LI: Iterator<Item = L>,
    RI: Iterator<Item = R>,
    LF: KeyFn<L, Key = K>,
    RF: KeyFn<R, Key = K>,
{
    fn start(join_type: JoinType, config: &JoinConfig, parts: JoinParts<LI, RI, LF, RF>) -> Self {
        let hint = config.index_capacity_hint;
        let limit = config.max_index_rows;
        let state = if join_type.indexes_left() {
            Traversal::RightDriven(Probe::new(
                join_type,
                Side::Right,
                parts.right,
                parts.right_key,
                parts.left,
                parts.left_key,
                hint,
                limit,
            ))
        } else {
            Traversal::LeftDriven(Probe::new(
                join_type,
                Side::Left,
                parts.left,
                parts.left_key,
                parts.right,
                parts.right_key,
                hint,
                limit,
            ))
        };
        Self { state }
    }

    /// Counters for this traversal so far.
    pub fn stats(&self) -> JoinStats {
        match &self.state {
            Traversal::LeftDriven(p) => p.stats(),
            Traversal::RightDriven(p) => p.stats(),
            Traversal::Failed(_) => JoinStats::default(),
        }
    }

    /// True once no further results will be produced.
    pub fn is_done(&self) -> bool {
        match &self.state {
            Traversal::LeftDriven(p) => p.phase() == Phase::Done,
            Traversal::RightDriven(p) => p.phase() == Phase::Done,
            Traversal::Failed(err) => err.is_none(),
        }
    }
}

impl<K, L, R, LI, RI, LF, RF> Iterator for JoinIter<K, L, R, LI, RI, LF, RF>
where
    K: Hash + Eq + Clone,
    L: Clone,
    R: Clone,
    LI: Iterator<Item = L>,
    RI: Iterator<Item = R>,
    LF: KeyFn<L, Key = K>,
    RF: KeyFn<R, Key = K>,
{
    type Item = Result<JoinResult<K, L, R>, JoinError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            Traversal::LeftDriven(probe) => probe.next_row().map(|row| {
                row.map(|row| match row {
                    ProbeRow::Matched(k, l, r) => JoinResult::new(k, Some(l), Some(r)),
                    ProbeRow::DriverOnly(k, l) => JoinResult::new(k, Some(l), None),
                    ProbeRow::IndexedOnly(k, r) => JoinResult::new(k, None, Some(r)),
                })
            }),
            Traversal::RightDriven(probe) => probe.next_row().map(|row| {
                row.map(|row| match row {
                    ProbeRow::Matched(k, r, l) => JoinResult::new(k, Some(l), Some(r)),
                    ProbeRow::DriverOnly(k, r) => JoinResult::new(k, None, Some(r)),
                    ProbeRow::IndexedOnly(k, l) => JoinResult::new(k, Some(l), None),
                })
            }),
            Traversal::Failed(err) => err.take().map(Err),
        }
    }
}

impl<K, L, R, LI, RI, LF, RF> std::iter::FusedIterator for JoinIter<K, L, R, LI, RI, LF, RF>
where
    K: Hash + Eq + Clone,
    L: Clone,
    R: Clone,
    LI: Iterator<Item = L>,
    RI: Iterator<Item = R>,
    LF: KeyFn<L, Key = K>,
    RF: KeyFn<R, Key = K>,
{
}
