//! Build/probe state machine shared by every join type.
//!
//! The engine speaks in terms of a *driving* side (streamed one row at a time)
//! and an *indexed* side (fully read into a [`HashIndex`] on the first pull).
//! Left/right orientation is applied by the caller.
//!
//! Phases move strictly forward:
//! `Unstarted -> Driving -> Draining (full joins only) -> Done`.
//! Index construction happens inside the first pull, before `Driving`.

use std::hash::Hash;

use lazyjoin_core::join_type::JoinType;
use serde::Serialize;

use crate::error::{JoinError, Side};
use crate::join::index::{HashIndex, Unmatched};
use crate::join::key::KeyFn;

/// One step of engine output, before left/right orientation.
#[derive(Debug, PartialEq)]
pub(crate) enum ProbeRow<K, D, B> {
    Matched(K, D, B),
    DriverOnly(K, D),
    IndexedOnly(K, B),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Unstarted,
    Driving,
    Draining,
    Done,
}

/// Counters for one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JoinStats {
    /// Rows read into the index.
    pub indexed_rows: usize,
    /// Distinct keys on the indexed side.
    pub distinct_keys: usize,
    /// Rows pulled from the driving side.
    pub driven_rows: usize,
    /// Results handed to the consumer.
    pub emitted: usize,
    /// Driving rows emitted without a counterpart.
    pub unmatched_driver: usize,
    /// Indexed rows emitted without a counterpart (full joins).
    pub unmatched_indexed: usize,
}

/// Driving row whose match group is being walked.
struct GroupCursor<K, D> {
    key: K,
    driver: D,
    group: usize,
    next: usize,
}

pub(crate) struct Probe<K, D, B, DI, BI, DF, BF> {
    join_type: JoinType,
    driver_side: Side,
    driver: DI,
    driver_key: DF,
    build: Option<BI>,
    build_key: BF,
    capacity_hint: usize,
    max_index_rows: Option<usize>,
    index: Option<HashIndex<K, B>>,
    current: Option<GroupCursor<K, D>>,
    drain: Option<Unmatched<K, B>>,
    phase: Phase,
    stats: JoinStats,
}

impl<K, D, B, DI, BI, DF, BF> Probe<K, D, B, DI, BI, DF, BF>
where
    K: Hash + Eq + Clone,
    D: Clone,
    B: Clone,
    DI: Iterator<Item = D>,
    BI: Iterator<Item = B>,
    DF: KeyFn<D, Key = K>,
    BF: KeyFn<B, Key = K>,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        join_type: JoinType,
        driver_side: Side,
        driver: DI,
        driver_key: DF,
        build: BI,
        build_key: BF,
        capacity_hint: Option<usize>,
        max_index_rows: Option<usize>,
    ) -> Self {
        Self {
            join_type,
            driver_side,
            driver,
            driver_key,
            build: Some(build),
            build_key,
            capacity_hint: capacity_hint.unwrap_or(0),
            max_index_rows,
            index: None,
            current: None,
            drain: None,
            phase: Phase::Unstarted,
            stats: JoinStats::default(),
        }
    }

    pub(crate) fn stats(&self) -> JoinStats {
        self.stats
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    fn build_side(&self) -> Side {
        match self.driver_side {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Read the whole indexed side. Runs exactly once, on the first pull.
    fn build_index(&mut self) -> Result<(), JoinError> {
        let source = self
            .build
            .take()
            .ok_or_else(|| JoinError::Misuse("join index already built".into()))?;
        let build_side = self.build_side();

        let mut index = HashIndex::with_capacity(self.capacity_hint);
        for row in source {
            if let Some(limit) = self.max_index_rows {
                if index.len() >= limit {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(limit, side = %build_side, "join index capacity exceeded");
                    return Err(JoinError::IndexCapacity { limit });
                }
            }
            let key = self
                .build_key
                .extract(&row)
                .map_err(|e| key_failure(build_side, e))?;
            index.insert(key, row);
        }

        self.stats.indexed_rows = index.len();
        self.stats.distinct_keys = index.distinct_keys();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            join_type = %self.join_type,
            side = %build_side,
            rows = index.len(),
            keys = index.distinct_keys(),
            "built join index"
        );

        self.index = Some(index);
        Ok(())
    }

    /// Driving side exhausted: drain unmatched indexed rows or finish.
    fn end_driving(&mut self) {
        let index = self.index.take();
        if self.join_type.drains_unmatched_indexed() {
            self.drain = index.map(HashIndex::into_unmatched);
            self.phase = Phase::Draining;
            #[cfg(feature = "tracing")]
            tracing::trace!(join_type = %self.join_type, "draining unmatched indexed rows");
        } else {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Done;
        self.index = None;
        self.current = None;
        self.drain = None;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            join_type = %self.join_type,
            indexed = self.stats.indexed_rows,
            driven = self.stats.driven_rows,
            emitted = self.stats.emitted,
            unmatched_driver = self.stats.unmatched_driver,
            unmatched_indexed = self.stats.unmatched_indexed,
            "join traversal finished"
        );
    }

    /// Abort the traversal; nothing is yielded after the returned error.
    fn fail(&mut self, err: JoinError) -> Option<Result<ProbeRow<K, D, B>, JoinError>> {
        #[cfg(feature = "tracing")]
        tracing::warn!(join_type = %self.join_type, error = %err, "join traversal aborted");
        self.phase = Phase::Done;
        self.index = None;
        self.current = None;
        self.drain = None;
        Some(Err(err))
    }

    fn emit(&mut self, row: ProbeRow<K, D, B>) -> Option<Result<ProbeRow<K, D, B>, JoinError>> {
        self.stats.emitted += 1;
        match &row {
            ProbeRow::DriverOnly(..) => self.stats.unmatched_driver += 1,
            ProbeRow::IndexedOnly(..) => self.stats.unmatched_indexed += 1,
            ProbeRow::Matched(..) => {}
        }
        Some(Ok(row))
    }

    /// Next element of the current match group, if one is open.
    fn next_in_group(&mut self) -> Option<ProbeRow<K, D, B>> {
        let index = self.index.as_ref()?;
        let cursor = self.current.as_mut()?;
        let rows = index.group(cursor.group);

        let matched = rows.get(cursor.next)?.clone();
        cursor.next += 1;
        if cursor.next < rows.len() {
            return Some(ProbeRow::Matched(
                cursor.key.clone(),
                cursor.driver.clone(),
                matched,
            ));
        }

        // Last element of the group: hand the driving row over by value.
        let cursor = self.current.take()?;
        Some(ProbeRow::Matched(cursor.key, cursor.driver, matched))
    }

    pub(crate) fn next_row(&mut self) -> Option<Result<ProbeRow<K, D, B>, JoinError>> {
        loop {
            match self.phase {
                Phase::Unstarted => {
                    // Pessimistic: a failed build leaves the traversal done.
                    self.phase = Phase::Done;
                    if let Err(err) = self.build_index() {
                        return self.fail(err);
                    }
                    self.phase = Phase::Driving;
                }
                Phase::Driving => {
                    if let Some(row) = self.next_in_group() {
                        return self.emit(row);
                    }
                    self.current = None;

                    let Some(driver) = self.driver.next() else {
                        self.end_driving();
                        continue;
                    };
                    self.stats.driven_rows += 1;

                    let key = match self.driver_key.extract(&driver) {
                        Ok(key) => key,
                        Err(e) => {
                            let err = key_failure(self.driver_side, e);
                            return self.fail(err);
                        }
                    };

                    let group = self.index.as_ref().and_then(|index| index.lookup(&key));
                    match group {
                        Some(group) => {
                            if self.join_type.drains_unmatched_indexed() {
                                if let Some(index) = self.index.as_mut() {
                                    index.mark_matched(group);
                                }
                            }
                            self.current = Some(GroupCursor {
                                key,
                                driver,
                                group,
                                next: 0,
                            });
                        }
                        None if self.join_type.keeps_unmatched_driver() => {
                            return self.emit(ProbeRow::DriverOnly(key, driver));
                        }
                        None => {}
                    }
                }
                Phase::Draining => match self.drain.as_mut().and_then(Iterator::next) {
                    Some((key, row)) => return self.emit(ProbeRow::IndexedOnly(key, row)),
                    None => self.finish(),
                },
                Phase::Done => return None,
            }
        }
    }
}

fn key_failure<E>(side: Side, err: E) -> JoinError
where
    E: std::error::Error + Send + Sync + 'static,
{
    JoinError::KeyFunction {
        side,
        source: Box::new(err),
    }
}
