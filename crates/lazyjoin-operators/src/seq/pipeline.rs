//! `Pipeline`: each/map/filter/slice/reduce/visit over any iterator.

use std::cmp::Ordering;
use std::hash::Hash;
use std::iter::{Filter, Fuse, Inspect, Map, Peekable, Skip, Take};

use lazyjoin_core::join_type::JoinType;

use crate::join::key::Pure;
use crate::join::sequence::JoinSequence;
use crate::seq::materialized::Materialized;

/// A lazy, single-pass sequence.
///
/// The source is fused on entry, so once the pipeline reports exhaustion it
/// keeps doing so. Adapters (`each`, `map`, `filter`, `slice`) are lazy;
/// `reduce`, `visit`, `materialize` and the sorts consume the pipeline.
#[derive(Debug, Clone)]
#[must_use = "pipelines are lazy and do nothing unless consumed"]
pub struct Pipeline<I> {
    inner: I,
}

impl<I: Iterator> Pipeline<Fuse<I>> {
    pub fn new<S>(source: S) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        Pipeline {
            inner: source.into_iter().fuse(),
        }
    }
}

impl<I: Iterator> Pipeline<I> {
    /// Run `f` on every element as it passes through.
    pub fn each<F>(self, f: F) -> Pipeline<Inspect<I, F>>
    where
        F: FnMut(&I::Item),
    {
        Pipeline {
            inner: self.inner.inspect(f),
        }
    }

    pub fn map<B, F>(self, f: F) -> Pipeline<Map<I, F>>
    where
        F: FnMut(I::Item) -> B,
    {
        Pipeline {
            inner: self.inner.map(f),
        }
    }

    /// Keep elements matching `predicate` (the "where" clause).
    pub fn filter<P>(self, predicate: P) -> Pipeline<Filter<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Pipeline {
            inner: self.inner.filter(predicate),
        }
    }

    /// Skip `skip` elements, then yield at most `take`.
    pub fn slice(self, skip: usize, take: usize) -> Pipeline<Take<Skip<I>>> {
        Pipeline {
            inner: self.inner.skip(skip).take(take),
        }
    }

    /// Add a one-element look-ahead slot.
    pub fn peekable(self) -> Pipeline<Peekable<I>> {
        Pipeline {
            inner: self.inner.peekable(),
        }
    }

    /// Fold every element into one value.
    pub fn reduce<B, F>(self, init: B, f: F) -> B
    where
        F: FnMut(B, I::Item) -> B,
    {
        self.inner.fold(init, f)
    }

    /// Consume the pipeline, calling `f` on each element. Returns how many
    /// elements were visited.
    pub fn visit<F>(self, mut f: F) -> usize
    where
        F: FnMut(I::Item),
    {
        let mut visited = 0;
        for item in self.inner {
            f(item);
            visited += 1;
        }
        visited
    }

    /// Buffer every element into a restartable view.
    pub fn materialize(self) -> Materialized<I::Item> {
        Materialized::from_vec(self.inner.collect())
    }

    /// Buffer and stable-sort by a key.
    pub fn sorted_by_key<K, F>(self, f: F) -> Materialized<I::Item>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        let mut items: Vec<_> = self.inner.collect();
        items.sort_by_key(f);
        Materialized::from_vec(items)
    }

    /// Buffer and stable-sort with a comparator.
    pub fn sorted_by<F>(self, cmp: F) -> Materialized<I::Item>
    where
        F: FnMut(&I::Item, &I::Item) -> Ordering,
    {
        let mut items: Vec<_> = self.inner.collect();
        items.sort_by(cmp);
        Materialized::from_vec(items)
    }

    /// Use this pipeline as the left input of a lazy hash join.
    pub fn join<K, R, RI, LF, RF>(
        self,
        left_key: LF,
        right: RI,
        right_key: RF,
        join_type: JoinType,
    ) -> JoinSequence<K, I::Item, R, I, RI::IntoIter, Pure<LF>, Pure<RF>>
    where
        K: Hash + Eq + Clone,
        I::Item: Clone,
        R: Clone,
        RI: IntoIterator<Item = R>,
        LF: FnMut(&I::Item) -> K,
        RF: FnMut(&R) -> K,
    {
        JoinSequence::new(
            self.inner,
            Pure(left_key),
            right.into_iter(),
            Pure(right_key),
            join_type,
        )
    }

    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: Iterator> Pipeline<Peekable<I>> {
    /// Look at the next element without consuming it.
    pub fn peek(&mut self) -> Option<&I::Item> {
        self.inner.peek()
    }
}

impl<I: Iterator> Iterator for Pipeline<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapters_are_lazy() {
        let mut seen = Vec::new();
        let pipeline = Pipeline::new(1..=5).each(|x| seen.push(*x));
        drop(pipeline);
        assert!(seen.is_empty());
    }

    #[test]
    fn test_map_filter_slice() {
        let out: Vec<_> = Pipeline::new(1..=10)
            .map(|x| x * 10)
            .filter(|x| x % 20 == 0)
            .slice(1, 2)
            .collect();
        assert_eq!(out, vec![40, 60]);
    }

    #[test]
    fn test_reduce_and_visit() {
        assert_eq!(Pipeline::new(vec![1, 2, 3]).reduce(0, |acc, x| acc + x), 6);

        let mut seen = Vec::new();
        let n = Pipeline::new(["a", "b"]).visit(|s| seen.push(s));
        assert_eq!(n, 2);
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn test_exhaustion_is_terminal() {
        // Yields 1, then None, then would yield again if it were not fused.
        let mut calls = 0;
        let flaky = std::iter::from_fn(move || {
            calls += 1;
            match calls {
                1 | 3 => Some(calls),
                _ => None,
            }
        });
        let mut p = Pipeline::new(flaky);
        assert_eq!(p.next(), Some(1));
        assert_eq!(p.next(), None);
        assert_eq!(p.next(), None);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut p = Pipeline::new(vec![7, 8]).peekable();
        assert_eq!(p.peek(), Some(&7));
        assert_eq!(p.next(), Some(7));
        assert_eq!(p.next(), Some(8));
        assert_eq!(p.peek(), None);
    }

    #[test]
    fn test_sorted_by_key_is_stable() {
        let sorted = Pipeline::new(vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')])
            .sorted_by_key(|(k, _)| *k);
        let letters: String = sorted.iter().map(|(_, c)| *c).collect();
        assert_eq!(letters, "bdac");
    }
}
