//! Fully buffered, restartable sequences (list views, sort output).

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::seq::pipeline::Pipeline;

/// A sequence backed by an in-memory buffer.
///
/// Unlike [`Pipeline`], it can be iterated any number of times; every
/// traversal sees the same elements in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Materialized<T> {
    items: Vec<T>,
}

impl<T> Materialized<T> {
    pub fn from_vec(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Open a fresh pipeline over borrowed elements.
    pub fn pipeline(&self) -> Pipeline<std::iter::Fuse<std::slice::Iter<'_, T>>> {
        Pipeline::new(self.items.iter())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> From<Vec<T>> for Materialized<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T> FromIterator<T> for Materialized<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> Index<usize> for Materialized<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &T {
        &self.items[idx]
    }
}

impl<'a, T> IntoIterator for &'a Materialized<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for Materialized<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restartable() {
        let view: Materialized<i32> = vec![3, 1, 2].into();
        let first: Vec<_> = view.iter().copied().collect();
        let second: Vec<_> = view.iter().copied().collect();
        assert_eq!(first, second);
        assert_eq!(view.pipeline().map(|x| x * 2).reduce(0, |a, b| a + b), 12);
        assert_eq!(view.pipeline().count(), 3);
        assert_eq!(view[1], 1);
    }
}
