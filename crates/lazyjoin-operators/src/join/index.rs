//! Multi-map index over the indexed side of a hash join.
//!
//! Keys map to groups of rows in arrival order. Groups are kept in key
//! encounter order, and the arrival order of every row is recorded so a full
//! join can hand back never-matched rows in source order.

use std::collections::HashMap;
use std::hash::Hash;

struct Group<K, V> {
    key: K,
    rows: Vec<V>,
    matched: bool,
}

pub struct HashIndex<K, V> {
    slots: HashMap<K, usize>,
    groups: Vec<Group<K, V>>,
    /// Group id of each inserted row, in insertion order.
    arrival: Vec<usize>,
}

impl<K, V> HashIndex<K, V>
where
    K: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(keys: usize) -> Self {
        Self {
            slots: HashMap::with_capacity(keys),
            groups: Vec::with_capacity(keys),
            arrival: Vec::with_capacity(keys),
        }
    }

    /// Append `value` to the group for `key`, creating the group if needed.
    pub fn insert(&mut self, key: K, value: V) {
        let id = match self.slots.get(&key) {
            Some(&id) => id,
            None => {
                let id = self.groups.len();
                self.slots.insert(key.clone(), id);
                self.groups.push(Group {
                    key,
                    rows: Vec::new(),
                    matched: false,
                });
                id
            }
        };
        self.groups[id].rows.push(value);
        self.arrival.push(id);
    }

    /// Number of indexed rows.
    pub fn len(&self) -> usize {
        self.arrival.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrival.is_empty()
    }

    pub fn distinct_keys(&self) -> usize {
        self.groups.len()
    }

    /// Group id for `key`, if any row carried it.
    pub fn lookup(&self, key: &K) -> Option<usize> {
        self.slots.get(key).copied()
    }

    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.lookup(key).map(|id| self.group(id))
    }

    pub fn group(&self, id: usize) -> &[V] {
        &self.groups[id].rows
    }

    /// Record that a driving row matched this group; it is skipped by
    /// [`HashIndex::into_unmatched`].
    pub fn mark_matched(&mut self, id: usize) {
        self.groups[id].matched = true;
    }

    pub fn is_matched(&self, id: usize) -> bool {
        self.groups[id].matched
    }

    /// Groups in key encounter order.
    pub fn groups(&self) -> impl Iterator<Item = (&K, &[V])> + '_ {
        self.groups.iter().map(|g| (&g.key, g.rows.as_slice()))
    }

    /// Consume the index, yielding rows of never-matched groups in insertion
    /// order.
    pub fn into_unmatched(self) -> Unmatched<K, V> {
        let groups = self
            .groups
            .into_iter()
            .map(|g| {
                if g.matched {
                    None
                } else {
                    let mut rows = g.rows;
                    // Reversed so `pop` hands rows back front to back.
                    rows.reverse();
                    Some((g.key, rows))
                }
            })
            .collect();
        Unmatched {
            groups,
            arrival: self.arrival.into_iter(),
        }
    }
}

impl<K, V> Default for HashIndex<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Rows of unmatched groups, in the order they were inserted.
pub struct Unmatched<K, V> {
    groups: Vec<Option<(K, Vec<V>)>>,
    arrival: std::vec::IntoIter<usize>,
}

impl<K: Clone, V> Iterator for Unmatched<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        for id in self.arrival.by_ref() {
            if let Some((key, rows)) = &mut self.groups[id] {
                if let Some(row) = rows.pop() {
                    return Some((key.clone(), row));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(rows: &[(&'static str, i32)]) -> HashIndex<&'static str, i32> {
        let mut index = HashIndex::new();
        for &(k, v) in rows {
            index.insert(k, v);
        }
        index
    }

    #[test]
    fn test_groups_keep_arrival_order() {
        let index = build(&[("a", 1), ("b", 2), ("a", 3), ("a", 4)]);
        assert_eq!(index.len(), 4);
        assert_eq!(index.distinct_keys(), 2);
        assert_eq!(index.get(&"a"), Some(&[1, 3, 4][..]));
        assert_eq!(index.get(&"b"), Some(&[2][..]));
        assert_eq!(index.get(&"z"), None);
    }

    #[test]
    fn test_unmatched_follows_insertion_order() {
        let mut index = build(&[("a", 1), ("b", 2), ("c", 3), ("a", 4), ("c", 5)]);
        let b = index.lookup(&"b").unwrap();
        index.mark_matched(b);
        assert!(index.is_matched(b));

        let rest: Vec<_> = index.into_unmatched().collect();
        assert_eq!(rest, vec![("a", 1), ("c", 3), ("a", 4), ("c", 5)]);
    }

    #[test]
    fn test_unmatched_all_matched_is_empty() {
        let mut index = build(&[("a", 1), ("a", 2)]);
        let id = index.lookup(&"a").unwrap();
        index.mark_matched(id);
        assert_eq!(index.into_unmatched().count(), 0);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let rows = [("x", 1), ("y", 2), ("x", 3)];
        let first = build(&rows);
        let second = build(&rows);
        let a: Vec<_> = first.groups().map(|(k, v)| (*k, v.to_vec())).collect();
        let b: Vec<_> = second.groups().map(|(k, v)| (*k, v.to_vec())).collect();
        assert_eq!(a, b);
        assert_eq!(a, vec![("x", vec![1, 3]), ("y", vec![2])]);
    }
}
