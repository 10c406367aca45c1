//! Map that remembers the order in which its keys were first inserted.

use std::{collections::HashMap, fmt::Debug, hash::Hash};

/// Map from keys to values that stores the values compactly in a [`Vec`] in
/// the order their keys were first inserted, with a [`HashMap`] from each key
/// to the index of its value.
///
/// Overwriting the value of an existing key keeps its position, so iteration
/// order only depends on the order of first insertion.
#[derive(Clone, Debug)]
pub struct InsertionOrderedMap<K, V> {
    indices_for_keys: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> InsertionOrderedMap<K, V>
where
    K: Copy + Hash + Eq + Debug,
{
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self {
            indices_for_keys: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// The number of entries in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the map has an entry for the given key.
    pub fn contains_key(&self, key: K) -> bool {
        self.indices_for_keys.contains_key(&key)
    }

    /// Returns the position of the entry for the given key, or [`None`] if
    /// the key is not present.
    pub fn idx(&self, key: K) -> Option<usize> {
        self.indices_for_keys.get(&key).copied()
    }

    /// Returns a reference to the value for the given key, or [`None`] if the
    /// key is not present.
    pub fn get(&self, key: K) -> Option<&V> {
        self.idx(key).map(|idx| &self.entries[idx].1)
    }

    /// Returns a mutable reference to the value for the given key, or
    /// [`None`] if the key is not present.
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.idx(key).map(|idx| &mut self.entries[idx].1)
    }

    /// Inserts the given value for the given key. If the key is already
    /// present, its value is replaced in place and the old value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.idx(key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.indices_for_keys.insert(key, self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns a mutable reference to the value for the given key, inserting
    /// the value produced by the given closure at the end if the key is not
    /// present.
    pub fn get_or_insert_with(&mut self, key: K, create_value: impl FnOnce() -> V) -> &mut V {
        let idx = match self.idx(key) {
            Some(idx) => idx,
            None => {
                let idx = self.entries.len();
                self.indices_for_keys.insert(key, idx);
                self.entries.push((key, create_value()));
                idx
            }
        };
        &mut self.entries[idx].1
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    /// Returns an iterator over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Returns an iterator over the key-value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.indices_for_keys.clear();
        self.entries.clear();
    }
}

impl<K, V> Default for InsertionOrderedMap<K, V>
where
    K: Copy + Hash + Eq + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_map_is_empty() {
        let map = InsertionOrderedMap::<u32, &str>::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert!(map.get(0).is_none());
    }

    #[test]
    fn inserted_keys_iterate_in_insertion_order() {
        let mut map = InsertionOrderedMap::new();
        map.insert(40, "a");
        map.insert(2, "b");
        map.insert(100, "c");
        assert_eq!(map.keys().collect::<Vec<_>>(), vec![40, 2, 100]);
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn overwriting_value_keeps_position() {
        let mut map = InsertionOrderedMap::new();
        map.insert(1, "first");
        map.insert(2, "second");
        let old = map.insert(1, "replaced");
        assert_eq!(old, Some("first"));
        assert_eq!(map.len(), 2);
        assert_eq!(map.idx(1), Some(0));
        assert_eq!(
            map.iter().collect::<Vec<_>>(),
            vec![(1, &"replaced"), (2, &"second")]
        );
    }

    #[test]
    fn get_or_insert_with_only_creates_missing_values() {
        let mut map = InsertionOrderedMap::new();
        *map.get_or_insert_with(7, || 0) += 1;
        *map.get_or_insert_with(7, || 100) += 1;
        assert_eq!(map.get(7), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn clearing_removes_all_entries() {
        let mut map = InsertionOrderedMap::new();
        map.insert('x', 1.0);
        map.insert('y', 2.0);
        map.clear();
        assert!(map.is_empty());
        assert!(!map.contains_key('x'));
        map.insert('y', 3.0);
        assert_eq!(map.idx('y'), Some(0));
    }
}
