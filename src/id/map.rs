//! Id-keyed map whose keys are allocated by an [`IdGenerator`]

use super::generator::{IdGenerator, IdGeneratorKind};
use super::IdKey;
use crate::error::{GraphError, GraphResult};
use rustc_hash::FxHashMap;

/// Map from generated identifiers to values
///
/// The key set is always exactly the set of ids the inner generator
/// considers in use: inserting a new key reserves it through the
/// generator, removing a key releases it. Bulk mutation that would bypass
/// that bookkeeping is not exposed.
#[derive(Debug, Clone)]
pub struct IdentifierMap<K, V> {
    entries: FxHashMap<K, V>,
    generator: IdGenerator,
}

impl<K: IdKey, V> IdentifierMap<K, V> {
    /// Create an empty map using the default (`set`) generator
    pub fn new() -> Self {
        Self::with_generator(IdGeneratorKind::default())
    }

    pub fn with_generator(kind: IdGeneratorKind) -> Self {
        IdentifierMap {
            entries: FxHashMap::default(),
            generator: IdGenerator::new(kind),
        }
    }

    /// Build a map from existing pairs, reserving each key in turn
    pub fn from_entries<I>(kind: IdGeneratorKind, entries: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut pairs: Vec<(K, V)> = entries.into_iter().collect();
        // Ascending order keeps the monotonic generator happy
        pairs.sort_by_key(|(key, _)| key.raw());

        let mut map = Self::with_generator(kind);
        for (key, value) in pairs {
            if map.contains_key(key) {
                return Err(GraphError::KeyConflict(key.raw()));
            }
            map.insert(key, value)?;
        }
        Ok(map)
    }

    pub fn generator_kind(&self) -> IdGeneratorKind {
        self.generator.kind()
    }

    pub fn generator(&self) -> &IdGenerator {
        &self.generator
    }

    /// Insert `value` under `key`, or under a freshly generated id when
    /// `key` is `None`. Returns the key used.
    pub fn add(&mut self, value: V, key: Option<K>) -> GraphResult<K> {
        let raw = self
            .generator
            .get_id(key.map(|key| key.raw()))
            .map_err(|err| conflict(err, key))?;
        let key = K::from_raw(raw);
        self.entries.insert(key, value);
        Ok(key)
    }

    /// Set the value stored under `key`
    ///
    /// A key not yet present is reserved through the generator first; an
    /// existing key is overwritten and its previous value returned.
    pub fn insert(&mut self, key: K, value: V) -> GraphResult<Option<V>> {
        if !self.entries.contains_key(&key) {
            self.generator
                .get_id(Some(key.raw()))
                .map_err(|err| conflict(err, Some(key)))?;
        }
        Ok(self.entries.insert(key, value))
    }

    /// Value under `key`, inserting `default()` first if the key is absent
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> GraphResult<&mut V>
    where
        F: FnOnce() -> V,
    {
        if !self.entries.contains_key(&key) {
            self.generator
                .get_id(Some(key.raw()))
                .map_err(|err| conflict(err, Some(key)))?;
        }
        Ok(self.entries.entry(key).or_insert_with(default))
    }

    /// Remove `key` and release its id
    pub fn remove(&mut self, key: K) -> Option<V> {
        let value = self.entries.remove(&key)?;
        // A live key was handed out by this generator and not released
        // since, so it is below `next_fresh` and not reclaimed
        let released = self.generator.release_id(key.raw());
        debug_assert!(released.is_ok(), "live key {} rejected on release", key.raw());
        Some(value)
    }

    /// Remove an arbitrary entry and release its id
    pub fn pop_item(&mut self) -> Option<(K, V)> {
        let key = *self.entries.keys().next()?;
        self.remove(key).map(|value| (key, value))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.generator.clear();
    }

    /// Copy the entries into a new map with the same generator strategy
    ///
    /// Unlike `clone`, the new generator only knows about the current keys:
    /// released ids above the highest key are forgotten.
    pub fn copy(&self) -> GraphResult<Self>
    where
        V: Clone,
    {
        let mut keys: Vec<K> = self.entries.keys().copied().collect();
        keys.sort_by_key(|key| key.raw());

        let mut generator = IdGenerator::new(self.generator.kind());
        for key in &keys {
            generator.get_id(Some(key.raw()))?;
        }

        Ok(IdentifierMap {
            entries: self.entries.clone(),
            generator,
        })
    }

    /// Bulk insertion is not supported, it would bypass per-key id
    /// bookkeeping. Always fails with [`GraphError::Unsupported`].
    pub fn update<I>(&mut self, _entries: I) -> GraphResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Err(GraphError::Unsupported("bulk update of an identifier map"))
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.entries.get(&key)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.entries.get_mut(&key)
    }

    pub fn contains_key(&self, key: K) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values()
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.entries.values_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.entries.iter().map(|(key, value)| (*key, value))
    }
}

impl<K: IdKey, V> Default for IdentifierMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

fn conflict<K: IdKey>(err: GraphError, key: Option<K>) -> GraphError {
    match (err, key) {
        (GraphError::IdInUse(raw), _) => GraphError::KeyConflict(raw),
        (_, Some(key)) => GraphError::KeyConflict(key.raw()),
        (err, None) => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_generates_ids() {
        let mut map: IdentifierMap<u64, &str> = IdentifierMap::new();
        let a = map.add("a", None).unwrap();
        let b = map.add("a", None).unwrap();
        assert_ne!(a, b);
        assert_eq!(map.len(), 2);
        assert!(map.values().all(|v| *v == "a"));
    }

    #[test]
    fn test_refuses_to_reuse_ids() {
        let mut map: IdentifierMap<u64, &str> = IdentifierMap::new();
        map.insert(0, "a").unwrap();
        map.add("b", None).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.add("c", Some(0)), Err(GraphError::KeyConflict(0)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_behaves_like_a_map() {
        let mut map: IdentifierMap<u64, char> = IdentifierMap::new();
        assert_eq!(map.insert(10, 'x'), Ok(None));
        assert_eq!(map.get(10), Some(&'x'));
        assert_eq!(map.remove(10), Some('x'));
        assert_eq!(map.remove(10), None);
        assert!(map.is_empty());

        map.insert(1, 'a').unwrap();
        assert_eq!(map.insert(1, 'b'), Ok(Some('a')));
        assert_eq!(map.pop_item(), Some((1, 'b')));
        assert_eq!(map.pop_item(), None);

        map.insert(2, 'c').unwrap();
        assert!(map.contains_key(2));
        assert!(!map.contains_key(10));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_removed_key_is_recycled() {
        let mut map: IdentifierMap<u64, ()> = IdentifierMap::with_generator(IdGeneratorKind::List);
        for _ in 0..3 {
            map.add((), None).unwrap();
        }
        map.remove(1);
        assert_eq!(map.add((), None), Ok(1));
    }

    #[test]
    fn test_max_generator_rejects_reinsert_after_remove() {
        let mut map: IdentifierMap<u64, ()> = IdentifierMap::with_generator(IdGeneratorKind::Max);
        map.add((), None).unwrap();
        map.remove(0);
        assert_eq!(map.insert(0, ()), Err(GraphError::KeyConflict(0)));
        assert!(map.is_empty());
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut map: IdentifierMap<u64, Vec<i32>> = IdentifierMap::new();
        map.get_or_insert_with(10, Vec::new).unwrap().push(10);
        map.get_or_insert_with(10, Vec::new).unwrap().push(11);
        assert_eq!(map.get(10), Some(&vec![10, 11]));
        // 0..10 were backfilled as free ids
        assert_eq!(map.add(vec![], None), Ok(0));
    }

    #[test]
    fn test_from_entries_reserves_keys() {
        let map = IdentifierMap::from_entries(IdGeneratorKind::Set, vec![(3u64, 'c'), (1, 'a')]).unwrap();
        assert_eq!(map.len(), 2);
        let mut map = map;
        let fresh = map.add('z', None).unwrap();
        assert!(fresh != 1 && fresh != 3);
        assert_eq!(map.len(), 3);

        let max = IdentifierMap::from_entries(IdGeneratorKind::Max, vec![(5u64, 'e'), (2, 'b')]).unwrap();
        assert_eq!(max.generator().next_fresh(), 6);
    }

    #[test]
    fn test_clear_resets_generator() {
        let mut map: IdentifierMap<u64, ()> = IdentifierMap::new();
        map.insert(7, ()).unwrap();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.generator().next_fresh(), 0);
        assert_eq!(map.add((), None), Ok(0));
    }

    #[test]
    fn test_copy_rederives_generator() {
        let mut map: IdentifierMap<u64, String> = IdentifierMap::with_generator(IdGeneratorKind::List);
        map.insert(2, "two".to_string()).unwrap();
        map.insert(9, "nine".to_string()).unwrap();
        map.remove(9);
        map.insert(4, "four".to_string()).unwrap();

        let copy = map.copy().unwrap();
        assert_eq!(copy.generator_kind(), IdGeneratorKind::List);
        assert_eq!(copy.len(), 2);
        assert_eq!(copy.get(4).map(String::as_str), Some("four"));
        assert_eq!(copy.generator().next_fresh(), 5);

        let cloned = map.clone();
        assert_eq!(cloned.generator(), map.generator());
    }

    #[test]
    fn test_copy_reserves_every_key() {
        for kind in [IdGeneratorKind::Max, IdGeneratorKind::Set, IdGeneratorKind::List] {
            let mut map: IdentifierMap<u64, u64> = IdentifierMap::with_generator(kind);
            for key in [0, 3, 7, 12] {
                map.insert(key, key * 2).unwrap();
            }
            map.remove(3);

            let mut copy = map.copy().unwrap();
            assert_eq!(copy.len(), 3);
            assert_eq!(copy.generator().next_fresh(), 13);
            for key in [0, 7, 12] {
                assert!(!copy.generator().is_reclaimed(key));
                assert_eq!(copy.add(0, Some(key)), Err(GraphError::KeyConflict(key)));
            }
        }
    }

    #[test]
    fn test_update_is_unsupported() {
        let mut map: IdentifierMap<u64, i32> = IdentifierMap::new();
        let result = map.update(vec![(1, 1)]);
        assert!(matches!(result, Err(GraphError::Unsupported(_))));
        assert!(map.is_empty());
    }
}
