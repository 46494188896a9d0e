use crate::ProbeMap;
use core::hash::{BuildHasher, Hash};
use core::mem;

/// A view into a single key of a [`ProbeMap`], which may either be present or absent.
pub enum Entry<'a, K, V, S> {
    Occupied(OccupiedEntry<'a, K, V, S>),
    Vacant(VacantEntry<'a, K, V, S>),
}

impl<'a, K: Eq + Hash, V, S: BuildHasher> Entry<'a, K, V, S> {
    /// Apply a function to the stored value if it exists.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());

                Entry::Occupied(entry)
            }

            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Get the key of the entry.
    pub fn key(&self) -> &K {
        match *self {
            Entry::Occupied(ref entry) => entry.key(),
            Entry::Vacant(ref entry) => entry.key(),
        }
    }

    /// Return a mutable reference to the element if it exists,
    /// otherwise insert the default and return a mutable reference to that.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(V::default()),
        }
    }

    /// Return a mutable reference to the element if it exists,
    /// otherwise a provided value and return a mutable reference to that.
    pub fn or_insert(self, value: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(value),
        }
    }

    /// Return a mutable reference to the element if it exists,
    /// otherwise insert the result of a provided function and return a mutable reference to that.
    pub fn or_insert_with(self, value: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(value()),
        }
    }

    pub fn or_try_insert_with<E>(
        self,
        value: impl FnOnce() -> Result<V, E>,
    ) -> Result<&'a mut V, E> {
        match self {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(value()?)),
        }
    }

    /// Sets the value of the entry, and returns a reference to the inserted value.
    pub fn insert(self, value: V) -> &'a mut V {
        match self {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(value),
        }
    }
}

pub struct VacantEntry<'a, K, V, S> {
    map: &'a mut ProbeMap<K, V, S>,
    key: K,
    hash: u64,
}

impl<'a, K: Eq + Hash, V, S: BuildHasher> VacantEntry<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut ProbeMap<K, V, S>, key: K, hash: u64) -> Self {
        Self { map, key, hash }
    }

    /// Inserts the value, growing the map first if needed.
    pub fn insert(self, value: V) -> &'a mut V {
        let map = self.map;
        let index = map.insert_unique(self.hash, self.key, value);
        map.table.occupied_mut(index).1
    }

    pub fn into_key(self) -> K {
        self.key
    }

    pub fn key(&self) -> &K {
        &self.key
    }
}

pub struct OccupiedEntry<'a, K, V, S> {
    map: &'a mut ProbeMap<K, V, S>,
    index: usize,
}

impl<'a, K: Eq + Hash, V, S: BuildHasher> OccupiedEntry<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut ProbeMap<K, V, S>, index: usize) -> Self {
        Self { map, index }
    }

    pub fn get(&self) -> &V {
        self.map.table.occupied(self.index).1
    }

    pub fn get_mut(&mut self) -> &mut V {
        self.map.table.occupied_mut(self.index).1
    }

    /// Replaces the value in place and returns the old one. The layout of the map is untouched.
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    pub fn into_mut(self) -> &'a mut V {
        let map = self.map;
        map.table.occupied_mut(self.index).1
    }

    pub fn key(&self) -> &K {
        self.map.table.occupied(self.index).0
    }

    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    pub fn remove_entry(self) -> (K, V) {
        match self.map.remove_index(self.index) {
            Some(pair) => pair,
            None => unreachable!("occupied entry points at vacant slot {}", self.index),
        }
    }
}
