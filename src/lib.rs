//! A single-threaded hashmap using open addressing and linear probing.
//!
//! Deletion leaves no tombstones behind. Instead the map caches the longest probe
//! sequence it has needed since the last rehash and never searches further than that,
//! which keeps lookups bounded even after many removals have punched holes into the
//! probe chains.

#[cfg(feature = "arbitrary")]
mod arbitrary;
mod cursor;
mod entry;
mod iter;
mod table;
#[cfg(test)]
mod tests;
mod util;

pub use cursor::Cursor;
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use hashbrown::{DefaultHashBuilder, TryReserveError};
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;
use std::alloc::handle_alloc_error;
use table::RawTable;
use util::{make_hash, map_in_place_2, next_table_id};

/// ProbeMap is a hashmap backed by one contiguous, power-of-two sized array of slots.
///
/// The array is allocated on the first insertion (or by [`with_capacity`]) and doubles
/// whenever a new key would push the load factor over 3/4. It never shrinks.
///
/// [`with_capacity`]: ProbeMap::with_capacity
pub struct ProbeMap<K, V, S = DefaultHashBuilder> {
    table: RawTable<K, V>,
    hasher: S,
    id: u64,
    generation: u64,
}

impl<K: Clone, V: Clone, S: Clone> Clone for ProbeMap<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            hasher: self.hasher.clone(),
            id: next_table_id(),
            generation: 0,
        }
    }
}

impl<K, V, S> Default for ProbeMap<K, V, S>
where
    K: Eq + Hash,
    S: Default + BuildHasher,
{
    fn default() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K: Eq + Hash, V> ProbeMap<K, V, DefaultHashBuilder> {
    /// Creates a new, unallocated ProbeMap.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut reviews = ProbeMap::new();
    /// reviews.set("Veloren", "What a fantastic game!");
    /// assert_eq!(reviews.capacity(), 8);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates a new ProbeMap that can hold `capacity` pairs without growing.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mappings = ProbeMap::<u32, u32>::with_capacity(7);
    /// assert_eq!(mappings.capacity(), 16);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> ProbeMap<K, V, S> {
    /// Returns the number of pairs in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut people = ProbeMap::new();
    /// people.set("Albin", 15);
    /// people.set("Jones", 22);
    /// people.set("Charlie", 27);
    /// assert_eq!(people.len(), 3);
    /// ```
    #[cfg_attr(feature = "inline", inline)]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map holds no pairs.
    #[cfg_attr(feature = "inline", inline)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots in the backing array, zero if it is unallocated.
    pub fn capacity(&self) -> usize {
        self.table.slot_count()
    }

    /// Returns `len / capacity`, or `0.0` for an unallocated map.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut map = ProbeMap::new();
    /// assert_eq!(map.load_factor(), 0.0);
    /// map.set(1, 1);
    /// map.set(2, 2);
    /// assert_eq!(map.load_factor(), 0.25);
    /// ```
    pub fn load_factor(&self) -> f64 {
        match self.capacity() {
            0 => 0.0,
            slots => self.len() as f64 / slots as f64,
        }
    }

    /// The number of extra slots a lookup may scan past a key's home slot.
    ///
    /// Only ever raised by insertions; removals keep it, and it starts again from zero
    /// whenever the array is rebuilt.
    pub fn max_probe_offset(&self) -> usize {
        self.table.max_probe_offset()
    }

    /// Returns a reference to the map's [`BuildHasher`].
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Removes every pair and releases the backing array.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut stats = ProbeMap::new();
    /// stats.set("Goals", 4);
    /// stats.clear();
    /// assert!(stats.is_empty());
    /// assert_eq!(stats.capacity(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
        self.bump_generation();
    }

    /// Swaps the contents of two maps.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other)
    }

    /// Creates an iterator over the pairs in slot order.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut words = ProbeMap::new();
    /// words.set("hello", "world");
    /// assert_eq!(words.iter().count(), 1);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.table.slots(), self.len())
    }

    /// Creates an iterator over the pairs in slot order, with mutable values.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut map = ProbeMap::new();
    /// map.set("Johnny", 21);
    /// map.iter_mut().for_each(|(_, v)| *v += 1);
    /// assert_eq!(map.get("Johnny"), Some(&22));
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let len = self.len();
        IterMut::new(self.table.slots_mut(), len)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }

    /// Keeps only the pairs for which `f` returns `true`.
    ///
    /// Removed slots are simply emptied, the same way [`remove`](ProbeMap::remove) does it.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut people: ProbeMap<_, _> = (0..10).map(|i| (i, i * 2)).collect();
    /// people.retain(|k, _| k % 2 == 0);
    /// assert_eq!(people.len(), 5);
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(&K, &mut V) -> bool) {
        let mut removed = false;

        for index in 0..self.table.slot_count() {
            let keep = match self.table.get_mut(index) {
                Some((k, v)) => f(k, v),
                None => continue,
            };

            if !keep {
                // Cursors must go stale before `f` runs again, in case it panics.
                if !removed {
                    self.bump_generation();
                    removed = true;
                }

                self.table.remove_at(index);
            }
        }
    }

    /// Cursor to the first occupied slot, or [`end`](ProbeMap::end) if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut map = ProbeMap::new();
    /// assert_eq!(map.begin(), map.end());
    ///
    /// map.set("a", 1);
    /// let cursor = map.begin();
    /// assert_eq!(map.get_at(cursor), (&"a", &1));
    /// assert_eq!(map.advance(cursor), map.end());
    /// ```
    pub fn begin(&self) -> Cursor {
        self.cursor(self.table.next_occupied(0))
    }

    /// Cursor one past the last slot. Every end cursor of the same map state compares equal.
    pub fn end(&self) -> Cursor {
        self.cursor(self.table.slot_count())
    }

    /// Moves a cursor to the next occupied slot.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` is the end cursor, was obtained from another map, or was
    /// invalidated by a structural change to this map.
    pub fn advance(&self, cursor: Cursor) -> Cursor {
        let index = self.check_cursor(cursor);
        assert!(index < self.capacity(), "cannot advance the end cursor");

        self.cursor(self.table.next_occupied(index + 1))
    }

    /// Returns the pair under a cursor.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`advance`](ProbeMap::advance).
    pub fn get_at(&self, cursor: Cursor) -> (&K, &V) {
        let index = self.check_cursor(cursor);
        assert!(index < self.capacity(), "cannot dereference the end cursor");

        self.table.occupied(index)
    }

    /// Returns the pair under a cursor, with a mutable value.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`advance`](ProbeMap::advance).
    pub fn get_at_mut(&mut self, cursor: Cursor) -> (&K, &mut V) {
        let index = self.check_cursor(cursor);
        assert!(index < self.capacity(), "cannot dereference the end cursor");

        self.table.occupied_mut(index)
    }

    /// Removes the pair under a cursor and returns it. Every outstanding cursor,
    /// including this one, is invalidated.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`advance`](ProbeMap::advance).
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut map = ProbeMap::new();
    /// map.set("Johnny", 21);
    /// let cursor = map.find("Johnny");
    /// assert_eq!(map.erase(cursor), ("Johnny", 21));
    /// assert!(map.is_empty());
    /// ```
    pub fn erase(&mut self, cursor: Cursor) -> (K, V) {
        let index = self.check_cursor(cursor);
        assert!(index < self.capacity(), "cannot erase the end cursor");

        match self.remove_index(index) {
            Some(pair) => pair,
            None => unreachable!("cursor points at vacant slot {index}"),
        }
    }

    fn cursor(&self, index: usize) -> Cursor {
        Cursor::new(index, self.id, self.generation)
    }

    fn check_cursor(&self, cursor: Cursor) -> usize {
        assert_eq!(cursor.owner(), self.id, "cursor belongs to another map");
        assert_eq!(
            cursor.generation(),
            self.generation,
            "cursor was invalidated by a structural change"
        );

        cursor.index()
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub(crate) fn remove_index(&mut self, index: usize) -> Option<(K, V)> {
        let pair = self.table.remove_at(index)?;
        self.bump_generation();
        Some(pair)
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> ProbeMap<K, V, S> {
    /// Creates a new, unallocated ProbeMap with the provided hasher.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let s = RandomState::new();
    /// let mut reviews = ProbeMap::with_hasher(s);
    /// reviews.set("Veloren", "What a fantastic game!");
    /// ```
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            table: RawTable::new(),
            hasher,
            id: next_table_id(),
            generation: 0,
        }
    }

    /// Creates a new ProbeMap that can hold `capacity` pairs without growing, using the
    /// provided hasher. The array is always allocated, with at least 8 slots even for a
    /// capacity of zero.
    ///
    /// # Panics
    ///
    /// Panics if the required slot count overflows `usize`, and aborts on allocation failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::{DefaultHashBuilder, ProbeMap};
    ///
    /// let hasher = DefaultHashBuilder::default();
    /// let map: ProbeMap<u32, u32> = ProbeMap::with_capacity_and_hasher(0, hasher);
    /// assert_eq!(map.capacity(), 8);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            table: infallible(RawTable::with_capacity(capacity)),
            hasher,
            id: next_table_id(),
            generation: 0,
        }
    }

    /// Makes room for at least `additional` more pairs without growing.
    ///
    /// # Panics
    ///
    /// Panics if the new slot count overflows `usize`, and aborts on allocation failure.
    pub fn reserve(&mut self, additional: usize) {
        infallible(self.try_reserve(additional))
    }

    /// Fallible version of [`reserve`](ProbeMap::reserve). On error the map is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::{ProbeMap, TryReserveError};
    ///
    /// let mut map: ProbeMap<u64, u64> = ProbeMap::new();
    /// assert_eq!(map.try_reserve(usize::MAX), Err(TryReserveError::CapacityOverflow));
    /// assert!(map.try_reserve(100).is_ok());
    /// assert_eq!(map.capacity(), 256);
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let old_len = self.table.slot_count();
        let hasher = &self.hasher;

        if self.table.reserve(additional, |k| make_hash(hasher, k))? {
            self.bump_generation();

            tracing::debug!(
                additional,
                old_len,
                new_len = self.table.slot_count(),
                "reserved probe table"
            );
        }

        Ok(())
    }

    fn hash_key<Q>(&self, key: &Q) -> u64
    where
        Q: Hash + ?Sized,
    {
        make_hash(&self.hasher, key)
    }

    fn find_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_key(key);
        self.table.find(hash, |k| k.borrow() == key)
    }

    /// Places a key known to be absent, growing the array first if the key would push
    /// the load factor over 3/4.
    pub(crate) fn insert_unique(&mut self, hash: u64, key: K, value: V) -> usize {
        if self.table.should_grow() {
            let hasher = &self.hasher;
            infallible(self.table.grow(|k| make_hash(hasher, k)));
        }

        self.bump_generation();
        self.table.insert_nonexistent(hash, key, value)
    }

    /// Get an immutable reference to the value of a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut youtubers = ProbeMap::new();
    /// youtubers.set("Bosnian Bill", 457000);
    /// assert_eq!(youtubers.get("Bosnian Bill"), Some(&457000));
    /// ```
    #[cfg_attr(feature = "inline", inline)]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Get a mutable reference to the value of a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut class = ProbeMap::new();
    /// class.set("Albin", 15);
    /// *class.get_mut("Albin").unwrap() -= 1;
    /// assert_eq!(class.get("Albin"), Some(&14));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_index(key)?;
        self.table.get_mut(index).map(|(_, v)| v)
    }

    /// Get the stored key and value of a key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_index(key)?;
        self.table.get(index)
    }

    /// Checks if the map contains a specific key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_index(key).is_some()
    }

    /// Returns a copy of the value of a key, or `default` if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut map = ProbeMap::new();
    /// map.set("one", 1);
    /// assert_eq!(map.get_or("one", 0), 1);
    /// assert_eq!(map.get_or("two", 0), 0);
    /// ```
    pub fn get_or<Q>(&self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Returns the value of a key, or the caller supplied `fallback` if the key is absent.
    pub fn get_or_ref<'a, Q>(&'a self, key: &Q, fallback: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).unwrap_or(fallback)
    }

    /// Returns a copy of the value of a key, or the result of `default` if the key is absent.
    pub fn get_or_else<Q>(&self, key: &Q, default: impl FnOnce() -> V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get(key).cloned().unwrap_or_else(default)
    }

    /// Inserts a key and a value, replacing the value if the key is already present.
    /// Returns a reference to the stored value.
    ///
    /// Replacing a value never changes the layout of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut map = ProbeMap::new();
    /// map.set("a", 1);
    /// *map.set("a", 2) += 1;
    /// assert_eq!(map.get("a"), Some(&3));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn set(&mut self, key: K, value: V) -> &mut V {
        let hash = self.hash_key(&key);

        let index = match self.table.find(hash, |k| *k == key) {
            Some(index) => {
                let (_, slot) = self.table.occupied_mut(index);
                *slot = value;
                index
            }
            None => self.insert_unique(hash, key, value),
        };

        self.table.occupied_mut(index).1
    }

    /// Inserts a key and a value, returning the value it replaced, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut map = ProbeMap::new();
    /// assert_eq!(map.insert("I am the key!", "And I am the value!"), None);
    /// assert_eq!(map.insert("I am the key!", "Replaced"), Some("And I am the value!"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut entry) => Some(entry.insert(value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    /// Returns a mutable reference to the value of a key, inserting `V::default()` first
    /// if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut counts: ProbeMap<&str, u32> = ProbeMap::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.get_or_default(word) += 1;
    /// }
    /// assert_eq!(counts.get("a"), Some(&2));
    /// ```
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Returns a mutable reference to the value of a key, inserting the result of
    /// `default` first if the key is absent.
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let hash = self.hash_key(&key);

        let index = match self.table.find(hash, |k| *k == key) {
            Some(index) => index,
            None => self.insert_unique(hash, key, default()),
        };

        self.table.occupied_mut(index).1
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut soccer_team = ProbeMap::new();
    /// soccer_team.set("Jack", "Goalie");
    /// assert_eq!(soccer_team.remove("Jack"), Some("Goalie"));
    /// assert_eq!(soccer_team.remove("Jack"), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if it was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_index(key)?;
        self.remove_index(index)
    }

    /// Cursor to the slot holding `key`, or [`end`](ProbeMap::end) if it is absent.
    pub fn find<Q>(&self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.find_index(key) {
            Some(index) => self.cursor(index),
            None => self.end(),
        }
    }

    /// Replaces the value of a key with the result of `f`, if the key is present.
    ///
    /// If `f` panics the process is aborted.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut names = ProbeMap::new();
    /// names.set("Guido", String::from("van Rossum"));
    /// names.alter("Guido", |_, v| v + "!");
    /// assert_eq!(names.get("Guido").map(String::as_str), Some("van Rossum!"));
    /// ```
    pub fn alter<Q>(&mut self, key: &Q, f: impl FnOnce(&K, V) -> V)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(index) = self.find_index(key) {
            map_in_place_2(self.table.occupied_mut(index), f);
        }
    }

    /// Advanced entry API that tries to mimic `std::collections::HashMap`.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let mut map = ProbeMap::new();
    /// *map.entry("Johnny").or_insert(20) += 1;
    /// *map.entry("Johnny").or_insert(20) += 1;
    /// assert_eq!(map.get("Johnny"), Some(&22));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, S> {
        let hash = self.hash_key(&key);

        match self.table.find(hash, |k| *k == key) {
            Some(index) => Entry::Occupied(OccupiedEntry::new(self, index)),
            None => Entry::Vacant(VacantEntry::new(self, key, hash)),
        }
    }
}

fn infallible<T>(result: Result<T, TryReserveError>) -> T {
    match result {
        Ok(value) => value,
        Err(TryReserveError::CapacityOverflow) => panic!("capacity overflow"),
        Err(TryReserveError::AllocError { layout }) => handle_alloc_error(layout),
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ProbeMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Eq + Hash, V, const N: usize> From<[(K, V); N]> for ProbeMap<K, V, DefaultHashBuilder> {
    /// Later pairs overwrite earlier pairs with the same key.
    ///
    /// # Examples
    ///
    /// ```
    /// use probemap::ProbeMap;
    ///
    /// let map = ProbeMap::from([("a", 1), ("b", 2), ("a", 3)]);
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get("a"), Some(&3));
    /// ```
    fn from(pairs: [(K, V); N]) -> Self {
        let mut map = Self::with_capacity(N);
        map.extend(pairs);
        map
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Extend<(K, V)> for ProbeMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, intoiter: I) {
        let iter = intoiter.into_iter();
        self.reserve(iter.size_hint().0);

        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K: Eq + Hash, V, S: BuildHasher + Default> FromIterator<(K, V)> for ProbeMap<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(intoiter: I) -> Self {
        let mut map = ProbeMap::default();
        map.extend(intoiter);
        map
    }
}

impl<K, V, S> IntoIterator for ProbeMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let len = self.len();
        IntoIter::new(self.table.into_slots(), len)
    }
}

impl<'a, K, V, S> IntoIterator for &'a ProbeMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ProbeMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(feature = "typesize")]
impl<K, V, S> typesize::TypeSize for ProbeMap<K, V, S>
where
    K: typesize::TypeSize,
    V: typesize::TypeSize,
{
    fn extra_size(&self) -> usize {
        let slots_size = self.capacity() * mem::size_of::<table::Slot<K, V>>();
        let contents_size: usize = self
            .iter()
            .map(|(k, v)| k.extra_size() + v.extra_size())
            .sum();

        slots_size + contents_size
    }
}
