//! The slot array behind [`ProbeMap`](crate::ProbeMap).
//!
//! Keys are placed by linear probing from `hash & mask`. Instead of tombstones the table
//! remembers the longest probe sequence it has ever needed for the current array and
//! stops every search after that many steps. Removal simply empties the slot, so a later
//! search may walk over holes, but never further than `max_probe_offset`.

use core::alloc::Layout;
use core::mem;
use hashbrown::TryReserveError;

/// Smallest array ever allocated.
pub(crate) const MIN_SLOTS: usize = 8;

pub(crate) enum Slot<K, V> {
    Vacant,
    Occupied(K, V),
}

impl<K, V> Slot<K, V> {
    #[cfg_attr(feature = "inline", inline)]
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(..))
    }

    #[cfg_attr(feature = "inline", inline)]
    pub(crate) fn pair(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied(k, v) => Some((k, v)),
            Slot::Vacant => None,
        }
    }

    #[cfg_attr(feature = "inline", inline)]
    pub(crate) fn pair_mut(&mut self) -> Option<(&K, &mut V)> {
        match self {
            Slot::Occupied(k, v) => Some((k, v)),
            Slot::Vacant => None,
        }
    }

    pub(crate) fn into_pair(self) -> Option<(K, V)> {
        match self {
            Slot::Occupied(k, v) => Some((k, v)),
            Slot::Vacant => None,
        }
    }

    fn take(&mut self) -> Option<(K, V)> {
        mem::replace(self, Slot::Vacant).into_pair()
    }
}

impl<K: Clone, V: Clone> Clone for Slot<K, V> {
    fn clone(&self) -> Self {
        match self {
            Slot::Occupied(k, v) => Slot::Occupied(k.clone(), v.clone()),
            Slot::Vacant => Slot::Vacant,
        }
    }
}

/// Number of pairs an array of `slots` may hold: `floor(slots * 3 / 4)`.
///
/// `slots` is zero or a power of two no smaller than [`MIN_SLOTS`], so subtracting a
/// quarter is exact and cannot overflow.
#[cfg_attr(feature = "inline", inline)]
pub(crate) const fn max_load(slots: usize) -> usize {
    slots - (slots >> 2)
}

/// Smallest power of two `L >= MIN_SLOTS` with `capacity <= max_load(L)`.
pub(crate) fn slots_for_capacity(capacity: usize) -> Option<usize> {
    // ceil(capacity * 4 / 3)
    let min_slots = capacity.checked_mul(4)?.checked_add(2)? / 3;
    min_slots.max(MIN_SLOTS).checked_next_power_of_two()
}

pub(crate) struct RawTable<K, V> {
    slots: Vec<Slot<K, V>>,
    count: usize,
    max_probe_offset: usize,
}

impl<K: Clone, V: Clone> Clone for RawTable<K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            count: self.count,
            max_probe_offset: self.max_probe_offset,
        }
    }
}

impl<K, V> RawTable<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            count: 0,
            max_probe_offset: 0,
        }
    }

    /// Allocates room for `capacity` pairs. Even a capacity of zero gets [`MIN_SLOTS`].
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let len = slots_for_capacity(capacity).ok_or(TryReserveError::CapacityOverflow)?;

        Ok(Self {
            slots: alloc_slots(len)?,
            count: 0,
            max_probe_offset: 0,
        })
    }

    #[cfg_attr(feature = "inline", inline)]
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    #[cfg_attr(feature = "inline", inline)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn max_probe_offset(&self) -> usize {
        self.max_probe_offset
    }

    pub(crate) fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Slot<K, V>] {
        &mut self.slots
    }

    pub(crate) fn into_slots(self) -> Vec<Slot<K, V>> {
        self.slots
    }

    #[cfg_attr(feature = "inline", inline)]
    fn mask(&self) -> usize {
        debug_assert!(
            self.slots.len().is_power_of_two(),
            "slot count must be a power of two"
        );

        self.slots.len() - 1
    }

    /// Whether one more key can be placed without breaking the 3/4 load bound.
    /// An unallocated table always needs to grow.
    #[cfg_attr(feature = "inline", inline)]
    pub(crate) fn should_grow(&self) -> bool {
        self.slots.is_empty() || self.count >= max_load(self.slots.len())
    }

    /// Index of the first occupied slot at or after `index`, or the slot count.
    pub(crate) fn next_occupied(&self, index: usize) -> usize {
        self.slots
            .iter()
            .skip(index)
            .position(Slot::is_occupied)
            .map_or(self.slots.len(), |offset| index + offset)
    }

    /// Scans at most `max_probe_offset + 1` slots from the home index of `hash`.
    #[cfg_attr(feature = "inline", inline)]
    pub(crate) fn find(&self, hash: u64, mut eq: impl FnMut(&K) -> bool) -> Option<usize> {
        // An unallocated table holds nothing, and has no mask to apply.
        if self.slots.is_empty() {
            return None;
        }

        let mask = self.mask();
        let mut index = hash as usize & mask;

        for _ in 0..=self.max_probe_offset {
            if let Slot::Occupied(k, _) = &self.slots[index] {
                if eq(k) {
                    return Some(index);
                }
            }

            index = (index + 1) & mask;
        }

        None
    }

    /// Places a key known to be absent into a table known to have room for it.
    ///
    /// This is also the primitive replayed by every rehash.
    pub(crate) fn insert_nonexistent(&mut self, hash: u64, key: K, value: V) -> usize {
        debug_assert!(self.count < max_load(self.slots.len()), "table needs to grow");

        let mask = self.mask();
        let mut index = hash as usize & mask;
        let mut offset = 0;

        while self.slots[index].is_occupied() {
            index = (index + 1) & mask;
            offset += 1;
        }

        self.slots[index] = Slot::Occupied(key, value);
        self.count += 1;

        if offset > self.max_probe_offset {
            self.max_probe_offset = offset;
        }

        index
    }

    #[cfg_attr(feature = "inline", inline)]
    pub(crate) fn get(&self, index: usize) -> Option<(&K, &V)> {
        self.slots.get(index).and_then(Slot::pair)
    }

    #[cfg_attr(feature = "inline", inline)]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        self.slots.get_mut(index).and_then(Slot::pair_mut)
    }

    /// The pair at an index previously returned by [`find`](Self::find) or
    /// [`insert_nonexistent`](Self::insert_nonexistent).
    pub(crate) fn occupied(&self, index: usize) -> (&K, &V) {
        match self.get(index) {
            Some(pair) => pair,
            None => unreachable!("slot {index} is vacant"),
        }
    }

    pub(crate) fn occupied_mut(&mut self, index: usize) -> (&K, &mut V) {
        match self.get_mut(index) {
            Some(pair) => pair,
            None => unreachable!("slot {index} is vacant"),
        }
    }

    /// Empties the slot at `index`. Neighbouring slots and the probe bound are left alone.
    pub(crate) fn remove_at(&mut self, index: usize) -> Option<(K, V)> {
        let pair = self.slots[index].take()?;
        self.count -= 1;
        Some(pair)
    }

    /// Doubles the array, or allocates [`MIN_SLOTS`] if there is none yet.
    pub(crate) fn grow(&mut self, hasher: impl Fn(&K) -> u64) -> Result<(), TryReserveError> {
        let new_len = if self.slots.is_empty() {
            MIN_SLOTS
        } else {
            self.slots
                .len()
                .checked_mul(2)
                .ok_or(TryReserveError::CapacityOverflow)?
        };

        self.rehash(new_len, hasher)
    }

    /// Makes room for `additional` more pairs. Returns whether the array was replaced.
    pub(crate) fn reserve(
        &mut self,
        additional: usize,
        hasher: impl Fn(&K) -> u64,
    ) -> Result<bool, TryReserveError> {
        let wanted = self
            .count
            .checked_add(additional)
            .ok_or(TryReserveError::CapacityOverflow)?;

        if wanted == 0 || (!self.slots.is_empty() && wanted <= max_load(self.slots.len())) {
            return Ok(false);
        }

        let new_len = slots_for_capacity(wanted).ok_or(TryReserveError::CapacityOverflow)?;
        let new_len = new_len.max(self.slots.len());
        self.rehash(new_len, hasher)?;
        Ok(true)
    }

    /// Replaces the array with one of `new_len` slots and replays every pair into it,
    /// recomputing the probe bound from zero.
    ///
    /// The new array is fully allocated before the old one is touched, so an allocation
    /// failure leaves the table as it was.
    pub(crate) fn rehash(
        &mut self,
        new_len: usize,
        hasher: impl Fn(&K) -> u64,
    ) -> Result<(), TryReserveError> {
        debug_assert!(new_len.is_power_of_two() && new_len >= MIN_SLOTS);
        debug_assert!(self.count <= max_load(new_len));

        let new_slots = alloc_slots(new_len)?;
        let old_slots = mem::replace(&mut self.slots, new_slots);
        let old_len = old_slots.len();

        self.count = 0;
        self.max_probe_offset = 0;

        for (key, value) in old_slots.into_iter().filter_map(Slot::into_pair) {
            let hash = hasher(&key);
            self.insert_nonexistent(hash, key, value);
        }

        tracing::trace!(
            old_len,
            new_len,
            count = self.count,
            max_probe_offset = self.max_probe_offset,
            "rehashed probe table"
        );

        Ok(())
    }

    /// Drops every pair and releases the array.
    pub(crate) fn clear(&mut self) {
        self.slots = Vec::new();
        self.count = 0;
        self.max_probe_offset = 0;
    }
}

fn alloc_slots<K, V>(len: usize) -> Result<Vec<Slot<K, V>>, TryReserveError> {
    let layout =
        Layout::array::<Slot<K, V>>(len).map_err(|_| TryReserveError::CapacityOverflow)?;

    let mut slots = Vec::new();
    slots
        .try_reserve_exact(len)
        .map_err(|_| TryReserveError::AllocError { layout })?;
    slots.resize_with(len, || Slot::Vacant);

    Ok(slots)
}
