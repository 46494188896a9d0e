use super::{ProbeMap, TryReserveError};
use core::hash::{BuildHasherDefault, Hasher};

/// Hashes integers to themselves, so tests can choose home slots.
#[derive(Default)]
struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 << 8) | u64::from(b);
        }
    }

    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }
}

type IdentityMap<V> = ProbeMap<u64, V, BuildHasherDefault<IdentityHasher>>;

#[test]
fn set_and_get() {
    let mut map: ProbeMap<i32, i32> = ProbeMap::new();
    map.set(19, 420);
    assert_eq!(map.get(&19), Some(&420));
}

#[test]
fn new_is_unallocated() {
    let map: ProbeMap<i32, i32> = ProbeMap::new();

    assert_eq!(map.capacity(), 0);
    assert_eq!(map.load_factor(), 0.0);
    assert_eq!(map.get(&1), None);
    assert!(map.is_empty());
}

#[test]
fn with_capacity_sizes_array() {
    assert_eq!(ProbeMap::<u8, u8>::with_capacity(0).capacity(), 8);
    assert_eq!(ProbeMap::<u8, u8>::with_capacity(1).capacity(), 8);
    assert_eq!(ProbeMap::<u8, u8>::with_capacity(6).capacity(), 8);
    assert_eq!(ProbeMap::<u8, u8>::with_capacity(7).capacity(), 16);
    assert_eq!(ProbeMap::<u8, u8>::with_capacity(100).capacity(), 256);
}

#[test]
fn empty_literal_is_allocated() {
    let map: ProbeMap<u32, u32> = ProbeMap::from([]);

    assert!(map.is_empty());
    assert_eq!(map.capacity(), 8);
    assert_eq!(IdentityMap::<()>::with_capacity_and_hasher(0, Default::default()).capacity(), 8);
}

#[test]
fn with_capacity_avoids_growth() {
    let mut map = ProbeMap::with_capacity(12);

    for i in 0..12 {
        map.set(i, i);
    }

    assert_eq!(map.capacity(), 16);
}

#[test]
fn update_does_not_grow() {
    let mut map = ProbeMap::new();

    for i in 0..6 {
        map.set(i, i);
    }

    for i in 0..6 {
        map.set(i, i + 1);
    }

    assert_eq!(map.capacity(), 8);
    assert_eq!(map.len(), 6);
}

#[test]
fn removal_keeps_probe_offset() {
    let mut map = IdentityMap::default();

    // all three share home slot 0
    map.set(0, "a");
    map.set(8, "b");
    map.set(16, "c");
    assert_eq!(map.max_probe_offset(), 2);

    assert_eq!(map.remove(&8), Some("b"));
    assert_eq!(map.max_probe_offset(), 2);
    assert_eq!(map.get(&16), Some(&"c"));
    assert_eq!(map.get(&0), Some(&"a"));
}

#[test]
fn hole_is_reused_by_colliding_key() {
    let mut map = IdentityMap::default();

    map.set(0, 0);
    map.set(8, 8);
    map.set(16, 16);
    map.remove(&8);

    // 24 also starts at slot 0 and lands in the hole left by 8
    map.set(24, 24);

    let cursor = map.find(&24);
    assert_eq!(cursor.index(), 1);
    assert_eq!(map.max_probe_offset(), 2);
    assert_eq!(map.len(), 3);
}

#[test]
fn growth_resets_probe_offset() {
    let mut map = IdentityMap::default();

    for k in [0, 8, 16, 24, 32, 40] {
        map.set(k, ());
    }

    assert_eq!(map.capacity(), 8);
    assert_eq!(map.max_probe_offset(), 5);

    // the seventh key forces 16 slots: 0, 16, 32 share slot 0; 8, 24, 40 share slot 8
    map.set(48, ());

    assert_eq!(map.capacity(), 16);
    assert_eq!(map.max_probe_offset(), 3);

    for k in [0, 8, 16, 24, 32, 40, 48] {
        assert!(map.contains_key(&k));
    }
}

#[test]
fn lookup_stops_at_probe_bound() {
    let mut map = IdentityMap::default();

    map.set(1, 1);
    map.set(2, 2);
    map.set(3, 3);

    assert_eq!(map.max_probe_offset(), 0);
    // 9 shares home slot 1 with key 1, and only that one slot is inspected
    assert_eq!(map.get(&9), None);
}

#[test]
fn get_or_variants() {
    let mut map = ProbeMap::new();
    map.set("present", String::from("yes"));

    assert_eq!(map.get_or("present", String::from("no")), "yes");
    assert_eq!(map.get_or("absent", String::from("no")), "no");

    let fallback = String::from("fallback");
    assert_eq!(map.get_or_ref("absent", &fallback), "fallback");
    assert_eq!(map.get_or_ref("present", &fallback), "yes");

    assert_eq!(map.get_or_else("absent", || String::from("lazy")), "lazy");
}

#[test]
fn get_or_default_inserts_once() {
    let mut map: ProbeMap<&str, Vec<u32>> = ProbeMap::new();

    map.get_or_default("list").push(1);
    map.get_or_default("list").push(2);

    assert_eq!(map.len(), 1);
    assert_eq!(map.get("list"), Some(&vec![1, 2]));
}

#[test]
fn get_or_insert_with_skips_closure_when_present() {
    let mut map = ProbeMap::new();
    map.set(1, 10);

    let value = map.get_or_insert_with(1, || unreachable!());
    assert_eq!(*value, 10);
}

#[test]
fn remove_absent_is_noop() {
    let mut map = ProbeMap::new();
    map.set(1, 1);

    assert_eq!(map.remove(&2), None);
    assert_eq!(map.len(), 1);

    let mut empty: ProbeMap<i32, i32> = ProbeMap::new();
    assert_eq!(empty.remove(&2), None);
}

#[test]
fn take_leaves_empty_map() {
    let mut map: ProbeMap<i32, i32> = (0..10).map(|i| (i, i)).collect();

    let moved = std::mem::take(&mut map);

    assert_eq!(moved.len(), 10);
    assert!(map.is_empty());
    assert_eq!(map.capacity(), 0);

    map.set(1, 2);
    assert_eq!(map.get(&1), Some(&2));
}

#[test]
fn clone_is_deep() {
    let mut map = ProbeMap::new();
    map.set(1, String::from("one"));

    let mut copy = map.clone();
    copy.set(1, String::from("uno"));
    copy.set(2, String::from("dos"));

    assert_eq!(map.get(&1).map(String::as_str), Some("one"));
    assert_eq!(map.len(), 1);
    assert_eq!(copy.len(), 2);
}

#[test]
fn swap_exchanges_contents() {
    let mut a = ProbeMap::from([(1, 'a')]);
    let mut b = ProbeMap::from([(2, 'b'), (3, 'c')]);

    a.swap(&mut b);

    assert_eq!(a.len(), 2);
    assert_eq!(b.get(&1), Some(&'a'));
}

#[test]
fn cursor_walk_and_erase() {
    let mut map: ProbeMap<u32, u32> = (0..5).map(|i| (i, i * i)).collect();

    let cursor = map.find(&3);
    assert_ne!(cursor, map.end());
    assert_eq!(map.get_at(cursor), (&3, &9));

    *map.get_at_mut(cursor).1 += 1;
    assert_eq!(map.get(&3), Some(&10));

    assert_eq!(map.erase(cursor), (3, 10));
    assert_eq!(map.find(&3), map.end());
    assert_eq!(map.len(), 4);
}

#[test]
fn cursor_survives_value_update() {
    let mut map = ProbeMap::new();
    map.set("a", 1);

    let cursor = map.find("a");
    map.set("a", 2);

    assert_eq!(map.get_at(cursor), (&"a", &2));
}

#[test]
#[should_panic(expected = "cursor was invalidated")]
fn cursor_invalidated_by_insert() {
    let mut map = ProbeMap::new();
    map.set("a", 1);

    let cursor = map.find("a");
    map.set("b", 2);

    map.get_at(cursor);
}

#[test]
#[should_panic(expected = "cursor belongs to another map")]
fn cursor_from_other_map() {
    let mut a = ProbeMap::new();
    a.set(1, 1);
    let b = a.clone();

    let cursor = b.find(&1);
    a.erase(cursor);
}

#[test]
#[should_panic(expected = "cannot dereference the end cursor")]
fn end_cursor_dereference() {
    let mut map = ProbeMap::new();
    map.set(1, 1);

    map.get_at(map.end());
}

#[test]
#[should_panic(expected = "cannot advance the end cursor")]
fn end_cursor_advance() {
    let mut map = ProbeMap::new();
    map.set(1, 1);

    map.advance(map.end());
}

#[test]
#[should_panic(expected = "cannot erase the end cursor")]
fn end_cursor_erase() {
    let mut map = ProbeMap::new();
    map.set(1, 1);

    let end = map.end();
    map.erase(end);
}

#[test]
#[should_panic(expected = "cursor was invalidated")]
fn cursor_invalidated_by_remove() {
    let mut map = ProbeMap::from([(1, 1), (2, 2)]);

    let cursor = map.find(&1);
    map.remove(&2);

    map.get_at(cursor);
}

#[test]
#[should_panic(expected = "cursor was invalidated")]
fn cursor_invalidated_by_clear() {
    let mut map = ProbeMap::from([(1, 1)]);

    let cursor = map.find(&1);
    map.clear();
    map.set(1, 1);

    map.get_at(cursor);
}

#[test]
#[should_panic(expected = "cursor was invalidated")]
fn cursor_invalidated_by_retain() {
    let mut map = ProbeMap::from([(1, 1), (2, 2)]);

    let cursor = map.find(&1);
    map.retain(|k, _| *k == 1);

    map.get_at(cursor);
}

#[test]
fn cursor_kept_by_retain_without_removal() {
    let mut map = ProbeMap::from([(1, 1), (2, 2)]);

    let cursor = map.find(&1);
    map.retain(|_, v| {
        *v += 1;
        true
    });

    assert_eq!(map.get_at(cursor), (&1, &2));
}

#[test]
#[should_panic(expected = "cursor was invalidated")]
fn cursor_invalidated_by_panicking_retain() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let mut map: ProbeMap<u32, u32> = (0..6).map(|i| (i, i)).collect();
    let cursor = map.begin();
    let mut seen = 0;

    let result = catch_unwind(AssertUnwindSafe(|| {
        map.retain(|_, _| {
            seen += 1;
            assert!(seen < 3, "predicate gave up");
            false
        })
    }));

    assert!(result.is_err());
    assert_eq!(map.len(), 4);

    map.get_at(cursor);
}

#[test]
fn failed_reserve_keeps_contents() {
    let mut map: ProbeMap<u32, String> = (0..20).map(|i| (i, i.to_string())).collect();

    let len = map.len();
    let capacity = map.capacity();
    let offset = map.max_probe_offset();
    let cursor = map.find(&7);

    assert_eq!(
        map.try_reserve(usize::MAX),
        Err(TryReserveError::CapacityOverflow)
    );
    assert_eq!(
        map.try_reserve(usize::MAX - len),
        Err(TryReserveError::CapacityOverflow)
    );

    assert_eq!(map.len(), len);
    assert_eq!(map.capacity(), capacity);
    assert_eq!(map.max_probe_offset(), offset);
    assert_eq!(map.get_at(cursor), (&7, &String::from("7")));

    for i in 0..20 {
        assert_eq!(map.get(&i), Some(&i.to_string()));
    }
}

#[test]
fn debug_format() {
    let map = ProbeMap::from([(1, 2)]);

    assert_eq!(format!("{:?}", map), "{1: 2}");
}
