use core::hash::{BuildHasher, Hash, Hasher};
use core::sync::atomic::{AtomicU64, Ordering};

pub(crate) fn make_hash<Q, S>(build_hasher: &S, key: &Q) -> u64
where
    Q: Hash + ?Sized,
    S: BuildHasher,
{
    let mut hasher = build_hasher.build_hasher();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Hands out a distinct token for every table instance, so cursors can be tied to the
/// table that produced them.
pub(crate) fn next_table_id() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(0);

    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// Runs `f` on the value behind `v` by value.
///
/// If the closure panics the process is aborted, since `v` would otherwise be left
/// pointing at a moved-out value.
pub(crate) fn map_in_place_2<T, U, F: FnOnce(U, T) -> T>((k, v): (U, &mut T), f: F) {
    replace_with::replace_with_or_abort(v, |v| f(k, v));
}
