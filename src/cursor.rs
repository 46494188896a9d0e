/// A position inside a [`ProbeMap`](crate::ProbeMap), in slot order.
///
/// Cursors are plain values and do not borrow the map. Instead each cursor remembers
/// which map produced it and the map's structural generation at that time; using it
/// with another map, or after a key was inserted or removed, panics.
///
/// Cursors from the same map state are equal when they point at the same slot, so the
/// result of [`find`](crate::ProbeMap::find) can be compared against
/// [`end`](crate::ProbeMap::end).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor {
    index: usize,
    owner: u64,
    generation: u64,
}

impl Cursor {
    pub(crate) fn new(index: usize, owner: u64, generation: u64) -> Self {
        Self {
            index,
            owner,
            generation,
        }
    }

    /// The slot index this cursor points at. The end cursor points one past the last slot.
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn owner(&self) -> u64 {
        self.owner
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}
