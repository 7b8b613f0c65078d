//! HashTable: open addressing with linear probing, tombstones on erase and
//! full-reinsertion rehash once the load factor would pass 3/4.
//!
//! Slots carry an explicit status, so every key value (including `0` or the
//! empty string) is an ordinary key. Each occupied slot also caches the hash
//! computed at insertion; rehashing places entries by that cached hash and
//! never calls the caller's hash or equality code.

use crate::error::AllocError;
use crate::hash::{KeyEq, KeyHash, StdEq, StdHash};
use crate::reentrancy::DebugReentrancy;
use core::fmt;
use core::hash::Hash;
use core::iter::FusedIterator;
use core::mem;

/// Load factor threshold `MAX_LOAD_NUMERATOR / MAX_LOAD_DENOMINATOR`.
pub const MAX_LOAD_NUMERATOR: usize = 3;
pub const MAX_LOAD_DENOMINATOR: usize = 4;

#[derive(Clone, Debug)]
enum Slot<K, V> {
    Free,
    Occupied { hash: u64, key: K, value: V },
    Tombstone,
}

impl<K, V> Slot<K, V> {
    fn entry(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    fn entry_mut(&mut self) -> Option<(&K, &mut V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }
}

/// Outcome of walking a probe sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Probe {
    /// Occupied slot holding an equal key.
    Hit(usize),
    /// Where the key would be inserted: the first tombstone on the path,
    /// otherwise the free slot that ended the walk.
    Vacant(usize),
    /// Every slot is occupied by an unequal key.
    Exhausted,
}

/// Walk from `hash & (len - 1)` until an equal key or a free slot turns up,
/// visiting each slot at most once. `slots.len()` must be a power of two.
fn find_slot<K, V, F>(slots: &[Slot<K, V>], hash: u64, mut is_match: F) -> Probe
where
    F: FnMut(&K) -> bool,
{
    let mask = slots.len() - 1;
    let mut index = (hash as usize) & mask;
    let mut tombstone = None;
    for _ in 0..slots.len() {
        match &slots[index] {
            Slot::Free => return Probe::Vacant(tombstone.unwrap_or(index)),
            Slot::Tombstone => {
                if tombstone.is_none() {
                    tombstone = Some(index);
                }
            }
            Slot::Occupied { hash: h, key, .. } => {
                if *h == hash && is_match(key) {
                    return Probe::Hit(index);
                }
            }
        }
        index = (index + 1) & mask;
    }
    match tombstone {
        Some(index) => Probe::Vacant(index),
        None => Probe::Exhausted,
    }
}

fn round_capacity(requested: usize) -> Result<usize, AllocError> {
    requested
        .max(1)
        .checked_next_power_of_two()
        .ok_or(AllocError::CapacityOverflow)
}

fn alloc_slots<K, V>(capacity: usize) -> Result<Vec<Slot<K, V>>, AllocError> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity)?;
    slots.resize_with(capacity, || Slot::Free);
    Ok(slots)
}

/// Map from `K` to `V` over a power-of-two array of statused slots.
///
/// `E` decides key equality and `H` hashes keys; both are fixed at
/// construction and must agree (equal keys hash equally).
pub struct HashTable<K, V, E = StdEq, H = StdHash> {
    slots: Vec<Slot<K, V>>,
    occupancy: usize,
    keys_equal: E,
    hasher: H,
    reentrancy: DebugReentrancy,
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    /// Table for keys that implement `Eq` and `Hash`, hashed with
    /// hashbrown's default builder.
    pub fn with_std_hasher(initial_capacity: usize) -> Self {
        Self::new(initial_capacity, StdEq, StdHash::default())
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::with_std_hasher(1)
    }
}

impl<K, V, E, H> HashTable<K, V, E, H>
where
    E: KeyEq<K>,
    H: KeyHash<K>,
{
    /// Table with `initial_capacity` rounded up to a power of two (at least
    /// one slot), all slots free.
    ///
    /// # Panics
    ///
    /// Panics if the rounded capacity overflows `usize` or cannot be
    /// allocated. [`HashTable::try_new`] reports both as `AllocError`.
    pub fn new(initial_capacity: usize, keys_equal: E, hasher: H) -> Self {
        match Self::try_new(initial_capacity, keys_equal, hasher) {
            Ok(table) => table,
            Err(err) => panic!("HashTable::new({initial_capacity}): {err}"),
        }
    }

    /// Fallible [`HashTable::new`]: rounds `initial_capacity` up to a power
    /// of two (at least one slot) and returns `AllocError::CapacityOverflow`
    /// when that overflows, or `AllocError::Reserve` when the slot array
    /// cannot be allocated.
    pub fn try_new(initial_capacity: usize, keys_equal: E, hasher: H) -> Result<Self, AllocError> {
        let slots = alloc_slots(round_capacity(initial_capacity)?)?;
        Ok(Self::from_parts(slots, keys_equal, hasher))
    }

    fn from_parts(slots: Vec<Slot<K, V>>, keys_equal: E, hasher: H) -> Self {
        Self {
            slots,
            occupancy: 0,
            keys_equal,
            hasher,
            reentrancy: DebugReentrancy::new(),
        }
    }

    fn find_index(&self, key: &K) -> Option<usize> {
        if self.occupancy == 0 {
            return None;
        }
        let _g = self.reentrancy.enter();
        let hash = self.hasher.hash_key(key);
        match find_slot(&self.slots, hash, |k| self.keys_equal.keys_equal(k, key)) {
            Probe::Hit(index) => Some(index),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    /// Value stored under `key`, or `None` if it is absent.
    pub fn find(&self, key: &K) -> Option<&V> {
        let index = self.find_index(key)?;
        self.slots[index].entry().map(|(_, v)| v)
    }

    /// Mutable access to the value under `key`; the key itself stays fixed.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.find_index(key)?;
        self.slots[index].entry_mut().map(|(_, v)| v)
    }

    /// Whether a live entry equal to `key` exists. Tombstones never match.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    fn needs_grow(&self) -> bool {
        self.occupancy.saturating_add(1).saturating_mul(MAX_LOAD_DENOMINATOR)
            > self.slots.len().saturating_mul(MAX_LOAD_NUMERATOR)
    }

    /// Insert or overwrite. Returns the previous value for an existing key.
    ///
    /// When one more entry would push the load factor past 3/4, the table
    /// first doubles its capacity; if that allocation fails the table is
    /// unchanged and the error is returned. An existing key keeps its slot
    /// and its originally stored key; only the value is replaced.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, AllocError> {
        if self.needs_grow() {
            let doubled = self
                .slots
                .len()
                .checked_mul(2)
                .ok_or(AllocError::CapacityOverflow)?;
            self.rehash_to(doubled)?;
        }

        let _g = self.reentrancy.enter();
        let hash = self.hasher.hash_key(&key);
        let keys_equal = &self.keys_equal;
        match find_slot(&self.slots, hash, |k| keys_equal.keys_equal(k, &key)) {
            Probe::Hit(index) => Ok(self.slots[index]
                .entry_mut()
                .map(|(_, slot_value)| mem::replace(slot_value, value))),
            Probe::Vacant(index) => {
                self.slots[index] = Slot::Occupied { hash, key, value };
                self.occupancy += 1;
                Ok(None)
            }
            Probe::Exhausted => unreachable!("load factor keeps a non-occupied slot"),
        }
    }

    /// Remove `key`, leaving a tombstone in its slot. Returns the stored key
    /// and value, or `None` if the key is absent.
    pub fn erase_entry(&mut self, key: &K) -> Option<(K, V)> {
        let index = self.find_index(key)?;
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied { key, value, .. } => {
                self.occupancy -= 1;
                Some((key, value))
            }
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    /// Remove `key` and return its value; `None` if it was not present.
    pub fn erase(&mut self, key: &K) -> Option<V> {
        self.erase_entry(key).map(|(_, v)| v)
    }
}

impl<K, V, E, H> HashTable<K, V, E, H> {
    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.occupancy
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupancy == 0
    }

    /// Number of slots; always a power of two.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.occupancy as f64 / self.slots.len() as f64
    }

    /// Slots left behind by erased entries and not yet reclaimed.
    pub fn tombstones(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Tombstone))
            .count()
    }

    /// Rebuild into a fresh buffer of at least `new_capacity` slots (rounded
    /// up to a power of two, never below the current capacity). Live entries
    /// are reinserted; tombstones are dropped. On allocation failure the
    /// table is unchanged.
    pub fn rehash(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        let target = round_capacity(new_capacity)?.max(self.slots.len());
        self.rehash_to(target)
    }

    fn rehash_to(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        debug_assert!(new_capacity.is_power_of_two());
        debug_assert!(new_capacity > self.occupancy);
        let mut fresh = alloc_slots(new_capacity)?;
        for slot in mem::take(&mut self.slots) {
            if let Slot::Occupied { hash, key, value } = slot {
                // Live keys are pairwise distinct, so no equality check is needed.
                match find_slot(&fresh, hash, |_| false) {
                    Probe::Vacant(index) => fresh[index] = Slot::Occupied { hash, key, value },
                    Probe::Hit(_) | Probe::Exhausted => {
                        unreachable!("fresh buffer is larger than the live entry count")
                    }
                }
            }
        }
        self.slots = fresh;
        Ok(())
    }

    /// Drop every entry and tombstone; capacity is retained.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Free;
        }
        self.occupancy = 0;
    }

    /// Entries in ascending slot order. The order is unrelated to insertion
    /// order and changes whenever the table rehashes.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            index: 0,
            remaining: self.occupancy,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.slots.iter_mut(),
            remaining: self.occupancy,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Check the structural invariants: occupancy matches the occupied slot
    /// count, capacity is a power of two, the load factor holds, and every
    /// live entry is reachable from its home slot before any free slot.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let cap = self.slots.len();
        assert!(cap.is_power_of_two(), "capacity {cap} not a power of two");
        let occupied = self
            .slots
            .iter()
            .filter(|s| matches!(s, Slot::Occupied { .. }))
            .count();
        assert_eq!(occupied, self.occupancy, "occupancy out of sync");
        assert!(
            self.occupancy * MAX_LOAD_DENOMINATOR <= cap * MAX_LOAD_NUMERATOR,
            "load factor exceeded: {} / {}",
            self.occupancy,
            cap
        );
        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied { hash, .. } = slot {
                let mut probe = (*hash as usize) & (cap - 1);
                while probe != index {
                    assert!(
                        !matches!(self.slots[probe], Slot::Free),
                        "free slot {probe} cuts off entry at {index}"
                    );
                    probe = (probe + 1) & (cap - 1);
                }
            }
        }
    }
}

impl<K: Clone, V: Clone, E: Clone, H: Clone> Clone for HashTable<K, V, E, H> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            occupancy: self.occupancy,
            keys_equal: self.keys_equal.clone(),
            hasher: self.hasher.clone(),
            reentrancy: DebugReentrancy::new(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, E, H> fmt::Debug for HashTable<K, V, E, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over `(&K, &V)` in slot order.
pub struct Iter<'a, K, V> {
    slots: &'a [Slot<K, V>],
    index: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index += 1;
            if let Some(entry) = slot.entry() {
                self.remaining -= 1;
                return Some(entry);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            index: self.index,
            remaining: self.remaining,
        }
    }
}

/// Iterator over `(&K, &mut V)` in slot order.
pub struct IterMut<'a, K, V> {
    inner: core::slice::IterMut<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.inner.by_ref() {
            if let Some(entry) = slot.entry_mut() {
                self.remaining -= 1;
                return Some(entry);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator over `(K, V)` in slot order.
pub struct IntoIter<K, V> {
    inner: std::vec::IntoIter<Slot<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.inner.by_ref() {
            if let Slot::Occupied { key, value, .. } = slot {
                self.remaining -= 1;
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<'a, K, V, E, H> IntoIterator for &'a HashTable<K, V, E, H> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, E, H> IntoIterator for &'a mut HashTable<K, V, E, H> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, E, H> IntoIterator for HashTable<K, V, E, H> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.slots.into_iter(),
            remaining: self.occupancy,
        }
    }
}
