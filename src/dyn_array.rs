//! DynArray: contiguous growable array with an explicit, observable
//! capacity policy and sentinel-returning reads.

use crate::error::{AllocError, ArrayError};
use core::fmt;

/// Multiplier applied to the capacity whenever a write needs more room.
pub const GROWTH_FACTOR: usize = 2;

/// Densely packed sequence of `T` that owns its buffer.
///
/// `capacity` is tracked separately from the backing `Vec` so growth follows
/// `max(capacity * GROWTH_FACTOR, required)` exactly, independent of what the
/// allocator hands back. Reads past the end return a clone of the sentinel
/// chosen at construction instead of failing.
pub struct DynArray<T> {
    data: Vec<T>,
    capacity: usize,
    empty: T,
}

impl<T: Default> DynArray<T> {
    /// Zero-capacity array; the first write allocates.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            capacity: 0,
            empty: T::default(),
        }
    }

    /// Array with room for `starting_capacity` elements and `T::default()`
    /// as the empty-value sentinel.
    pub fn with_capacity(starting_capacity: usize) -> Result<Self, AllocError> {
        Self::with_sentinel(starting_capacity, T::default())
    }
}

impl<T: Default> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DynArray<T> {
    /// Array with room for `starting_capacity` elements whose out-of-range
    /// reads yield `empty`.
    pub fn with_sentinel(starting_capacity: usize, empty: T) -> Result<Self, AllocError> {
        let mut data = Vec::new();
        data.try_reserve_exact(starting_capacity)?;
        Ok(Self {
            data,
            capacity: starting_capacity,
            empty,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The value returned by reads that have no element to return.
    pub fn sentinel(&self) -> &T {
        &self.empty
    }

    /// Make room for at least `min_capacity` elements.
    ///
    /// Growth is geometric: the new capacity is the larger of twice the
    /// current one and `min_capacity`. On failure nothing changes.
    pub fn reserve(&mut self, min_capacity: usize) -> Result<(), AllocError> {
        if min_capacity <= self.capacity {
            return Ok(());
        }
        let new_capacity = self
            .capacity
            .saturating_mul(GROWTH_FACTOR)
            .max(min_capacity);
        self.data.try_reserve_exact(new_capacity - self.data.len())?;
        self.capacity = new_capacity;
        debug_assert!(self.data.capacity() >= self.capacity);
        Ok(())
    }

    fn reserve_one_more(&mut self) -> Result<(), AllocError> {
        let required = self
            .data
            .len()
            .checked_add(1)
            .ok_or(AllocError::CapacityOverflow)?;
        self.reserve(required)
    }

    /// Append `value`, growing first when the array is full.
    pub fn push_back(&mut self, value: T) -> Result<(), AllocError> {
        self.reserve_one_more()?;
        self.data.push(value);
        Ok(())
    }

    /// Remove and return the last element, or `None` when empty.
    pub fn try_pop_back(&mut self) -> Option<T> {
        self.data.pop()
    }

    pub fn get_ref(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    /// Overwrite the element at `index`. Returns `false`, leaving the array
    /// untouched, when `index >= len()`.
    #[must_use = "an out-of-range set is silently ignored"]
    pub fn set(&mut self, index: usize, value: T) -> bool {
        match self.data.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Insert `value` at `index`, shifting every later element one slot to
    /// the right. `index == len()` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), ArrayError> {
        let len = self.data.len();
        if index > len {
            return Err(ArrayError::OutOfBounds { index, len });
        }
        self.reserve_one_more()?;
        self.data.insert(index, value);
        Ok(())
    }

    /// Remove the element at `index`, shifting every later element one slot
    /// to the left. `None` when `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.data.len() {
            Some(self.data.remove(index))
        } else {
            None
        }
    }

    /// Drop every element; capacity is retained.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Keep the first `len` elements and drop the rest. No-op when
    /// `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Append every item of `iter`, stopping at the first allocation failure.
    /// Items pushed before the failure stay in the array.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), AllocError>
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.push_back(value)?;
        }
        Ok(())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }
}

impl<T: Clone> DynArray<T> {
    /// Remove and return the last element; an empty array yields the sentinel.
    pub fn pop_back(&mut self) -> T {
        self.data.pop().unwrap_or_else(|| self.empty.clone())
    }

    /// Clone of the element at `index`, or of the sentinel when out of range.
    pub fn get(&self, index: usize) -> T {
        self.data
            .get(index)
            .cloned()
            .unwrap_or_else(|| self.empty.clone())
    }

    /// Deep copy that reports allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self, AllocError> {
        let mut copy = Self::with_sentinel(self.capacity, self.empty.clone())?;
        copy.data.extend_from_slice(&self.data);
        Ok(copy)
    }
}

impl<T: Clone> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        let mut data = Vec::with_capacity(self.capacity);
        data.extend_from_slice(&self.data);
        Self {
            data,
            capacity: self.capacity,
            empty: self.empty.clone(),
        }
    }
}

impl<T: Default> From<Vec<T>> for DynArray<T> {
    fn from(data: Vec<T>) -> Self {
        let capacity = data.len();
        Self {
            data,
            capacity,
            empty: T::default(),
        }
    }
}

/// Appends through [`DynArray::push_back`], so capacity follows the same
/// doubling ladder.
///
/// # Panics
///
/// Panics if the array cannot grow. Use [`DynArray::try_extend`] to get the
/// allocation failure back instead.
impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if let Err(err) = self.push_back(value) {
                panic!("DynArray::extend: {err}");
            }
        }
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(starting_capacity: usize, values: &[i32]) -> DynArray<i32> {
        let mut a = DynArray::with_capacity(starting_capacity).unwrap();
        for &v in values {
            a.push_back(v).unwrap();
        }
        a
    }

    /// Invariant: set overwrites in place; length and capacity are unchanged.
    #[test]
    fn push_then_set_overwrites_in_place() {
        let mut a = filled(4, &[1, 2, 3, 4]);
        assert!(a.set(2, -1));
        assert_eq!(a.as_slice(), &[1, 2, -1, 4]);
        assert_eq!(a.len(), 4);
        assert_eq!(a.capacity(), 4);
    }

    /// Invariant: capacity doubles only when a write finds the array full.
    #[test]
    fn growth_doubles_when_full() {
        let mut a = DynArray::with_capacity(3).unwrap();
        let mut seen = Vec::new();
        for v in 0..13 {
            a.push_back(v).unwrap();
            seen.push(a.capacity());
        }
        assert_eq!(seen, [3, 3, 3, 6, 6, 6, 12, 12, 12, 12, 12, 12, 24]);
    }

    /// Invariant: a zero-capacity array allocates on the first write and then
    /// grows geometrically.
    #[test]
    fn zero_capacity_grows_on_first_write() {
        let mut a: DynArray<u8> = DynArray::new();
        assert_eq!(a.capacity(), 0);
        a.push_back(7).unwrap();
        assert_eq!(a.capacity(), 1);
        a.push_back(8).unwrap();
        assert_eq!(a.capacity(), 2);
        a.push_back(9).unwrap();
        assert_eq!(a.capacity(), 4);
        assert_eq!(a.as_slice(), &[7, 8, 9]);
    }

    /// Invariant: an explicit reserve larger than twice the capacity is
    /// honored exactly.
    #[test]
    fn reserve_takes_larger_of_doubling_and_request() {
        let mut a: DynArray<i32> = DynArray::with_capacity(2).unwrap();
        a.reserve(3).unwrap();
        assert_eq!(a.capacity(), 4);
        a.reserve(100).unwrap();
        assert_eq!(a.capacity(), 100);
        a.reserve(50).unwrap();
        assert_eq!(a.capacity(), 100);
    }

    /// Invariant: popping an empty array returns the sentinel.
    #[test]
    fn pop_back_empty_yields_sentinel() {
        let mut a = DynArray::with_sentinel(2, -99).unwrap();
        a.push_back(5).unwrap();
        assert_eq!(a.pop_back(), 5);
        assert_eq!(a.pop_back(), -99);
        assert_eq!(a.try_pop_back(), None);
        assert!(a.is_empty());
    }

    /// Invariant: out-of-range reads return the sentinel and writes report
    /// failure without touching any element.
    #[test]
    fn out_of_range_access_is_silent() {
        let mut a = filled(2, &[10, 20]);
        assert_eq!(a.get(2), 0);
        assert_eq!(a.get(usize::MAX), 0);
        assert!(a.get_ref(2).is_none());
        assert!(!a.set(2, 5));
        assert_eq!(a.as_slice(), &[10, 20]);
        assert!(a.remove(2).is_none());
        assert_eq!(a.len(), 2);
    }

    /// Invariant: insert shifts the tail right; index == len appends;
    /// index > len fails without side effects.
    #[test]
    fn insert_shifts_tail_right() {
        let mut a = filled(4, &[1, 2, 4]);
        a.insert(2, 3).unwrap();
        assert_eq!(a.as_slice(), &[1, 2, 3, 4]);
        a.insert(0, 0).unwrap();
        a.insert(5, 5).unwrap();
        assert_eq!(a.as_slice(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(a.capacity(), 8);

        match a.insert(7, 9) {
            Err(ArrayError::OutOfBounds { index: 7, len: 6 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(a.len(), 6);
    }

    /// Invariant: remove shifts the tail left and hands back the element.
    #[test]
    fn remove_shifts_tail_left() {
        let mut a = filled(4, &[1, 2, 3, 4]);
        assert_eq!(a.remove(1), Some(2));
        assert_eq!(a.as_slice(), &[1, 3, 4]);
        assert_eq!(a.remove(2), Some(4));
        assert_eq!(a.as_slice(), &[1, 3]);
        assert_eq!(a.capacity(), 4);
    }

    /// Invariant: clear empties the array but keeps its capacity.
    #[test]
    fn clear_retains_capacity() {
        let mut a = filled(2, &[1, 2, 3]);
        let cap = a.capacity();
        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.capacity(), cap);
        a.push_back(9).unwrap();
        assert_eq!(a.as_slice(), &[9]);
    }

    /// Invariant: clones own their buffer; mutating one leaves the other intact.
    #[test]
    fn clone_is_deep() {
        let a = filled(4, &[1, 2, 3]);
        let mut b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.capacity(), a.capacity());
        assert!(b.set(0, 100));
        b.push_back(4).unwrap();
        assert_eq!(a.as_slice(), &[1, 2, 3]);
        assert_eq!(b.as_slice(), &[100, 2, 3, 4]);

        let c = a.try_clone().unwrap();
        assert_eq!(c, a);
    }

    /// Invariant: an impossible reservation fails and leaves the array as is.
    #[test]
    fn failed_growth_leaves_array_untouched() {
        let mut a = filled(2, &[1, 2]);
        assert!(a.reserve(usize::MAX).is_err());
        assert_eq!(a.capacity(), 2);
        assert_eq!(a.as_slice(), &[1, 2]);
        a.push_back(3).unwrap();
        assert_eq!(a.capacity(), 4);
    }

    /// Invariant: `extend` grows on the same doubling ladder as `push_back`.
    #[test]
    fn extend_follows_growth_ladder() {
        let mut a = filled(2, &[1]);
        a.extend([2, 3]);
        assert_eq!(a.as_slice(), &[1, 2, 3]);
        assert_eq!(a.capacity(), 4);
        a.extend(4..=9);
        assert_eq!(a.len(), 9);
        assert_eq!(a.capacity(), 16);
        a.extend(core::iter::empty());
        assert_eq!(a.capacity(), 16);
    }

    /// Invariant: elements with drop glue are moved, not duplicated, by shifts.
    #[test]
    fn owned_elements_move_through_shifts() {
        let mut a: DynArray<String> = DynArray::new();
        for s in ["b", "d"] {
            a.push_back(s.to_string()).unwrap();
        }
        a.insert(0, "a".to_string()).unwrap();
        a.insert(2, "c".to_string()).unwrap();
        assert_eq!(a.remove(3).as_deref(), Some("d"));
        let collected: Vec<&str> = a.iter().map(String::as_str).collect();
        assert_eq!(collected, ["a", "b", "c"]);
        assert_eq!(a.get(10), "");
    }
}
