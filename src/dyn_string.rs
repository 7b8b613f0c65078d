//! DynString: byte string over `DynArray<u8>` that always ends in a `0`
//! terminator. The terminator is stored but never counted in `len()`.

use crate::dyn_array::DynArray;
use crate::error::{AllocError, ArrayError};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::{FromStr, Utf8Error};

const NUL: u8 = 0;

#[derive(Clone)]
pub struct DynString {
    bytes: DynArray<u8>,
}

impl DynString {
    /// Empty string: just the terminator.
    pub fn new() -> Self {
        Self {
            bytes: DynArray::from(vec![NUL]),
        }
    }

    /// Copy `src` into a fresh string sized for it plus the terminator.
    pub fn try_from_bytes(src: &[u8]) -> Result<Self, AllocError> {
        let capacity = src.len().checked_add(1).ok_or(AllocError::CapacityOverflow)?;
        let mut bytes = DynArray::with_sentinel(capacity, NUL)?;
        bytes.try_extend(src.iter().copied())?;
        bytes.push_back(NUL)?;
        Ok(Self { bytes })
    }

    /// Length in bytes, terminator excluded.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes the underlying array can hold before growing, terminator included.
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Drop every byte but the terminator; capacity is retained.
    pub fn clear(&mut self) {
        self.bytes.truncate(1);
        if let Some(first) = self.bytes.get_mut(0) {
            *first = NUL;
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes.as_slice()[..self.len()]
    }

    /// Contents followed by the terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }

    /// Byte at `pos`, or `0` when `pos >= len()`.
    pub fn at(&self, pos: usize) -> u8 {
        if pos < self.len() {
            self.bytes.get(pos)
        } else {
            NUL
        }
    }

    pub fn front(&self) -> u8 {
        self.at(0)
    }

    /// Last byte before the terminator, or `0` when empty.
    pub fn back(&self) -> u8 {
        match self.len() {
            0 => NUL,
            len => self.at(len - 1),
        }
    }

    /// Append one byte in front of the terminator.
    pub fn push(&mut self, byte: u8) -> Result<(), AllocError> {
        let end = self.len();
        self.bytes.push_back(NUL)?;
        let written = self.bytes.set(end, byte);
        debug_assert!(written);
        Ok(())
    }

    /// Remove the last byte; the terminator itself is never removed.
    pub fn pop(&mut self) -> Option<u8> {
        match self.len() {
            0 => None,
            len => self.bytes.remove(len - 1),
        }
    }

    pub fn append_bytes(&mut self, src: &[u8]) -> Result<(), AllocError> {
        let required = self
            .bytes
            .len()
            .checked_add(src.len())
            .ok_or(AllocError::CapacityOverflow)?;
        self.bytes.reserve(required)?;
        let end = self.len();
        self.bytes.truncate(end);
        self.bytes.try_extend(src.iter().copied())?;
        self.bytes.push_back(NUL)
    }

    pub fn append_str(&mut self, src: &str) -> Result<(), AllocError> {
        self.append_bytes(src.as_bytes())
    }

    pub fn concat(&mut self, other: &DynString) -> Result<(), AllocError> {
        self.append_bytes(other.as_bytes())
    }

    /// Insert `byte` at `pos`; `pos == len()` appends.
    pub fn insert(&mut self, pos: usize, byte: u8) -> Result<(), ArrayError> {
        let len = self.len();
        if pos > len {
            return Err(ArrayError::OutOfBounds { index: pos, len });
        }
        self.bytes.insert(pos, byte)
    }

    /// Remove and return the byte at `pos`; `None` when `pos >= len()`.
    pub fn erase(&mut self, pos: usize) -> Option<u8> {
        if pos < self.len() {
            self.bytes.remove(pos)
        } else {
            None
        }
    }
}

impl Default for DynString {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&str> for DynString {
    type Error = AllocError;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        Self::try_from_bytes(src.as_bytes())
    }
}

impl FromStr for DynString {
    type Err = AllocError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::try_from_bytes(src.as_bytes())
    }
}

impl PartialEq for DynString {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for DynString {}

impl PartialEq<str> for DynString {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for DynString {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialOrd for DynString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Byte-wise lexicographic order; a proper prefix sorts first.
impl Ord for DynString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for DynString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Display for DynString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for DynString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&String::from_utf8_lossy(self.as_bytes()), f)
    }
}
