//! Caller-supplied key equality and hashing.
//!
//! A [`HashTable`](crate::HashTable) never derives equality or hashing from
//! the key type on its own; both are handed in at construction. Any closure
//! or `fn` item of the right shape works through the blanket impls below,
//! and [`StdEq`]/[`StdHash`] adapt keys that already implement `Eq`/`Hash`.
//!
//! The two must agree: `keys_equal(a, b)` implies
//! `hash_key(a) == hash_key(b)`, and hashing must be deterministic for the
//! lifetime of the table.

use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Key equality predicate.
pub trait KeyEq<K: ?Sized> {
    fn keys_equal(&self, a: &K, b: &K) -> bool;
}

impl<K: ?Sized, F> KeyEq<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn keys_equal(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

/// Key hash function.
pub trait KeyHash<K: ?Sized> {
    fn hash_key(&self, key: &K) -> u64;
}

impl<K: ?Sized, F> KeyHash<K> for F
where
    F: Fn(&K) -> u64,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self(key)
    }
}

/// Equality through `K: Eq`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdEq;

impl<K: ?Sized + Eq> KeyEq<K> for StdEq {
    #[inline]
    fn keys_equal(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// Hashing through `K: Hash` and a `BuildHasher`.
///
/// The builder is stored once, so every key is hashed with the same state.
#[derive(Clone, Debug, Default)]
pub struct StdHash<S = DefaultHashBuilder>(pub S);

impl<K: ?Sized + Hash, S: BuildHasher> KeyHash<K> for StdHash<S> {
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self.0.hash_one(key)
    }
}

const FNV_OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;
const FNV_PRIME: u64 = 1099511628211;

/// 64-bit FNV-1a over `bytes` (offset basis `0xcbf29ce484222325`).
pub fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

pub fn fnv1a_u64(key: &u64) -> u64 {
    fnv1a(&key.to_ne_bytes())
}

pub fn fnv1a_i32(key: &i32) -> u64 {
    fnv1a(&key.to_ne_bytes())
}

/// Hashes the bit pattern, so `0.0` and `-0.0` hash differently while
/// comparing equal under `==`. Pair it with a bitwise equality.
pub fn fnv1a_f64(key: &f64) -> u64 {
    fnv1a(&key.to_ne_bytes())
}

pub fn fnv1a_str(key: &str) -> u64 {
    fnv1a(key.as_bytes())
}
