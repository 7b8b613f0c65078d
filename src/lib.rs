//! pocket-collections: small owned containers with explicit growth
//! policies.
//!
//! Internal Design:
//!
//! Summary
//! - `DynArray<T>`: contiguous growable array. Capacity is tracked
//!   explicitly and grows to `max(capacity * 2, required)`; out-of-range
//!   reads return a sentinel chosen at construction.
//! - `HashTable<K, V, E, H>`: open addressing with linear probing over a
//!   power-of-two slot array. Erase leaves a tombstone; the table doubles
//!   before any insert that would push occupancy past 3/4 of capacity, and
//!   rehashing reinserts every live entry into a fresh buffer.
//! - `DynString`: byte string over `DynArray<u8>` that keeps a trailing
//!   `0` terminator outside its reported length.
//!
//! Constraints
//! - Single-threaded. Containers are `Send` when their contents are;
//!   `HashTable` is `!Sync`, so shared use across threads needs a lock
//!   around the whole table.
//! - Equality and hashing are caller-supplied (`KeyEq`/`KeyHash`, with
//!   blanket impls for closures and `fn` items). They must agree: equal
//!   keys hash equally.
//! - Slots carry an explicit `Free`/`Occupied`/`Tombstone` status, so zero
//!   and other "empty looking" values are ordinary keys.
//!
//! Failure model
//! - Allocation failure during creation or growth is returned as
//!   `AllocError`; the container keeps its previous state.
//! - Out-of-range array reads yield the sentinel, out-of-range `set`
//!   returns `false`, and missing keys yield `None`. None of these panic.
//!
//! Hashing and rehashing
//! - Each occupied slot caches the hash computed at insert. Probes compare
//!   the cached hash before calling the equality predicate, and rehashing
//!   uses only cached hashes, so no caller code runs during a rehash.
//! - Tombstones are reclaimed only by a rehash (or `clear`). A table whose
//!   non-occupied slots are all tombstones still terminates every probe
//!   after one full cycle.
//!
//! Reentrancy
//! - Table entry points that call the equality or hash functions hold a
//!   debug-only guard; re-entering the same table from inside those
//!   callbacks panics in debug builds and is unchecked in release builds.
//!
//! Notes and non-goals
//! - No shrinking: `rehash` never goes below the current capacity.
//! - No ordered iteration: table iteration follows slot order, which
//!   changes whenever the table rehashes.
//! - No serialization.

pub mod dyn_array;
mod dyn_array_proptest;
pub mod dyn_string;
pub mod error;
pub mod hash;
pub mod hash_table;
mod hash_table_proptest;
mod reentrancy;

// Public surface
pub use dyn_array::DynArray;
pub use dyn_string::DynString;
pub use error::{AllocError, ArrayError};
pub use hash::{KeyEq, KeyHash, StdEq, StdHash};
pub use hash_table::HashTable;
