//! Hash/equality abstraction the trie engine is generic over.
//!
//! The engine never calls `K::hash`/`K::eq` directly; every operation is
//! parameterised over a [`KeyProvider`] so a caller can swap in a
//! fixed-seed or domain-specific provider without the engine boxing or
//! dynamically dispatching it (monomorphised per instantiation).

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Supplies `hash` and `equals` for a key type.
///
/// `equals(a, b)` returning `true` must imply `hash_key(a) == hash_key(b)`;
/// the trie's correctness — not just its performance — depends on this.
pub trait KeyProvider<K: ?Sized> {
    /// Deterministic 32-bit hash of `key`.
    fn hash_key(&self, key: &K) -> u32;

    /// Key equality used to disambiguate entries sharing a hash fragment.
    fn keys_equal(&self, a: &K, b: &K) -> bool;
}

/// Default provider for any `K: Hash + Eq`.
///
/// Hashes with `std`'s fixed-key `DefaultHasher` (64 bits, deterministic
/// across runs — unlike `RandomState`, which would make two separately
/// constructed maps holding the same keys structurally incomparable) and
/// folds the result to 32 bits by XOR-ing the high and low halves, a
/// standard allocation-free fold that keeps entropy from both halves
/// rather than simply truncating.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProvider;

impl<K: Hash + Eq + ?Sized> KeyProvider<K> for DefaultProvider {
    fn hash_key(&self, key: &K) -> u32 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        fold64_to_32(hasher.finish())
    }

    fn keys_equal(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// XOR-folds a 64-bit hash into 32 bits, keeping entropy from both halves.
#[must_use]
pub const fn fold64_to_32(hash: u64) -> u32 {
    ((hash >> 32) as u32) ^ (hash as u32)
}
