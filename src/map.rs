//! Persistent hash map — root wrapper over the `Rc`-based trie engine.

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::equality;
use crate::iter::Iter;
use crate::node::{Entry, Node};
use crate::ops::bulk;
use crate::ops::get::lookup;
use crate::ops::insert::insert;
use crate::ops::remove::remove_root;
use crate::provider::{DefaultProvider, KeyProvider};

/// Persistent, immutable hash map built on a bitmap-compressed hash array
/// mapped trie.
///
/// Every mutator returns a *new* `HamtMap` sharing all unchanged structure
/// with its receiver — the map a mutator was called on remains valid and
/// unaffected by anything derived from it.
///
/// Generic over a [`KeyProvider`] so a caller can supply a fixed-seed or
/// domain-specific hash/equality pair instead of `std`'s `Hash`/`Eq`;
/// [`DefaultProvider`] covers the common case.
pub struct HamtMap<K, V, P = DefaultProvider> {
    root: Rc<Node<K, V>>,
    count: usize,
    provider: P,
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<K, V> HamtMap<K, V, DefaultProvider> {
    /// Creates an empty map using [`DefaultProvider`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_provider(DefaultProvider)
    }

    /// The empty map. An alias for [`Self::new`] matching the abstract
    /// operation name `empty`.
    #[must_use]
    pub fn empty() -> Self {
        Self::new()
    }
}

impl<K, V, P> HamtMap<K, V, P> {
    /// Creates an empty map using a caller-supplied key provider.
    #[must_use]
    pub fn with_provider(provider: P) -> Self {
        Self {
            root: Rc::new(Node::empty_inner()),
            count: 0,
            provider,
        }
    }

    /// Number of key-value pairs held by the map (`count`).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// `true` if the map holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

// ---------------------------------------------------------------------------
// Read operations — require a `KeyProvider`
// ---------------------------------------------------------------------------

impl<K, V, P: KeyProvider<K>> HamtMap<K, V, P> {
    /// Returns a reference to the value bound to `key`, if present
    /// (`try_find`).
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = self.provider.hash_key(key);
        lookup(&self.root, hash, key, 0, &self.provider)
    }

    /// `true` if `key` is bound in the map (`contains`).
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over `(&K, &V)` pairs (`to_sequence`), in an order stable
    /// for a given tree shape but otherwise unspecified.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.count)
    }
}

// ---------------------------------------------------------------------------
// Write operations — persistent: each call returns a new map
// ---------------------------------------------------------------------------

impl<K, V, P: KeyProvider<K> + Clone> HamtMap<K, V, P> {
    /// Returns a new map with `key` bound to `value` (`add`). `self` is left
    /// untouched and remains a valid, independent map.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let hash = self.provider.hash_key(&key);
        let entry = Rc::new(Entry { hash, key, value });
        let (new_root, added) = insert(&self.root, entry, 0, &self.provider);
        Self {
            root: new_root,
            count: if added { self.count + 1 } else { self.count },
            provider: self.provider.clone(),
        }
    }

    /// Returns a new map with `key` absent.
    ///
    /// If `key` was not present, the returned map shares its root (and is
    /// thus `Rc::ptr_eq`-identical) with `self` — no copying happens on a
    /// miss.
    #[must_use]
    pub fn remove(&self, key: &K) -> Self {
        let hash = self.provider.hash_key(key);
        let (new_root, removed) = remove_root(&self.root, hash, key, &self.provider);
        Self {
            root: new_root,
            count: if removed { self.count - 1 } else { self.count },
            provider: self.provider.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Bulk build
// ---------------------------------------------------------------------------

impl<K, V, P: KeyProvider<K> + Clone + Default> HamtMap<K, V, P> {
    /// Builds a map from a sequence of pairs in one pass (`of_sequence`),
    /// allocating fewer intermediate nodes than folding [`Self::insert`]
    /// over the same sequence one pair at a time. Later pairs
    /// win on duplicate keys.
    #[must_use]
    pub fn from_sequence<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        Self::from_sequence_with_provider(pairs, P::default())
    }
}

impl<K, V, P: KeyProvider<K> + Clone> HamtMap<K, V, P> {
    /// As [`Self::from_sequence`], with an explicit key provider.
    #[must_use]
    pub fn from_sequence_with_provider<I: IntoIterator<Item = (K, V)>>(
        pairs: I,
        provider: P,
    ) -> Self {
        let (root, count) = bulk::build_from_iter(pairs, &provider);
        Self {
            root,
            count,
            provider,
        }
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V> Default for HamtMap<K, V, DefaultProvider> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, P: Clone> Clone for HamtMap<K, V, P> {
    fn clone(&self) -> Self {
        Self {
            root: Rc::clone(&self.root),
            count: self.count,
            provider: self.provider.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, P: KeyProvider<K>> fmt::Debug for HamtMap<K, V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Structural equality (`equal`): same key-value pairs, independent of
/// insertion history.
impl<K, V: PartialEq, P: KeyProvider<K>> PartialEq for HamtMap<K, V, P> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && equality::equal(&self.root, &other.root, &self.provider)
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for HamtMap<K, V, DefaultProvider> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_sequence(iter)
    }
}

impl<'a, K, V, P: KeyProvider<K>> IntoIterator for &'a HamtMap<K, V, P> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
