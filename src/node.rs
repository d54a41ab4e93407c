//! Trie node types and hash-shard bitmap helpers.

use std::rc::Rc;

use crate::array::SparseArray;

/// Bits consumed per trie level (5 → 32-way branching)
pub const PARTITION_SIZE: u32 = 5;

/// Mask selecting the low `PARTITION_SIZE` bits of a shifted hash.
pub const PARTITION_MASK: u32 = 0b1_1111;

/// Bit-shift at which no further discrimination is possible — keys that
/// still collide here share all 32 hash bits and land in a collision leaf.
pub const MAX_SHIFT: u32 = 32;

/// Extracts the 5-bit shard of `hash` at depth `shift`.
#[inline]
#[must_use]
pub const fn fragment(hash: u32, shift: u32) -> u32 {
    (hash >> shift) & PARTITION_MASK
}

/// Single-bit mask for a shard value in `[0, 32)`.
#[inline]
#[must_use]
pub const fn mask(frag: u32) -> u32 {
    1 << frag
}

/// A key-value record, with its hash precomputed once at insertion.
#[derive(Debug)]
pub struct Entry<K, V> {
    /// Full 32-bit hash of `key`.
    pub hash: u32,
    /// The key.
    pub key: K,
    /// The value.
    pub value: V,
}

impl<K: Clone, V: Clone> Clone for Entry<K, V> {
    fn clone(&self) -> Self {
        Self {
            hash: self.hash,
            key: self.key.clone(),
            value: self.value.clone(),
        }
    }
}

/// A trie node: either a bitmap-compressed inner node, or a hash-collision
/// leaf (only legal at `MAX_SHIFT`).
pub enum Node<K, V> {
    /// Bitmap-compressed inner node.
    ///
    /// Invariant (disjoint occupancy): `children.bitmap() & entries.bitmap()
    /// == 0`, tested in `tests::canonical`.
    Inner {
        /// Child subtrees, keyed by hash shard.
        children: SparseArray<Rc<Node<K, V>>>,
        /// Inline key-value records, keyed by hash shard.
        entries: SparseArray<Rc<Entry<K, V>>>,
    },
    /// Leaf holding every live record that shares the full 32-bit hash.
    ///
    /// Invariant: `entries.len() >= 2` — a list that would
    /// shrink to one element is inlined into the parent's `entries` instead
    /// of being published as a collision leaf.
    Collision {
        /// The hash every entry in this leaf shares.
        hash: u32,
        /// The colliding records, in no specified order.
        entries: Rc<[Rc<Entry<K, V>>]>,
    },
}

impl<K, V> Clone for Node<K, V> {
    fn clone(&self) -> Self {
        match self {
            Self::Inner { children, entries } => Self::Inner {
                children: children.clone(),
                entries: entries.clone(),
            },
            Self::Collision { hash, entries } => Self::Collision {
                hash: *hash,
                entries: Rc::clone(entries),
            },
        }
    }
}

impl<K, V> Node<K, V> {
    /// The canonical empty inner node — valid as an empty root.
    #[must_use]
    pub fn empty_inner() -> Self {
        Self::Inner {
            children: SparseArray::empty(),
            entries: SparseArray::empty(),
        }
    }

    /// `true` for a non-root inner node that violates minimality: no
    /// children and at most one entry. A node
    /// in this state must be contracted into its parent rather than
    /// published.
    #[must_use]
    pub fn violates_minimality(&self) -> bool {
        match self {
            Self::Inner { children, entries } => children.is_empty() && entries.len() <= 1,
            Self::Collision { .. } => false,
        }
    }
}
