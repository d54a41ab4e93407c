//! Bulk build — folds `insert` over a sequence with a transient root.
//!
//! While a single [`build_from_iter`] call is in flight, the tree under
//! construction is a private [`Transient`] value: plain, owned `Vec`s, not
//! yet wrapped in `Rc`, so pushing/removing/overwriting an element mutates
//! in place instead of allocating a fresh compressed array per insertion.
//! Nothing reachable from any previously published [`Node`] is ever
//! touched — `Transient` is a distinct type, so there is no aliasing to
//! reason about and no `unsafe` is needed. [`freeze`] converts the
//! finished, still-private tree into the immutable `Rc`-based
//! representation exactly once per node.

use std::rc::Rc;

use crate::array::SparseArray;
use crate::node::{Entry, MAX_SHIFT, Node, PARTITION_SIZE, fragment, mask};
use crate::provider::KeyProvider;

enum Transient<K, V> {
    Inner {
        children_bitmap: u32,
        children: Vec<Transient<K, V>>,
        entries_bitmap: u32,
        entries: Vec<Rc<Entry<K, V>>>,
    },
    Collision {
        hash: u32,
        entries: Vec<Rc<Entry<K, V>>>,
    },
}

impl<K, V> Transient<K, V> {
    const fn empty_inner() -> Self {
        Self::Inner {
            children_bitmap: 0,
            children: Vec::new(),
            entries_bitmap: 0,
            entries: Vec::new(),
        }
    }
}

/// Builds a root from an iterator of key-value pairs. Semantics are
/// identical to folding [`crate::ops::insert::insert`] over the sequence;
/// the allocation count is lower because intermediate nodes are built
/// once each rather than copy-on-write at every step.
///
/// Returns the finished root and the number of distinct keys it holds.
pub fn build_from_iter<K, V, P, I>(pairs: I, provider: &P) -> (Rc<Node<K, V>>, usize)
where
    P: KeyProvider<K>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut root = Transient::empty_inner();
    let mut count = 0_usize;

    for (key, value) in pairs {
        let hash = provider.hash_key(&key);
        let entry = Rc::new(Entry { hash, key, value });
        if insert_transient(&mut root, entry, 0, provider) {
            count += 1;
        }
    }

    (freeze(root), count)
}

/// Inserts into the still-private `node`, returning `true` iff a fresh
/// key was introduced.
fn insert_transient<K, V, P: KeyProvider<K>>(
    node: &mut Transient<K, V>,
    entry: Rc<Entry<K, V>>,
    shift: u32,
    provider: &P,
) -> bool {
    match node {
        Transient::Inner {
            children_bitmap,
            children,
            entries_bitmap,
            entries,
        } => {
            let frag = fragment(entry.hash, shift);
            let bit = mask(frag);

            if *children_bitmap & bit != 0 {
                let ci = compressed_index(*children_bitmap, bit);
                insert_transient(&mut children[ci], entry, shift + PARTITION_SIZE, provider)
            } else if *entries_bitmap & bit != 0 {
                let ci = compressed_index(*entries_bitmap, bit);
                if provider.keys_equal(&entries[ci].key, &entry.key) {
                    entries[ci] = entry;
                    false
                } else {
                    let existing = entries.remove(ci);
                    *entries_bitmap &= !bit;

                    let child = build_conflict_transient(existing, entry, shift);
                    let insert_at = compressed_index(*children_bitmap, bit);
                    children.insert(insert_at, child);
                    *children_bitmap |= bit;
                    true
                }
            } else {
                let insert_at = compressed_index(*entries_bitmap, bit);
                entries.insert(insert_at, entry);
                *entries_bitmap |= bit;
                true
            }
        }
        Transient::Collision {
            hash: leaf_hash,
            entries,
        } => {
            debug_assert_eq!(*leaf_hash, entry.hash);
            if let Some(pos) = entries.iter().position(|e| provider.keys_equal(&e.key, &entry.key)) {
                entries[pos] = entry;
                false
            } else {
                entries.push(entry);
                true
            }
        }
    }
}

/// Builds the transient subtree for two entries colliding at `shift`,
/// mirroring [`crate::ops::insert::resolve_conflict`] but in owned-`Vec`
/// form.
fn build_conflict_transient<K, V>(
    existing: Rc<Entry<K, V>>,
    incoming: Rc<Entry<K, V>>,
    shift: u32,
) -> Transient<K, V> {
    let i_existing = fragment(existing.hash, shift);
    let i_incoming = fragment(incoming.hash, shift);

    if i_existing != i_incoming {
        let (entries_bitmap, entries) = if i_existing < i_incoming {
            (mask(i_existing) | mask(i_incoming), vec![existing, incoming])
        } else {
            (mask(i_existing) | mask(i_incoming), vec![incoming, existing])
        };
        Transient::Inner {
            children_bitmap: 0,
            children: Vec::new(),
            entries_bitmap,
            entries,
        }
    } else if shift + PARTITION_SIZE >= MAX_SHIFT {
        Transient::Collision {
            hash: existing.hash,
            entries: vec![existing, incoming],
        }
    } else {
        let child = build_conflict_transient(existing, incoming, shift + PARTITION_SIZE);
        Transient::Inner {
            children_bitmap: mask(i_existing),
            children: vec![child],
            entries_bitmap: 0,
            entries: Vec::new(),
        }
    }
}

fn compressed_index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

/// Converts a finished, still-private tree into the published `Rc`-based
/// representation, one allocation per node.
fn freeze<K, V>(node: Transient<K, V>) -> Rc<Node<K, V>> {
    match node {
        Transient::Inner {
            children_bitmap,
            children,
            entries_bitmap,
            entries,
        } => {
            let frozen_children: Vec<Rc<Node<K, V>>> = children.into_iter().map(freeze).collect();
            Rc::new(Node::Inner {
                children: SparseArray::from_built(children_bitmap, frozen_children),
                entries: SparseArray::from_built(entries_bitmap, entries),
            })
        }
        Transient::Collision { hash, entries } => Rc::new(Node::Collision {
            hash,
            entries: Rc::from(entries),
        }),
    }
}
