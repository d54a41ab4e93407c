//! Insertion — COW path-copy with conflict resolution.

use std::rc::Rc;

use crate::array::SparseArray;
use crate::node::{Entry, MAX_SHIFT, Node, PARTITION_SIZE, fragment, mask};
use crate::provider::KeyProvider;

/// Inserts `entry` into the subtree rooted at `node`.
///
/// Returns the new subtree root and `true` iff a fresh key was introduced
/// (`false` when an existing key's value was replaced).
pub fn insert<K, V, P: KeyProvider<K>>(
    node: &Rc<Node<K, V>>,
    entry: Rc<Entry<K, V>>,
    shift: u32,
    provider: &P,
) -> (Rc<Node<K, V>>, bool) {
    match &**node {
        Node::Inner { children, entries } => {
            insert_into_inner(children, entries, entry, shift, provider)
        }
        Node::Collision {
            hash: leaf_hash,
            entries,
        } => insert_into_collision(*leaf_hash, entries, entry, provider),
    }
}

fn insert_into_inner<K, V, P: KeyProvider<K>>(
    children: &SparseArray<Rc<Node<K, V>>>,
    entries: &SparseArray<Rc<Entry<K, V>>>,
    entry: Rc<Entry<K, V>>,
    shift: u32,
    provider: &P,
) -> (Rc<Node<K, V>>, bool) {
    let frag = fragment(entry.hash, shift);
    let bit = mask(frag);

    if children.bitmap() & bit != 0 {
        // Case 1: a child subtree already owns this shard — descend.
        let ci = children.compressed_index(frag);
        let child = children.get_at_compressed_index(ci);
        let (new_child, added) = insert(child, entry, shift + PARTITION_SIZE, provider);
        let new_children = children.replace_at_compressed_index_unchecked(ci, new_child);
        let node = Rc::new(Node::Inner {
            children: new_children,
            entries: entries.clone(),
        });
        (node, added)
    } else if entries.bitmap() & bit != 0 {
        // Case 2: an inline entry occupies this shard.
        let ci = entries.compressed_index(frag);
        let existing = entries.get_at_compressed_index(ci);

        if provider.keys_equal(&existing.key, &entry.key) {
            let new_entries = entries.replace_at_compressed_index_unchecked(ci, entry);
            let node = Rc::new(Node::Inner {
                children: children.clone(),
                entries: new_entries,
            });
            (node, false)
        } else {
            // Two distinct keys collide at this shard — materialise a
            // subtree and move from `entries` to `children`.
            let existing = Rc::clone(existing);
            let subtree = resolve_conflict(existing, entry, shift);
            let new_entries = entries.unset(frag);
            let new_children = children.set(frag, subtree);
            let node = Rc::new(Node::Inner {
                children: new_children,
                entries: new_entries,
            });
            (node, true)
        }
    } else {
        // Case 3: free slot.
        let new_entries = entries.set(frag, entry);
        let node = Rc::new(Node::Inner {
            children: children.clone(),
            entries: new_entries,
        });
        (node, true)
    }
}

/// Builds the subtree replacing a single-entry slot that now holds two
/// distinct keys sharing a hash fragment.
///
/// `shift` is the depth at which both `existing` and `incoming` currently
/// sit — on the first call this is always the inner node's own depth
/// (their fragments are equal there by construction, since that is why
/// they collided); on deeper recursive calls the fragments may diverge.
fn resolve_conflict<K, V>(
    existing: Rc<Entry<K, V>>,
    incoming: Rc<Entry<K, V>>,
    shift: u32,
) -> Rc<Node<K, V>> {
    let i_existing = fragment(existing.hash, shift);
    let i_incoming = fragment(incoming.hash, shift);

    if i_existing != i_incoming {
        Rc::new(Node::Inner {
            children: SparseArray::empty(),
            entries: SparseArray::pair(i_existing, existing, i_incoming, incoming),
        })
    } else if shift + PARTITION_SIZE >= MAX_SHIFT {
        Rc::new(Node::Collision {
            hash: existing.hash,
            entries: Rc::from(vec![existing, incoming]),
        })
    } else {
        let child = resolve_conflict(existing, incoming, shift + PARTITION_SIZE);
        Rc::new(Node::Inner {
            children: SparseArray::single(i_existing, child),
            entries: SparseArray::empty(),
        })
    }
}

fn insert_into_collision<K, V, P: KeyProvider<K>>(
    leaf_hash: u32,
    entries: &Rc<[Rc<Entry<K, V>>]>,
    entry: Rc<Entry<K, V>>,
    provider: &P,
) -> (Rc<Node<K, V>>, bool) {
    debug_assert_eq!(
        leaf_hash, entry.hash,
        "collision leaf reached by an entry with a different hash"
    );

    if let Some(pos) = entries.iter().position(|e| provider.keys_equal(&e.key, &entry.key)) {
        let mut replaced: Vec<Rc<Entry<K, V>>> = entries.to_vec();
        replaced[pos] = entry;
        let node = Rc::new(Node::Collision {
            hash: leaf_hash,
            entries: Rc::from(replaced),
        });
        (node, false)
    } else {
        let mut appended: Vec<Rc<Entry<K, V>>> = Vec::with_capacity(entries.len() + 1);
        appended.push(entry);
        appended.extend(entries.iter().cloned());
        let node = Rc::new(Node::Collision {
            hash: leaf_hash,
            entries: Rc::from(appended),
        });
        (node, true)
    }
}
