//! Removal — COW path-copy delete with minimality contraction.

use std::rc::Rc;

use crate::array::SparseArray;
use crate::node::{Entry, Node, PARTITION_SIZE, fragment, mask};
use crate::provider::KeyProvider;

/// What a child's removal requires of its parent.
pub enum SubNodeChange<K, V> {
    /// The key was not present under this subtree; nothing changes.
    NoChange,
    /// The parent should replace the referenced child with this node.
    NewChildNode(Rc<Node<K, V>>),
    /// The parent should unset its `children` bit at this slot.
    RemoveChildNode,
    /// The parent should unset `children` at this slot and bind `entries`
    /// at the same slot to this value — the minimality contraction case.
    RemoveChildNodeAndPreserveSingleValue(Rc<Entry<K, V>>),
}

/// Removes `key` from the subtree rooted at `node`.
///
/// `is_root` suppresses single-entry contraction: a root holding exactly
/// one entry and no children is a perfectly valid minimal root, while a
/// non-root node in that state must be inlined into its parent.
pub fn remove<K, V, P: KeyProvider<K>>(
    node: &Rc<Node<K, V>>,
    hash: u32,
    key: &K,
    shift: u32,
    provider: &P,
    is_root: bool,
) -> (SubNodeChange<K, V>, bool) {
    match &**node {
        Node::Inner { children, entries } => {
            remove_from_inner(children, entries, hash, key, shift, provider, is_root)
        }
        Node::Collision {
            hash: leaf_hash,
            entries,
        } => remove_from_collision(*leaf_hash, entries, hash, key, provider),
    }
}

/// Entry point for removal at the root. The root is always an inner node
/// and is never itself subject to contraction into a parent — there is
/// none — so the four [`SubNodeChange`] tags are interpreted specially
/// here rather than by a calling `remove_from_inner`.
pub fn remove_root<K, V, P: KeyProvider<K>>(
    root: &Rc<Node<K, V>>,
    hash: u32,
    key: &K,
    provider: &P,
) -> (Rc<Node<K, V>>, bool) {
    let (change, removed) = remove(root, hash, key, 0, provider, true);
    match change {
        SubNodeChange::NoChange => {
            debug_assert!(!removed, "NoChange paired with removed = true");
            (Rc::clone(root), false)
        }
        SubNodeChange::NewChildNode(new_root) => {
            debug_assert!(
                matches!(&*new_root, Node::Inner { .. }),
                "root-level NewChildNode produced a collision leaf"
            );
            (new_root, true)
        }
        SubNodeChange::RemoveChildNode => (Rc::new(Node::empty_inner()), true),
        SubNodeChange::RemoveChildNodeAndPreserveSingleValue(_) => {
            unreachable!(
                "root-level RemoveChildNodeAndPreserveSingleValue is an internal-invariant violation"
            )
        }
    }
}

fn remove_from_inner<K, V, P: KeyProvider<K>>(
    children: &SparseArray<Rc<Node<K, V>>>,
    entries: &SparseArray<Rc<Entry<K, V>>>,
    hash: u32,
    key: &K,
    shift: u32,
    provider: &P,
    is_root: bool,
) -> (SubNodeChange<K, V>, bool) {
    let frag = fragment(hash, shift);
    let bit = mask(frag);

    if children.bitmap() & bit != 0 {
        let ci = children.compressed_index(frag);
        let child = children.get_at_compressed_index(ci);
        let (child_change, removed) = remove(child, hash, key, shift + PARTITION_SIZE, provider, false);

        match child_change {
            SubNodeChange::NoChange => {
                debug_assert!(!removed);
                (SubNodeChange::NoChange, false)
            }
            SubNodeChange::NewChildNode(new_child) => {
                let new_children = children.replace_at_compressed_index_unchecked(ci, new_child);
                (finish(is_root, new_children, entries.clone()), true)
            }
            SubNodeChange::RemoveChildNode => {
                let new_children = children.unset(frag);
                (finish(is_root, new_children, entries.clone()), true)
            }
            SubNodeChange::RemoveChildNodeAndPreserveSingleValue(v) => {
                let new_children = children.unset(frag);
                let new_entries = entries.set(frag, v);
                (finish(is_root, new_children, new_entries), true)
            }
        }
    } else if entries.bitmap() & bit != 0 {
        let ci = entries.compressed_index(frag);
        let existing = entries.get_at_compressed_index(ci);

        if provider.keys_equal(&existing.key, key) {
            let new_entries = entries.unset(frag);
            (finish(is_root, children.clone(), new_entries), true)
        } else {
            (SubNodeChange::NoChange, false)
        }
    } else {
        (SubNodeChange::NoChange, false)
    }
}

/// Applies the minimality contraction rule to a just-rebuilt node's
/// `(children, entries)` pair and wraps the result in the tag the parent
/// needs to see. Shared by every inner-node removal branch.
fn finish<K, V>(
    is_root: bool,
    children: SparseArray<Rc<Node<K, V>>>,
    entries: SparseArray<Rc<Entry<K, V>>>,
) -> SubNodeChange<K, V> {
    if children.is_empty() && entries.is_empty() {
        SubNodeChange::RemoveChildNode
    } else if !is_root && children.is_empty() && entries.len() == 1 {
        let only = Rc::clone(entries.get_at_compressed_index(0));
        SubNodeChange::RemoveChildNodeAndPreserveSingleValue(only)
    } else {
        let node = Node::Inner { children, entries };
        debug_assert!(
            is_root || !node.violates_minimality(),
            "contraction produced a non-canonical non-root node"
        );
        SubNodeChange::NewChildNode(Rc::new(node))
    }
}

fn remove_from_collision<K, V, P: KeyProvider<K>>(
    leaf_hash: u32,
    entries: &Rc<[Rc<Entry<K, V>>]>,
    hash: u32,
    key: &K,
    provider: &P,
) -> (SubNodeChange<K, V>, bool) {
    if hash != leaf_hash {
        return (SubNodeChange::NoChange, false);
    }

    let Some(pos) = entries.iter().position(|e| provider.keys_equal(&e.key, key)) else {
        return (SubNodeChange::NoChange, false);
    };

    debug_assert!(entries.len() >= 2, "collision leaf below minimum length");

    if entries.len() == 2 {
        // Removing one of exactly two collision entries leaves a single
        // record — the parent promotes it into its own `entries`.
        let other = 1 - pos;
        let remaining = Rc::clone(&entries[other]);
        (
            SubNodeChange::RemoveChildNodeAndPreserveSingleValue(remaining),
            true,
        )
    } else {
        let mut remaining: Vec<Rc<Entry<K, V>>> = Vec::with_capacity(entries.len() - 1);
        remaining.extend(entries.iter().enumerate().filter(|&(i, _)| i != pos).map(|(_, e)| Rc::clone(e)));
        let node = Rc::new(Node::Collision {
            hash: leaf_hash,
            entries: Rc::from(remaining),
        });
        (SubNodeChange::NewChildNode(node), true)
    }
}
