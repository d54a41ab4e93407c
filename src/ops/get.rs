//! Lookup — walks a single hash path, never copies anything.

use std::rc::Rc;

use crate::node::{Node, fragment, mask};
use crate::provider::KeyProvider;

/// Searches `node` for `key`, hashing to `hash`. Returns a reference to the
/// value if present.
pub fn lookup<'a, K, V, P: KeyProvider<K>>(
    node: &'a Node<K, V>,
    hash: u32,
    key: &K,
    shift: u32,
    provider: &P,
) -> Option<&'a V> {
    match node {
        Node::Inner { children, entries } => {
            let frag = fragment(hash, shift);
            let bit = mask(frag);

            if children.bitmap() & bit != 0 {
                let ci = children.compressed_index(frag);
                let child: &Rc<Node<K, V>> = children.get_at_compressed_index(ci);
                lookup(child, hash, key, shift + crate::node::PARTITION_SIZE, provider)
            } else if entries.bitmap() & bit != 0 {
                let ci = entries.compressed_index(frag);
                let entry = entries.get_at_compressed_index(ci);
                if provider.keys_equal(&entry.key, key) {
                    Some(&entry.value)
                } else {
                    None
                }
            } else {
                None
            }
        }
        Node::Collision {
            hash: leaf_hash,
            entries,
        } => {
            if *leaf_hash != hash {
                return None;
            }
            entries
                .iter()
                .find(|e| provider.keys_equal(&e.key, key))
                .map(|e| &e.value)
        }
    }
}
