//! Structural equality.
//!
//! Two maps are equal iff they hold the same set of `(key, value)` pairs,
//! which — because the minimality invariant forces
//! every trie over a given key set and hasher to the same canonical shape
//! — reduces to a lock-step walk of both tries rather than a full
//! cross-product membership test. `Rc::ptr_eq` short-circuits whole shared
//! subtrees, which is common after a handful of `add`/`remove` calls
//! derived from a common ancestor.

use std::rc::Rc;

use crate::node::Node;
use crate::provider::KeyProvider;

/// Compares two trie roots built under the same `provider` for equal
/// contents. Undefined (may return a false negative) if `a` and `b` were
/// built under providers that disagree on `hash_key`/`keys_equal` for the
/// same keys — the minimality argument above depends on shared hashing.
pub fn equal<K, V, P>(a: &Rc<Node<K, V>>, b: &Rc<Node<K, V>>, provider: &P) -> bool
where
    V: PartialEq,
    P: KeyProvider<K>,
{
    if Rc::ptr_eq(a, b) {
        return true;
    }

    match (&**a, &**b) {
        (
            Node::Inner {
                children: ca,
                entries: ea,
            },
            Node::Inner {
                children: cb,
                entries: eb,
            },
        ) => {
            if ca.bitmap() != cb.bitmap() || ea.bitmap() != eb.bitmap() {
                return false;
            }

            // Equal bitmaps mean equal logical occupancy, so physical
            // (compressed) order already lines slots up pairwise.
            ea.iter()
                .zip(eb.iter())
                .all(|(x, y)| provider.keys_equal(&x.key, &y.key) && x.value == y.value)
                && ca.iter().zip(cb.iter()).all(|(x, y)| equal(x, y, provider))
        }
        (
            Node::Collision {
                hash: ha,
                entries: eas,
            },
            Node::Collision {
                hash: hb,
                entries: ebs,
            },
        ) => {
            ha == hb
                && eas.len() == ebs.len()
                && eas.iter().all(|x| {
                    ebs.iter()
                        .any(|y| provider.keys_equal(&x.key, &y.key) && x.value == y.value)
                })
        }
        _ => false,
    }
}
