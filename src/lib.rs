//! Persistent hash array mapped trie (HAMT) with bitmap-compressed,
//! CHAMP-style nodes: every inner node separates its occupied hash shards
//! into a `children` slot (nested subtrees) and an `entries` slot (inline
//! key-value records), rather than the single uniform slot of a classic
//! HAMT.
//!
//! # Key properties
//!
//! - **Persistent**: `insert`/`remove` never mutate — they return a new
//!   map, structurally sharing everything unchanged with the old one.
//! - **Canonical shape**: the same set of key-value pairs always produces
//!   the same trie structure, independent of insertion order, which is
//!   what makes structural equality a lock-step walk instead of a full
//!   cross-product comparison.
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`.
//!
//! # References
//!
//! - Steindorfer & Vinju, 2015 — "Optimizing Hash-Array Mapped Tries
//!   for Fast and Lean Immutable JVM Collections", OOPSLA 2015
//! - Bagwell, 2001 — "Ideal Hash Trees"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod array;
pub mod equality;
pub mod iter;
pub mod node;
pub mod provider;

mod map;
mod ops;

#[cfg(test)]
mod tests;

pub use map::HamtMap;
pub use provider::{DefaultProvider, KeyProvider};
