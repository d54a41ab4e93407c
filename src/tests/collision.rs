use std::hash::{Hash, Hasher};

use crate::HamtMap;

/// A key type with a controllable hash value, for exercising collision
/// leaves deterministically rather than hoping two `u64`s happen to fold
/// to the same 32-bit value.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CollidingKey {
    id: u32,
    forced_hash: u64,
}

impl CollidingKey {
    const fn new(id: u32, hash: u64) -> Self {
        Self {
            id,
            forced_hash: hash,
        }
    }
}

impl Hash for CollidingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.forced_hash.hash(state);
    }
}

#[test]
fn two_colliding_keys() {
    let k1 = CollidingKey::new(1, 0xDEAD_BEEF);
    let k2 = CollidingKey::new(2, 0xDEAD_BEEF);

    let map = HamtMap::new().insert(k1.clone(), "first").insert(k2.clone(), "second");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k1), Some(&"first"));
    assert_eq!(map.get(&k2), Some(&"second"));
}

#[test]
fn three_colliding_keys() {
    let keys: Vec<CollidingKey> = (0..3).map(|i| CollidingKey::new(i, 0xCAFE)).collect();

    let mut map = HamtMap::new();
    for (i, k) in keys.iter().enumerate() {
        map = map.insert(k.clone(), i);
    }

    assert_eq!(map.len(), 3);
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(map.get(k), Some(&i));
    }
}

#[test]
fn remove_from_collision() {
    let k1 = CollidingKey::new(1, 0xAAAA);
    let k2 = CollidingKey::new(2, 0xAAAA);
    let k3 = CollidingKey::new(3, 0xAAAA);

    let map = HamtMap::new()
        .insert(k1.clone(), 10)
        .insert(k2.clone(), 20)
        .insert(k3.clone(), 30);

    let map = map.remove(&k2);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k1), Some(&10));
    assert_eq!(map.get(&k2), None);
    assert_eq!(map.get(&k3), Some(&30));
}

#[test]
fn overwrite_in_collision() {
    let k1 = CollidingKey::new(1, 0xBBBB);
    let k2 = CollidingKey::new(2, 0xBBBB);

    let map = HamtMap::new()
        .insert(k1.clone(), "old")
        .insert(k2.clone(), "val2")
        .insert(k1.clone(), "new");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k1), Some(&"new"));
}

#[test]
fn collision_remove_all() {
    let k1 = CollidingKey::new(1, 0xCCCC);
    let k2 = CollidingKey::new(2, 0xCCCC);

    let map = HamtMap::new().insert(k1.clone(), 1).insert(k2.clone(), 2);
    let map = map.remove(&k1).remove(&k2);
    assert!(map.is_empty());
}

/// Removing down to a single collision survivor must inline it back into
/// the parent's `entries` rather than leaving a one-entry collision leaf —
/// the minimality invariant applies to collision leaves too.
#[test]
fn collision_remove_to_single_survivor() {
    let k1 = CollidingKey::new(1, 0xF00D);
    let k2 = CollidingKey::new(2, 0xF00D);

    let map = HamtMap::new().insert(k1.clone(), "a").insert(k2.clone(), "b");
    let map = map.remove(&k1);

    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&k2), Some(&"b"));
}

#[test]
fn mixed_collisions_and_normal() {
    let collide_a = CollidingKey::new(1, 0xDDDD);
    let collide_b = CollidingKey::new(2, 0xDDDD);
    let normal = CollidingKey::new(3, 0xEEEE);

    let map = HamtMap::new()
        .insert(collide_a.clone(), "a")
        .insert(collide_b.clone(), "b")
        .insert(normal.clone(), "c");

    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&collide_a), Some(&"a"));
    assert_eq!(map.get(&collide_b), Some(&"b"));
    assert_eq!(map.get(&normal), Some(&"c"));
}
