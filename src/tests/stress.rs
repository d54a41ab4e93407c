use crate::HamtMap;

/// 1000 entries: insert all, verify all, remove all.
#[test]
fn thousand_entries() {
    let mut map = HamtMap::new();
    for i in 0_u64..1000 {
        map = map.insert(i, i * 3);
    }
    assert_eq!(map.len(), 1000);

    for i in 0_u64..1000 {
        assert_eq!(map.get(&i), Some(&(i * 3)), "missing key {i}");
    }

    for i in 0_u64..1000 {
        map = map.remove(&i);
    }
    assert!(map.is_empty());
}

/// Deep trie: keys with shared hash prefixes force deeper nodes.
#[test]
fn deep_shared_prefixes() {
    let mut map = HamtMap::new();
    for i in 0_u64..500 {
        map = map.insert(i, i);
    }
    assert_eq!(map.len(), 500);
    for i in 0_u64..500 {
        assert_eq!(map.get(&i), Some(&i));
    }
}

/// Insert + overwrite + remove interleaved.
#[test]
fn interleaved_operations() {
    let mut map = HamtMap::new();
    for i in 0_u64..200 {
        map = map.insert(i, i);
    }
    // Overwrite even keys.
    for i in (0_u64..200).step_by(2) {
        map = map.insert(i, i + 1000);
    }
    // Remove odd keys.
    for i in (1_u64..200).step_by(2) {
        map = map.remove(&i);
    }
    assert_eq!(map.len(), 100);
    for i in (0_u64..200).step_by(2) {
        assert_eq!(map.get(&i), Some(&(i + 1000)));
    }
}

/// A long-lived map threaded through many derived versions must still
/// answer every live key correctly, exercising deep COW sharing.
#[test]
fn long_derivation_chain_stays_correct() {
    let mut map = HamtMap::new();
    for i in 0_u64..300 {
        map = map.insert(i, i);
        if i % 3 == 0 {
            map = map.remove(&(i / 2));
        }
    }
    for i in 0_u64..300 {
        match map.get(&i) {
            Some(v) => assert_eq!(*v, i),
            None => {}
        }
    }
}
