//! End-to-end scenarios exercising the full external contract in
//! combination: `empty`, `add`, `remove`, `contains`, `try_find`,
//! `of_sequence`, `to_sequence`, `equal`.

use crate::HamtMap;

#[test]
fn empty_then_add_then_find() {
    let map = HamtMap::<&str, i32>::empty();
    assert!(map.is_empty());

    let map = map.insert("x", 1);
    assert!(map.contains_key(&"x"));
    assert_eq!(map.get(&"x"), Some(&1));
}

#[test]
fn add_remove_add_round_trip() {
    let map = HamtMap::new().insert("a", 1);
    let map = map.remove(&"a");
    assert!(!map.contains_key(&"a"));

    let map = map.insert("a", 2);
    assert_eq!(map.get(&"a"), Some(&2));
}

#[test]
fn of_sequence_then_to_sequence_round_trips_contents() {
    let pairs = vec![(1, "a"), (2, "b"), (3, "c")];
    let map = HamtMap::from_sequence(pairs.clone());

    let mut collected: Vec<(i32, &str)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    collected.sort_unstable();

    let mut expected = pairs;
    expected.sort_unstable();

    assert_eq!(collected, expected);
}

#[test]
fn two_maps_built_from_different_histories_compare_equal() {
    let via_inserts = HamtMap::new().insert(1, "one").insert(2, "two").insert(3, "three");
    let via_bulk = HamtMap::from_sequence(vec![(3, "three"), (1, "one"), (2, "two")]);

    assert_eq!(via_inserts, via_bulk);
}

#[test]
fn diverging_histories_compare_unequal() {
    let base = HamtMap::new().insert(1, 1).insert(2, 2);
    let with_extra = base.insert(3, 3);
    let without_two = base.remove(&2);

    assert_ne!(base, with_extra);
    assert_ne!(base, without_two);
    assert_ne!(with_extra, without_two);
}

#[test]
fn large_mixed_workflow_stays_consistent() {
    let mut map = HamtMap::empty();
    for i in 0_u32..64 {
        map = map.insert(i, i.to_string());
    }
    for i in (0_u32..64).step_by(3) {
        map = map.remove(&i);
    }
    let expected_len = (0_u32..64).filter(|i| i % 3 != 0).count();
    assert_eq!(map.len(), expected_len);

    for i in 0_u32..64 {
        if i % 3 == 0 {
            assert!(!map.contains_key(&i));
        } else {
            assert_eq!(map.get(&i), Some(&i.to_string()));
        }
    }
}
