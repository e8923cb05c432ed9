//! Tests for the active-polygon stack.

use super::*;

fn is_permutation(arena: &[usize]) -> bool {
    let mut sorted = arena.to_vec();
    sorted.sort_unstable();
    sorted.iter().enumerate().all(|(i, v)| i == *v)
}

#[test]
fn new_is_identity() {
    let a = ActiveIndexes::new(4);
    assert_eq!(a.as_slice(), &[0, 1, 2, 3]);
    assert_eq!(a.capacity(), 4);
    assert!(!a.is_empty());
}

#[test]
fn removal_swaps_with_last() {
    let mut a = ActiveIndexes::new(5);
    let removed = a.retain_by(|i| i != 1);
    assert_eq!(removed, 1);
    assert_eq!(a.as_slice(), &[0, 4, 2, 3]);
    assert_eq!(a.arena(), &[0, 4, 2, 3, 1]);
}

#[test]
fn arena_stays_a_permutation_under_filters() {
    let mut a = ActiveIndexes::new(37);
    a.retain_by(|i| i % 3 != 0);
    a.as_mut_slice().reverse();
    a.retain_by(|i| i % 5 != 0);
    assert!(is_permutation(a.arena()));
    assert!(a.as_slice().iter().all(|i| i % 3 != 0 && i % 5 != 0));
    assert_eq!(a.len(), (0..37).filter(|i| i % 3 != 0 && i % 5 != 0).count());
}

#[test]
fn removing_everything_empties() {
    let mut a = ActiveIndexes::new(3);
    assert_eq!(a.retain_by(|_| false), 3);
    assert!(a.is_empty());
    a.reset_identity();
    assert_eq!(a.as_slice(), &[0, 1, 2]);
}

#[test]
fn clear_and_reset() {
    let mut a = ActiveIndexes::new(3);
    a.clear();
    assert_eq!(a.len(), 0);
    assert_eq!(a.capacity(), 3);
    a.reset(6);
    assert_eq!(a.len(), 6);
}
