//! # SetStore Tests
//!
//! Verifies dense left-packed storage, slot-0 eviction, touch reordering, and
//! the no-duplicate guarantee.

use cachesim_core::cache::set::SetStore;
use pretty_assertions::assert_eq;

// ══════════════════════════════════════════════════════════
// 1. Fill and Evict
// ══════════════════════════════════════════════════════════

#[test]
fn new_set_is_empty() {
    let set = SetStore::new(4);
    assert!(set.is_empty());
    assert!(!set.is_full());
    assert_eq!(set.len(), 0);
    assert_eq!(set.capacity(), 4);
}

#[test]
fn inserts_fill_left_to_right() {
    let mut set = SetStore::new(4);
    for addr in [0xA, 0xB, 0xC] {
        assert_eq!(set.insert(addr), None);
    }
    assert_eq!(set.lines(), &[0xA, 0xB, 0xC]);
    assert!(!set.is_full());
}

#[test]
fn full_set_evicts_slot_zero_and_appends() {
    let mut set = SetStore::new(3);
    for addr in [1, 2, 3] {
        assert_eq!(set.insert(addr), None);
    }
    assert_eq!(set.insert(4), Some(1));
    assert_eq!(set.lines(), &[2, 3, 4]);
    assert_eq!(set.insert(5), Some(2));
    assert_eq!(set.lines(), &[3, 4, 5]);
    assert_eq!(set.len(), 3);
}

#[test]
fn direct_mapped_set_replaces_single_line() {
    let mut set = SetStore::new(1);
    assert_eq!(set.insert(0x40), None);
    assert_eq!(set.insert(0x80), Some(0x40));
    assert_eq!(set.lines(), &[0x80]);
}

// ══════════════════════════════════════════════════════════
// 2. Touch
// ══════════════════════════════════════════════════════════

#[test]
fn touch_moves_line_to_end() {
    let mut set = SetStore::new(4);
    for addr in [1, 2, 3, 4] {
        let _ = set.insert(addr);
    }
    set.touch(2);
    assert_eq!(set.lines(), &[1, 3, 4, 2]);
    set.touch(1);
    assert_eq!(set.lines(), &[3, 4, 2, 1]);
}

#[test]
fn touch_on_partial_set_keeps_density() {
    let mut set = SetStore::new(4);
    let _ = set.insert(1);
    let _ = set.insert(2);
    set.touch(1);
    assert_eq!(set.lines(), &[2, 1]);
    assert_eq!(set.len(), 2);
}

#[test]
fn touch_last_line_is_stable() {
    let mut set = SetStore::new(3);
    for addr in [7, 8, 9] {
        let _ = set.insert(addr);
    }
    set.touch(9);
    assert_eq!(set.lines(), &[7, 8, 9]);
}

#[test]
fn touch_absent_line_is_noop() {
    let mut set = SetStore::new(2);
    let _ = set.insert(1);
    let _ = set.insert(2);
    set.touch(3);
    assert_eq!(set.lines(), &[1, 2]);
}

// ══════════════════════════════════════════════════════════
// 3. Membership and Duplicates
// ══════════════════════════════════════════════════════════

#[test]
fn contains_is_exact_match() {
    let mut set = SetStore::new(2);
    let _ = set.insert(0x100);
    assert!(set.contains(0x100));
    assert!(!set.contains(0x101));
}

#[test]
fn contains_does_not_mutate() {
    let mut set = SetStore::new(2);
    let _ = set.insert(1);
    let _ = set.insert(2);
    let before = set.clone();
    for _ in 0..10 {
        assert!(set.contains(1));
        assert!(!set.contains(3));
    }
    assert_eq!(set, before);
}

#[test]
fn reinserting_resident_address_changes_nothing() {
    let mut set = SetStore::new(2);
    let _ = set.insert(1);
    let _ = set.insert(2);
    assert_eq!(set.insert(1), None);
    assert_eq!(set.lines(), &[1, 2]);
}

#[test]
fn address_zero_is_a_real_line() {
    let mut set = SetStore::new(2);
    assert_eq!(set.insert(0), None);
    assert_eq!(set.insert(0), None);
    assert_eq!(set.len(), 1);
    assert_eq!(set.insert(8), None);
    assert_eq!(set.insert(16), Some(0));
}

#[test]
fn zero_capacity_set_stores_nothing_and_evicts_nothing() {
    let mut set = SetStore::new(0);
    // The address was never resident, so it is not reported as a victim.
    assert_eq!(set.insert(5), None);
    assert_eq!(set.insert(6), None);
    assert!(set.is_empty());
    assert!(!set.contains(5));
}
