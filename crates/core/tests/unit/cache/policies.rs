//! # Cache Replacement Policy Tests
//!
//! Verifies the victim selection of the FIFO and LRU policies. Both evict
//! slot 0 of a full set; they differ only in what a hit does to the order.

use cachesim_core::cache::policies::{self, EvictionPolicy, FifoPolicy, LruPolicy};
use cachesim_core::cache::set::SetStore;
use cachesim_core::config::ReplacementPolicy;
use pretty_assertions::assert_eq;

/// Fills a set of capacity `ways` with `1..=ways` using `policy`.
fn filled(policy: &dyn EvictionPolicy, ways: u64) -> SetStore {
    let mut set = SetStore::new(ways as usize);
    for addr in 1..=ways {
        assert_eq!(policy.on_install(&mut set, addr), None);
    }
    set
}

// ══════════════════════════════════════════════════════════
// 1. FIFO Policy
// ══════════════════════════════════════════════════════════

/// A1..A(K+1) evicts A1 no matter which of A2..AK were hit.
#[test]
fn fifo_evicts_oldest_despite_hits() {
    let policy = FifoPolicy;
    let mut set = filled(&policy, 4);

    for addr in [2, 3, 4, 2, 4] {
        assert!(set.contains(addr));
        policy.on_hit(&mut set, addr);
    }
    assert_eq!(policy.on_install(&mut set, 5), Some(1));
}

/// Even hitting the oldest line does not save it.
#[test]
fn fifo_hit_on_oldest_does_not_protect_it() {
    let policy = FifoPolicy;
    let mut set = filled(&policy, 3);

    policy.on_hit(&mut set, 1);
    assert_eq!(set.lines(), &[1, 2, 3]);
    assert_eq!(policy.on_install(&mut set, 4), Some(1));
}

/// Eviction order follows install order across several rounds.
#[test]
fn fifo_round_robin_eviction_order() {
    let policy = FifoPolicy;
    let mut set = filled(&policy, 2);

    assert_eq!(policy.on_install(&mut set, 3), Some(1));
    assert_eq!(policy.on_install(&mut set, 4), Some(2));
    assert_eq!(policy.on_install(&mut set, 5), Some(3));
    assert_eq!(set.lines(), &[4, 5]);
}

// ══════════════════════════════════════════════════════════
// 2. LRU Policy
// ══════════════════════════════════════════════════════════

/// A1..AK, hit A1, then A(K+1): the victim is A2.
#[test]
fn lru_hit_protects_line() {
    let policy = LruPolicy;
    let mut set = filled(&policy, 4);

    policy.on_hit(&mut set, 1);
    assert_eq!(set.lines(), &[2, 3, 4, 1]);
    assert_eq!(policy.on_install(&mut set, 5), Some(2));
}

/// Classic LRU scenario with repeated re-accesses.
#[test]
fn lru_evicts_true_lru_after_reaccess() {
    let policy = LruPolicy;
    let mut set = filled(&policy, 4);

    policy.on_hit(&mut set, 1);
    policy.on_hit(&mut set, 2);
    // Order: [3, 4, 1, 2]. LRU = 3.
    assert_eq!(policy.on_install(&mut set, 5), Some(3));
    // Order: [4, 1, 2, 5]. LRU = 4.
    assert_eq!(policy.on_install(&mut set, 6), Some(4));
}

/// Repeatedly hitting the MRU line does not change the victim.
#[test]
fn lru_repeated_access_same_line() {
    let policy = LruPolicy;
    let mut set = filled(&policy, 3);

    policy.on_hit(&mut set, 3);
    policy.on_hit(&mut set, 3);
    assert_eq!(set.lines(), &[1, 2, 3]);
    assert_eq!(policy.on_install(&mut set, 4), Some(1));
}

/// Without hits, LRU and FIFO choose the same victims.
#[test]
fn lru_without_hits_matches_fifo() {
    let mut fifo_set = filled(&FifoPolicy, 3);
    let mut lru_set = filled(&LruPolicy, 3);
    for addr in 10..20 {
        assert_eq!(
            FifoPolicy.on_install(&mut fifo_set, addr),
            LruPolicy.on_install(&mut lru_set, addr)
        );
    }
    assert_eq!(fifo_set, lru_set);
}

// ══════════════════════════════════════════════════════════
// 3. Policy Construction
// ══════════════════════════════════════════════════════════

#[test]
fn for_kind_builds_matching_policy() {
    assert_eq!(
        policies::for_kind(ReplacementPolicy::Fifo).kind(),
        ReplacementPolicy::Fifo
    );
    assert_eq!(
        policies::for_kind(ReplacementPolicy::Lru).kind(),
        ReplacementPolicy::Lru
    );
}

#[test]
fn only_lru_reorders_on_hit() {
    assert!(ReplacementPolicy::Lru.reorders_on_hit());
    assert!(!ReplacementPolicy::Fifo.reorders_on_hit());
}
