//! Cache Replacement Policies.
//!
//! Implements the algorithms that order lines within a set and pick the victim
//! when a full set receives a new line.
//!
//! # Policies
//!
//! - `Fifo`: First-In, First-Out.
//! - `Lru`: Least Recently Used.
//!
//! Both keep the next victim in slot 0 and append new lines at the far end, so
//! installs behave identically. A policy is fully characterized by what it does
//! to the set on a hit.

use std::fmt;

use super::set::SetStore;
use crate::config::ReplacementPolicy as PolicyType;

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

/// Trait for cache replacement policies.
///
/// Defines how a set is reordered on a hit and how a new line is placed.
pub trait EvictionPolicy: Send + Sync + fmt::Debug {
    /// The configuration value this policy implements.
    fn kind(&self) -> PolicyType;

    /// Updates the set after a hit on `addr`.
    ///
    /// # Arguments
    ///
    /// * `set` - The set holding `addr`.
    /// * `addr` - The address that hit.
    fn on_hit(&self, set: &mut SetStore, addr: u64);

    /// Places `addr` into `set`.
    ///
    /// # Returns
    ///
    /// The evicted address, if the set was full.
    fn on_install(&self, set: &mut SetStore, addr: u64) -> Option<u64> {
        set.insert(addr)
    }
}

/// Builds the policy object for a configured policy.
pub fn for_kind(kind: PolicyType) -> Box<dyn EvictionPolicy> {
    match kind {
        PolicyType::Fifo => Box::new(FifoPolicy),
        PolicyType::Lru => Box::new(LruPolicy),
    }
}
