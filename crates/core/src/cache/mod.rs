//! Set-Associative Cache Level.
//!
//! This module implements one level of a cache hierarchy. A level is a grid of
//! `SetStore`s sharing one replacement policy and one address split. It answers
//! lookups, applies the policy's hit update, and installs lines, handing any
//! evicted address back to the caller so it can be forwarded to the next level.

/// Cache replacement policy implementations (FIFO, LRU).
pub mod policies;

/// Fixed-capacity ordered storage for a single set.
pub mod set;

use tracing::{debug, trace};

use self::policies::EvictionPolicy;
use self::set::SetStore;
use crate::common::{AddressDecoder, ConfigError};
use crate::config::{CacheConfig, CacheGeometry, ReplacementPolicy as PolicyType};

/// One level of the hierarchy: `sets` sets of `ways` lines each.
///
/// Storage is allocated once at construction and never resized.
#[derive(Debug)]
pub struct CacheLevel {
    sets: Vec<SetStore>,
    geometry: CacheGeometry,
    decoder: AddressDecoder,
    policy: Box<dyn EvictionPolicy>,
}

impl CacheLevel {
    /// Creates an empty cache level from a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache size, block size, associativity, and policy.
    ///
    /// # Errors
    ///
    /// Returns the `ConfigError` from [`CacheConfig::geometry`] if the
    /// configuration does not describe a valid cache.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        debug!(
            size_bytes = config.size_bytes,
            line_bytes = geometry.line_bytes,
            sets = geometry.sets,
            ways = geometry.ways,
            policy = %config.policy,
            "cache level created"
        );
        Self::with_geometry(geometry, config.policy)
    }

    /// Creates an empty cache level from an explicit geometry.
    ///
    /// # Errors
    ///
    /// Any error from [`CacheGeometry::check`]. Every set index the decoder
    /// can produce therefore names an allocated set.
    pub fn with_geometry(
        geometry: CacheGeometry,
        policy: PolicyType,
    ) -> Result<Self, ConfigError> {
        geometry.check()?;
        Ok(Self {
            sets: vec![SetStore::new(geometry.ways); geometry.sets],
            decoder: AddressDecoder::new(geometry.offset_bits, geometry.set_bits),
            geometry,
            policy: policies::for_kind(policy),
        })
    }

    /// Validated shape of this level.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Number of sets.
    pub const fn set_count(&self) -> usize {
        self.geometry.sets
    }

    /// Lines per set.
    pub const fn associativity(&self) -> usize {
        self.geometry.ways
    }

    /// Block size in bytes.
    pub const fn block_size(&self) -> usize {
        self.geometry.line_bytes
    }

    /// Replacement policy in effect.
    pub fn policy(&self) -> PolicyType {
        self.policy.kind()
    }

    /// Address decoder for this level's split.
    pub const fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// Set index `addr` maps to.
    #[inline]
    pub const fn set_index(&self, addr: u64) -> usize {
        self.decoder.set_index(addr)
    }

    /// Returns the set at `index`, if in range.
    pub fn set(&self, index: usize) -> Option<&SetStore> {
        self.sets.get(index)
    }

    /// Iterates over every set in index order.
    pub fn sets(&self) -> impl Iterator<Item = &SetStore> {
        self.sets.iter()
    }

    /// Total number of resident lines across all sets.
    pub fn resident_lines(&self) -> usize {
        self.sets.iter().map(SetStore::len).sum()
    }

    /// Checks if the level holds `addr`.
    ///
    /// Never mutates the level: repeated lookups without an intervening
    /// install or hit update return the same answer.
    ///
    /// # Panics
    ///
    /// This function will not panic. `set_index` is masked to `set_bits`, so
    /// it is always `< sets.len()`.
    pub fn lookup(&self, addr: u64) -> bool {
        self.sets
            .get(self.set_index(addr))
            .is_some_and(|set| set.contains(addr))
    }

    /// Applies the policy's hit update for `addr`.
    ///
    /// Reorders the owning set under LRU; does nothing under FIFO.
    pub fn record_hit(&mut self, addr: u64) {
        let index = self.set_index(addr);
        if let Some(set) = self.sets.get_mut(index) {
            self.policy.on_hit(set, addr);
        }
    }

    /// Installs `addr` into its set.
    ///
    /// # Returns
    ///
    /// The address evicted to make room, if the set was full.
    pub fn install(&mut self, addr: u64) -> Option<u64> {
        let index = self.set_index(addr);
        let set = self.sets.get_mut(index)?;
        let victim = self.policy.on_install(set, addr);
        if let Some(victim) = victim {
            trace!(set = index, addr, victim, "evict");
        }
        victim
    }
}
