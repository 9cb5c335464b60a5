//! Exclusive cache hierarchy simulator library.
//!
//! This crate replays memory-access traces against a modeled set-associative
//! cache hierarchy with the following:
//! 1. **Common:** Address decoding and the crate's error types.
//! 2. **Cache:** Per-set storage, FIFO/LRU eviction policies, and cache levels.
//! 3. **Configuration:** Cache geometry, associativity grammar, and hierarchy descriptions.
//! 4. **Simulation:** Trace parsing and the hierarchy controller that drives each access.
//! 5. **Statistics:** Raw counters and the rendered end-of-run report.

/// Common types (address decoding, error types).
pub mod common;
/// Set-associative cache levels, set storage, and eviction policies.
pub mod cache;
/// Simulator configuration (defaults, policy and associativity enums, hierarchy description).
pub mod config;
/// Trace reader and hierarchy controller.
pub mod sim;
/// Hierarchy statistics and report rendering.
pub mod stats;

/// Single cache level; construct with `CacheLevel::new`.
pub use crate::cache::CacheLevel;
/// Root configuration type; use `HierarchyConfig::default()` or deserialize from JSON.
pub use crate::config::HierarchyConfig;
/// Hierarchy controller; owns every level and the statistics for one run.
pub use crate::sim::Hierarchy;
/// Raw counters accumulated by a run.
pub use crate::stats::Statistics;
