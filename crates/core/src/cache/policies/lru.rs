//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the line that has not been accessed for the longest time.
//! The set itself is the usage stack: slot 0 is the LRU line and the last
//! occupied slot is the MRU line. A hit moves the line to the MRU end, shifting
//! everything after its old position down by one.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()`: O(W) where W is the number of ways (associativity)
//!   - `on_install()`: O(W)
//! - **Best Case:** Workloads with good temporal locality
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::{EvictionPolicy, PolicyType};
use crate::cache::set::SetStore;

/// LRU policy. Stateless: recency lives in the set's order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl EvictionPolicy for LruPolicy {
    fn kind(&self) -> PolicyType {
        PolicyType::Lru
    }

    /// Promotes `addr` to most recently used.
    fn on_hit(&self, set: &mut SetStore, addr: u64) {
        set.touch(addr);
    }
}
