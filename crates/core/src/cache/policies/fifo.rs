//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the oldest line in a set, regardless of how recently it
//! was accessed. Lines enter at the end of the set and leave from slot 0, so the
//! set order is install order and hits never change it.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()`: O(1)
//!   - `on_install()`: O(W) where W is the associativity
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict frequently-used lines)

use super::{EvictionPolicy, PolicyType};
use crate::cache::set::SetStore;

/// FIFO policy. Stateless: the set's order is the queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoPolicy;

impl EvictionPolicy for FifoPolicy {
    fn kind(&self) -> PolicyType {
        PolicyType::Fifo
    }

    /// Hits leave install order untouched.
    fn on_hit(&self, _set: &mut SetStore, _addr: u64) {}
}
