//! Per-Set Line Storage.
//!
//! A set holds up to `ways` full addresses in a dense, left-packed order.
//! Slot 0 is the next line to be evicted: the oldest install under FIFO, the
//! least recently used line under LRU. Occupancy is the vector length, so
//! address zero is an ordinary cacheable address rather than an "empty" marker.
//!
//! # Performance
//!
//! - `contains()`: O(W)
//! - `touch()`: O(W)
//! - `insert()`: O(W) when full (shift left), O(1) otherwise
//!
//! where W is the associativity.

/// Fixed-capacity ordered storage for one cache set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetStore {
    /// Resident addresses, eviction candidate first.
    lines: Vec<u64>,
    /// Maximum number of resident lines.
    ways: usize,
}

impl SetStore {
    /// Creates an empty set that can hold `ways` lines.
    pub fn new(ways: usize) -> Self {
        Self {
            lines: Vec::with_capacity(ways),
            ways,
        }
    }

    /// Maximum number of lines the set can hold.
    pub const fn capacity(&self) -> usize {
        self.ways
    }

    /// Number of resident lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if no line is resident.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns `true` if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.lines.len() >= self.ways
    }

    /// Resident addresses in eviction order (slot 0 first).
    pub fn lines(&self) -> &[u64] {
        &self.lines
    }

    /// Returns `true` if `addr` is resident. Never mutates the set.
    pub fn contains(&self, addr: u64) -> bool {
        self.lines.contains(&addr)
    }

    /// Moves `addr` to the most-recently-used end.
    ///
    /// Every line after the old position shifts down by one. Does nothing if
    /// `addr` is not resident.
    pub fn touch(&mut self, addr: u64) {
        if let Some(pos) = self.lines.iter().position(|&line| line == addr) {
            let line = self.lines.remove(pos);
            self.lines.push(line);
        }
    }

    /// Installs `addr`, evicting slot 0 if the set is full.
    ///
    /// The new line always lands at the most-recently-installed end. Installing
    /// an address that is already resident leaves the set unchanged, so a set
    /// never holds duplicates. A zero-capacity set stores nothing and never
    /// reports a victim, since no line was ever resident.
    ///
    /// # Returns
    ///
    /// The evicted address, if the set was full.
    pub fn insert(&mut self, addr: u64) -> Option<u64> {
        if self.contains(addr) {
            return None;
        }
        if self.ways == 0 {
            return None;
        }
        let victim = if self.is_full() {
            Some(self.lines.remove(0))
        } else {
            None
        };
        self.lines.push(addr);
        victim
    }
}
