//! Hierarchy controller: owns every cache level and the run's statistics.
//!
//! Each access is processed to completion before the next one is read:
//! 1. **Write accounting:** Writes bump `mem_writes`.
//! 2. **L1 lookup:** A hit is counted and handed to L1's policy; the access ends there.
//! 3. **Miss classification:** An L1 miss counts a memory read, then walks the
//!    lower levels to record where the line was resident. This walk only
//!    observes; it neither installs nor reorders.
//! 4. **Install and forward:** The line is installed in L1. In an exclusive
//!    hierarchy, the L1 victim is installed one level down, and each victim that
//!    install produces cascades further; victims of the last level are dropped.
//!
//! Because every step is atomic with respect to the model, a caller can stop
//! feeding accesses at any point and still read consistent statistics.

use tracing::{debug, trace};

use crate::cache::CacheLevel;
use crate::common::ConfigError;
use crate::config::HierarchyConfig;
use crate::sim::trace::Access;
use crate::stats::{Report, Statistics};

/// Result of a single access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// L1 held the line.
    Hit,
    /// L1 missed and the line was installed there.
    Miss {
        /// Lower level (1 = L2) that held the line, or `None` if it came from memory.
        lower_hit: Option<usize>,
        /// Address evicted from L1 by the install, if its set was full.
        victim: Option<u64>,
    },
}

impl AccessOutcome {
    /// Returns `true` if L1 hit.
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit)
    }
}

/// Cache hierarchy of one or more levels, fastest first.
///
/// With one level this is a plain single-cache simulator; with two or more it
/// is an exclusive hierarchy unless forwarding is turned off.
#[derive(Debug)]
pub struct Hierarchy {
    l1: CacheLevel,
    lower: Vec<CacheLevel>,
    exclusive: bool,
    stats: Statistics,
}

impl Hierarchy {
    /// Builds every level described by `config`.
    ///
    /// # Errors
    ///
    /// `NoLevels` for an empty description, or `Level` wrapping the first
    /// level whose geometry is invalid.
    pub fn new(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        let levels = config
            .levels
            .iter()
            .enumerate()
            .map(|(i, level)| {
                CacheLevel::new(level).map_err(|e| ConfigError::Level {
                    level: i + 1,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_levels(levels, config.exclusive)
    }

    /// Assembles a hierarchy from already constructed levels, L1 first.
    ///
    /// # Errors
    ///
    /// `NoLevels` if `levels` is empty.
    pub fn from_levels(levels: Vec<CacheLevel>, exclusive: bool) -> Result<Self, ConfigError> {
        let mut levels = levels.into_iter();
        let l1 = levels.next().ok_or(ConfigError::NoLevels)?;
        let lower: Vec<CacheLevel> = levels.collect();
        let depth = lower.len() + 1;
        debug!(depth, exclusive, "hierarchy created");
        Ok(Self {
            l1,
            lower,
            exclusive,
            stats: Statistics::new(depth),
        })
    }

    /// Number of cache levels.
    pub fn depth(&self) -> usize {
        self.lower.len() + 1
    }

    /// Returns `true` if L1 victims are forwarded down the hierarchy.
    pub const fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Level `index` (0 = L1), if it exists.
    pub fn level(&self, index: usize) -> Option<&CacheLevel> {
        match index {
            0 => Some(&self.l1),
            i => self.lower.get(i - 1),
        }
    }

    /// The L1 cache.
    pub const fn l1(&self) -> &CacheLevel {
        &self.l1
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Consumes the hierarchy, returning its counters.
    pub fn into_stats(self) -> Statistics {
        self.stats
    }

    /// End-of-run report for the counters accumulated so far.
    pub fn report(&self) -> Report {
        self.stats.report()
    }

    /// Processes one access.
    pub fn access(&mut self, access: Access) -> AccessOutcome {
        let addr = access.addr;
        if access.is_write() {
            self.stats.record_write();
        }

        if self.l1.lookup(addr) {
            self.stats.record_hit(0);
            self.l1.record_hit(addr);
            trace!(%access, "l1 hit");
            return AccessOutcome::Hit;
        }

        self.stats.record_miss(0);
        self.stats.record_read();
        let lower_hit = self.classify(addr);

        let victim = self.l1.install(addr);
        if let Some(victim) = victim {
            if self.exclusive {
                self.forward(victim);
            }
        }
        trace!(%access, ?lower_hit, ?victim, "l1 miss");
        AccessOutcome::Miss { lower_hit, victim }
    }

    /// Records where below L1 the line was resident.
    ///
    /// Stops at the first level holding `addr`; every level passed counts a miss.
    fn classify(&mut self, addr: u64) -> Option<usize> {
        for (i, level) in self.lower.iter().enumerate() {
            if level.lookup(addr) {
                self.stats.record_hit(i + 1);
                return Some(i + 1);
            }
            self.stats.record_miss(i + 1);
        }
        None
    }

    /// Installs an L1 victim one level down, cascading any further victims.
    fn forward(&mut self, victim: u64) {
        let mut pending = Some(victim);
        for level in &mut self.lower {
            match pending {
                Some(addr) => pending = level.install(addr),
                None => return,
            }
        }
        if let Some(dropped) = pending {
            trace!(dropped, "evicted from last level");
        }
    }

    /// Replays a whole trace.
    ///
    /// # Returns
    ///
    /// The counters after the last access.
    pub fn run<I>(&mut self, trace: I) -> &Statistics
    where
        I: IntoIterator<Item = Access>,
    {
        for access in trace {
            let _ = self.access(access);
        }
        &self.stats
    }

    /// Replays a fallible trace stream, stopping at the first error.
    ///
    /// Accesses before the error have already been applied.
    ///
    /// # Errors
    ///
    /// The first error yielded by `trace`.
    pub fn try_run<I, E>(&mut self, trace: I) -> Result<&Statistics, E>
    where
        I: IntoIterator<Item = Result<Access, E>>,
    {
        for access in trace {
            let _ = self.access(access?);
        }
        Ok(&self.stats)
    }
}
