//! Hierarchy statistics collection and reporting.
//!
//! This module tracks the outcome of every access in a run. It provides:
//! 1. **Raw counters:** Memory reads and writes, plus hits and misses per cache level.
//! 2. **Derived metrics:** Per-level hit rate and the effective memory-read count.
//! 3. **Reports:** The end-of-run summary, rendered as `key:value` text or JSON.
//!
//! Raw counters are only ever incremented by the hierarchy controller. The
//! effective memory-read count is a report-time value and is never written
//! back into the counters.

use std::fmt;

use serde::Serialize;

/// Hit and miss counts for one cache level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelStats {
    /// Lookups that found the line.
    pub hits: u64,
    /// Lookups that did not.
    pub misses: u64,
}

impl LevelStats {
    /// Total lookups at this level.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, or `0.0` if the level was never consulted.
    pub fn hit_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    /// Fraction of lookups that missed, or `0.0` if the level was never consulted.
    pub fn miss_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.misses as f64 / total as f64,
        }
    }
}

/// Raw counters for one simulation run.
///
/// Zero-initialized, monotonically incremented, read at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// L1 misses, each of which fetches a block.
    pub mem_reads: u64,
    /// Write operations in the trace.
    pub mem_writes: u64,
    /// Per-level counters, L1 first.
    pub levels: Vec<LevelStats>,
}

impl Statistics {
    /// Creates zeroed counters for a hierarchy of `depth` levels.
    pub fn new(depth: usize) -> Self {
        Self {
            mem_reads: 0,
            mem_writes: 0,
            levels: vec![LevelStats::default(); depth],
        }
    }

    /// Counters for level `index` (0 = L1); zero if the level does not exist.
    pub fn level(&self, index: usize) -> LevelStats {
        self.levels.get(index).copied().unwrap_or_default()
    }

    /// L1 counters.
    pub fn l1(&self) -> LevelStats {
        self.level(0)
    }

    /// L2 counters; zero in a single-level hierarchy.
    pub fn l2(&self) -> LevelStats {
        self.level(1)
    }

    /// Hits served by any level below L1.
    pub fn lower_hits(&self) -> u64 {
        self.levels.iter().skip(1).map(|l| l.hits).sum()
    }

    /// Memory reads not satisfied by a lower cache level.
    ///
    /// For two levels this is `mem_reads - l2_hits`. Saturates at zero.
    pub fn effective_mem_reads(&self) -> u64 {
        self.mem_reads.saturating_sub(self.lower_hits())
    }

    /// Builds the end-of-run report for this hierarchy depth.
    pub fn report(&self) -> Report {
        Report::from_stats(self)
    }

    pub(crate) const fn record_read(&mut self) {
        self.mem_reads += 1;
    }

    pub(crate) const fn record_write(&mut self) {
        self.mem_writes += 1;
    }

    pub(crate) fn record_hit(&mut self, level: usize) {
        if let Some(l) = self.levels.get_mut(level) {
            l.hits += 1;
        }
    }

    pub(crate) fn record_miss(&mut self, level: usize) {
        if let Some(l) = self.levels.get_mut(level) {
            l.misses += 1;
        }
    }
}

/// End-of-run summary.
///
/// The single-level report shows the raw counters. Reports for deeper
/// hierarchies show the effective memory-read count in place of the raw one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    /// One cache in front of memory.
    SingleLevel {
        /// Raw memory reads.
        mem_reads: u64,
        /// Memory writes.
        mem_writes: u64,
        /// Cache hits.
        cache_hits: u64,
        /// Cache misses.
        cache_misses: u64,
    },
    /// Exclusive L1/L2 hierarchy.
    TwoLevel {
        /// Effective memory reads (`mem_reads - l2_hits`).
        mem_reads: u64,
        /// Memory writes.
        mem_writes: u64,
        /// L1 hits.
        l1_hits: u64,
        /// L1 misses.
        l1_misses: u64,
        /// L2 hits.
        l2_hits: u64,
        /// L2 misses.
        l2_misses: u64,
    },
    /// Three or more levels.
    MultiLevel {
        /// Effective memory reads (raw reads minus hits below L1).
        mem_reads: u64,
        /// Memory writes.
        mem_writes: u64,
        /// Per-level counters, L1 first.
        levels: Vec<LevelStats>,
    },
}

impl Report {
    /// Builds a report from raw counters, choosing the shape by hierarchy depth.
    pub fn from_stats(stats: &Statistics) -> Self {
        match stats.levels.len() {
            0 | 1 => Self::SingleLevel {
                mem_reads: stats.mem_reads,
                mem_writes: stats.mem_writes,
                cache_hits: stats.l1().hits,
                cache_misses: stats.l1().misses,
            },
            2 => Self::TwoLevel {
                mem_reads: stats.effective_mem_reads(),
                mem_writes: stats.mem_writes,
                l1_hits: stats.l1().hits,
                l1_misses: stats.l1().misses,
                l2_hits: stats.l2().hits,
                l2_misses: stats.l2().misses,
            },
            _ => Self::MultiLevel {
                mem_reads: stats.effective_mem_reads(),
                mem_writes: stats.mem_writes,
                levels: stats.levels.clone(),
            },
        }
    }

    /// Memory-read figure shown in the report.
    pub const fn mem_reads(&self) -> u64 {
        match self {
            Self::SingleLevel { mem_reads, .. }
            | Self::TwoLevel { mem_reads, .. }
            | Self::MultiLevel { mem_reads, .. } => *mem_reads,
        }
    }

    /// Renders the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Prints the text report to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for Report {
    /// Formats the report as `key:value` lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleLevel {
                mem_reads,
                mem_writes,
                cache_hits,
                cache_misses,
            } => {
                writeln!(f, "memread:{mem_reads}")?;
                writeln!(f, "memwrite:{mem_writes}")?;
                writeln!(f, "cachehit:{cache_hits}")?;
                writeln!(f, "cachemiss:{cache_misses}")
            }
            Self::TwoLevel {
                mem_reads,
                mem_writes,
                l1_hits,
                l1_misses,
                l2_hits,
                l2_misses,
            } => {
                writeln!(f, "memread:{mem_reads}")?;
                writeln!(f, "memwrite:{mem_writes}")?;
                writeln!(f, "l1cachehit:{l1_hits}")?;
                writeln!(f, "l1cachemiss:{l1_misses}")?;
                writeln!(f, "l2cachehit:{l2_hits}")?;
                writeln!(f, "l2cachemiss:{l2_misses}")
            }
            Self::MultiLevel {
                mem_reads,
                mem_writes,
                levels,
            } => {
                writeln!(f, "memread:{mem_reads}")?;
                writeln!(f, "memwrite:{mem_writes}")?;
                for (i, level) in levels.iter().enumerate() {
                    writeln!(f, "l{}cachehit:{}", i + 1, level.hits)?;
                    writeln!(f, "l{}cachemiss:{}", i + 1, level.misses)?;
                }
                Ok(())
            }
        }
    }
}
