//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures and enums used to
//! parameterize a cache hierarchy. It provides:
//! 1. **Defaults:** Baseline cache geometry for L1 and L2.
//! 2. **Enums:** Replacement policy and associativity, with their string grammar.
//! 3. **Structures:** Per-level `CacheConfig` and the ordered `HierarchyConfig`.
//! 4. **Validation:** `CacheConfig::geometry` derives and checks set count and bit widths.
//!
//! Configuration is supplied from command-line strings (`from_args`) or as JSON;
//! use `HierarchyConfig::default()` for a stock two-level hierarchy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default L1 capacity in bytes (32 KiB).
    pub const L1_SIZE: usize = 32 * 1024;

    /// Default L1 associativity.
    pub const L1_WAYS: usize = 4;

    /// Default L2 capacity in bytes (256 KiB).
    pub const L2_SIZE: usize = 256 * 1024;

    /// Default L2 associativity.
    pub const L2_WAYS: usize = 8;

    /// Default block size in bytes.
    pub const LINE_BYTES: usize = 64;
}

/// Cache replacement policy algorithms.
///
/// Both policies evict the line in slot 0 of a full set. They differ only in
/// whether a hit reorders the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementPolicy {
    /// First In First Out: hits never reorder, so slot 0 is the oldest install.
    #[serde(alias = "FIFO", alias = "Fifo")]
    Fifo,
    /// Least Recently Used: hits move the line to the most-recently-used end.
    #[default]
    #[serde(alias = "LRU", alias = "Lru")]
    Lru,
}

impl ReplacementPolicy {
    /// Returns `true` if a hit reorders the owning set.
    pub const fn reorders_on_hit(self) -> bool {
        matches!(self, Self::Lru)
    }
}

impl FromStr for ReplacementPolicy {
    type Err = ConfigError;

    /// Parses `fifo` or `lru`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("fifo") {
            Ok(Self::Fifo)
        } else if s.eq_ignore_ascii_case("lru") {
            Ok(Self::Lru)
        } else {
            Err(ConfigError::UnknownPolicy(s.to_string()))
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fifo => write!(f, "fifo"),
            Self::Lru => write!(f, "lru"),
        }
    }
}

/// Lines per set, as written on the command line.
///
/// The grammar is `direct` (one line per set), `assoc` (a single set holding
/// every line), or `assoc:N` (N lines per set). `assoc:1` is the same cache as
/// `direct` and parses to `Direct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Associativity {
    /// Direct-mapped.
    #[default]
    Direct,
    /// Fully associative.
    Full,
    /// N-way set-associative.
    Ways(usize),
}

impl FromStr for Associativity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(Self::Direct),
            "assoc" => Ok(Self::Full),
            _ => {
                let n = s
                    .strip_prefix("assoc:")
                    .and_then(|n| n.parse::<usize>().ok())
                    .ok_or_else(|| ConfigError::InvalidAssociativity(s.to_string()))?;
                match n {
                    0 => Err(ConfigError::InvalidAssociativity(s.to_string())),
                    1 => Ok(Self::Direct),
                    n => Ok(Self::Ways(n)),
                }
            }
        }
    }
}

impl TryFrom<String> for Associativity {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Associativity> for String {
    fn from(value: Associativity) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Associativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Full => write!(f, "assoc"),
            Self::Ways(n) => write!(f, "assoc:{n}"),
        }
    }
}

/// Parses a decimal size that must be a positive power of two.
///
/// # Arguments
///
/// * `field` - Parameter name used in error messages (e.g. `"cache size"`).
/// * `text` - The decimal string to parse.
///
/// # Errors
///
/// `InvalidNumber` if `text` is not an unsigned integer, `NotPowerOfTwo` if it
/// is zero or not a power of two.
pub fn parse_size(field: &'static str, text: &str) -> Result<usize, ConfigError> {
    let value = text
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidNumber {
            field,
            value: text.to_string(),
        })?;
    if value.is_power_of_two() {
        Ok(value)
    } else {
        Err(ConfigError::NotPowerOfTwo { field, value })
    }
}

/// Validated shape of one cache level.
///
/// Invariant: `line_bytes * sets * ways == size_bytes`, and `line_bytes`,
/// `sets`, and `ways` are all powers of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheGeometry {
    /// Number of sets.
    pub sets: usize,
    /// Lines per set.
    pub ways: usize,
    /// Block size in bytes.
    pub line_bytes: usize,
    /// `log2(line_bytes)`.
    pub offset_bits: u32,
    /// `log2(sets)`.
    pub set_bits: u32,
}

impl CacheGeometry {
    /// Total number of lines the level can hold.
    pub const fn capacity_lines(&self) -> usize {
        self.sets * self.ways
    }

    /// Total capacity in bytes.
    pub const fn size_bytes(&self) -> usize {
        self.sets * self.ways * self.line_bytes
    }

    /// Re-checks the invariants of a geometry that may have been built by hand.
    ///
    /// # Errors
    ///
    /// `NoSets` for zero sets, `NotPowerOfTwo` for a zero or odd way count or
    /// block size, `GeometryTooWide` if the split exceeds 64 bits, and
    /// `InconsistentGeometry` if `sets` or `line_bytes` is not exactly
    /// `1 << set_bits` or `1 << offset_bits`.
    pub const fn check(&self) -> Result<(), ConfigError> {
        if self.sets == 0 {
            return Err(ConfigError::NoSets);
        }
        if !self.ways.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "associativity",
                value: self.ways,
            });
        }
        if !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "block size",
                value: self.line_bytes,
            });
        }
        let width = self.offset_bits.saturating_add(self.set_bits);
        if width > u64::BITS {
            return Err(ConfigError::GeometryTooWide(width));
        }
        if !matches!(1usize.checked_shl(self.set_bits), Some(n) if n == self.sets) {
            return Err(ConfigError::InconsistentGeometry {
                field: "set count",
                value: self.sets,
                bits: self.set_bits,
            });
        }
        if !matches!(1usize.checked_shl(self.offset_bits), Some(n) if n == self.line_bytes) {
            return Err(ConfigError::InconsistentGeometry {
                field: "block size",
                value: self.line_bytes,
                bits: self.offset_bits,
            });
        }
        Ok(())
    }
}

/// Configuration for a single cache level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Block (line) size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Lines per set
    #[serde(default)]
    pub associativity: Associativity,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    fn default_size() -> usize {
        defaults::L1_SIZE
    }

    /// Returns the default block size in bytes.
    fn default_line() -> usize {
        defaults::LINE_BYTES
    }

    /// Creates a configuration from already-parsed parts.
    pub const fn new(
        size_bytes: usize,
        line_bytes: usize,
        associativity: Associativity,
        policy: ReplacementPolicy,
    ) -> Self {
        Self {
            size_bytes,
            line_bytes,
            associativity,
            policy,
        }
    }

    /// Builds a configuration from command-line strings.
    ///
    /// # Arguments
    ///
    /// * `size` - Decimal cache size in bytes.
    /// * `assoc` - `direct`, `assoc`, or `assoc:N`.
    /// * `policy` - `fifo` or `lru`.
    /// * `block` - Decimal block size in bytes.
    ///
    /// # Errors
    ///
    /// Returns the first string that fails to parse, or the geometry error if
    /// the parts do not form a valid cache.
    pub fn from_args(size: &str, assoc: &str, policy: &str, block: &str) -> Result<Self, ConfigError> {
        let config = Self {
            size_bytes: parse_size("cache size", size)?,
            line_bytes: parse_size("block size", block)?,
            associativity: assoc.parse()?,
            policy: policy.parse()?,
        };
        let _ = config.geometry()?;
        Ok(config)
    }

    /// Resolves the associativity to a concrete number of lines per set.
    ///
    /// A fully associative cache holds every line in one set. Returns zero if
    /// the block size is zero.
    pub const fn ways(&self) -> usize {
        match self.associativity {
            Associativity::Direct => 1,
            Associativity::Full => match self.size_bytes.checked_div(self.line_bytes) {
                Some(lines) => lines,
                None => 0,
            },
            Associativity::Ways(n) => n,
        }
    }

    /// Derives and validates the level's geometry.
    ///
    /// # Errors
    ///
    /// Rejects zero or non-power-of-two sizes and associativities, blocks or
    /// sets that do not fit, and splits wider than a 64-bit address.
    pub fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        let size_bytes = self.size_bytes;
        let line_bytes = self.line_bytes;
        if !size_bytes.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "cache size",
                value: size_bytes,
            });
        }
        if !line_bytes.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "block size",
                value: line_bytes,
            });
        }
        if line_bytes > size_bytes {
            return Err(ConfigError::BlockLargerThanCache {
                size_bytes,
                line_bytes,
            });
        }

        let ways = self.ways();
        if !ways.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "associativity",
                value: ways,
            });
        }
        let set_bytes = ways
            .checked_mul(line_bytes)
            .filter(|&bytes| bytes <= size_bytes)
            .ok_or(ConfigError::AssociativityTooLarge {
                ways,
                line_bytes,
                size_bytes,
            })?;

        let sets = size_bytes / set_bytes;
        if sets == 0 {
            return Err(ConfigError::NoSets);
        }

        let offset_bits = line_bytes.trailing_zeros();
        let set_bits = sets.trailing_zeros();
        if offset_bits + set_bits > u64::BITS {
            return Err(ConfigError::GeometryTooWide(offset_bits + set_bits));
        }

        Ok(CacheGeometry {
            sets,
            ways,
            line_bytes,
            offset_bits,
            set_bits,
        })
    }

    /// Stock L2 configuration used by `HierarchyConfig::default()`.
    pub const fn default_l2() -> Self {
        Self {
            size_bytes: defaults::L2_SIZE,
            line_bytes: defaults::LINE_BYTES,
            associativity: Associativity::Ways(defaults::L2_WAYS),
            policy: ReplacementPolicy::Lru,
        }
    }
}

impl Default for CacheConfig {
    /// Returns the stock L1 configuration.
    ///
    /// 32 KiB, 64-byte blocks, 4-way, LRU.
    fn default() -> Self {
        Self {
            size_bytes: defaults::L1_SIZE,
            line_bytes: defaults::LINE_BYTES,
            associativity: Associativity::Ways(defaults::L1_WAYS),
            policy: ReplacementPolicy::Lru,
        }
    }
}

/// Ordered description of a cache hierarchy, fastest level first.
///
/// # Examples
///
/// Deserializing from JSON:
///
/// ```
/// use cachesim_core::config::{Associativity, HierarchyConfig, ReplacementPolicy};
///
/// let json = r#"{
///     "levels": [
///         { "size_bytes": 64, "line_bytes": 4, "associativity": "assoc:2", "policy": "fifo" },
///         { "size_bytes": 256, "line_bytes": 4, "associativity": "assoc", "policy": "lru" }
///     ],
///     "exclusive": true
/// }"#;
///
/// let config = HierarchyConfig::from_json(json).unwrap();
/// assert_eq!(config.levels.len(), 2);
/// assert_eq!(config.levels[0].associativity, Associativity::Ways(2));
/// assert_eq!(config.levels[0].policy, ReplacementPolicy::Fifo);
/// assert_eq!(config.levels[1].associativity, Associativity::Full);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Cache levels, L1 first
    pub levels: Vec<CacheConfig>,

    /// Forward lines evicted from one level into the next
    #[serde(default = "HierarchyConfig::default_exclusive")]
    pub exclusive: bool,
}

impl HierarchyConfig {
    /// Forwarding is on unless a description turns it off.
    const fn default_exclusive() -> bool {
        true
    }

    /// An exclusive L1/L2 hierarchy.
    pub fn two_level(l1: CacheConfig, l2: CacheConfig) -> Self {
        Self {
            levels: vec![l1, l2],
            exclusive: true,
        }
    }

    /// A hierarchy with a single cache in front of memory.
    pub fn single(cache: CacheConfig) -> Self {
        Self {
            levels: vec![cache],
            exclusive: true,
        }
    }

    /// Parses and validates a JSON hierarchy description.
    ///
    /// # Errors
    ///
    /// `Json` if the text does not deserialize, otherwise any error from
    /// [`HierarchyConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that there is at least one level and that every level has a
    /// valid geometry.
    ///
    /// # Errors
    ///
    /// `NoLevels`, or `Level` wrapping the first per-level failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        for (i, level) in self.levels.iter().enumerate() {
            let _ = level.geometry().map_err(|e| ConfigError::Level {
                level: i + 1,
                source: Box::new(e),
            })?;
        }
        Ok(())
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self::two_level(CacheConfig::default(), CacheConfig::default_l2())
    }
}
