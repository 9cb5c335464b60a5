//! Address Decomposition.
//!
//! This module splits raw byte addresses into the bit fields a set-associative
//! cache indexes by. It provides the following:
//! 1. **Block Offset:** The low `offset_bits` bits, selecting a byte within a block.
//! 2. **Set Index:** The next `set_bits` bits, selecting the set an address maps to.
//! 3. **Tag:** The remaining high bits.
//!
//! Cache sets in this simulator store full addresses, so the tag is informational
//! only; hit/miss decisions compare whole addresses.

/// Fields extracted from a single address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddr {
    /// Byte offset within the cache block.
    pub offset: u64,
    /// Index of the set the address maps to.
    pub set_index: usize,
    /// High-order bits above the set index.
    pub tag: u64,
}

/// Splits addresses for one cache geometry.
///
/// Both bit counts come from a validated geometry, so their sum never exceeds
/// the address width. Widths of 64 are still handled without shift overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    offset_bits: u32,
    set_bits: u32,
}

/// Returns a mask of the low `bits` bits.
#[inline(always)]
const fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Shifts right, yielding zero once every bit has been shifted out.
#[inline(always)]
const fn shr(value: u64, bits: u32) -> u64 {
    if bits >= u64::BITS { 0 } else { value >> bits }
}

impl AddressDecoder {
    /// Creates a decoder for the given field widths.
    ///
    /// # Arguments
    ///
    /// * `offset_bits` - `log2(block_size)`.
    /// * `set_bits` - `log2(set_count)`.
    pub const fn new(offset_bits: u32, set_bits: u32) -> Self {
        Self {
            offset_bits,
            set_bits,
        }
    }

    /// Number of block-offset bits.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Number of set-index bits.
    pub const fn set_bits(&self) -> u32 {
        self.set_bits
    }

    /// Extracts the byte offset within the block.
    #[inline(always)]
    pub const fn block_offset(&self, addr: u64) -> u64 {
        addr & low_mask(self.offset_bits)
    }

    /// Extracts the set index.
    ///
    /// The result is always `< 2^set_bits`, so it is in range for a cache with
    /// `2^set_bits` sets.
    #[inline(always)]
    pub const fn set_index(&self, addr: u64) -> usize {
        (shr(addr, self.offset_bits) & low_mask(self.set_bits)) as usize
    }

    /// Extracts the tag bits above the set index.
    #[inline(always)]
    pub const fn tag(&self, addr: u64) -> u64 {
        shr(addr, self.offset_bits.saturating_add(self.set_bits))
    }

    /// Decodes every field of `addr` at once.
    pub const fn decode(&self, addr: u64) -> DecodedAddr {
        DecodedAddr {
            offset: self.block_offset(addr),
            set_index: self.set_index(addr),
            tag: self.tag(addr),
        }
    }
}
