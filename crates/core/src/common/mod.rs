//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by every other component:
//! 1. **Address Decoding:** Splitting a byte address into block offset, set index, and tag.
//! 2. **Error Handling:** Typed configuration and trace errors.

/// Address decomposition into offset, set index, and tag.
pub mod addr;

/// Error types for configuration and trace loading.
pub mod error;

pub use addr::{AddressDecoder, DecodedAddr};
pub use error::{ConfigError, TraceError};
