//! # Unit Components
//!
//! Tests for each simulator component, organized to mirror the crate's
//! module tree.
