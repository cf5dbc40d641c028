//! Phone number input masking.
//!
//! This crate re-exports [`phone_mask_core`]; see its documentation for the
//! formatter, the edit processor and the country table.

pub use phone_mask_core::*;
