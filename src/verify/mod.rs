//! Randomized self-checks over [`crate::bits::BitSet`] and
//! [`crate::packed::PackedArray`].
//!
//! A sweep walks array lengths with a random stride and, for every length,
//! runs the zero / pattern / random-fill / bounds checks for each container
//! and each element width. The `bitarray-check` binary drives this module.

mod stats;
mod sweep;

pub use stats::*;
pub use sweep::*;
