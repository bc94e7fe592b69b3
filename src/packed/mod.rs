//! Fixed-length arrays of small unsigned counters sharing the word layout of
//! [`crate::bits`].

mod packed_array;

pub use packed_array::*;
