//! Single-bit flags packed into native machine words.
//!
//! - [`Word`] / [`WordLayout`]: compile-time shift and mask arithmetic for a storage type
//! - [`BitSet`]: the fixed-capacity bit set built on top of it

mod bit_set;
mod word;

pub use bit_set::*;
pub use word::*;
