pub mod bits;
pub mod error;
pub mod packed;
pub mod verify;

pub use bits::BitSet;
pub use error::BitArrayError;
