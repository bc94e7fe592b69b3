use thiserror::Error;

/// Everything that can go wrong while building or addressing a packed array.
///
/// All payloads are plain integers so the type can be produced (and matched on)
/// inside `const` evaluation, see [`crate::bits::WordLayout::for_width`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitArrayError {
    #[error("word width {word_bits} is not a power of two")]
    Configuration { word_bits: u32 },

    #[error("index {index} is out of range (limit {limit})")]
    IndexOutOfRange { index: usize, limit: usize },

    #[error("element width {elem_bits} does not evenly divide a {word_bits}-bit word")]
    ElementWidth { elem_bits: u32, word_bits: u32 },

    #[error("value written at index {index} does not fit in {elem_bits} bits")]
    ValueOutOfRange { index: usize, elem_bits: u32 },

    #[error("{len} elements of {elem_bits} bits overflow the addressable bit range")]
    CapacityOverflow { len: usize, elem_bits: u32 },

    #[error("operation at index {index} should have been rejected")]
    UnexpectedAccept { index: usize },

    #[error("mismatch at index {index}: expected {expected}, found {found}")]
    Mismatch {
        index: usize,
        expected: u128,
        found: u128,
    },
}
