use std::fmt::{Debug, LowerHex};
use std::ops::{Add, BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Shl, Shr, Sub};

use crate::error::BitArrayError;

/// Shift/mask arithmetic for translating a global bit index into a
/// `(word index, bit within word)` pair.
///
/// # Examples
///
/// ```
/// use bitarray::bits::WordLayout;
///
/// let layout = WordLayout::for_width(64).unwrap();
/// assert_eq!(layout.index_shift, 6);
/// assert_eq!(layout.locate(65), (1, 1));
/// assert_eq!(layout.words_for(65), 2);
///
/// assert!(WordLayout::for_width(24).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordLayout {
    pub word_bits: u32,
    pub index_shift: u32,
    pub index_mask: usize,
}

impl WordLayout {
    /// Builds the layout for a word of `word_bits` bits.
    ///
    /// Fails with [`BitArrayError::Configuration`] unless `word_bits` is a
    /// non-zero power of two, since shift/mask decomposition is meaningless
    /// otherwise.
    pub const fn for_width(word_bits: u32) -> Result<Self, BitArrayError> {
        if !word_bits.is_power_of_two() {
            return Err(BitArrayError::Configuration { word_bits });
        }
        Ok(WordLayout {
            word_bits,
            index_shift: word_bits.trailing_zeros(),
            index_mask: (word_bits - 1) as usize,
        })
    }

    /// Splits `bit` into its word index and its position inside that word.
    #[inline]
    pub const fn locate(&self, bit: usize) -> (usize, u32) {
        (bit >> self.index_shift, (bit & self.index_mask) as u32)
    }

    /// Number of words needed to hold `bits` bits, rounded up to a whole word.
    pub const fn words_for(&self, bits: usize) -> usize {
        let mut size = bits >> self.index_shift;
        if bits & self.index_mask != 0 {
            size += 1;
        }
        size
    }

    /// Total number of bits held by `words` words.
    pub const fn bits_in(&self, words: usize) -> usize {
        words << self.index_shift
    }
}

/// A native unsigned integer usable as backing storage.
///
/// The layout is resolved at compile time: instantiating a container over a
/// type whose `BITS` is not a power of two fails const evaluation of
/// [`Word::LAYOUT`].
pub trait Word:
    Copy
    + Ord
    + Debug
    + LowerHex
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + BitAndAssign
    + BitOrAssign
{
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;

    const LAYOUT: WordLayout = match WordLayout::for_width(Self::BITS) {
        Ok(layout) => layout,
        Err(_) => panic!("word width must be a power of two"),
    };

    /// Keeps the low `Self::BITS` bits of `value`.
    fn truncate_from(value: u64) -> Self;

    fn widen(self) -> u128;
}

macro_rules! impl_word {
    ($($t:ty),*) => {
        $(
            impl Word for $t {
                const BITS: u32 = <$t>::BITS;
                const ZERO: Self = 0;
                const ONE: Self = 1;

                #[inline]
                fn truncate_from(value: u64) -> Self {
                    value as $t
                }

                #[inline]
                fn widen(self) -> u128 {
                    self as u128
                }
            }
        )*
    };
}

impl_word!(u8, u16, u32, u64, u128, usize);
