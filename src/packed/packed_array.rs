use tracing::debug;

use crate::bits::Word;
use crate::error::BitArrayError;

/// A fixed-length array of unsigned elements, each `elem_bits` wide, packed
/// into machine words.
///
/// `elem_bits` must be a power of two no wider than the word, so an element
/// never straddles two words. Element `i` occupies bits
/// `[i * elem_bits, (i + 1) * elem_bits)`, lowest bits first.
///
/// # Examples
///
/// ```
/// use bitarray::packed::PackedArray;
///
/// let mut counters = PackedArray::<u64>::new(100, 4).unwrap();
/// counters.set(7, 9).unwrap();
/// assert_eq!(counters.get(7).unwrap(), 9);
///
/// // increments saturate at 2^4 - 1
/// for _ in 0..20 {
///     counters.inc(7).unwrap();
/// }
/// assert_eq!(counters.get(7).unwrap(), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedArray<W: Word = u64> {
    words: Box<[W]>,
    len: usize,
    elem_bits: u32,
    elem_shift: u32,
    elem_mask: W,
}

impl<W: Word> PackedArray<W> {
    /// Constructs an array of `len` zeroed elements of `elem_bits` bits each.
    ///
    /// # Errors
    ///
    /// - [`BitArrayError::ElementWidth`] if `elem_bits` is zero, not a power of
    ///   two, or wider than `W`.
    /// - [`BitArrayError::CapacityOverflow`] if `len * elem_bits` does not fit
    ///   in a `usize`.
    pub fn new(len: usize, elem_bits: u32) -> Result<Self, BitArrayError> {
        if !elem_bits.is_power_of_two() || elem_bits > W::BITS {
            return Err(BitArrayError::ElementWidth {
                elem_bits,
                word_bits: W::BITS,
            });
        }
        let total_bits = len
            .checked_mul(elem_bits as usize)
            .ok_or(BitArrayError::CapacityOverflow { len, elem_bits })?;
        let size = W::LAYOUT.words_for(total_bits);
        debug!(len, elem_bits, words = size, "allocating packed array");

        Ok(PackedArray {
            words: vec![W::ZERO; size].into_boxed_slice(),
            len,
            elem_bits,
            elem_shift: elem_bits.trailing_zeros(),
            elem_mask: !W::ZERO >> (W::BITS - elem_bits),
        })
    }

    #[inline]
    fn locate(&self, index: usize) -> Result<(usize, u32), BitArrayError> {
        if index >= self.len {
            return Err(BitArrayError::IndexOutOfRange {
                index,
                limit: self.len,
            });
        }
        Ok(W::LAYOUT.locate(index << self.elem_shift))
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Result<W, BitArrayError> {
        let (array_index, offset) = self.locate(index)?;
        Ok((self.words[array_index] >> offset) & self.elem_mask)
    }

    /// Overwrites the element at `index` with `value`.
    ///
    /// # Errors
    ///
    /// [`BitArrayError::ValueOutOfRange`] if `value` exceeds
    /// [`max_value`](Self::max_value); the element keeps its previous value.
    pub fn set(&mut self, index: usize, value: W) -> Result<(), BitArrayError> {
        let (array_index, offset) = self.locate(index)?;
        if value > self.elem_mask {
            return Err(BitArrayError::ValueOutOfRange {
                index,
                elem_bits: self.elem_bits,
            });
        }
        let word = &mut self.words[array_index];
        *word &= !(self.elem_mask << offset);
        *word |= value << offset;
        Ok(())
    }

    /// Adds one to the element at `index`, saturating at
    /// [`max_value`](Self::max_value). Returns the new value.
    pub fn inc(&mut self, index: usize) -> Result<W, BitArrayError> {
        let value = self.get(index)?;
        if value == self.elem_mask {
            return Ok(value);
        }
        self.set(index, value + W::ONE)?;
        Ok(value + W::ONE)
    }

    /// Subtracts one from the element at `index`, saturating at zero.
    /// Returns the new value.
    pub fn dec(&mut self, index: usize) -> Result<W, BitArrayError> {
        let value = self.get(index)?;
        if value == W::ZERO {
            return Ok(value);
        }
        self.set(index, value - W::ONE)?;
        Ok(value - W::ONE)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn elem_bits(&self) -> u32 {
        self.elem_bits
    }

    /// Largest value an element can hold, `2^elem_bits - 1`.
    pub fn max_value(&self) -> W {
        self.elem_mask
    }

    pub fn words(&self) -> &[W] {
        &self.words
    }

    /// Emits every backing word at `debug` level.
    pub fn dump(&self) {
        for (i, word) in self.words.iter().enumerate() {
            debug!(word = i, value = %format!("{:#x}", word), "packed word");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::BitSet;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn rejects_bad_element_widths() {
        for elem_bits in [0u32, 3, 5, 6, 12, 128] {
            assert_eq!(
                PackedArray::<u64>::new(8, elem_bits),
                Err(BitArrayError::ElementWidth {
                    elem_bits,
                    word_bits: 64
                })
            );
        }
        assert!(PackedArray::<u8>::new(8, 16).is_err());
        assert!(PackedArray::<u8>::new(8, 8).is_ok());
    }

    #[test]
    fn rejects_overflowing_capacity() {
        assert_eq!(
            PackedArray::<u64>::new(usize::MAX, 2),
            Err(BitArrayError::CapacityOverflow {
                len: usize::MAX,
                elem_bits: 2
            })
        );
    }

    #[test]
    fn storage_rounds_up_to_whole_words() {
        assert_eq!(PackedArray::<u64>::new(0, 4).unwrap().words().len(), 0);
        assert_eq!(PackedArray::<u64>::new(16, 4).unwrap().words().len(), 1);
        assert_eq!(PackedArray::<u64>::new(17, 4).unwrap().words().len(), 2);
        assert_eq!(PackedArray::<u32>::new(3, 32).unwrap().words().len(), 3);

        let empty = PackedArray::<u64>::new(0, 8).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.elem_bits(), 8);
    }

    #[test]
    fn starts_zeroed() {
        for elem_bits in [1u32, 2, 4, 8, 16, 32, 64] {
            let array = PackedArray::<u64>::new(37, elem_bits).unwrap();
            for i in 0..array.len() {
                assert_eq!(array.get(i).unwrap(), 0, "elem {} width {}", i, elem_bits);
            }
        }
    }

    #[test]
    fn max_value_matches_width() {
        assert_eq!(PackedArray::<u64>::new(1, 1).unwrap().max_value(), 1);
        assert_eq!(PackedArray::<u64>::new(1, 4).unwrap().max_value(), 15);
        assert_eq!(PackedArray::<u64>::new(1, 64).unwrap().max_value(), u64::MAX);
        assert_eq!(PackedArray::<u8>::new(1, 8).unwrap().max_value(), u8::MAX);
    }

    #[test]
    fn oversized_values_are_rejected_and_ignored() {
        let mut array = PackedArray::<u64>::new(10, 4).unwrap();
        array.set(2, 5).unwrap();
        assert_eq!(
            array.set(2, 16),
            Err(BitArrayError::ValueOutOfRange {
                index: 2,
                elem_bits: 4
            })
        );
        assert_eq!(array.get(2).unwrap(), 5);
    }

    #[test]
    fn neighbours_are_not_disturbed() {
        let mut array = PackedArray::<u32>::new(8, 4).unwrap();
        array.set(3, 0xf).unwrap();
        array.set(4, 0xa).unwrap();
        assert_eq!(array.words(), &[0x000a_f000]);

        array.set(3, 0).unwrap();
        assert_eq!(array.get(4).unwrap(), 0xa);
        assert_eq!(array.words(), &[0x000a_0000]);
    }

    #[test]
    fn inc_and_dec_saturate() {
        let mut array = PackedArray::<u64>::new(4, 2).unwrap();
        assert_eq!(array.dec(1).unwrap(), 0);
        assert_eq!(array.inc(1).unwrap(), 1);
        assert_eq!(array.inc(1).unwrap(), 2);
        assert_eq!(array.inc(1).unwrap(), 3);
        assert_eq!(array.inc(1).unwrap(), 3);
        assert_eq!(array.dec(1).unwrap(), 2);
        assert_eq!(array.get(0).unwrap(), 0);
        assert_eq!(array.get(2).unwrap(), 0);
    }

    #[test]
    fn full_width_elements_use_whole_words() {
        let mut array = PackedArray::<u16>::new(3, 16).unwrap();
        array.set(1, u16::MAX).unwrap();
        assert_eq!(array.inc(1).unwrap(), u16::MAX);
        assert_eq!(array.words(), &[0, u16::MAX, 0]);
    }

    #[test]
    fn out_of_range_index_uses_len_as_limit() {
        let mut array = PackedArray::<u64>::new(5, 8).unwrap();
        let err = BitArrayError::IndexOutOfRange { index: 5, limit: 5 };
        assert_eq!(array.get(5), Err(err));
        assert_eq!(array.set(5, 1), Err(err));
        assert_eq!(array.inc(5), Err(err));
        assert_eq!(array.dec(5), Err(err));
    }

    #[test]
    fn one_bit_elements_share_the_bit_set_layout() {
        let mut array = PackedArray::<u64>::new(130, 1).unwrap();
        let mut bits = BitSet::<u64>::new(130);
        for i in (0..130).step_by(7) {
            array.set(i, 1).unwrap();
            bits.set(i).unwrap();
        }
        assert_eq!(array.words(), bits.words());
    }

    #[test]
    fn random_fill_round_trips() {
        let mut rng = StdRng::seed_from_u64(42);
        for elem_bits in [1u32, 2, 4, 8, 16, 32] {
            let mut array = PackedArray::<u64>::new(301, elem_bits).unwrap();
            let max = array.max_value();
            let expected: Vec<u64> = (0..array.len()).map(|_| rng.random_range(0..=max)).collect();
            for (i, &value) in expected.iter().enumerate() {
                array.set(i, value).unwrap();
            }
            for (i, &value) in expected.iter().enumerate() {
                assert_eq!(array.get(i).unwrap(), value, "elem {} width {}", i, elem_bits);
            }
        }
    }

    #[test]
    fn dump_does_not_panic() {
        let mut array = PackedArray::<u8>::new(6, 2).unwrap();
        array.inc(5).unwrap();
        array.dump();
    }
}
