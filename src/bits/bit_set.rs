use tracing::debug;

use crate::bits::Word;
use crate::error::BitArrayError;

/// A fixed-capacity set of boolean flags packed into a contiguous
/// buffer of machine words.
///
/// Each bit can be individually set, cleared or queried. Every access is
/// bounds checked against the backing words and fails with
/// [`BitArrayError::IndexOutOfRange`] instead of touching memory past the end.
///
/// # Examples
///
/// ```
/// use bitarray::BitSet;
///
/// let mut bs: BitSet = BitSet::new(10);
/// assert_eq!(bs.bit(3).unwrap(), 0);
///
/// bs.set(3).unwrap();
/// assert_eq!(bs.bit(3).unwrap(), 1);
///
/// bs.clear(3).unwrap();
/// assert_eq!(bs.bit(3).unwrap(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSet<W: Word = usize> {
    /*private*/ words: Box<[W]>,
    /*private*/ capacity: usize,
}

impl<W: Word> BitSet<W> {
    /// Constructs a new [`BitSet`] with space for `bits` bits,
    /// all initialized to zero.
    ///
    /// The backing store is rounded up to a whole number of words; `bits == 0`
    /// yields a set with no words, on which every access is out of range.
    ///
    /// # Examples
    /// ```
    /// use bitarray::BitSet;
    ///
    /// let bs = BitSet::<u64>::new(65);
    /// assert_eq!(bs.word_count(), 2);
    /// assert_eq!(bs.bit(64).unwrap(), 0);
    /// ```
    pub fn new(bits: usize) -> Self {
        let size = W::LAYOUT.words_for(bits);
        debug!(
            capacity = bits,
            words = size,
            word_bits = W::BITS,
            "allocating bit set"
        );
        BitSet {
            words: vec![W::ZERO; size].into_boxed_slice(),
            capacity: bits,
        }
    }

    #[inline]
    fn locate(&self, bit: usize) -> Result<(usize, u32), BitArrayError> {
        let (array_index, bit_position) = W::LAYOUT.locate(bit);
        if array_index >= self.words.len() {
            return Err(BitArrayError::IndexOutOfRange {
                index: bit,
                limit: W::LAYOUT.bits_in(self.words.len()),
            });
        }
        Ok((array_index, bit_position))
    }

    /// Sets the bit at `bit` to `1`. Setting an already set bit is a no-op.
    ///
    /// # Errors
    ///
    /// [`BitArrayError::IndexOutOfRange`] if `bit` maps past the last word.
    ///
    /// # Examples
    /// ```
    /// use bitarray::BitSet;
    ///
    /// let mut bs = BitSet::<u32>::new(4);
    /// bs.set(2).unwrap();
    /// assert_eq!(bs.words(), &[0b100]);
    /// ```
    pub fn set(&mut self, bit: usize) -> Result<(), BitArrayError> {
        let (array_index, bit_position) = self.locate(bit)?;
        self.words[array_index] |= W::ONE << bit_position;
        Ok(())
    }

    /// Clears the bit at `bit` to `0`. Clearing an already cleared bit is a no-op.
    ///
    /// # Errors
    ///
    /// [`BitArrayError::IndexOutOfRange`] if `bit` maps past the last word.
    pub fn clear(&mut self, bit: usize) -> Result<(), BitArrayError> {
        let (array_index, bit_position) = self.locate(bit)?;
        self.words[array_index] &= !(W::ONE << bit_position);
        Ok(())
    }

    /// Returns `1` if the bit at `bit` is set and `0` otherwise.
    ///
    /// # Errors
    ///
    /// [`BitArrayError::IndexOutOfRange`] if `bit` maps past the last word.
    ///
    /// # Examples
    /// ```
    /// use bitarray::BitSet;
    ///
    /// let mut bs = BitSet::<u8>::new(8);
    /// bs.set(7).unwrap();
    /// assert_eq!(bs.bit(7).unwrap(), 1);
    /// assert_eq!(bs.bit(6).unwrap(), 0);
    /// assert!(bs.bit(8).is_err());
    /// ```
    pub fn bit(&self, bit: usize) -> Result<u8, BitArrayError> {
        self.is_set(bit).map(u8::from)
    }

    /// Returns `true` if the bit at `bit` is set.
    pub fn is_set(&self, bit: usize) -> Result<bool, BitArrayError> {
        let (array_index, bit_position) = self.locate(bit)?;
        Ok(self.words[array_index] & (W::ONE << bit_position) != W::ZERO)
    }

    /// The number of bits requested at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of backing words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn word_bits(&self) -> u32 {
        W::BITS
    }

    /// The raw backing words, lowest bit indices first.
    pub fn words(&self) -> &[W] {
        &self.words
    }
}
