use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::bits::{BitSet, Word};
use crate::error::BitArrayError;
use crate::packed::PackedArray;
use crate::verify::SweepStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepParams {
    /// Lengths are drawn strictly below this bound.
    pub max_len: usize,
    /// Largest random stride between two consecutive lengths.
    pub max_step: usize,
    /// Random fills performed per container.
    pub random_runs: usize,
    pub seed: u64,
}

impl Default for SweepParams {
    fn default() -> Self {
        SweepParams {
            max_len: 10_000,
            max_step: 500,
            random_runs: 10,
            seed: 0,
        }
    }
}

/// Lengths to check: starting at 1 and advancing by a random stride in
/// `1..=max_step` while below `max_len`.
pub fn sweep_lengths<R: Rng>(params: &SweepParams, rng: &mut R) -> Vec<usize> {
    let max_step = params.max_step.max(1);
    let mut lengths = Vec::new();
    let mut len = 1;
    while len < params.max_len {
        lengths.push(len);
        len += rng.random_range(1..=max_step);
    }
    lengths
}

/// Every element width a `PackedArray<W>` accepts: the powers of two up to `W::BITS`.
pub fn element_widths<W: Word>() -> impl Iterator<Item = u32> {
    (0..=W::LAYOUT.index_shift).map(|shift| 1u32 << shift)
}

fn expect_value<W: Word>(index: usize, expected: W, found: W) -> Result<(), BitArrayError> {
    if expected != found {
        return Err(BitArrayError::Mismatch {
            index,
            expected: expected.widen(),
            found: found.widen(),
        });
    }
    Ok(())
}

fn expect_bit(index: usize, expected: u8, found: u8) -> Result<(), BitArrayError> {
    expect_value(index, expected, found)
}

fn expect_rejected<T>(index: usize, outcome: Result<T, BitArrayError>) -> Result<(), BitArrayError> {
    match outcome {
        Err(_) => Ok(()),
        Ok(_) => Err(BitArrayError::UnexpectedAccept { index }),
    }
}

/// Runs the zero, alternating-pattern, random-fill and bounds checks against a
/// `BitSet<W>` of `len` bits.
pub fn check_bit_set<W: Word, R: Rng>(
    len: usize,
    random_runs: usize,
    rng: &mut R,
    stats: &mut SweepStats,
) -> Result<(), BitArrayError> {
    let mut bs = BitSet::<W>::new(len);
    let mut ops = 0;

    for i in 0..len {
        expect_bit(i, 0, bs.bit(i)?)?;
    }
    ops += len;

    for i in (0..len).step_by(2) {
        bs.set(i)?;
    }
    for i in 0..len {
        expect_bit(i, (i % 2 == 0) as u8, bs.bit(i)?)?;
    }
    for i in 0..len {
        bs.clear(i)?;
    }
    for (i, &word) in bs.words().iter().enumerate() {
        expect_value(W::LAYOUT.bits_in(i), W::ZERO, word)?;
    }
    ops += 3 * len;

    let mut expected = vec![false; len];
    for _ in 0..random_runs {
        for (i, flag) in expected.iter_mut().enumerate() {
            *flag = rng.random_bool(0.5);
            if *flag {
                bs.set(i)?;
            } else {
                bs.clear(i)?;
            }
        }
        for (i, &flag) in expected.iter().enumerate() {
            expect_bit(i, flag as u8, bs.bit(i)?)?;
        }
        ops += 2 * len;
    }

    let limit = W::LAYOUT.bits_in(bs.word_count());
    expect_rejected(limit, bs.set(limit))?;
    expect_rejected(limit, bs.clear(limit))?;
    expect_rejected(limit, bs.bit(limit))?;
    stats.bump_rejections();

    stats.bump_operations(ops);
    stats.bump_arrays();
    Ok(())
}

/// Runs the zero, saturation, pattern, random-fill and bounds checks against a
/// `PackedArray<W>` of `len` elements of `elem_bits` bits.
pub fn check_packed<W: Word, R: Rng>(
    len: usize,
    elem_bits: u32,
    random_runs: usize,
    rng: &mut R,
    stats: &mut SweepStats,
) -> Result<(), BitArrayError> {
    let mut array = PackedArray::<W>::new(len, elem_bits)?;
    let max = array.max_value();
    let mut ops = 0;

    for i in 0..len {
        expect_value(i, W::ZERO, array.get(i)?)?;
    }
    ops += len;

    for i in 0..len {
        if max != !W::ZERO {
            expect_rejected(i, array.set(i, max + W::ONE))?;
            expect_value(i, W::ZERO, array.get(i)?)?;
        }
        array.set(i, max)?;
        expect_value(i, max, array.get(i)?)?;
        expect_value(i, max, array.inc(i)?)?;
    }
    for i in 0..len {
        expect_value(i, max, array.get(i)?)?;
        array.set(i, W::ZERO)?;
    }
    ops += 6 * len;
    if max != !W::ZERO && len > 0 {
        stats.bump_rejections();
    }

    for i in (0..len).step_by(2) {
        array.inc(i)?;
    }
    for i in 0..len {
        let expected = if i % 2 == 0 { W::ONE } else { W::ZERO };
        expect_value(i, expected, array.get(i)?)?;
    }
    ops += 2 * len;

    let mut expected = vec![W::ZERO; len];
    for _ in 0..random_runs {
        for (i, value) in expected.iter_mut().enumerate() {
            *value = W::truncate_from(rng.random::<u64>()) & max;
            array.set(i, *value)?;
        }
        for (i, &value) in expected.iter().enumerate() {
            expect_value(i, value, array.get(i)?)?;
        }
        ops += 2 * len;
    }

    for i in 0..len {
        array.set(i, W::ONE)?;
        expect_value(i, W::ZERO, array.dec(i)?)?;
        expect_value(i, W::ZERO, array.dec(i)?)?;
    }
    ops += 3 * len;

    expect_rejected(len, array.get(len))?;
    expect_rejected(len, array.set(len, W::ZERO))?;
    stats.bump_rejections();

    stats.bump_operations(ops);
    stats.bump_arrays();
    Ok(())
}

/// Checks a `BitSet<W>` and one `PackedArray<W>` per element width, all of
/// length `len`.
pub fn check_length<W: Word, R: Rng>(
    len: usize,
    random_runs: usize,
    rng: &mut R,
    stats: &mut SweepStats,
) -> Result<(), BitArrayError> {
    debug!(len, word_bits = W::BITS, "checking length");
    check_bit_set::<W, R>(len, random_runs, rng, stats)?;
    for elem_bits in element_widths::<W>() {
        check_packed::<W, R>(len, elem_bits, random_runs, rng, stats)?;
    }
    Ok(())
}

/// Runs a whole sweep for word type `W`, seeded from `params.seed`.
pub fn sweep<W: Word>(params: &SweepParams) -> Result<SweepStats, BitArrayError> {
    sweep_with::<W, _, _>(params, |lengths| lengths)
}

/// Like [`sweep`], but lets the caller wrap the iterator over lengths
/// (e.g. to drive a progress bar).
pub fn sweep_with<W, F, I>(params: &SweepParams, wrap: F) -> Result<SweepStats, BitArrayError>
where
    W: Word,
    F: FnOnce(std::vec::IntoIter<usize>) -> I,
    I: Iterator<Item = usize>,
{
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut stats = SweepStats::new();

    let lengths = sweep_lengths(params, &mut rng);
    info!(
        word_bits = W::BITS,
        lengths = lengths.len(),
        seed = params.seed,
        "starting sweep"
    );
    for len in wrap(lengths.into_iter()) {
        check_length::<W, _>(len, params.random_runs, &mut rng, &mut stats)?;
    }
    Ok(stats)
}
