use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SweepStats {
    arrays_checked: usize,
    operations: usize,
    rejections: usize,
}

impl SweepStats {
    pub fn new() -> Self {
        SweepStats {
            arrays_checked: 0,
            operations: 0,
            rejections: 0,
        }
    }

    /// Record that one more container went through a full check
    pub fn bump_arrays(&mut self) {
        self.arrays_checked += 1
    }

    /// Record a batch of reads and writes performed against a container
    pub fn bump_operations(&mut self, amount: usize) {
        self.operations += amount
    }

    /// Record that an invalid access was correctly refused
    pub fn bump_rejections(&mut self) {
        self.rejections += 1
    }

    pub fn get_arrays_checked(&self) -> usize {
        self.arrays_checked
    }

    pub fn get_operations(&self) -> usize {
        self.operations
    }

    pub fn get_rejections(&self) -> usize {
        self.rejections
    }

    pub fn merge(&self, other: &SweepStats) -> SweepStats {
        SweepStats {
            arrays_checked: self.arrays_checked + other.arrays_checked,
            operations: self.operations + other.operations,
            rejections: self.rejections + other.rejections,
        }
    }

    pub fn log_summary(&self, word_bits: u32) {
        info!(
            word_bits,
            arrays = self.arrays_checked,
            operations = self.operations,
            rejections = self.rejections,
            "sweep finished"
        );
    }
}

impl Default for SweepStats {
    fn default() -> Self {
        SweepStats::new()
    }
}
