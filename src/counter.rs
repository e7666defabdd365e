//! Operation counters for comparative benchmarking.
//!
//! Algorithms report two kinds of events to a [`Counter`]:
//! - pixel-buffer accesses (reads/writes of raw pixels or run lengths)
//! - boolean operations (pixel combinations and merge-loop decisions)
//!
//! Counts are observations only and never influence results. Pass `&mut ()`
//! to discard them.

/// Sink for operation counts.
pub trait Counter {
    /// Record `n` pixel-buffer accesses.
    fn pixel_access(&mut self, n: u64);

    /// Record `n` boolean operations.
    fn bool_op(&mut self, n: u64);
}

impl Counter for () {
    #[inline]
    fn pixel_access(&mut self, _n: u64) {}

    #[inline]
    fn bool_op(&mut self, _n: u64) {}
}

/// Accumulating counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpCounts {
    /// Pixel-buffer accesses.
    pub pixel_accesses: u64,
    /// Boolean operations.
    pub bool_ops: u64,
}

impl OpCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero both counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Counter for OpCounts {
    #[inline]
    fn pixel_access(&mut self, n: u64) {
        self.pixel_accesses += n;
    }

    #[inline]
    fn bool_op(&mut self, n: u64) {
        self.bool_ops += n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_and_reset() {
        let mut counts = OpCounts::new();
        counts.pixel_access(3);
        counts.pixel_access(2);
        counts.bool_op(7);
        assert_eq!(counts.pixel_accesses, 5);
        assert_eq!(counts.bool_ops, 7);

        counts.reset();
        assert_eq!(counts, OpCounts::default());
    }

    #[test]
    fn test_unit_counter_discards() {
        Counter::pixel_access(&mut (), 10);
        Counter::bool_op(&mut (), 10);
    }
}
