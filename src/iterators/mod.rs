//! Cursors over a histogram's counts array.
//!
//! Every cursor walks the same (bucket, sub-bucket) address space in ascending value order. The
//! base cursor in [`all`] visits every slot; [`recorded`] and [`percentile`] each own a base
//! cursor and decide which of its slots to yield.

use crate::core::counter::Counter;

pub mod all;
pub mod percentile;
pub mod recorded;

/// One step of a histogram iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationValue<C: Counter> {
    value: u64,
    value_iterated_to: u64,
    count_at_value: C,
    count_to_value: u64,
    percentile: f64,
}

impl<C: Counter> IterationValue<C> {
    pub(crate) fn new(
        value: u64,
        value_iterated_to: u64,
        count_at_value: C,
        count_to_value: u64,
        percentile: f64,
    ) -> IterationValue<C> {
        IterationValue {
            value,
            value_iterated_to,
            count_at_value,
            count_to_value,
            percentile,
        }
    }

    pub(crate) fn at_percentile(self, percentile: f64) -> IterationValue<C> {
        IterationValue { percentile, ..self }
    }

    /// The lowest value of the slot: every sample in the slot is recorded as equivalent to it.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// The highest value equivalent to the slot.
    pub fn value_iterated_to(&self) -> u64 {
        self.value_iterated_to
    }

    /// Number of samples in this slot.
    pub fn count_at_value(&self) -> C {
        self.count_at_value
    }

    /// Number of samples in this slot and every slot before it.
    pub fn count_to_value(&self) -> u64 {
        self.count_to_value
    }

    /// The percentile this step stands for, in `[0, 100]`.
    ///
    /// For the slot-by-slot iterators this is the share of samples at or below the slot. The
    /// percentile iterator reports the checkpoint it reached instead.
    pub fn percentile(&self) -> f64 {
        self.percentile
    }
}
