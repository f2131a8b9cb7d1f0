//! `hdrhist` is a fixed-geometry "High Dynamic Range" histogram in the tradition of Gil Tene's
//! HdrHistogram. It records non-negative integer samples (latencies, sizes, queue depths) across a
//! large, configurable value range while keeping the relative error of every reported value below
//! a configurable number of significant decimal digits. Memory use is proportional to the
//! logarithm of the value range, not to the range itself.
//!
//! # How values are stored
//!
//! A histogram is configured with the lowest and highest values it should track and a number of
//! significant figures between 1 and 5. For example, a histogram tracking values between 1 and
//! 3,600,000,000 with 3 significant figures keeps value quantization no larger than 1/1,000th
//! (0.1%) of any value. Used for response times in microseconds, it resolves 1 microsecond up to
//! 1 millisecond, 1 millisecond (or better) up to one second, and 1 second (or better) up to
//! 1,000 seconds. At its maximum tracked value (1 hour) it still resolves 3.6 seconds.
//!
//! Internally the value range is cut into exponential *buckets*, each split into a fixed number of
//! linear *sub-buckets*. Every value maps to exactly one (bucket, sub-bucket) slot in a flat counts
//! array whose length is decided once at construction. All values that share a slot form an
//! *equivalence range*; statistics report a representative of that range (its lowest, highest or
//! median value) instead of the raw sample.
//!
//! # Recording samples
//!
//! ```
//! use hdrhist::Histogram;
//! let mut hist = Histogram::<u64>::new_with_bounds(1, 60 * 60 * 1000, 2).unwrap();
//!
//! // samples are recorded with .record, which errors if the value is out of range
//! hist.record(54321).expect("value 54321 should be in range");
//!
//! // several occurrences of the same value at once
//! hist.record_n(54321, 10).expect("value 54321 should be in range");
//!
//! // if the sampling process is periodic and may stall (coordinated omission), the
//! // self-correcting record method backfills the samples that were never taken.
//! // for example, if the expected sampling interval is 10 msec:
//! hist.record_corrected(54321, 10).expect("value 54321 should be in range");
//! ```
//!
//! The `u64` annotation is the counter type of each slot. Smaller counters (`u8`, `u16`, `u32`)
//! reduce the memory footprint; recording into a slot that is already full fails with
//! [`RecordError::CountOverflow`] instead of losing samples.
//!
//! # Querying samples
//!
//! ```
//! use hdrhist::Histogram;
//! let mut hist = Histogram::<u64>::new_with_max(3_600_000_000, 3).unwrap();
//! for v in 1..=1000 {
//!     hist.record(v).unwrap();
//! }
//!
//! println!("# of samples: {}", hist.count());
//! println!("99.9'th percentile: {}", hist.value_at_percentile(99.9));
//! println!("mean: {:.2} stdev: {:.2}", hist.mean(), hist.stdev());
//! ```
//!
//! Three iterators walk the counts array: [`Histogram::iter_all`] visits every slot,
//! [`Histogram::iter_recorded`] only slots with samples, and [`Histogram::iter_percentiles`] yields
//! percentile checkpoints that get denser towards 100%, which is what
//! [`Histogram::cumulative_distribution`] is built from.
//!
//! ```
//! use hdrhist::Histogram;
//! let mut hist = Histogram::<u64>::new_with_max(3_600_000_000, 3).unwrap();
//! hist.record(100).unwrap();
//! hist.record(20_000).unwrap();
//!
//! for v in hist.iter_recorded() {
//!     println!("{} samples at {}", v.count_at_value(), v.value_iterated_to());
//! }
//! for bracket in hist.cumulative_distribution() {
//!     println!("{:.3}% -> {}", bracket.quantile, bracket.count);
//! }
//! ```
//!
//! # Limitations and Caveats
//!
//! The histogram is a plain value: recording needs `&mut self` and nothing is synchronized
//! internally. Share it across threads behind a lock, or record into per-thread histograms and
//! [`merge`](Histogram::merge) them. The geometry is fixed; there is no auto-resizing, and no
//! serialization format is provided.

#![deny(missing_docs)]

use serde::{Deserialize, Serialize};
use std::mem;
use tracing::{debug, trace};

mod core;
pub mod errors;
pub mod iterators;

pub use crate::core::counter::Counter;
pub use crate::errors::*;
pub use crate::iterators::IterationValue;

/// `Histogram` is the core data structure in HdrHistogram. It records values, and performs
/// analytics.
///
/// At its heart, it keeps the count for recorded samples in "buckets" of values. The resolution
/// and distribution of these buckets is tuned based on the desired highest trackable value, as
/// well as the user-specified number of significant decimal digits to preserve. The values for the
/// buckets are kept in a way that resembles floats and doubles: there is a mantissa and an
/// exponent, and each bucket represents a different exponent. The "sub-buckets" within a bucket
/// represent different values for the mantissa.
///
/// To a first approximation, the sub-buckets of the first bucket would hold the values `0`, `1`,
/// `2`, `3`, …, the sub-buckets of the second bucket would hold `0`, `2`, `4`, `6`, …, the third
/// would hold `0`, `4`, `8`, and so on. However, the low half of each bucket (except bucket 0) is
/// unnecessary, since those values are already covered by the sub-buckets of all the preceeding
/// buckets. Thus, `Histogram` keeps the top half of every such bucket.
///
/// For the purposes of explanation, consider a `Histogram` with 2048 sub-buckets for every bucket,
/// and a lowest trackable value of 1:
///
/// <pre>
/// The 0th bucket covers 0...2047 in multiples of 1, using all 2048 sub-buckets
/// The 1st bucket covers 2048..4097 in multiples of 2, using only the top 1024 sub-buckets
/// The 2nd bucket covers 4096..8191 in multiple of 4, using only the top 1024 sub-buckets
/// ...
/// </pre>
///
/// Bucket 0 is "special" here. It is the only one that has 2048 entries. All the rest have 1024
/// entries (because their bottom half overlaps with and is already covered by all of the previous
/// buckets put together).
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram<C: Counter> {
    lowest_trackable_value: u64,
    highest_trackable_value: u64,
    significant_figures: u8,

    bucket_count: u32,
    sub_bucket_count: u32,

    // Number of leading zeros in the largest value that fits in bucket 0.
    leading_zero_count_base: u8,
    sub_bucket_half_count_magnitude: u8,

    // Largest k such that 2^k <= lowest trackable value.
    unit_magnitude: u8,
    sub_bucket_half_count: u32,

    // Bits that address a sub-bucket within bucket 0.
    sub_bucket_mask: u64,

    total_count: u64,
    counts: Vec<C>,
}

/// A part of a cumulative distribution: the share of samples (as a percentage) at or below some
/// checkpoint, and the number of samples that share represents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    /// Percentile of the checkpoint, in `[0, 100]`.
    pub quantile: f64,
    /// Cumulative number of samples up to and including the checkpoint.
    pub count: u64,
}

// construction

impl<C: Counter> Histogram<C> {
    /// Construct a `Histogram` that tracks values in `[1, high]` with `sigfig` significant figures.
    ///
    /// See [`new_with_bounds`](Histogram::new_with_bounds).
    pub fn new_with_max(high: u64, sigfig: u8) -> Result<Histogram<C>, CreationError> {
        Self::new_with_bounds(1, high, sigfig)
    }

    /// Construct a `Histogram` given the lowest and highest values to be tracked and a number of
    /// significant decimal digits.
    ///
    /// `low` is the lowest value that can be discerned (distinguished from 0) by the histogram. It
    /// must be `>= 1`, and is effectively rounded down to the nearest power of two: when tracking
    /// time values stated in nanoseconds where the minimal accuracy required is a microsecond, the
    /// proper value for `low` would be 1000.
    ///
    /// `high` is the highest value to be tracked. Recording anything larger fails.
    ///
    /// `sigfig` is the number of significant decimal digits to which the histogram will maintain
    /// value resolution and separation. Must be in `[1, 5]`.
    pub fn new_with_bounds(low: u64, high: u64, sigfig: u8) -> Result<Histogram<C>, CreationError> {
        if low < 1 {
            return Err(CreationError::LowIsZero);
        }
        if !(1..=5).contains(&sigfig) {
            return Err(CreationError::SigFigOutOfRange);
        }

        // Given a 3 decimal point accuracy, the expectation is obviously for "+/- 1 unit at 1000".
        // It also means that it's "ok to be +/- 2 units at 2000". The "tricky" thing is that it is
        // NOT ok to be +/- 2 units at 1999. Only starting at 2000. So internally, we need to
        // maintain single unit resolution to 2x 10^decimal_points.
        let largest_value_with_single_unit_resolution = 2 * 10_u32.pow(u32::from(sigfig));

        // Both logarithms are narrowed to f32 before dividing. Other HdrHistogram implementations
        // derive the sub-bucket magnitude this way, and histograms built by them have to agree on
        // geometry to be merged.
        let numerator = f64::from(largest_value_with_single_unit_resolution).ln() as f32;
        let denominator = 2_f64.ln() as f32;
        let sub_bucket_count_magnitude = f64::from(numerator / denominator).ceil() as u8;
        let sub_bucket_half_count_magnitude = sub_bucket_count_magnitude.max(1) - 1;

        // floor(log2(low)); low >= 1 so there is at least one set bit
        let unit_magnitude = (63 - low.leading_zeros()) as u8;

        if u32::from(unit_magnitude) + u32::from(sub_bucket_half_count_magnitude) + 1 > 63 {
            // the sub-bucket mask would not fit in a u64
            return Err(CreationError::CannotRepresentSigFigBeyondLow);
        }

        let sub_bucket_count = 1_u32 << (sub_bucket_half_count_magnitude + 1);
        let sub_bucket_half_count = sub_bucket_count / 2;
        let sub_bucket_mask = (u64::from(sub_bucket_count) - 1) << unit_magnitude;

        let bucket_count = buckets_to_cover(sub_bucket_count, high);
        let len = counts_len_for(bucket_count, sub_bucket_count)?;

        trace!(
            low,
            high,
            sigfig,
            bucket_count,
            sub_bucket_count,
            len,
            "Created histogram."
        );

        Ok(Histogram {
            lowest_trackable_value: low,
            highest_trackable_value: high,
            significant_figures: sigfig,

            bucket_count,
            sub_bucket_count,

            // the bits used by the largest value in bucket 0 are subtracted from 64
            leading_zero_count_base: 64 - unit_magnitude - sub_bucket_half_count_magnitude - 1,
            sub_bucket_half_count_magnitude,

            unit_magnitude,
            sub_bucket_half_count,

            sub_bucket_mask,

            total_count: 0,
            counts: vec![C::zero(); len],
        })
    }

    /// Construct an empty histogram with the same range settings as a given source histogram.
    pub fn new_from<F: Counter>(source: &Histogram<F>) -> Histogram<C> {
        Histogram {
            lowest_trackable_value: source.lowest_trackable_value,
            highest_trackable_value: source.highest_trackable_value,
            significant_figures: source.significant_figures,
            bucket_count: source.bucket_count,
            sub_bucket_count: source.sub_bucket_count,
            leading_zero_count_base: source.leading_zero_count_base,
            sub_bucket_half_count_magnitude: source.sub_bucket_half_count_magnitude,
            unit_magnitude: source.unit_magnitude,
            sub_bucket_half_count: source.sub_bucket_half_count,
            sub_bucket_mask: source.sub_bucket_mask,
            total_count: 0,
            counts: vec![C::zero(); source.counts.len()],
        }
    }
}

/// Number of buckets needed so that the top sub-bucket of the last bucket reaches `value`.
fn buckets_to_cover(sub_bucket_count: u32, value: u64) -> u32 {
    // u128 so the doubling can run past u64::MAX
    let mut trackable_value = u128::from(sub_bucket_count - 1);
    let mut buckets_needed = 1;
    while trackable_value < u128::from(value) {
        trackable_value <<= 1;
        buckets_needed += 1;
    }
    buckets_needed
}

/// If we have N such that sub_bucket_count * 2^N > max value, we need storage for N+1 buckets,
/// each with enough slots to hold the top half of the sub_bucket_count (the lower half is covered
/// by previous buckets), and the +1 being used for the lower half of the 0'th bucket.
fn counts_len_for(bucket_count: u32, sub_bucket_count: u32) -> Result<usize, CreationError> {
    (bucket_count as usize)
        .checked_add(1)
        .and_then(|buckets| buckets.checked_mul(sub_bucket_count as usize / 2))
        .ok_or(CreationError::UsizeTypeTooSmall)
}

// accessors

impl<C: Counter> Histogram<C> {
    /// Get the lowest trackable value the histogram was configured with.
    pub fn low(&self) -> u64 {
        self.lowest_trackable_value
    }

    /// Get the highest trackable value the histogram was configured with.
    pub fn high(&self) -> u64 {
        self.highest_trackable_value
    }

    /// Get the number of significant value digits kept by this histogram.
    pub fn sigfig(&self) -> u8 {
        self.significant_figures
    }

    /// Get the total number of samples recorded.
    pub fn count(&self) -> u64 {
        self.total_count
    }

    /// Get the number of slots in the counts array.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no samples have been recorded.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Get the number of exponential buckets.
    pub fn bucket_count(&self) -> u32 {
        self.bucket_count
    }

    /// Get the number of linear sub-buckets in each bucket.
    pub fn sub_bucket_count(&self) -> u32 {
        self.sub_bucket_count
    }

    /// Get the count of recorded samples equivalent to `value`. Values that map outside the
    /// counts array have a count of 0.
    pub fn count_at(&self, value: u64) -> C {
        self.counts
            .get(self.index_for(value))
            .copied()
            .unwrap_or_else(C::zero)
    }

    /// An estimate of the memory used by this histogram, in bytes: the fixed size of the struct
    /// plus one counter per slot.
    pub fn byte_size(&self) -> usize {
        mem::size_of::<Self>() + self.counts.len() * mem::size_of::<C>()
    }
}

// recording

impl<C: Counter> Histogram<C> {
    /// Record `value` in the histogram.
    ///
    /// Returns an error if `value` exceeds the highest trackable value. The histogram is left
    /// unchanged in that case.
    pub fn record(&mut self, value: u64) -> Result<(), RecordError> {
        self.record_n(value, C::one())
    }

    /// Record `count` occurrences of `value` in the histogram.
    ///
    /// Returns `ValueOutOfRange` if `value` exceeds the highest trackable value, and
    /// `CountOverflow` if the slot (or the total count) cannot hold `count` more samples. The
    /// histogram is left unchanged in either case.
    pub fn record_n(&mut self, value: u64, count: C) -> Result<(), RecordError> {
        if value > self.highest_trackable_value {
            return Err(RecordError::ValueOutOfRange);
        }

        let index = self.index_for(value);
        let slot = self
            .counts
            .get_mut(index)
            .ok_or(RecordError::ValueOutOfRange)?;

        let new_count = slot.checked_add(&count).ok_or(RecordError::CountOverflow)?;
        let new_total = self
            .total_count
            .checked_add(count.as_u64())
            .ok_or(RecordError::CountOverflow)?;

        *slot = new_count;
        self.total_count = new_total;
        Ok(())
    }

    /// Record `value` in the histogram while correcting for coordinated omission.
    ///
    /// To compensate for the loss of sampled values when a recorded value is larger than the
    /// expected interval between value samples, the histogram will auto-generate an additional
    /// series of decreasingly-smaller (down to `expected_interval`) value records.
    ///
    /// This only makes sense for processes that sample at a fixed interval (e.g. jitter analysis).
    /// Processes that record ad-hoc values, like the latency of incoming requests, can't take
    /// advantage of it.
    ///
    /// If any recording fails, its error is returned. Synthetic samples recorded before the
    /// failure are kept.
    pub fn record_corrected(&mut self, value: u64, expected_interval: u64) -> Result<(), RecordError> {
        self.record(value)?;
        if expected_interval == 0 || value <= expected_interval {
            return Ok(());
        }

        let mut missing_value = value - expected_interval;
        while missing_value >= expected_interval {
            self.record(missing_value)?;
            missing_value -= expected_interval;
        }
        Ok(())
    }

    /// Add the contents of another histogram to this one, sample by sample.
    ///
    /// Every recorded value of `other` is re-recorded here at the lowest value of its equivalence
    /// range. Samples that this histogram rejects are dropped rather than failing the merge, and
    /// the number of dropped samples is returned. A slot is rejected as a whole when its value is
    /// above [`high`](Histogram::high), even if the counts array would have room for it, or when
    /// adding its count would overflow a counter. Histograms built elsewhere may keep samples
    /// between `high` and the top of their last bucket; those are dropped here.
    pub fn merge(&mut self, other: &Histogram<C>) -> u64 {
        let mut dropped = 0_u64;
        for v in other.iter_recorded() {
            if self.record_n(v.value(), v.count_at_value()).is_err() {
                dropped = dropped.saturating_add(v.count_at_value().as_u64());
            }
        }

        if dropped > 0 {
            debug!(
                dropped,
                high = self.highest_trackable_value,
                "Dropped samples while merging histograms."
            );
        }
        dropped
    }

    /// Reset the contents of this histogram. The configuration is kept.
    pub fn reset(&mut self) {
        for c in self.counts.iter_mut() {
            *c = C::zero();
        }
        self.total_count = 0;
    }
}

// iterators

impl<C: Counter> Histogram<C> {
    /// Iterate through all histogram values using the finest granularity steps supported by the
    /// underlying representation. Every slot is visited whether or not it has samples, and
    /// iteration terminates once all recorded samples have been seen.
    pub fn iter_all(&self) -> iterators::all::Iter<'_, C> {
        iterators::all::Iter::new(self)
    }

    /// Iterate through all recorded histogram values using the finest granularity steps supported
    /// by the underlying representation. Only slots with samples are yielded.
    pub fn iter_recorded(&self) -> iterators::recorded::Iter<'_, C> {
        iterators::recorded::Iter::new(self)
    }

    /// Iterate through histogram values according to percentile levels. The iteration is
    /// performed in steps that start at 0% and reduce their distance to 100% according to
    /// `ticks_per_half_distance`, ultimately reaching 100% when all recorded values are exhausted.
    ///
    /// # Panics
    ///
    /// Panics if `ticks_per_half_distance` is 0.
    pub fn iter_percentiles(&self, ticks_per_half_distance: u32) -> iterators::percentile::Iter<'_, C> {
        iterators::percentile::Iter::new(self, ticks_per_half_distance)
    }
}

// statistics

impl<C: Counter> Histogram<C> {
    /// Get the lowest recorded value level in the histogram, or 0 if nothing has been recorded.
    pub fn min(&self) -> u64 {
        self.iter_recorded()
            .next()
            .map_or(0, |v| self.lowest_equivalent(v.value_iterated_to()))
    }

    /// Get the highest recorded value level in the histogram, or 0 if nothing has been recorded.
    ///
    /// Like [`min`](Histogram::min), this is the lowest value of the equivalence range the
    /// samples landed in.
    pub fn max(&self) -> u64 {
        self.iter_recorded()
            .last()
            .map_or(0, |v| self.lowest_equivalent(v.value_iterated_to()))
    }

    /// Get the computed mean value of all recorded values in the histogram.
    ///
    /// Each sample counts as the median of its equivalence range. The mean of an empty histogram
    /// is undefined and returned as NaN.
    pub fn mean(&self) -> f64 {
        let total = self
            .iter_recorded()
            .fold(0.0_f64, |total, v| {
                total + v.count_at_value().as_f64() * self.median_equivalent(v.value()) as f64
            });
        total / self.total_count as f64
    }

    /// Get the computed standard deviation of all recorded values in the histogram.
    ///
    /// NaN for an empty histogram.
    pub fn stdev(&self) -> f64 {
        let mean = self.mean();
        let geom_dev_tot = self.iter_recorded().fold(0.0_f64, |gdt, v| {
            let dev = self.median_equivalent(v.value()) as f64 - mean;
            gdt + (dev * dev) * v.count_at_value().as_f64()
        });

        (geom_dev_tot / self.total_count as f64).sqrt()
    }

    /// Get the value at a given percentile.
    ///
    /// The value returned is the highest value equivalent to the first slot whose cumulative count
    /// reaches `percentile` percent of all samples (rounded half up). Percentiles above 100 are
    /// treated as 100. Returns 0 for an empty histogram.
    pub fn value_at_percentile(&self, percentile: f64) -> u64 {
        // Truncate down to 100%
        let percentile = percentile.min(100.0);

        // round to nearest
        let count_at_percentile = ((percentile / 100.0) * self.total_count as f64 + 0.5) as u64;
        let count_at_percentile = count_at_percentile.min(self.total_count);

        self.iter_all()
            .find(|v| v.count_to_value() >= count_at_percentile)
            .map_or(0, |v| v.value_iterated_to())
    }

    /// Get the cumulative distribution of the recorded values as an ordered list of brackets.
    ///
    /// Checkpoints are spaced with one tick per half distance to 100%: 0%, 50%, 75%, 87.5%, and so
    /// on, as long as there are samples to reach them. The last bracket is always at 100% with the
    /// total count.
    pub fn cumulative_distribution(&self) -> Vec<Bracket> {
        self.iter_percentiles(1)
            .map(|v| Bracket {
                quantile: v.percentile(),
                count: v.count_to_value(),
            })
            .collect()
    }
}

// equivalence ranges

impl<C: Counter> Histogram<C> {
    /// Get the lowest value that is equivalent to the given value within the histogram's
    /// resolution. Where "equivalent" means that value samples recorded for any two equivalent
    /// values are counted in a common total count.
    pub fn lowest_equivalent(&self, value: u64) -> u64 {
        let bucket_index = self.bucket_for(value);
        let sub_bucket_index = self.sub_bucket_for(value, bucket_index);
        self.value_from_location(bucket_index, sub_bucket_index)
    }

    /// Get the highest value that is equivalent to the given value within the histogram's
    /// resolution.
    pub fn highest_equivalent(&self, value: u64) -> u64 {
        // lowest + len can be 2^64 for the top slot, so the - 1 happens first
        self.lowest_equivalent(value)
            .saturating_add(self.equivalent_range_len(value) - 1)
    }

    /// Get a value that lies in the middle (rounded up) of the range of values equivalent the
    /// given value.
    pub fn median_equivalent(&self, value: u64) -> u64 {
        self.lowest_equivalent(value)
            .saturating_add(self.equivalent_range_len(value) >> 1)
    }

    /// Get the next value that is not equivalent to the given value within the histogram's
    /// resolution. Saturates at `u64::MAX`.
    pub fn next_non_equivalent(&self, value: u64) -> u64 {
        self.lowest_equivalent(value)
            .saturating_add(self.equivalent_range_len(value))
    }

    /// Get the size (in value units) of the range of values that are equivalent to the given value
    /// within the histogram's resolution.
    pub fn equivalent_range_len(&self, value: u64) -> u64 {
        let bucket_index = self.bucket_for(value);
        let sub_bucket_index = self.sub_bucket_for(value, bucket_index);
        // a sub-bucket index past the top of its bucket is at the next bucket's resolution
        if sub_bucket_index >= self.sub_bucket_count {
            1_u64 << (u32::from(self.unit_magnitude) + bucket_index + 1)
        } else {
            1_u64 << (u32::from(self.unit_magnitude) + bucket_index)
        }
    }

    /// Determine if two values are equivalent with the histogram's resolution.
    pub fn equivalent(&self, value1: u64, value2: u64) -> bool {
        self.lowest_equivalent(value1) == self.lowest_equivalent(value2)
    }
}

// index math

impl<C: Counter> Histogram<C> {
    /// Compute the lowest (and therefore highest precision) bucket index whose sub-buckets can
    /// represent the value.
    #[inline]
    fn bucket_for(&self, value: u64) -> u32 {
        // Calculates the number of powers of two by which the value is greater than the biggest
        // value that fits in bucket 0. This is the bucket index since each successive bucket can
        // hold a value 2x greater. The mask maps small values to bucket 0.
        u32::from(self.leading_zero_count_base) - (value | self.sub_bucket_mask).leading_zeros()
    }

    /// For bucket_index 0, this is just value, so it may be anywhere in 0 to sub_bucket_count.
    /// For other bucket_index, this will always end up in the top half of sub_bucket_count.
    #[inline]
    fn sub_bucket_for(&self, value: u64, bucket_index: u32) -> u32 {
        (value >> (bucket_index + u32::from(self.unit_magnitude))) as u32
    }

    #[inline]
    pub(crate) fn value_from_location(&self, bucket_index: u32, sub_bucket_index: u32) -> u64 {
        u64::from(sub_bucket_index) << (bucket_index + u32::from(self.unit_magnitude))
    }

    /// Index of the slot for (bucket, sub-bucket). Buckets past the first only use their top half,
    /// so consecutive buckets fold onto each other in the counts array.
    #[inline]
    pub(crate) fn counts_index(&self, bucket_index: u32, sub_bucket_index: u32) -> usize {
        // Calculate the index for the first entry that will be used in the bucket (halfway through
        // sub_bucket_count). For bucket_index 0, all sub_bucket_count entries may be used, but
        // bucket_base_index is still set in the middle.
        let bucket_base_index = (bucket_index as usize + 1) << self.sub_bucket_half_count_magnitude;

        // sub_bucket_index >= sub_bucket_half_count for every bucket but bucket 0, which has twice
        // the room, so adding before subtracting cannot underflow
        bucket_base_index + sub_bucket_index as usize - self.sub_bucket_half_count as usize
    }

    #[inline]
    fn index_for(&self, value: u64) -> usize {
        let bucket_index = self.bucket_for(value);
        let sub_bucket_index = self.sub_bucket_for(value, bucket_index);
        self.counts_index(bucket_index, sub_bucket_index)
    }

    /// Count in the slot at (bucket, sub-bucket). Callers keep `bucket_index < bucket_count`.
    #[inline]
    pub(crate) fn count_at_location(&self, bucket_index: u32, sub_bucket_index: u32) -> C {
        self.counts[self.counts_index(bucket_index, sub_bucket_index)]
    }

    pub(crate) fn sub_bucket_half_count(&self) -> u32 {
        self.sub_bucket_half_count
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
