//! Iterate over every slot, empty or not.

use crate::core::counter::Counter;
use crate::iterators::IterationValue;
use crate::Histogram;

/// An iterator that visits every slot of the histogram, empty or not, in ascending value order.
///
/// Iteration stops after the slot that brings the running count up to the histogram's total, or
/// when the last bucket has been walked.
#[derive(Debug, Clone)]
pub struct Iter<'a, C: Counter> {
    hist: &'a Histogram<C>,

    bucket_index: u32,
    // None until the first step
    sub_bucket_index: Option<u32>,
    count_to_index: u64,
}

impl<'a, C: Counter> Iter<'a, C> {
    /// Construct a new full iterator. See `Histogram::iter_all` for details.
    pub fn new(hist: &'a Histogram<C>) -> Iter<'a, C> {
        Iter {
            hist,
            bucket_index: 0,
            sub_bucket_index: None,
            count_to_index: 0,
        }
    }

    /// Number of samples in the slots visited so far.
    pub(crate) fn count_to_index(&self) -> u64 {
        self.count_to_index
    }

    pub(crate) fn histogram(&self) -> &'a Histogram<C> {
        self.hist
    }
}

impl<'a, C: Counter> Iterator for Iter<'a, C> {
    type Item = IterationValue<C>;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.hist.count();
        if self.count_to_index >= total {
            return None;
        }

        // sub-bucket first; past the top of a bucket, continue at the top half of the next one
        let sub_bucket_index = match self.sub_bucket_index {
            None => 0,
            Some(i) if i + 1 >= self.hist.sub_bucket_count() => {
                self.bucket_index += 1;
                self.hist.sub_bucket_half_count()
            }
            Some(i) => i + 1,
        };
        self.sub_bucket_index = Some(sub_bucket_index);

        if self.bucket_index >= self.hist.bucket_count() {
            return None;
        }

        let count = self
            .hist
            .count_at_location(self.bucket_index, sub_bucket_index);
        self.count_to_index = self.count_to_index.saturating_add(count.as_u64());

        let value = self
            .hist
            .value_from_location(self.bucket_index, sub_bucket_index);
        Some(IterationValue::new(
            value,
            self.hist.highest_equivalent(value),
            count,
            self.count_to_index,
            100.0 * self.count_to_index as f64 / total as f64,
        ))
    }
}
