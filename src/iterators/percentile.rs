//! Iterate at percentile checkpoints that get denser towards 100%.

use crate::core::counter::Counter;
use crate::iterators::{all, IterationValue};
use crate::Histogram;

/// An iterator that will yield at percentile steps through the histogram's value range.
///
/// Steps start at 0% and get finer as they approach 100%. After the last recorded value, one
/// final step at exactly 100% is yielded.
#[derive(Debug, Clone)]
pub struct Iter<'a, C: Counter> {
    inner: all::Iter<'a, C>,
    // slot the base iterator is currently on
    current: Option<IterationValue<C>>,

    ticks_per_half_distance: u32,
    percentile_to_iterate_to: f64,
    reached_last_recorded_value: bool,
}

impl<'a, C: Counter> Iter<'a, C> {
    /// Construct a new percentile iterator. See `Histogram::iter_percentiles` for details.
    pub fn new(hist: &'a Histogram<C>, ticks_per_half_distance: u32) -> Iter<'a, C> {
        assert!(
            ticks_per_half_distance > 0,
            "Ticks per half distance must be > 0"
        );

        Iter {
            inner: all::Iter::new(hist),
            current: None,
            ticks_per_half_distance,
            percentile_to_iterate_to: 0.0,
            reached_last_recorded_value: false,
        }
    }

    fn advance_percentile_to_iterate_to(&mut self) {
        // The tick size is fixed within each "half the distance to 100%" [from either 0% or from
        // the previous half-distance]. When that half-distance is crossed, the scale changes and
        // the tick size is effectively cut in half.
        let half_distance =
            2_f64.powf((100.0 / (100.0 - self.percentile_to_iterate_to)).log2() + 1.0);
        let percentile_reporting_ticks = f64::from(self.ticks_per_half_distance) * half_distance;
        self.percentile_to_iterate_to += 100.0 / percentile_reporting_ticks;
    }
}

impl<'a, C: Counter> Iterator for Iter<'a, C> {
    type Item = IterationValue<C>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.reached_last_recorded_value {
            return None;
        }

        if self.inner.count_to_index() < self.inner.histogram().count() {
            if self.current.is_none() {
                self.current = self.inner.next();
            }

            while let Some(current) = self.current {
                if current.count_at_value() != C::zero()
                    && self.percentile_to_iterate_to <= current.percentile()
                {
                    let percentile = self.percentile_to_iterate_to;
                    self.advance_percentile_to_iterate_to();
                    return Some(current.at_percentile(percentile));
                }

                match self.inner.next() {
                    Some(next) => self.current = Some(next),
                    None => break,
                }
            }
        }

        // We want one additional last step to 100%
        self.reached_last_recorded_value = true;
        let last = self.current.unwrap_or_else(|| {
            let hist = self.inner.histogram();
            IterationValue::new(0, hist.highest_equivalent(0), C::zero(), 0, 100.0)
        });
        Some(last.at_percentile(100.0))
    }
}
