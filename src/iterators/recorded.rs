//! Iterate over slots that hold samples.

use crate::core::counter::Counter;
use crate::iterators::{all, IterationValue};
use crate::Histogram;

/// An iterator that will yield only bins with at least one sample.
#[derive(Debug, Clone)]
pub struct Iter<'a, C: Counter> {
    inner: all::Iter<'a, C>,
}

impl<'a, C: Counter> Iter<'a, C> {
    /// Construct a new sampled iterator. See `Histogram::iter_recorded` for details.
    pub fn new(hist: &'a Histogram<C>) -> Iter<'a, C> {
        Iter {
            inner: all::Iter::new(hist),
        }
    }
}

impl<'a, C: Counter> Iterator for Iter<'a, C> {
    type Item = IterationValue<C>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find(|v| v.count_at_value() != C::zero())
    }
}
