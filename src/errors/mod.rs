//! Error types returned by histogram construction and recording.

use std::error::Error;
use std::fmt;

/// Errors that can occur when creating a histogram.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum CreationError {
    /// Lowest trackable value must be >= 1. The unit magnitude is the base-2 logarithm of the
    /// lowest value, which is undefined for 0.
    LowIsZero,
    /// Number of significant figures must be in the range `[1, 5]`. It is capped at 5 because 5
    /// significant figures is already more than almost anyone needs, and memory usage scales
    /// exponentially as this increases.
    SigFigOutOfRange,
    /// Cannot represent sigfig worth of values beyond the lowest trackable value. Decrease the
    /// significant figures, lowest trackable value, or both.
    ///
    /// The exponent of the largest power of two that is not larger than the lowest value and the
    /// bits needed to represent the requested significant figures must sum to 63 or less.
    CannotRepresentSigFigBeyondLow,
    /// The `usize` type is too small to represent the desired configuration. Use fewer significant
    /// figures or a lower max.
    UsizeTypeTooSmall,
}

impl fmt::Display for CreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationError::LowIsZero => write!(f, "lowest trackable value must be >= 1"),
            CreationError::SigFigOutOfRange => {
                write!(f, "number of significant figures must be in [1, 5]")
            }
            CreationError::CannotRepresentSigFigBeyondLow => write!(
                f,
                "cannot represent the requested significant figures above the lowest trackable value"
            ),
            CreationError::UsizeTypeTooSmall => {
                write!(f, "counts array length does not fit in usize")
            }
        }
    }
}

impl Error for CreationError {}

/// Errors that can occur while recording a value and its associated count.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum RecordError {
    /// The value to record is above the highest trackable value, or maps outside the histogram's
    /// counts array. The histogram is left unchanged.
    ValueOutOfRange,
    /// The slot for the value, or the histogram's total count, cannot hold that many more samples
    /// in its counter type. The histogram is left unchanged.
    CountOverflow,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::ValueOutOfRange => write!(f, "value is outside the trackable range"),
            RecordError::CountOverflow => write!(f, "count would overflow the counter"),
        }
    }
}

impl Error for RecordError {}
