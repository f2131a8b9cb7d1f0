use num_traits as num;
use std::fmt;

/// The operations a histogram needs from its per-slot counter type.
///
/// Additions are checked: a slot that cannot absorb a count rejects it rather than wrapping.
pub trait Counter:
    num::Num
    + num::ToPrimitive
    + num::FromPrimitive
    + num::CheckedAdd
    + Copy
    + PartialOrd<Self>
    + fmt::Debug
{
    /// Counter as a f64.
    fn as_f64(&self) -> f64;
    /// Counter as a u64.
    fn as_u64(&self) -> u64;
}

macro_rules! impl_counter {
    ($($t:ty),*) => {
        $(
            impl Counter for $t {
                #[inline]
                fn as_f64(&self) -> f64 {
                    *self as f64
                }

                #[inline]
                fn as_u64(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

impl_counter!(u8, u16, u32, u64);
