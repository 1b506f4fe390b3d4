use num_traits::{NumCast, PrimInt};

/// Division where the quotient saturates at `max_quotient` and the excess stays in the
/// remainder. Used to let the long final period of a calendar cycle (the leap century,
/// the leap year of a quadrennium) absorb its extra day without a branch.
pub(crate) trait ClampedDivRem: PrimInt {
    fn clamped_div_rem<Q: PrimInt>(self, divisor: Self, max_quotient: Q) -> (Q, Self);
}

impl<T: PrimInt> ClampedDivRem for T {
    fn clamped_div_rem<Q: PrimInt>(self, divisor: T, max_quotient: Q) -> (Q, T) {
        // A clamp wider than T never bites.
        let max = <T as NumCast>::from(max_quotient).unwrap_or_else(T::max_value);
        let quotient = (self / divisor).min(max);
        let remainder = self - quotient * divisor;
        (<Q as NumCast>::from(quotient).unwrap_or(max_quotient), remainder)
    }
}
