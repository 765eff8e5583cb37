//! Log semiring: negated-log probabilities under log-sum-exp and +.

use crate::error::WeightError;
use crate::weight::float::{approx_eq_float, quantize_float, FloatT};
use crate::weight::text::{TextReader, TextWriter};
use crate::weight::traits::{Weight, WeightProperties};

/// Weight in the log semiring.
///
/// Values are negated natural logs of probabilities; `Plus` is
/// −log(e⁻ᵃ + e⁻ᵇ) (probability addition) and `Times` is + (probability
/// multiplication). `Zero` is +∞ and `One` is 0. Unlike the tropical
/// semiring, `Plus` is not idempotent, so no natural order exists.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogWeight<T: FloatT = f32> {
    value: T,
}

impl<T: FloatT> LogWeight<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LogWeight { value }
    }

    #[inline]
    pub fn value(&self) -> T {
        self.value
    }
}

/// −log(e⁻ᵃ + e⁻ᵇ) for member values, evaluated from the dominant term
/// to stay accurate when the magnitudes differ widely.
pub(crate) fn log_plus<T: FloatT>(a: T, b: T) -> T {
    if a == T::infinity() {
        return b;
    }
    if b == T::infinity() {
        return a;
    }
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    lo - (lo - hi).exp().ln_1p()
}

impl<T: FloatT> Weight for LogWeight<T> {
    type Reverse = Self;

    #[inline]
    fn zero() -> Self {
        LogWeight::new(T::infinity())
    }

    #[inline]
    fn one() -> Self {
        LogWeight::new(T::zero())
    }

    #[inline]
    fn no_weight() -> Self {
        LogWeight::new(T::nan())
    }

    fn plus(&self, rhs: &Self) -> Self {
        if !self.is_member() || !rhs.is_member() {
            return Self::no_weight();
        }
        LogWeight::new(log_plus(self.value, rhs.value))
    }

    fn times(&self, rhs: &Self) -> Self {
        if !self.is_member() || !rhs.is_member() {
            return Self::no_weight();
        }
        LogWeight::new(self.value + rhs.value)
    }

    fn is_member(&self) -> bool {
        !self.value.is_nan() && self.value != T::neg_infinity()
    }

    fn approx_eq(&self, rhs: &Self, delta: f32) -> bool {
        approx_eq_float(self.value, rhs.value, delta)
    }

    fn quantize(&self, delta: f32) -> Self {
        LogWeight::new(quantize_float(self.value, delta))
    }

    fn reverse(&self) -> Self {
        *self
    }

    fn properties() -> WeightProperties {
        WeightProperties {
            left_semiring: true,
            right_semiring: true,
            commutative: true,
            idempotent: false,
            path: false,
        }
    }

    fn type_name() -> String {
        format!("log{}", T::SUFFIX)
    }

    impl_scalar_weight_text!(LogWeight);
}

impl_scalar_weight_interop!(LogWeight);
