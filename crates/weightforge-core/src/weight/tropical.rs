//! Tropical semiring: min-plus over floating values.

use crate::error::WeightError;
use crate::weight::float::{approx_eq_float, quantize_float, FloatT};
use crate::weight::text::{TextReader, TextWriter};
use crate::weight::traits::{Weight, WeightProperties};

/// Weight in the tropical semiring: `Plus` = min, `Times` = +.
///
/// `Zero` is +∞ and `One` is 0. This is the shortest-path semiring: path
/// weights add along a path and the best (minimum) survives `Plus`.
///
/// # Examples
///
/// ```
/// use weightforge_core::weight::{TropicalWeight, Weight};
///
/// let a = TropicalWeight::from(2.0f32);
/// let b = TropicalWeight::from(3.0f32);
/// assert_eq!(a.plus(&b), TropicalWeight::from(2.0f32));
/// assert_eq!(a.times(&b), TropicalWeight::from(5.0f32));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TropicalWeight<T: FloatT = f32> {
    value: T,
}

impl<T: FloatT> TropicalWeight<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        TropicalWeight { value }
    }

    #[inline]
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: FloatT> Weight for TropicalWeight<T> {
    type Reverse = Self;

    #[inline]
    fn zero() -> Self {
        TropicalWeight::new(T::infinity())
    }

    #[inline]
    fn one() -> Self {
        TropicalWeight::new(T::zero())
    }

    #[inline]
    fn no_weight() -> Self {
        TropicalWeight::new(T::nan())
    }

    fn plus(&self, rhs: &Self) -> Self {
        if !self.is_member() || !rhs.is_member() {
            return Self::no_weight();
        }
        if self.value < rhs.value {
            *self
        } else {
            *rhs
        }
    }

    fn times(&self, rhs: &Self) -> Self {
        if !self.is_member() || !rhs.is_member() {
            return Self::no_weight();
        }
        TropicalWeight::new(self.value + rhs.value)
    }

    fn is_member(&self) -> bool {
        !self.value.is_nan() && self.value != T::neg_infinity()
    }

    fn approx_eq(&self, rhs: &Self, delta: f32) -> bool {
        approx_eq_float(self.value, rhs.value, delta)
    }

    fn quantize(&self, delta: f32) -> Self {
        TropicalWeight::new(quantize_float(self.value, delta))
    }

    fn reverse(&self) -> Self {
        *self
    }

    fn properties() -> WeightProperties {
        WeightProperties {
            left_semiring: true,
            right_semiring: true,
            commutative: true,
            idempotent: true,
            path: true,
        }
    }

    fn type_name() -> String {
        format!("tropical{}", T::SUFFIX)
    }

    impl_scalar_weight_text!(TropicalWeight);
}

impl_scalar_weight_interop!(TropicalWeight);
