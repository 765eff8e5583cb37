//! Min-max semiring for bottleneck path problems.

use crate::error::WeightError;
use crate::weight::float::{approx_eq_float, quantize_float, FloatT};
use crate::weight::text::{TextReader, TextWriter};
use crate::weight::traits::{Weight, WeightProperties};

/// Weight in the min-max semiring: `Plus` = min, `Times` = max,
/// `Zero` = +∞, `One` = −∞.
///
/// Both operations are idempotent; both infinities are members.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinMaxWeight<T: FloatT = f32> {
    value: T,
}

impl<T: FloatT> MinMaxWeight<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        MinMaxWeight { value }
    }

    #[inline]
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: FloatT> Weight for MinMaxWeight<T> {
    type Reverse = Self;

    #[inline]
    fn zero() -> Self {
        MinMaxWeight::new(T::infinity())
    }

    #[inline]
    fn one() -> Self {
        MinMaxWeight::new(T::neg_infinity())
    }

    #[inline]
    fn no_weight() -> Self {
        MinMaxWeight::new(T::nan())
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
        if self.value < rhs.value {
            *rhs
        } else {
            *self
        }
    }

    fn is_member(&self) -> bool {
        !self.value.is_nan()
    }

    fn approx_eq(&self, rhs: &Self, delta: f32) -> bool {
        approx_eq_float(self.value, rhs.value, delta)
    }

    fn quantize(&self, delta: f32) -> Self {
        MinMaxWeight::new(quantize_float(self.value, delta))
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
        format!("minmax{}", T::SUFFIX)
    }

    impl_scalar_weight_text!(MinMaxWeight);
}

impl_scalar_weight_interop!(MinMaxWeight);
