//! Real semiring: plain + and × over floating values.

use crate::error::WeightError;
use crate::weight::float::{approx_eq_float, quantize_float, FloatT};
use crate::weight::text::{TextReader, TextWriter};
use crate::weight::traits::{Weight, WeightProperties};

/// Weight in the real semiring: `Plus` = +, `Times` = ×, `Zero` = 0,
/// `One` = 1. Used for direct probability products.
///
/// Membership is restricted to finite values so that generated members
/// stay closed under both operations.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealWeight<T: FloatT = f32> {
    value: T,
}

impl<T: FloatT> RealWeight<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        RealWeight { value }
    }

    #[inline]
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: FloatT> Weight for RealWeight<T> {
    type Reverse = Self;

    #[inline]
    fn zero() -> Self {
        RealWeight::new(T::zero())
    }

    #[inline]
    fn one() -> Self {
        RealWeight::new(T::one())
    }

    #[inline]
    fn no_weight() -> Self {
        RealWeight::new(T::nan())
    }

    fn plus(&self, rhs: &Self) -> Self {
        if !self.is_member() || !rhs.is_member() {
            return Self::no_weight();
        }
        RealWeight::new(self.value + rhs.value)
    }

    fn times(&self, rhs: &Self) -> Self {
        if !self.is_member() || !rhs.is_member() {
            return Self::no_weight();
        }
        RealWeight::new(self.value * rhs.value)
    }

    fn is_member(&self) -> bool {
        self.value.is_finite()
    }

    fn approx_eq(&self, rhs: &Self, delta: f32) -> bool {
        approx_eq_float(self.value, rhs.value, delta)
    }

    fn quantize(&self, delta: f32) -> Self {
        RealWeight::new(quantize_float(self.value, delta))
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
        format!("real{}", T::SUFFIX)
    }

    impl_scalar_weight_text!(RealWeight);
}

impl_scalar_weight_interop!(RealWeight);
