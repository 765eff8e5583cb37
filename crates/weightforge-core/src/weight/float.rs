//! Floating representation shared by the scalar weight families.

use std::fmt::{Debug, Display};
use std::str::FromStr;

use num_traits::Float;

/// Default tolerance for approximate equality and the conventional
/// quantization delta.
pub const DELTA: f32 = 1.0 / 1024.0;

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Floating representation usable inside a scalar weight.
///
/// Implemented for `f32` and `f64` only. The two precisions are distinct
/// weight types with distinct type names (`tropical` vs `tropical64`), so
/// they never compare as interchangeable.
pub trait FloatT:
    Float + Debug + Display + FromStr + Send + Sync + sealed::Sealed + 'static
{
    /// Suffix appended to the weight family name for this precision.
    const SUFFIX: &'static str;

    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;

    /// Raw bits widened to 64, for hashing consistent with exact equality.
    fn to_bits64(self) -> u64;
}

impl FloatT for f32 {
    const SUFFIX: &'static str = "";

    fn from_f64(v: f64) -> Self {
        v as f32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn to_bits64(self) -> u64 {
        self.to_bits() as u64
    }
}

impl FloatT for f64 {
    const SUFFIX: &'static str = "64";

    fn from_f64(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn to_bits64(self) -> u64 {
        self.to_bits()
    }
}

/// Maps `v` to the nearest multiple of `delta`.
///
/// Infinities and NaN pass through unchanged. Quantizing before hashing is
/// what makes approximate equality usable as a hash key.
pub(crate) fn quantize_float<T: FloatT>(v: T, delta: f32) -> T {
    if v.is_infinite() || v.is_nan() {
        return v;
    }
    let d = T::from_f64(delta as f64);
    (v / d + T::from_f64(0.5)).floor() * d
}

/// `a ≈ b` within `delta`. Equal infinities compare approximately equal;
/// NaN compares approximately equal to nothing.
pub(crate) fn approx_eq_float<T: FloatT>(a: T, b: T, delta: f32) -> bool {
    let d = T::from_f64(delta as f64);
    a <= b + d && b <= a + d
}

/// Canonical text atom for a scalar value.
pub(crate) fn float_to_atom<T: FloatT>(v: T) -> String {
    if v.is_nan() {
        "BadNumber".to_string()
    } else if v == T::infinity() {
        "Infinity".to_string()
    } else if v == T::neg_infinity() {
        "-Infinity".to_string()
    } else {
        format!("{v}")
    }
}

pub(crate) fn float_from_atom<T: FloatT>(atom: &str) -> Option<T> {
    match atom {
        "Infinity" => Some(T::infinity()),
        "-Infinity" => Some(T::neg_infinity()),
        "BadNumber" => Some(T::nan()),
        _ => atom.parse::<T>().ok(),
    }
}
